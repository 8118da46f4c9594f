//! Result packaging for the joins.
//!
//! Two sentinel conventions coexist and are not interchangeable:
//!
//! - [`Joined`] marks "no corresponding index" with `None` (the missing
//!   marker). Produced by the lookahead walks.
//! - [`SentinelJoined`] marks it with a caller-chosen integer. Produced by
//!   the closest-match joins and the diagonal outer walk.
//!
//! Convert between them explicitly with [`SentinelJoined::into_joined`].

use serde::{Deserialize, Serialize};

/// Two parallel index vectors; row `k` pairs `x[k]` with `y[k]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joined {
    /// 0-based indices into the `x` sequence, `None` when unmatched.
    pub x: Vec<Option<usize>>,
    /// 0-based indices into the `y` sequence, `None` when unmatched.
    pub y: Vec<Option<usize>>,
}

impl Joined {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, x: Option<usize>, y: Option<usize>) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Overwrite the `x` side of the last emitted row.
    pub(crate) fn set_last_x(&mut self, index: usize) {
        if let Some(last) = self.x.last_mut() {
            *last = Some(index);
        }
    }

    /// Overwrite the `y` side of the last emitted row.
    pub(crate) fn set_last_y(&mut self, index: usize) {
        if let Some(last) = self.y.last_mut() {
            *last = Some(index);
        }
    }

    /// Release the worst-case capacity reserved during the walk.
    pub(crate) fn truncate_capacity(&mut self) {
        self.x.shrink_to_fit();
        self.y.shrink_to_fit();
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate rows as `(x, y)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Option<usize>, Option<usize>)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Rows where both sides are present.
    pub fn matched(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs().filter_map(|(x, y)| Some((x?, y?)))
    }

    /// Number of rows where both sides are present.
    pub fn matched_count(&self) -> usize {
        self.matched().count()
    }
}

/// Two parallel index vectors using a caller-chosen `nomatch` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentinelJoined {
    /// 0-based indices into `x`, or `nomatch`.
    pub x: Vec<i64>,
    /// 0-based indices into `y`, or `nomatch`.
    pub y: Vec<i64>,
    /// The sentinel used for unmatched positions.
    pub nomatch: i64,
}

impl SentinelJoined {
    pub(crate) fn with_capacity(capacity: usize, nomatch: i64) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            nomatch,
        }
    }

    pub(crate) fn push(&mut self, x: Option<usize>, y: Option<usize>) {
        self.x.push(self.encode(x));
        self.y.push(self.encode(y));
    }

    fn encode(&self, index: Option<usize>) -> i64 {
        index.map_or(self.nomatch, |i| i as i64)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Swap the two sides, e.g. to present a right join in the caller's
    /// `x`/`y` orientation.
    pub fn swap_sides(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            nomatch: self.nomatch,
        }
    }

    /// Re-express the rows with the missing marker (`None`) instead of the
    /// integer sentinel.
    ///
    /// Every value must be `nomatch` or a non-negative index. A negative
    /// value other than `nomatch` means the rows were built with a different
    /// sentinel; debug builds panic on it.
    pub fn into_joined(self) -> Joined {
        let nomatch = self.nomatch;
        let decode = |v: i64| {
            if v == nomatch {
                return None;
            }
            debug_assert!(v >= 0, "value {v} is neither an index nor the sentinel {nomatch}");
            usize::try_from(v).ok()
        };
        Joined {
            x: self.x.into_iter().map(decode).collect(),
            y: self.y.into_iter().map(decode).collect(),
        }
    }
}
