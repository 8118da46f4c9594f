//! Outer joins: every position of both sequences appears exactly once.
//!
//! [`outer_join`] is the greedy pointer walk with one-step lookahead. At a
//! candidate pair `(i, j)` it compares the current difference against the
//! difference after advancing only `x` and after advancing only `y`, and
//! commits the pair only when neither alternative is strictly closer.
//!
//! When the walk skips ahead on one side and then flips to skip ahead on
//! the other, the skipped position from the previous step is folded into
//! the previous row instead of emitting a new one. A folded row is a full
//! pair and is never folded again.

use std::time::Instant;

use tracing::{debug, trace};

use crate::error::JoinError;
use crate::tolerance::Tolerance;
use crate::types::{Joined, SentinelJoined};

/// What the last emitted row of the greedy walk looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// Full pair, fold, mismatch step or start of the walk.
    Paired,
    /// Lone `x` row emitted because advancing `x` looked closer.
    SkippedX,
    /// Lone `y` row emitted because advancing `y` looked closer.
    SkippedY,
}

/// Outer join of two ascending sequences under `tolerance`.
///
/// Returns at most `x.len() + y.len()` rows. Every index of `x` and of `y`
/// appears exactly once, in increasing order on each side; unmatched
/// positions are paired with `None`.
pub fn outer_join(x: &[f64], y: &[f64], tolerance: Tolerance<'_>) -> Result<Joined, JoinError> {
    let tol = tolerance.broadcast(x.len())?;
    let start = Instant::now();
    let joined = walk_outer(x, y, &tol);
    debug!(
        kind = "outer",
        x_len = x.len(),
        y_len = y.len(),
        rows = joined.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "merge_join"
    );
    Ok(joined)
}

fn walk_outer(x: &[f64], y: &[f64], tol: &[f64]) -> Joined {
    let (lx, ly) = (x.len(), y.len());
    let mut out = Joined::with_capacity(lx + ly);
    let (mut i, mut j) = (0usize, 0usize);
    let mut walk = Walk::Paired;

    while i < lx && j < ly {
        let diff = (x[i] - y[j]).abs();
        let candidate = diff <= tol[i];

        if !candidate {
            // Not a candidate: emit the smaller value on its own.
            walk = Walk::Paired;
            if x[i] <= y[j] {
                out.push(Some(i), None);
                i += 1;
            } else {
                out.push(None, Some(j));
                j += 1;
            }
            continue;
        }

        let xdiff = x.get(i + 1).map_or(f64::INFINITY, |&next| (next - y[j]).abs());
        let ydiff = y.get(j + 1).map_or(f64::INFINITY, |&next| (x[i] - next).abs());

        if xdiff < diff || ydiff < diff {
            if xdiff < ydiff {
                if walk == Walk::SkippedY {
                    trace!(x = i, "fold_x_into_previous_row");
                    out.set_last_x(i);
                    walk = Walk::Paired;
                } else {
                    out.push(Some(i), None);
                    walk = Walk::SkippedX;
                }
                i += 1;
            } else {
                if walk == Walk::SkippedX {
                    trace!(y = j, "fold_y_into_previous_row");
                    out.set_last_y(j);
                    walk = Walk::Paired;
                } else {
                    out.push(None, Some(j));
                    walk = Walk::SkippedY;
                }
                j += 1;
            }
        } else {
            out.push(Some(i), Some(j));
            walk = Walk::Paired;
            i += 1;
            j += 1;
        }
    }

    for i in i..lx {
        out.push(Some(i), None);
    }
    for j in j..ly {
        out.push(None, Some(j));
    }

    out.truncate_capacity();
    out
}

/// Outer join that also considers the diagonal step.
///
/// At a candidate pair `(i, j)`, a single side only advances when its
/// alternative is closer than both the current pair and the pair
/// `(i + 1, j + 1)`. There is no fold-back of previous rows. Unmatched
/// positions use the caller's `nomatch` sentinel.
pub fn outer_join_diagonal(
    x: &[f64],
    y: &[f64],
    tolerance: Tolerance<'_>,
    nomatch: i64,
) -> Result<SentinelJoined, JoinError> {
    let tol = tolerance.broadcast(x.len())?;
    let (lx, ly) = (x.len(), y.len());
    let mut out = SentinelJoined::with_capacity(lx + ly, nomatch);
    let (mut i, mut j) = (0usize, 0usize);

    while i < lx && j < ly {
        let diff = (x[i] - y[j]).abs();

        if diff <= tol[i] {
            let next_x = x.get(i + 1).copied();
            let next_y = y.get(j + 1).copied();
            let dx = next_x.map_or(f64::INFINITY, |nx| (nx - y[j]).abs());
            let dy = next_y.map_or(f64::INFINITY, |ny| (x[i] - ny).abs());
            let dxy = match (next_x, next_y) {
                (Some(nx), Some(ny)) => (nx - ny).abs(),
                _ => f64::INFINITY,
            };

            if (dx < diff && dx < dxy) || (dy < diff && dy < dxy) {
                if dx < dy {
                    out.push(Some(i), None);
                    i += 1;
                } else {
                    out.push(None, Some(j));
                    j += 1;
                }
            } else {
                out.push(Some(i), Some(j));
                i += 1;
                j += 1;
            }
        } else if x[i] <= y[j] {
            out.push(Some(i), None);
            i += 1;
        } else {
            out.push(None, Some(j));
            j += 1;
        }
    }

    for i in i..lx {
        out.push(Some(i), None);
    }
    for j in j..ly {
        out.push(None, Some(j));
    }

    debug!(
        kind = "outer_diagonal",
        x_len = lx,
        y_len = ly,
        rows = out.len(),
        "merge_join"
    );
    Ok(out)
}
