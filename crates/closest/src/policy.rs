//! Duplicate resolution policies.
//!
//! Several query values can share the same nearest table element. The
//! policy decides which of them keep the match.

use serde::{Deserialize, Serialize};

use crate::nearest::Nearest;

/// How to resolve table elements claimed by more than one query value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// The first query claiming a table element keeps it; later claims on
    /// the same element are dropped.
    Keep,
    /// Only the query with the smallest difference keeps the table element.
    /// The first query wins on equal differences.
    #[default]
    Closest,
    /// Drop the match for every query whose table element is claimed more
    /// than once.
    Remove,
}

impl DuplicatePolicy {
    /// Stable lowercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Keep => "keep",
            DuplicatePolicy::Closest => "closest",
            DuplicatePolicy::Remove => "remove",
        }
    }

    pub(crate) fn apply(&self, hits: &[Option<Nearest>], table_len: usize) -> Vec<Option<usize>> {
        match self {
            DuplicatePolicy::Keep => keep_first(hits, table_len),
            DuplicatePolicy::Closest => keep_closest(hits, table_len),
            DuplicatePolicy::Remove => remove_shared(hits, table_len),
        }
    }
}

fn keep_first(hits: &[Option<Nearest>], table_len: usize) -> Vec<Option<usize>> {
    let mut taken = vec![false; table_len];
    hits.iter()
        .map(|hit| {
            let n = (*hit)?;
            if std::mem::replace(&mut taken[n.index], true) {
                None
            } else {
                Some(n.index)
            }
        })
        .collect()
}

fn keep_closest(hits: &[Option<Nearest>], table_len: usize) -> Vec<Option<usize>> {
    // owner[j] = query index currently holding table element j
    let mut owner: Vec<Option<usize>> = vec![None; table_len];
    for (i, hit) in hits.iter().enumerate() {
        let Some(hit) = hit else { continue };
        let slot = &mut owner[hit.index];
        match *slot {
            Some(current) => {
                let held = hits[current].map_or(f64::INFINITY, |n| n.diff);
                if hit.diff < held {
                    *slot = Some(i);
                }
            }
            None => *slot = Some(i),
        }
    }

    hits.iter()
        .enumerate()
        .map(|(i, hit)| hit.and_then(|n| (owner[n.index] == Some(i)).then_some(n.index)))
        .collect()
}

fn remove_shared(hits: &[Option<Nearest>], table_len: usize) -> Vec<Option<usize>> {
    let mut claims = vec![0u32; table_len];
    for hit in hits.iter().flatten() {
        claims[hit.index] += 1;
    }
    hits.iter()
        .map(|hit| hit.and_then(|n| (claims[n.index] == 1).then_some(n.index)))
        .collect()
}
