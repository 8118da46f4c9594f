//! Left join on the lookahead walk: exactly one row per `x` position.
//!
//! The cursors move like the outer walk: past the smaller value when the
//! pair is not a candidate, by lookahead otherwise. A row is only ever
//! written for the current `x`. A `y` index is attached to
//! at most one `x` row: when a later `x` claims the same `y` and the walk
//! is not about to move on to the next `y`, the earlier claim is retracted.

use std::time::Instant;

use tracing::{debug, trace};

use crate::error::JoinError;
use crate::tolerance::Tolerance;
use crate::types::Joined;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    X,
    Y,
    Both,
}

/// Left join of two ascending sequences under `tolerance`.
///
/// The result has exactly `x.len()` rows with `x` in original order. `y`
/// positions without a partner are not reported.
pub fn left_join(x: &[f64], y: &[f64], tolerance: Tolerance<'_>) -> Result<Joined, JoinError> {
    let tol = tolerance.broadcast(x.len())?;
    let start = Instant::now();
    let joined = walk_left(x, y, &tol);
    debug!(
        kind = "left",
        x_len = x.len(),
        y_len = y.len(),
        matched = joined.matched_count(),
        elapsed_micros = start.elapsed().as_micros(),
        "merge_join"
    );
    Ok(joined)
}

fn walk_left(x: &[f64], y: &[f64], tol: &[f64]) -> Joined {
    let (lx, ly) = (x.len(), y.len());
    let mut matched: Vec<Option<usize>> = vec![None; lx];
    // (x, y) of the most recent claim
    let mut last_claim: Option<(usize, usize)> = None;
    let (mut i, mut j) = (0usize, 0usize);

    while i < lx && j < ly {
        let diff = (x[i] - y[j]).abs();
        let candidate = diff <= tol[i];

        if !candidate {
            // Not a candidate: move past the smaller value.
            matched[i] = None;
            if x[i] <= y[j] {
                i += 1;
            } else {
                j += 1;
            }
            continue;
        }

        let xdiff = x.get(i + 1).map_or(f64::INFINITY, |&next| (next - y[j]).abs());
        let ydiff = y.get(j + 1).map_or(f64::INFINITY, |&next| (x[i] - next).abs());

        let step = if xdiff < diff || ydiff < diff {
            if xdiff < ydiff {
                Step::X
            } else {
                Step::Y
            }
        } else {
            Step::Both
        };

        matched[i] = Some(j);
        if let Some((prev_x, prev_y)) = last_claim {
            if prev_y == j && prev_x < i && step != Step::Y {
                trace!(x = prev_x, y = j, "retract_claim");
                matched[prev_x] = None;
            }
        }
        last_claim = Some((i, j));

        match step {
            Step::X => i += 1,
            Step::Y => j += 1,
            Step::Both => {
                i += 1;
                j += 1;
            }
        }
    }

    Joined {
        x: (0..lx).map(Some).collect(),
        y: matched,
    }
}
