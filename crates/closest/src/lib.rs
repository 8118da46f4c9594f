//! # seqjoin closest-match lookup
//!
//! For every value of an ascending query sequence `x`, find the closest
//! value of an ascending `table` within a per-query tolerance, then resolve
//! table elements claimed by more than one query according to a
//! [`DuplicatePolicy`].
//!
//! The merge crate consumes this through the [`ClosestResolver`] trait, so
//! callers can plug in their own lookup if the built-in policies do not fit.
//!
//! ## Contract
//!
//! - `x` and `table` are sorted increasingly and contain no NaN. This is
//!   not checked.
//! - `tolerance.len() == x.len()`; a mismatch is reported as
//!   [`ClosestError::ToleranceLength`] before any work is done.
//! - A match requires `|x[i] - table[j]| <= tolerance[i]`.
//!
//! ## Example
//!
//! ```
//! use closest::{closest, DuplicatePolicy};
//!
//! // 1.6 and 2.05 both land on 2.0; 2.05 is closer.
//! let x = [1.1, 1.6, 2.05];
//! let table = [1.0, 2.0, 3.0];
//! let tol = [0.5; 3];
//!
//! assert_eq!(
//!     closest(&x, &table, &tol, DuplicatePolicy::Keep).unwrap(),
//!     vec![Some(0), Some(1), None]
//! );
//! assert_eq!(
//!     closest(&x, &table, &tol, DuplicatePolicy::Closest).unwrap(),
//!     vec![Some(0), None, Some(1)]
//! );
//! assert_eq!(
//!     closest(&x, &table, &tol, DuplicatePolicy::Remove).unwrap(),
//!     vec![Some(0), None, None]
//! );
//! ```
mod error;
mod nearest;
mod policy;

pub use crate::error::ClosestError;
pub use crate::policy::DuplicatePolicy;

use crate::nearest::nearest_within;

/// Closest table index for every element of `x`, or `None` when nothing is
/// within tolerance (or the match was dropped by `policy`).
pub fn closest(
    x: &[f64],
    table: &[f64],
    tolerance: &[f64],
    policy: DuplicatePolicy,
) -> Result<Vec<Option<usize>>, ClosestError> {
    if tolerance.len() != x.len() {
        return Err(ClosestError::ToleranceLength {
            expected: x.len(),
            got: tolerance.len(),
        });
    }
    let hits = nearest_within(x, table, tolerance);
    Ok(policy.apply(&hits, table.len()))
}

/// Resolves, for every query position, the single best table index or the
/// caller's `nomatch` sentinel.
///
/// Implementations must return exactly `x.len()` values, each either a
/// valid index into `table` or `nomatch`, and must not report one table
/// index for two queries unless their policy explicitly keeps duplicates.
pub trait ClosestResolver {
    fn resolve(
        &self,
        x: &[f64],
        table: &[f64],
        tolerance: &[f64],
        nomatch: i64,
    ) -> Result<Vec<i64>, ClosestError>;
}

impl ClosestResolver for DuplicatePolicy {
    fn resolve(
        &self,
        x: &[f64],
        table: &[f64],
        tolerance: &[f64],
        nomatch: i64,
    ) -> Result<Vec<i64>, ClosestError> {
        let matches = closest(x, table, tolerance, *self)?;
        Ok(matches
            .into_iter()
            .map(|m| m.map_or(nomatch, |j| j as i64))
            .collect())
    }
}

impl<F> ClosestResolver for F
where
    F: Fn(&[f64], &[f64], &[f64], i64) -> Result<Vec<i64>, ClosestError>,
{
    fn resolve(
        &self,
        x: &[f64],
        table: &[f64],
        tolerance: &[f64],
        nomatch: i64,
    ) -> Result<Vec<i64>, ClosestError> {
        self(x, table, tolerance, nomatch)
    }
}
