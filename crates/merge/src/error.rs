//! Error type for the merge joins.

use closest::ClosestError;
use thiserror::Error;

/// Errors returned by the join entry points.
///
/// Only precondition violations are reported. Unsorted input or NaN values
/// are not detected here and produce unspecified correspondences.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum JoinError {
    /// The tolerance is neither a scalar nor one value per `x` element.
    #[error("tolerance must have length 1 or length equal to x ({expected}), got {got}")]
    ToleranceLength { expected: usize, got: usize },

    /// A closest-match resolver returned the wrong number of rows.
    #[error("resolver returned {got} rows for {expected} query values")]
    ResolverLength { expected: usize, got: usize },

    /// The closest-match resolver rejected its input.
    #[error("closest-match lookup failed: {0}")]
    Closest(#[from] ClosestError),
}
