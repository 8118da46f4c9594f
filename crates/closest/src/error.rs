//! Error type for closest-match lookups.

use thiserror::Error;

/// Errors returned by [`closest`](crate::closest) and resolver implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClosestError {
    /// The tolerance slice does not provide one value per query element.
    #[error("tolerance must have one value per query element: expected {expected}, got {got}")]
    ToleranceLength { expected: usize, got: usize },
}
