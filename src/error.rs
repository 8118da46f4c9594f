//! Error surface of the `join` facade.

use std::fmt;

use merge::JoinError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which input sequence an input error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    X,
    Y,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::X => f.write_str("x"),
            Side::Y => f.write_str("y"),
        }
    }
}

/// Errors returned by [`join`](crate::join) and [`join_with`](crate::join_with).
///
/// | Error | Category |
/// |-------|----------|
/// | [`InvalidConfig`](SeqJoinError::InvalidConfig) | Configuration |
/// | [`NotSorted`](SeqJoinError::NotSorted) | Input check (`check_inputs`) |
/// | [`MissingValue`](SeqJoinError::MissingValue) | Input check (`check_inputs`) |
/// | [`Join`](SeqJoinError::Join) | Precondition reported by the engine |
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeqJoinError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("'{side}' has to be sorted increasingly; value at index {index} is smaller than its predecessor")]
    NotSorted { side: Side, index: usize },

    #[error("'{side}' must not contain missing values; found one at index {index}")]
    MissingValue { side: Side, index: usize },

    #[error(transparent)]
    Join(#[from] JoinError),
}
