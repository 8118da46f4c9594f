//! Optional input checks run by the facade before joining.
//!
//! The engine itself never validates its inputs; these checks exist for
//! callers that cannot guarantee sorted, NaN-free sequences.

use crate::error::{SeqJoinError, Side};

/// Reject sequences containing NaN or a value smaller than its predecessor.
/// Repeated values are allowed.
pub fn check_sequence(side: Side, values: &[f64]) -> Result<(), SeqJoinError> {
    if let Some(index) = values.iter().position(|v| v.is_nan()) {
        return Err(SeqJoinError::MissingValue { side, index });
    }
    if let Some(offset) = values.windows(2).position(|w| w[1] < w[0]) {
        return Err(SeqJoinError::NotSorted {
            side,
            index: offset + 1,
        });
    }
    Ok(())
}
