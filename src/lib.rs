//! # seqjoin
//!
//! Tolerance-aware merge joins of two ascending numeric sequences.
//!
//! This umbrella crate re-exports the engine (`merge`) and the
//! closest-match resolver (`closest`) and adds a configuration-driven
//! [`join`] facade with optional input checks and tracing.
//!
//! ```text
//!  x, y, JoinConfig
//!        │
//!        ▼
//!  validate config ──► check inputs (optional) ──► tolerance (abs + ppm)
//!        │
//!        ▼
//!  outer_join │ left_join │ left/inner/right_join_closest
//!        │
//!        ▼
//!     Joined { x, y }
//! ```
//!
//! ## Example
//!
//! ```
//! use seqjoin::{join, JoinConfig, JoinKind};
//!
//! let x = [1.0, 2.0, 3.0];
//! let y = [1.1, 2.9];
//!
//! let cfg = JoinConfig::new().with_tolerance(0.2);
//! let outer = join(&x, &y, &cfg).unwrap();
//! assert_eq!(outer.x, vec![Some(0), Some(1), Some(2)]);
//! assert_eq!(outer.y, vec![Some(0), None, Some(1)]);
//!
//! let left = join(&x, &y, &cfg.clone().with_kind(JoinKind::Left)).unwrap();
//! assert_eq!(left.y, vec![Some(0), None, Some(1)]);
//! ```
//!
//! Indices are 0-based. Unmatched positions are `None`.

use std::time::Instant;

use tracing::{info, warn, Level};

use crate::config::validate_tolerance;

mod check;
pub mod config;
mod error;

pub use closest::{closest, ClosestError, ClosestResolver, DuplicatePolicy};
pub use merge::{
    inner_join_closest, left_join, left_join_closest, outer_join, outer_join_diagonal,
    ppm_tolerance, right_join_closest, JoinError, Joined, SentinelJoined, Tolerance,
};

pub use crate::check::check_sequence;
pub use crate::config::{ConfigLoadError, JoinConfig, JoinKind, LeftMethod, SeqJoinConfigFile};
pub use crate::error::{SeqJoinError, Side};

/// Sentinel used internally for the closest-match joins before converting
/// their rows to [`Joined`].
const NOMATCH: i64 = -1;

/// Join `x` and `y` as described by `cfg`, using `cfg.tolerance` as the
/// absolute tolerance.
pub fn join(x: &[f64], y: &[f64], cfg: &JoinConfig) -> Result<Joined, SeqJoinError> {
    join_with(x, y, Tolerance::Scalar(cfg.tolerance), cfg)
}

/// Join `x` and `y` with an explicit absolute tolerance.
///
/// The tolerance is indexed by `x`, except for [`JoinKind::Right`] where it
/// is indexed by `y`. `cfg.tolerance` is neither used nor validated;
/// `cfg.ppm` is still added on top of `tolerance`. Every tolerance value must
/// be `>= 0`.
pub fn join_with(
    x: &[f64],
    y: &[f64],
    tolerance: Tolerance<'_>,
    cfg: &JoinConfig,
) -> Result<Joined, SeqJoinError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "seqjoin.join",
        kind = cfg.kind.as_str(),
        x_len = x.len(),
        y_len = y.len()
    );
    let _guard = span.enter();

    match join_inner(x, y, tolerance, cfg) {
        Ok(joined) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                rows = joined.len(),
                matched = joined.matched_count(),
                elapsed_micros,
                "join_success"
            );
            Ok(joined)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(error = %err, elapsed_micros, "join_failure");
            Err(err)
        }
    }
}

fn join_inner(
    x: &[f64],
    y: &[f64],
    tolerance: Tolerance<'_>,
    cfg: &JoinConfig,
) -> Result<Joined, SeqJoinError> {
    cfg.validate_options()?;
    match tolerance {
        Tolerance::Scalar(value) => validate_tolerance(value)?,
        Tolerance::PerElement(values) => {
            for &value in values {
                validate_tolerance(value)?;
            }
        }
    }

    if cfg.check_inputs {
        check_sequence(Side::X, x)?;
        check_sequence(Side::Y, y)?;
    }

    let keys = match cfg.kind {
        JoinKind::Right => y,
        _ => x,
    };
    let mut tol = tolerance.broadcast(keys.len())?.into_owned();
    if cfg.ppm > 0.0 {
        for (t, relative) in tol.iter_mut().zip(ppm_tolerance(keys, 0.0, cfg.ppm)) {
            *t += relative;
        }
    }
    let tol = Tolerance::PerElement(&tol);

    let joined = match (cfg.kind, cfg.left_method) {
        (JoinKind::Outer, _) => outer_join(x, y, tol)?,
        (JoinKind::Left, LeftMethod::Lookahead) => left_join(x, y, tol)?,
        (JoinKind::Left, LeftMethod::Closest) => {
            left_join_closest(x, y, tol, NOMATCH, &cfg.duplicates)?.into_joined()
        }
        (JoinKind::Inner, _) => {
            inner_join_closest(x, y, tol, NOMATCH, &cfg.duplicates)?.into_joined()
        }
        (JoinKind::Right, _) => {
            right_join_closest(x, y, tol, NOMATCH, &cfg.duplicates)?.into_joined()
        }
    };
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_is_the_default_kind() {
        let joined = join(&[1.0, 2.0], &[1.0, 3.0], &JoinConfig::default()).unwrap();
        assert_eq!(joined.x, vec![Some(0), Some(1), None]);
        assert_eq!(joined.y, vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn inner_join_drops_unmatched_rows() {
        let cfg = JoinConfig::new()
            .with_kind(JoinKind::Inner)
            .with_tolerance(0.2);
        let joined = join(&[1.0, 2.0, 3.0], &[1.1, 2.9], &cfg).unwrap();
        assert_eq!(joined.x, vec![Some(0), Some(2)]);
        assert_eq!(joined.y, vec![Some(0), Some(1)]);
    }

    #[test]
    fn right_join_has_one_row_per_y() {
        let cfg = JoinConfig::new()
            .with_kind(JoinKind::Right)
            .with_tolerance(0.2);
        let joined = join(&[1.0, 2.0, 3.0], &[1.1, 2.5, 2.9], &cfg).unwrap();
        assert_eq!(joined.x, vec![Some(0), None, Some(2)]);
        assert_eq!(joined.y, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn left_closest_applies_duplicate_policy() {
        let x = [1.0, 1.1];
        let y = [1.05];
        let base = JoinConfig::new()
            .with_kind(JoinKind::Left)
            .with_left_method(LeftMethod::Closest)
            .with_tolerance(0.1);

        let keep = join(&x, &y, &base.clone().with_duplicates(DuplicatePolicy::Keep)).unwrap();
        assert_eq!(keep.y, vec![Some(0), None]);

        let remove = join(&x, &y, &base.with_duplicates(DuplicatePolicy::Remove)).unwrap();
        assert_eq!(remove.x, vec![Some(0), Some(1)]);
        assert_eq!(remove.y, vec![None, None]);
    }

    #[test]
    fn ppm_widens_the_tolerance() {
        let x = [1000.0];
        let y = [1000.004];
        let strict = JoinConfig::new().with_kind(JoinKind::Inner);
        assert!(join(&x, &y, &strict).unwrap().is_empty());

        let relaxed = strict.with_ppm(5.0);
        let joined = join(&x, &y, &relaxed).unwrap();
        assert_eq!(joined.matched().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn unsorted_input_is_rejected() {
        let err = join(&[1.0, 0.5], &[1.0], &JoinConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SeqJoinError::NotSorted {
                side: Side::X,
                index: 1
            }
        );
    }

    #[test]
    fn nan_is_rejected_before_sortedness() {
        let err = join(&[1.0], &[f64::NAN, 0.0], &JoinConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SeqJoinError::MissingValue {
                side: Side::Y,
                index: 0
            }
        );
    }

    #[test]
    fn checks_can_be_disabled() {
        let cfg = JoinConfig::new().with_check_inputs(false);
        let joined = join(&[2.0, 1.0], &[], &cfg).unwrap();
        assert_eq!(joined.len(), 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = JoinConfig::new().with_tolerance(-1.0);
        let err = join(&[1.0], &[1.0], &cfg).unwrap_err();
        assert!(matches!(err, SeqJoinError::InvalidConfig(_)));
    }

    #[test]
    fn join_with_validates_its_own_tolerance() {
        let cfg = JoinConfig::new().with_tolerance(-1.0);
        let joined = join_with(&[1.0], &[1.05], Tolerance::Scalar(0.1), &cfg).unwrap();
        assert_eq!(joined.matched_count(), 1);

        let tol = [0.1, -0.5];
        let err = join_with(
            &[1.0, 2.0],
            &[1.0],
            Tolerance::PerElement(&tol),
            &JoinConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SeqJoinError::InvalidConfig(_)));
        assert!(err.to_string().contains("-0.5"));
    }

    #[test]
    fn per_element_tolerance_length_is_checked() {
        let tol = [0.1, 0.2];
        let err = join_with(
            &[1.0, 2.0, 3.0],
            &[1.0],
            Tolerance::PerElement(&tol),
            &JoinConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SeqJoinError::Join(JoinError::ToleranceLength {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn right_join_tolerance_is_indexed_by_y() {
        let tol = [0.0, 0.5];
        let cfg = JoinConfig::new().with_kind(JoinKind::Right);
        let joined = join_with(&[1.0, 2.4], &[1.0, 2.0], Tolerance::PerElement(&tol), &cfg).unwrap();
        assert_eq!(joined.x, vec![Some(0), Some(1)]);
        assert_eq!(joined.y, vec![Some(0), Some(1)]);
    }
}
