//! Joins built on a closest-match resolver instead of the lookahead walk.
//!
//! For every `x` the resolver reports its single best `y` within tolerance,
//! with duplicates already resolved, or the caller's `nomatch` sentinel.

use closest::ClosestResolver;
use tracing::debug;

use crate::error::JoinError;
use crate::tolerance::Tolerance;
use crate::types::SentinelJoined;

fn resolve_rows<R>(
    x: &[f64],
    y: &[f64],
    tolerance: Tolerance<'_>,
    nomatch: i64,
    resolver: &R,
) -> Result<Vec<i64>, JoinError>
where
    R: ClosestResolver + ?Sized,
{
    let tol = tolerance.broadcast(x.len())?;
    let rows = resolver.resolve(x, y, &tol, nomatch)?;
    if rows.len() != x.len() {
        return Err(JoinError::ResolverLength {
            expected: x.len(),
            got: rows.len(),
        });
    }
    Ok(rows)
}

/// Left join: `x` is `0..x.len()`, `y[i]` is the resolver's match or `nomatch`.
pub fn left_join_closest<R>(
    x: &[f64],
    y: &[f64],
    tolerance: Tolerance<'_>,
    nomatch: i64,
    resolver: &R,
) -> Result<SentinelJoined, JoinError>
where
    R: ClosestResolver + ?Sized,
{
    let ys = resolve_rows(x, y, tolerance, nomatch, resolver)?;
    let joined = SentinelJoined {
        x: (0..x.len() as i64).collect(),
        y: ys,
        nomatch,
    };
    debug!(
        kind = "left_closest",
        x_len = x.len(),
        y_len = y.len(),
        "merge_join"
    );
    Ok(joined)
}

/// Inner join: only rows where the resolver found a match, compacted and in
/// `x` order.
pub fn inner_join_closest<R>(
    x: &[f64],
    y: &[f64],
    tolerance: Tolerance<'_>,
    nomatch: i64,
    resolver: &R,
) -> Result<SentinelJoined, JoinError>
where
    R: ClosestResolver + ?Sized,
{
    let ys = resolve_rows(x, y, tolerance, nomatch, resolver)?;
    let mut joined = SentinelJoined::with_capacity(ys.len(), nomatch);
    for (i, yi) in ys.into_iter().enumerate() {
        if yi != nomatch {
            joined.x.push(i as i64);
            joined.y.push(yi);
        }
    }
    debug!(
        kind = "inner_closest",
        x_len = x.len(),
        y_len = y.len(),
        rows = joined.len(),
        "merge_join"
    );
    Ok(joined)
}

/// Right join: one row per `y`, each paired with its closest `x` or
/// `nomatch`. `tolerance` is indexed by `y`.
///
/// The result keeps the caller's orientation: `x` holds indices into `x`
/// (or `nomatch`), `y` is `0..y.len()`.
pub fn right_join_closest<R>(
    x: &[f64],
    y: &[f64],
    tolerance: Tolerance<'_>,
    nomatch: i64,
    resolver: &R,
) -> Result<SentinelJoined, JoinError>
where
    R: ClosestResolver + ?Sized,
{
    Ok(left_join_closest(y, x, tolerance, nomatch, resolver)?.swap_sides())
}

#[cfg(test)]
mod tests {
    use super::*;
    use closest::{ClosestError, DuplicatePolicy};

    #[test]
    fn left_keeps_every_x() {
        let rows = left_join_closest(
            &[1.0, 2.0, 3.0],
            &[1.1, 2.9],
            Tolerance::Scalar(0.2),
            -1,
            &DuplicatePolicy::Closest,
        )
        .unwrap();
        assert_eq!(rows.x, vec![0, 1, 2]);
        assert_eq!(rows.y, vec![0, -1, 1]);
    }

    #[test]
    fn inner_compacts_matched_rows() {
        let rows = inner_join_closest(
            &[1.0, 2.0, 3.0],
            &[1.1, 2.95],
            Tolerance::Scalar(0.2),
            -1,
            &DuplicatePolicy::Closest,
        )
        .unwrap();
        assert_eq!(rows.x, vec![0, 2]);
        assert_eq!(rows.y, vec![0, 1]);
    }

    #[test]
    fn inner_with_no_matches_is_empty() {
        let rows = inner_join_closest(
            &[1.0, 2.0],
            &[10.0],
            Tolerance::Scalar(0.5),
            -1,
            &DuplicatePolicy::Keep,
        )
        .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn duplicate_policy_controls_shared_matches() {
        let x = [1.1, 1.9, 2.2];
        let y = [1.0, 2.0, 3.0];
        let left = |policy: DuplicatePolicy| {
            left_join_closest(&x, &y, Tolerance::Scalar(0.5), -1, &policy)
                .unwrap()
                .y
        };
        assert_eq!(left(DuplicatePolicy::Keep), vec![0, 1, -1]);
        assert_eq!(left(DuplicatePolicy::Closest), vec![0, 1, -1]);
        assert_eq!(left(DuplicatePolicy::Remove), vec![0, -1, -1]);
    }

    #[test]
    fn keep_policy_gives_shared_y_to_first_x() {
        let x = [1.6, 2.05];
        let y = [2.0];
        let left = |policy: DuplicatePolicy| {
            left_join_closest(&x, &y, Tolerance::Scalar(0.5), -1, &policy)
                .unwrap()
                .y
        };
        assert_eq!(left(DuplicatePolicy::Keep), vec![0, -1]);
        assert_eq!(left(DuplicatePolicy::Closest), vec![-1, 0]);
    }

    #[test]
    fn right_join_is_one_row_per_y() {
        let rows = right_join_closest(
            &[1.0, 2.0, 3.0],
            &[1.1, 2.9, 5.0],
            Tolerance::Scalar(0.2),
            -1,
            &DuplicatePolicy::Closest,
        )
        .unwrap();
        assert_eq!(rows.y, vec![0, 1, 2]);
        assert_eq!(rows.x, vec![0, 2, -1]);
    }

    #[test]
    fn custom_resolver_is_used() {
        let everything_first =
            |x: &[f64], _: &[f64], _: &[f64], _: i64| -> Result<Vec<i64>, ClosestError> {
                Ok(vec![0; x.len()])
            };
        let rows = inner_join_closest(
            &[1.0, 2.0],
            &[100.0],
            Tolerance::Scalar(0.0),
            -1,
            &everything_first,
        )
        .unwrap();
        assert_eq!(rows.x, vec![0, 1]);
        assert_eq!(rows.y, vec![0, 0]);
    }

    #[test]
    fn short_resolver_output_is_rejected() {
        let short = |_: &[f64], _: &[f64], _: &[f64], _: i64| -> Result<Vec<i64>, ClosestError> {
            Ok(Vec::new())
        };
        let err = left_join_closest(&[1.0], &[1.0], Tolerance::Scalar(0.1), -1, &short)
            .unwrap_err();
        assert_eq!(
            err,
            JoinError::ResolverLength {
                expected: 1,
                got: 0
            }
        );
    }

    #[test]
    fn tolerance_checked_before_resolving() {
        let tol = [0.1, 0.2];
        let err = inner_join_closest(
            &[1.0],
            &[1.0],
            Tolerance::PerElement(&tol),
            -1,
            &DuplicatePolicy::Closest,
        )
        .unwrap_err();
        assert!(matches!(err, JoinError::ToleranceLength { .. }));
    }
}
