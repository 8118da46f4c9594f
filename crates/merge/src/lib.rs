//! # seqjoin merge engine
//!
//! Tolerance-aware joins of two ascending numeric sequences (retention
//! times, masses, any ordered measurement key). Instead of matching equal
//! keys, a pair `(x[i], y[j])` is a candidate when
//! `|x[i] - y[j]| <= tolerance[i]`.
//!
//! ## Contract
//!
//! - Both inputs are sorted increasingly and contain no NaN. This is a
//!   precondition, not a checked invariant: violating it yields unspecified
//!   correspondences, never an error.
//! - The tolerance is a scalar or one value per `x` element. A length
//!   mismatch is reported as [`JoinError::ToleranceLength`] before any work.
//! - Every call is a pure function of its inputs. No state survives a call.
//! - Indices are 0-based.
//!
//! ## Joins
//!
//! | Function | Rows | Unmatched marker |
//! |---|---|---|
//! | [`outer_join`] | every `x` and every `y` exactly once | `None` |
//! | [`left_join`] | exactly one per `x` | `None` |
//! | [`outer_join_diagonal`] | every `x` and every `y` exactly once | caller sentinel |
//! | [`left_join_closest`] | exactly one per `x` | caller sentinel |
//! | [`inner_join_closest`] | matched rows only | never present |
//! | [`right_join_closest`] | exactly one per `y` | caller sentinel |
//!
//! The lookahead walks ([`outer_join`], [`left_join`]) decide locally, at
//! every step, whether to commit the current pair or advance one side first.
//! The closest-based joins delegate to a [`ClosestResolver`], which is the
//! better fit when the duplicate policy matters more than two-sided
//! lookahead.
//!
//! ## Example
//!
//! ```
//! use merge::{outer_join, Tolerance};
//!
//! let x = [1.0, 2.0, 3.0];
//! let y = [1.1, 2.9];
//!
//! let joined = outer_join(&x, &y, Tolerance::Scalar(0.2)).unwrap();
//! assert_eq!(joined.x, vec![Some(0), Some(1), Some(2)]);
//! assert_eq!(joined.y, vec![Some(0), None, Some(1)]);
//! ```
mod closest_join;
mod error;
mod left;
mod outer;
mod tolerance;
mod types;

pub use closest::{ClosestError, ClosestResolver, DuplicatePolicy};

pub use crate::closest_join::{inner_join_closest, left_join_closest, right_join_closest};
pub use crate::error::JoinError;
pub use crate::left::left_join;
pub use crate::outer::{outer_join, outer_join_diagonal};
pub use crate::tolerance::{ppm_tolerance, Tolerance};
pub use crate::types::{Joined, SentinelJoined};
