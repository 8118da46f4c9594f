//! Tolerance model shared by every join.
//!
//! A tolerance is the maximum absolute difference `|x[i] - y[j]|` for the
//! pair to count as a candidate match. It is attached to the `x` side: one
//! value per `x` element, or a single scalar broadcast to all of them.

use std::borrow::Cow;

use crate::error::JoinError;

/// Maximum allowed absolute difference, either global or per `x` element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance<'a> {
    /// One value applied to every `x` element.
    Scalar(f64),
    /// One value per `x` element; the length must equal `x.len()`.
    PerElement(&'a [f64]),
}

impl<'a> Tolerance<'a> {
    /// Expand to exactly `len` values.
    ///
    /// A per-element tolerance of length 1 is broadcast like a scalar; any
    /// other length different from `len` is a usage error.
    pub fn broadcast(&self, len: usize) -> Result<Cow<'a, [f64]>, JoinError> {
        match *self {
            Tolerance::Scalar(value) => Ok(Cow::Owned(vec![value; len])),
            Tolerance::PerElement(values) if values.len() == len => Ok(Cow::Borrowed(values)),
            Tolerance::PerElement([value]) => Ok(Cow::Owned(vec![*value; len])),
            Tolerance::PerElement(values) => Err(JoinError::ToleranceLength {
                expected: len,
                got: values.len(),
            }),
        }
    }
}

impl From<f64> for Tolerance<'_> {
    fn from(value: f64) -> Self {
        Tolerance::Scalar(value)
    }
}

impl<'a> From<&'a [f64]> for Tolerance<'a> {
    fn from(values: &'a [f64]) -> Self {
        Tolerance::PerElement(values)
    }
}

impl<'a> From<&'a Vec<f64>> for Tolerance<'a> {
    fn from(values: &'a Vec<f64>) -> Self {
        Tolerance::PerElement(values.as_slice())
    }
}

/// Per-element tolerance combining an absolute part and a relative part in
/// parts per million: `absolute + |v| * ppm * 1e-6` for every `v`.
///
/// Wrap the result in [`Tolerance::PerElement`] to use it for a join keyed
/// on `values`.
pub fn ppm_tolerance(values: &[f64], absolute: f64, ppm: f64) -> Vec<f64> {
    values
        .iter()
        .map(|v| absolute + v.abs() * ppm / 1e6)
        .collect()
}
