//! Numeric helpers shared by the bag factories.

use num_traits::Float;

/// Common utility functions for bagging operations.
#[derive(Debug)]
pub struct Common;

impl Common {
    /// Sums non-negative values into a 64-bit total without silent loss.
    ///
    /// Uses compensated (Neumaier) summation so that long runs of small
    /// weights are not absorbed by a large running total. Returns NaN if any
    /// value is NaN or negative, and +inf if any value is infinite or the
    /// total is not finitely representable. The caller decides what a
    /// non-finite result means; this function never clamps or wraps.
    pub fn add_positive_floats_safe<T: Float>(values: &[T]) -> f64 {
        let mut sum = 0.0f64;
        let mut compensation = 0.0f64;

        for value in values {
            let value = match value.to_f64() {
                Some(v) => v,
                None => return f64::NAN,
            };
            if value.is_nan() || value < 0.0 {
                return f64::NAN;
            }
            if value.is_infinite() {
                return f64::INFINITY;
            }

            let total = sum + value;
            if total.is_infinite() {
                return f64::INFINITY;
            }
            if sum.abs() >= value.abs() {
                compensation += (sum - total) + value;
            } else {
                compensation += (value - total) + sum;
            }
            sum = total;
        }

        sum + compensation
    }

    /// True when `total` is a usable bag weight: finite and strictly positive.
    #[inline]
    pub fn is_valid_weight_total(total: f64) -> bool {
        total.is_finite() && total > 0.0
    }

    /// Relative closeness check used by debug cross-checks.
    pub fn within_relative_tolerance(expected: f64, actual: f64, tolerance: f64) -> bool {
        actual * (1.0 - tolerance) <= expected && expected <= (1.0 + tolerance) * actual
    }
}
