//! Numeric type abstractions for technical analysis computations.
//!
//! This module defines the [`TaFloat`] trait which abstracts over `f32` and `f64`
//! for generic numeric operations.

use num_traits::{Float, FromPrimitive, ToPrimitive};

/// Tolerance used by the near-zero tests of the kernels.
const ZERO_TOLERANCE: f64 = 0.000_000_01;

/// Trait for floating-point types used in technical analysis calculations.
///
/// This trait provides a common interface for `f32` and `f64`, enabling generic
/// implementations of the indicator kernels.
///
/// # Associated Constants
///
/// - `EPSILON` - Machine epsilon for the type
/// - `NAN` - Not-a-number value
/// - `ZERO`, `ONE`, `TWO` - Small integral values
/// - `HUNDRED` - Hundred value (useful for RSI, etc.)
///
/// # Example
///
/// ```rust
/// use ta_core::TaFloat;
///
/// fn compute_rsi<T: TaFloat>(avg_gain: T, avg_loss: T) -> T {
///     let total = avg_gain + avg_loss;
///     if total.is_near_zero() {
///         return T::ZERO;
///     }
///     T::HUNDRED * (avg_gain / total)
/// }
///
/// assert_eq!(compute_rsi(1.0f64, 1.0), 50.0);
/// ```
pub trait TaFloat:
    Float + FromPrimitive + ToPrimitive + Copy + Send + Sync + Default + core::fmt::Debug + 'static
{
    /// Machine epsilon for this type.
    const EPSILON: Self;
    /// Not-a-number value.
    const NAN: Self;
    /// Zero value.
    const ZERO: Self;
    /// One value.
    const ONE: Self;
    /// Two value.
    const TWO: Self;
    /// Hundred value (useful for percentage calculations like RSI).
    const HUNDRED: Self;

    /// Convert from `f64`.
    #[must_use]
    fn from_f64_lossy(value: f64) -> Self;

    /// Convert to `f64`.
    #[must_use]
    fn to_f64_lossy(self) -> f64;

    /// Convert from `usize`.
    #[must_use]
    fn from_usize(value: usize) -> Self;

    /// Check if the value is valid (not NaN and not infinite).
    #[must_use]
    fn is_valid(self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }

    /// True when the value lies strictly inside `(-1e-8, 1e-8)`.
    #[must_use]
    fn is_near_zero(self) -> bool {
        let tolerance = Self::from_f64_lossy(ZERO_TOLERANCE);
        self > -tolerance && self < tolerance
    }

    /// True when the value is negative or near zero (`< 1e-8`).
    #[must_use]
    fn is_zero_or_neg(self) -> bool {
        self < Self::from_f64_lossy(ZERO_TOLERANCE)
    }
}

impl TaFloat for f32 {
    const EPSILON: Self = f32::EPSILON;
    const NAN: Self = f32::NAN;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f32
    }
}

impl TaFloat for f64 {
    const EPSILON: Self = f64::EPSILON;
    const NAN: Self = f64::NAN;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HUNDRED: Self = 100.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_f64() {
        assert!(<f64 as TaFloat>::EPSILON > 0.0);
        assert!(<f64 as TaFloat>::NAN.is_nan());
        assert_eq!(f64::ZERO, 0.0);
        assert_eq!(f64::ONE, 1.0);
        assert_eq!(f64::TWO, 2.0);
        assert_eq!(f64::HUNDRED, 100.0);
    }

    #[test]
    fn test_constants_f32() {
        assert!(<f32 as TaFloat>::EPSILON > 0.0);
        assert!(<f32 as TaFloat>::NAN.is_nan());
        assert_eq!(f32::ZERO, 0.0);
        assert_eq!(f32::HUNDRED, 100.0);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(f64::from_f64_lossy(42.5), 42.5);
        assert_eq!(f32::from_f64_lossy(42.5), 42.5f32);
        assert_eq!(42.5f32.to_f64_lossy(), 42.5);
        assert_eq!(<f64 as TaFloat>::from_usize(42), 42.0);
    }

    #[test]
    fn test_is_valid() {
        assert!(1.0f64.is_valid());
        assert!(!f64::NAN.is_valid());
        assert!(!f64::INFINITY.is_valid());
    }

    #[test]
    fn test_near_zero() {
        assert!(0.0f64.is_near_zero());
        assert!(0.000_000_009f64.is_near_zero());
        assert!((-0.000_000_009f64).is_near_zero());
        assert!(!0.000_000_01f64.is_near_zero());
        assert!(!(-1.0f64).is_near_zero());
    }

    #[test]
    fn test_zero_or_neg() {
        assert!((-5.0f64).is_zero_or_neg());
        assert!(0.0f64.is_zero_or_neg());
        assert!(!0.5f64.is_zero_or_neg());
    }
}
