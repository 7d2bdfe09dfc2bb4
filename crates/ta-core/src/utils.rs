//! Utility functions shared by the indicator kernels.
//!
//! These are the small building blocks every kernel family needs: true range,
//! EMA smoothing factors and the parameter/length guards kernels run before
//! touching their inputs.

use crate::error::{Result, TaError};
use crate::num::TaFloat;
use crate::series::Series;

/// True range of one bar given the previous close.
///
/// The largest of `high - low`, `|high - prev_close|` and `|low - prev_close|`.
#[inline]
#[must_use]
pub fn bar_true_range<T: TaFloat>(high: T, low: T, prev_close: T) -> T {
    let mut range = high - low;
    let up = (high - prev_close).abs();
    if up > range {
        range = up;
    }
    let down = (low - prev_close).abs();
    if down > range {
        range = down;
    }
    range
}

/// True range of every bar that has a predecessor.
///
/// The output starts at the second bar, so it holds `len - 1` values.
///
/// # Example
///
/// ```rust
/// use ta_core::utils::true_range;
///
/// let high = [10.0, 12.0, 11.0];
/// let low = [9.0, 10.5, 8.0];
/// let close = [9.5, 11.0, 9.0];
/// let tr = true_range(&high, &low, &close);
/// assert_eq!(tr.as_slice(), &[2.5, 3.0]);
/// ```
#[must_use]
pub fn true_range<T: TaFloat>(high: &[T], low: &[T], close: &[T]) -> Series<T> {
    let len = high.len().min(low.len()).min(close.len());
    (1..len)
        .map(|i| bar_true_range(high[i], low[i], close[i - 1]))
        .collect()
}

/// Smoothing factor of an EMA over `period` samples: `2 / (period + 1)`.
#[inline]
#[must_use]
pub fn per_to_k<T: TaFloat>(period: usize) -> T {
    T::TWO / (<T as TaFloat>::from_usize(period) + T::ONE)
}

/// Reject a period below `min`.
///
/// # Errors
///
/// Returns [`TaError::InvalidParameter`] naming the parameter.
pub fn check_period(name: &str, period: usize, min: usize) -> Result<()> {
    if period < min {
        return Err(TaError::invalid_parameter(
            name,
            period,
            format!("integer >= {min}"),
        ));
    }
    Ok(())
}

/// Check that every named input shares the length of the first one.
///
/// Returns the common length.
///
/// # Errors
///
/// Returns [`TaError::InconsistentLength`] for the first mismatching input.
pub fn check_same_len(inputs: &[(&str, usize)]) -> Result<usize> {
    let Some(&(_, expected)) = inputs.first() else {
        return Ok(0);
    };
    for &(name, actual) in &inputs[1..] {
        if actual != expected {
            return Err(TaError::InconsistentLength {
                name: name.to_string(),
                expected,
                actual,
            });
        }
    }
    Ok(expected)
}
