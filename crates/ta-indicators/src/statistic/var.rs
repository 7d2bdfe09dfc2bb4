//! Rolling variance and standard deviation.

use ta_core::{error::Result, num::TaFloat, series::Series, utils::check_period};

/// Number of leading samples consumed before the first variance.
#[must_use]
pub fn var_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Number of leading samples consumed before the first standard deviation.
#[must_use]
pub fn stddev_lookback(period: usize) -> usize {
    var_lookback(period)
}

/// Population variance over a rolling window.
///
/// Computed as `E[x^2] - E[x]^2` from running sums of the values and their
/// squares.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero.
pub fn var<T: TaFloat>(input: &[T], period: usize) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    Ok(rolling_variance(input, period))
}

/// Standard deviation scaled by `nb_dev`.
///
/// A non-positive variance (rounding on flat input) yields 0.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2.
pub fn stddev<T: TaFloat>(input: &[T], period: usize, nb_dev: f64) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    let nb_dev = T::from_f64_lossy(nb_dev);
    Ok(rolling_variance(input, period)
        .iter()
        .map(|&variance| deviation(variance) * nb_dev)
        .collect())
}

/// Square root of a variance, 0 when it is not positive.
pub(crate) fn deviation<T: TaFloat>(variance: T) -> T {
    if variance.is_zero_or_neg() {
        T::ZERO
    } else {
        variance.sqrt()
    }
}

pub(crate) fn rolling_variance<T: TaFloat>(input: &[T], period: usize) -> Series<T> {
    let lookback = var_lookback(period);
    if input.len() <= lookback {
        return Series::new();
    }

    let divisor = <T as TaFloat>::from_usize(period);
    let mut sum = T::ZERO;
    let mut sum_squares = T::ZERO;
    for &value in &input[..lookback] {
        sum = sum + value;
        sum_squares = sum_squares + value * value;
    }

    let mut result = Series::with_capacity(input.len() - lookback);
    for (trailing, &value) in input[lookback..].iter().enumerate() {
        sum = sum + value;
        sum_squares = sum_squares + value * value;

        let mean = sum / divisor;
        let mean_squares = sum_squares / divisor;
        result.push(mean_squares - mean * mean);

        let leaving = input[trailing];
        sum = sum - leaving;
        sum_squares = sum_squares - leaving * leaving;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_var_known_values() {
        // Window [2, 4, 4, 4, 5, 5, 7, 9] has population variance 4.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let result = var(&data, 8).unwrap();
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0], 4.0, epsilon = 1e-12);

        let result = stddev(&data, 8, 1.0).unwrap();
        assert_relative_eq!(result[0], 2.0, epsilon = 1e-12);

        let result = stddev(&data, 8, 1.5).unwrap();
        assert_relative_eq!(result[0], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_var_rolls() {
        let data = [1.0, 2.0, 3.0, 10.0];
        let result = var(&data, 2).unwrap();
        assert_eq!(result.len(), 3);
        assert_relative_eq!(result[0], 0.25);
        assert_relative_eq!(result[1], 0.25);
        assert_relative_eq!(result[2], 12.25);
    }

    #[test]
    fn test_var_period_one_is_zero() {
        let result = var(&[5.0, 6.0, 7.0], 1).unwrap();
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_stddev_flat_input_is_zero() {
        let result = stddev(&[3.3; 10], 5, 2.0).unwrap();
        assert_eq!(result.len(), 6);
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_stddev_rejects_period_one() {
        assert!(stddev(&[1.0, 2.0], 1, 1.0).is_err());
    }
}
