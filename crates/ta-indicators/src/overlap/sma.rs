//! Simple Moving Average (SMA) indicator.
//!
//! The SMA is the unweighted mean of the previous n data points.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    utils::check_period,
};

/// Number of leading samples consumed before the first SMA value.
#[must_use]
pub fn sma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Simple Moving Average.
///
/// # Formula
///
/// SMA = (P1 + P2 + ... + Pn) / n
///
/// A running total is kept: each step adds the newest sample and removes the
/// one that left the window. The output holds `len - (period - 1)` values; an
/// input no longer than the lookback yields an empty series.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero.
pub fn sma<T: TaFloat>(input: &[T], period: usize) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    let lookback = sma_lookback(period);
    if input.len() <= lookback {
        return Ok(Series::new());
    }

    let divisor = <T as TaFloat>::from_usize(period);
    let mut result = Series::with_capacity(input.len() - lookback);
    let mut total = T::ZERO;
    for &value in &input[..lookback] {
        total = total + value;
    }

    let mut trailing = 0;
    for &value in &input[lookback..] {
        total = total + value;
        let mean = total / divisor;
        total = total - input[trailing];
        trailing += 1;
        result.push(mean);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_lookback() {
        assert_eq!(sma_lookback(1), 0);
        assert_eq!(sma_lookback(3), 2);
        assert_eq!(sma_lookback(30), 29);
    }

    #[test]
    fn test_sma_calculate() {
        let result = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(result.as_slice(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sma_short_input() {
        assert!(sma(&[1.0, 2.0], 3).unwrap().is_empty());
        assert_eq!(sma(&[1.0, 2.0, 3.0], 3).unwrap().len(), 1);
    }

    #[test]
    fn test_sma_period_one_is_identity() {
        let data = [4.0, 8.0, 15.0, 16.0];
        assert_eq!(sma(&data, 1).unwrap().as_slice(), &data);
    }

    #[test]
    fn test_sma_invalid_period() {
        assert!(sma::<f64>(&[1.0, 2.0], 0).is_err());
    }

    #[test]
    fn test_sma_f32() {
        let result = sma(&[2.0f32, 4.0, 6.0, 8.0], 2).unwrap();
        assert_relative_eq!(result[0], 3.0f32);
        assert_relative_eq!(result[2], 7.0f32);
    }
}
