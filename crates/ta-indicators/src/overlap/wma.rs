//! Weighted Moving Average (WMA) indicator.
//!
//! WMA assigns more weight to recent prices using linear weights.

use ta_core::{error::Result, num::TaFloat, series::Series, utils::check_period};

/// Number of leading samples consumed before the first WMA value.
#[must_use]
pub fn wma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Weighted Moving Average.
///
/// # Formula
///
/// WMA = (n * P(t) + (n-1) * P(t-1) + ... + 1 * P(t-n+1)) / (n * (n + 1) / 2)
///
/// Computed in O(1) per step: the weighted sum drops the plain window sum
/// after each output, which lowers every weight by one.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero.
pub fn wma<T: TaFloat>(input: &[T], period: usize) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    let lookback = wma_lookback(period);
    if input.len() <= lookback {
        return Ok(Series::new());
    }

    let divider = <T as TaFloat>::from_usize(period * (period + 1) / 2);
    let weight = <T as TaFloat>::from_usize(period);

    let mut period_sum = T::ZERO;
    let mut period_sub = T::ZERO;
    for (i, &value) in input[..lookback].iter().enumerate() {
        period_sub = period_sub + value;
        period_sum = period_sum + value * <T as TaFloat>::from_usize(i + 1);
    }

    let mut result = Series::with_capacity(input.len() - lookback);
    let mut trailing_value = T::ZERO;
    for (trailing, &value) in input[lookback..].iter().enumerate() {
        period_sub = period_sub + value;
        period_sub = period_sub - trailing_value;
        period_sum = period_sum + value * weight;
        trailing_value = input[trailing];
        result.push(period_sum / divider);
        period_sum = period_sum - period_sub;
    }

    Ok(result)
}
