//! Kaufman Adaptive Moving Average (KAMA) indicator.
//!
//! KAMA moves fast when price travels efficiently in one direction and slows
//! down when price chops sideways. The efficiency ratio is the net change over
//! the period divided by the sum of absolute bar-to-bar changes.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    utils::check_period,
};

/// Number of leading samples consumed before the first KAMA value.
#[must_use]
pub fn kama_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    period + unstable.get(FuncUnstId::Kama)
}

/// Kaufman Adaptive Moving Average.
///
/// # Formula
///
/// - ER = |P(t) - P(t-n)| / sum(|P(i) - P(i-1)|)
/// - SC = (ER * (2/3 - 2/31) + 2/31)^2
/// - KAMA(t) = KAMA(t-1) + SC * (P(t) - KAMA(t-1))
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2.
pub fn kama<T: TaFloat>(input: &[T], period: usize, unstable: &UnstablePeriods) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    let lookback = kama_lookback(period, unstable);
    if input.len() <= lookback {
        return Ok(Series::new());
    }

    let const_max = T::TWO / T::from_f64_lossy(31.0);
    let const_diff = T::TWO / T::from_f64_lossy(3.0) - const_max;
    let smoothing = |period_roc: T, sum_roc: T| -> T {
        let efficiency = if sum_roc <= period_roc || sum_roc.is_near_zero() {
            T::ONE
        } else {
            (period_roc / sum_roc).abs()
        };
        let sc = efficiency * const_diff + const_max;
        sc * sc
    };

    let mut sum_roc = T::ZERO;
    for i in 0..period {
        sum_roc = sum_roc + (input[i] - input[i + 1]).abs();
    }

    let mut today = period;
    let mut trailing = 0;
    let mut prev_kama = input[today - 1];
    let mut trailing_value = input[trailing];
    trailing += 1;
    let sc = smoothing(input[today] - trailing_value, sum_roc);
    prev_kama = (input[today] - prev_kama) * sc + prev_kama;
    today += 1;

    let mut result = Series::with_capacity(input.len() - lookback);
    if today > lookback {
        result.push(prev_kama);
    }

    while today < input.len() {
        let value = input[today];
        let oldest = input[trailing];
        trailing += 1;
        let period_roc = value - oldest;
        sum_roc = sum_roc - (trailing_value - oldest).abs();
        sum_roc = sum_roc + (value - input[today - 1]).abs();
        trailing_value = oldest;

        let sc = smoothing(period_roc, sum_roc);
        prev_kama = (value - prev_kama) * sc + prev_kama;
        if today >= lookback {
            result.push(prev_kama);
        }
        today += 1;
    }

    Ok(result)
}
