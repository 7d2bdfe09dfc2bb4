//! Relative Strength Index (RSI) and Chande Momentum Oscillator (CMO).
//!
//! Both accumulate gains and losses with Wilder's smoothing; they differ only
//! in how the two averages are combined.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    utils::check_period,
};

/// Number of leading samples consumed before the first RSI value.
#[must_use]
pub fn rsi_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    period + unstable.get(FuncUnstId::Rsi)
}

/// Number of leading samples consumed before the first CMO value.
#[must_use]
pub fn cmo_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    period + unstable.get(FuncUnstId::Cmo)
}

/// Relative Strength Index.
///
/// # Formula
///
/// RSI = 100 * avg_gain / (avg_gain + avg_loss)
///
/// A window without any movement yields 0.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2.
pub fn rsi<T: TaFloat>(input: &[T], period: usize, unstable: &UnstablePeriods) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    Ok(wilder_oscillator(
        input,
        period,
        rsi_lookback(period, unstable),
        |gain, loss| T::HUNDRED * (gain / (gain + loss)),
    ))
}

/// Chande Momentum Oscillator.
///
/// # Formula
///
/// CMO = 100 * (avg_gain - avg_loss) / (avg_gain + avg_loss)
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2.
pub fn cmo<T: TaFloat>(input: &[T], period: usize, unstable: &UnstablePeriods) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    Ok(wilder_oscillator(
        input,
        period,
        cmo_lookback(period, unstable),
        |gain, loss| T::HUNDRED * ((gain - loss) / (gain + loss)),
    ))
}

/// Wilder-smoothed gain/loss walk shared by RSI and CMO.
///
/// `combine` is only called when `gain + loss` is not near zero.
fn wilder_oscillator<T: TaFloat>(
    input: &[T],
    period: usize,
    lookback: usize,
    combine: impl Fn(T, T) -> T,
) -> Series<T> {
    if input.len() <= lookback {
        return Series::new();
    }

    let divisor = <T as TaFloat>::from_usize(period);
    let keep = <T as TaFloat>::from_usize(period - 1);
    let output = |gain: T, loss: T| {
        if (gain + loss).is_near_zero() {
            T::ZERO
        } else {
            combine(gain, loss)
        }
    };

    let mut prev_value = input[0];
    let mut gain = T::ZERO;
    let mut loss = T::ZERO;
    for &value in &input[1..=period] {
        let diff = value - prev_value;
        prev_value = value;
        if diff < T::ZERO {
            loss = loss - diff;
        } else {
            gain = gain + diff;
        }
    }
    gain = gain / divisor;
    loss = loss / divisor;

    let mut result = Series::with_capacity(input.len() - lookback);
    if lookback == period {
        result.push(output(gain, loss));
    }

    for (today, &value) in input.iter().enumerate().skip(period + 1) {
        let diff = value - prev_value;
        prev_value = value;
        gain = gain * keep;
        loss = loss * keep;
        if diff < T::ZERO {
            loss = loss - diff;
        } else {
            gain = gain + diff;
        }
        gain = gain / divisor;
        loss = loss / divisor;
        if today >= lookback {
            result.push(output(gain, loss));
        }
    }
    result
}
