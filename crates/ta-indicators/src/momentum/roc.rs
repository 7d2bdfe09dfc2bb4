//! Momentum (MOM) and Rate of Change (ROC).

use ta_core::{error::Result, num::TaFloat, series::Series, utils::check_period};

/// Number of leading samples consumed before the first MOM value.
#[must_use]
pub fn mom_lookback(period: usize) -> usize {
    period
}

/// Number of leading samples consumed before the first ROC value.
#[must_use]
pub fn roc_lookback(period: usize) -> usize {
    period
}

/// Momentum: `price - price[period bars ago]`.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero.
pub fn mom<T: TaFloat>(input: &[T], period: usize) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    Ok(lagged(input, period, |value, trailing| value - trailing))
}

/// Rate of change: `((price / prevPrice) - 1) * 100`.
///
/// A zero reference price yields 0.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero.
pub fn roc<T: TaFloat>(input: &[T], period: usize) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    Ok(lagged(input, period, |value, trailing| {
        if trailing == T::ZERO {
            T::ZERO
        } else {
            (value / trailing - T::ONE) * T::HUNDRED
        }
    }))
}

fn lagged<T: TaFloat>(input: &[T], period: usize, f: impl Fn(T, T) -> T) -> Series<T> {
    if input.len() <= period {
        return Series::new();
    }
    input[period..]
        .iter()
        .zip(input)
        .map(|(&value, &trailing)| f(value, trailing))
        .collect()
}
