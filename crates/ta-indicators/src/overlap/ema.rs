//! Exponential Moving Average (EMA) and its multi-stage variants DEMA and TEMA.
//!
//! The EMA is seeded with the SMA of its first `period` samples, then updated
//! recursively. Because every value depends on the seed, the EMA family reads
//! the `EMA` unstable period.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    utils::{check_period, per_to_k},
};

/// Number of leading samples consumed before the first EMA value.
#[must_use]
pub fn ema_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    period.saturating_sub(1) + unstable.get(FuncUnstId::Ema)
}

/// Lookback of the Double Exponential Moving Average.
#[must_use]
pub fn dema_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    2 * ema_lookback(period, unstable)
}

/// Lookback of the Triple Exponential Moving Average.
#[must_use]
pub fn tema_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    3 * ema_lookback(period, unstable)
}

/// Exponential Moving Average.
///
/// # Formula
///
/// EMA(t) = (P(t) - EMA(t-1)) * k + EMA(t-1), with k = 2 / (period + 1)
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero.
pub fn ema<T: TaFloat>(input: &[T], period: usize, unstable: &UnstablePeriods) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    let lookback = ema_lookback(period, unstable);
    if input.len() <= lookback {
        return Ok(Series::new());
    }
    Ok(ema_from(input, period, per_to_k(period), lookback, lookback))
}

/// Double Exponential Moving Average: `2 * EMA - EMA(EMA)`.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero.
pub fn dema<T: TaFloat>(input: &[T], period: usize, unstable: &UnstablePeriods) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    if input.len() <= dema_lookback(period, unstable) {
        return Ok(Series::new());
    }

    let k = per_to_k(period);
    let stage_lookback = ema_lookback(period, unstable);
    let first = ema_from(input, period, k, stage_lookback, stage_lookback);
    let second = ema_from(first.as_slice(), period, k, stage_lookback, stage_lookback);

    Ok(second
        .iter()
        .zip(&first.as_slice()[stage_lookback..])
        .map(|(&e2, &e1)| T::TWO * e1 - e2)
        .collect())
}

/// Triple Exponential Moving Average: `3 * EMA - 3 * EMA(EMA) + EMA(EMA(EMA))`.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero.
pub fn tema<T: TaFloat>(input: &[T], period: usize, unstable: &UnstablePeriods) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    if input.len() <= tema_lookback(period, unstable) {
        return Ok(Series::new());
    }

    let k = per_to_k(period);
    let stage_lookback = ema_lookback(period, unstable);
    let first = ema_from(input, period, k, stage_lookback, stage_lookback);
    let second = ema_from(first.as_slice(), period, k, stage_lookback, stage_lookback);
    let third = ema_from(second.as_slice(), period, k, stage_lookback, stage_lookback);

    let three = T::from_f64_lossy(3.0);
    let first_tail = &first.as_slice()[2 * stage_lookback..];
    let second_tail = &second.as_slice()[stage_lookback..];
    Ok(third
        .iter()
        .zip(first_tail.iter().zip(second_tail))
        .map(|(&e3, (&e1, &e2))| e3 + (three * e1 - three * e2))
        .collect())
}

/// EMA whose first output lands on index `start`.
///
/// The seed SMA covers the `period` samples beginning `lookback` positions
/// before `start`; the samples between the seed and `start` only advance the
/// recursion. Callers guarantee `lookback <= start < input.len()` and
/// `period - 1 <= lookback`.
pub(crate) fn ema_from<T: TaFloat>(
    input: &[T],
    period: usize,
    k: T,
    lookback: usize,
    start: usize,
) -> Series<T> {
    let mut today = start - lookback;
    let mut seed = T::ZERO;
    for _ in 0..period {
        seed = seed + input[today];
        today += 1;
    }

    let mut prev = seed / <T as TaFloat>::from_usize(period);
    while today <= start {
        prev = (input[today] - prev) * k + prev;
        today += 1;
    }

    let mut result = Series::with_capacity(input.len() - start);
    result.push(prev);
    for &value in &input[today..] {
        prev = (value - prev) * k + prev;
        result.push(prev);
    }
    result
}
