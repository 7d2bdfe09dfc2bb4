//! True Range (TRANGE), Average True Range (ATR) and Normalized ATR (NATR).
//!
//! ATR is seeded with the simple average of the first `period` true ranges and
//! then smoothed with Wilder's method. Both ATR and NATR read their own
//! unstable period.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    utils::{check_period, check_same_len, true_range},
};

/// Lookback of TRANGE: the first bar has no previous close.
#[must_use]
pub fn trange_lookback() -> usize {
    1
}

/// Lookback of ATR.
#[must_use]
pub fn atr_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    period + unstable.get(FuncUnstId::Atr)
}

/// Lookback of NATR.
#[must_use]
pub fn natr_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    period + unstable.get(FuncUnstId::Natr)
}

/// True Range of every bar from the second one on.
///
/// # Errors
///
/// Returns `InconsistentLength` if the inputs differ in length.
pub fn trange<T: TaFloat>(high: &[T], low: &[T], close: &[T]) -> Result<Series<T>> {
    check_hlc(high, low, close)?;
    Ok(true_range(high, low, close))
}

/// Average True Range.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero and `InconsistentLength` if
/// the inputs differ in length.
pub fn atr<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    let len = check_hlc(high, low, close)?;
    let lookback = atr_lookback(period, unstable);
    if len <= lookback {
        return Ok(Series::new());
    }
    Ok(wilder_average(&true_range(high, low, close), period, lookback))
}

/// Normalized Average True Range: `100 * ATR / close`.
///
/// A zero close yields 0.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero and `InconsistentLength` if
/// the inputs differ in length.
pub fn natr<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    let len = check_hlc(high, low, close)?;
    let lookback = natr_lookback(period, unstable);
    if len <= lookback {
        return Ok(Series::new());
    }

    let average = wilder_average(&true_range(high, low, close), period, lookback);
    Ok(average
        .iter()
        .zip(&close[lookback..])
        .map(|(&atr, &close)| {
            if close.is_near_zero() {
                T::ZERO
            } else {
                (atr / close) * T::HUNDRED
            }
        })
        .collect())
}

fn check_hlc<T>(high: &[T], low: &[T], close: &[T]) -> Result<usize> {
    check_same_len(&[
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
    ])
}

/// Wilder average of the true ranges, first value on bar `lookback`.
///
/// `ranges[i]` belongs to bar `i + 1`.
fn wilder_average<T: TaFloat>(ranges: &Series<T>, period: usize, lookback: usize) -> Series<T> {
    let ranges = ranges.as_slice();
    let first = lookback - 1;
    if period == 1 {
        return Series::from(&ranges[first..]);
    }

    let divisor = <T as TaFloat>::from_usize(period);
    let keep = <T as TaFloat>::from_usize(period - 1);
    let mut average = ranges[..period].iter().fold(T::ZERO, |acc, &tr| acc + tr) / divisor;

    let mut result = Series::with_capacity(ranges.len() - first);
    for (i, &tr) in ranges.iter().enumerate().skip(period) {
        if i > first {
            break;
        }
        average = (average * keep + tr) / divisor;
    }
    result.push(average);
    for &tr in &ranges[first + 1..] {
        average = (average * keep + tr) / divisor;
        result.push(average);
    }
    result
}
