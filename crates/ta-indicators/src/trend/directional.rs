//! Directional movement: +DM/-DM, +DI/-DI, DX, ADX and ADXR.
//!
//! Every member walks the bars the same way. The first `period - 1` moves are
//! summed, after which directional movement and true range are smoothed with
//! Wilder's running sum `x - x / period + new`. A period of 1 turns the
//! smoothing off and yields raw per-bar values.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    utils::{bar_true_range, check_period, check_same_len},
};

/// Side of the directional movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Plus,
    Minus,
}

/// Raw movement of one bar against its predecessor.
#[derive(Debug, Clone, Copy)]
struct Move<T> {
    plus: T,
    minus: T,
    true_range: T,
}

impl<T: TaFloat> Move<T> {
    fn side(&self, side: Side) -> T {
        match side {
            Side::Plus => self.plus,
            Side::Minus => self.minus,
        }
    }
}

/// Wilder walk over high/low (and optionally close) shared by the family.
struct DirectionalWalk<'a, T> {
    high: &'a [T],
    low: &'a [T],
    close: Option<&'a [T]>,
    period: T,
    today: usize,
    prev_high: T,
    prev_low: T,
    prev_close: T,
    plus_dm: T,
    minus_dm: T,
    true_range: T,
}

impl<'a, T: TaFloat> DirectionalWalk<'a, T> {
    fn new(high: &'a [T], low: &'a [T], close: Option<&'a [T]>, period: usize) -> Self {
        Self {
            high,
            low,
            close,
            period: <T as TaFloat>::from_usize(period),
            today: 0,
            prev_high: high[0],
            prev_low: low[0],
            prev_close: close.map_or(T::ZERO, |close| close[0]),
            plus_dm: T::ZERO,
            minus_dm: T::ZERO,
            true_range: T::ZERO,
        }
    }

    fn has_next(&self) -> bool {
        self.today + 1 < self.high.len()
    }

    fn next_move(&mut self) -> Move<T> {
        self.today += 1;
        let high = self.high[self.today];
        let low = self.low[self.today];
        let diff_plus = high - self.prev_high;
        let diff_minus = self.prev_low - low;
        self.prev_high = high;
        self.prev_low = low;

        let true_range = match self.close {
            Some(close) => {
                let range = bar_true_range(high, low, self.prev_close);
                self.prev_close = close[self.today];
                range
            }
            None => T::ZERO,
        };

        Move {
            plus: if diff_plus > T::ZERO && diff_plus > diff_minus {
                diff_plus
            } else {
                T::ZERO
            },
            minus: if diff_minus > T::ZERO && diff_minus > diff_plus {
                diff_minus
            } else {
                T::ZERO
            },
            true_range,
        }
    }

    fn accumulate(&mut self) {
        let step = self.next_move();
        self.plus_dm = self.plus_dm + step.plus;
        self.minus_dm = self.minus_dm + step.minus;
        self.true_range = self.true_range + step.true_range;
    }

    fn smooth(&mut self) {
        let step = self.next_move();
        let period = self.period;
        self.plus_dm = self.plus_dm - self.plus_dm / period + step.plus;
        self.minus_dm = self.minus_dm - self.minus_dm / period + step.minus;
        self.true_range = self.true_range - self.true_range / period + step.true_range;
    }

    fn dm(&self, side: Side) -> T {
        match side {
            Side::Plus => self.plus_dm,
            Side::Minus => self.minus_dm,
        }
    }

    /// `(+DI, -DI)`, or `None` while the smoothed true range is zero.
    fn di(&self) -> Option<(T, T)> {
        if self.true_range.is_near_zero() {
            return None;
        }
        Some((
            T::HUNDRED * (self.plus_dm / self.true_range),
            T::HUNDRED * (self.minus_dm / self.true_range),
        ))
    }

    /// Directional index of the current state, `None` when undefined.
    fn dx(&self) -> Option<T> {
        let (plus, minus) = self.di()?;
        let total = plus + minus;
        if total.is_near_zero() {
            return None;
        }
        Some(T::HUNDRED * ((minus - plus).abs() / total))
    }
}

/// Lookback of PLUS_DM.
#[must_use]
pub fn plus_dm_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    dm_lookback(period, unstable.get(FuncUnstId::PlusDm))
}

/// Lookback of MINUS_DM.
#[must_use]
pub fn minus_dm_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    dm_lookback(period, unstable.get(FuncUnstId::MinusDm))
}

/// Lookback of PLUS_DI.
#[must_use]
pub fn plus_di_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    di_lookback(period, unstable.get(FuncUnstId::PlusDi))
}

/// Lookback of MINUS_DI.
#[must_use]
pub fn minus_di_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    di_lookback(period, unstable.get(FuncUnstId::MinusDi))
}

/// Lookback of DX.
#[must_use]
pub fn dx_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    period + unstable.get(FuncUnstId::Dx)
}

/// Lookback of ADX.
#[must_use]
pub fn adx_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    (2 * period).saturating_sub(1) + unstable.get(FuncUnstId::Adx)
}

/// Lookback of ADXR.
#[must_use]
pub fn adxr_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    adx_lookback(period, unstable) + period.saturating_sub(1) + unstable.get(FuncUnstId::Adxr)
}

fn dm_lookback(period: usize, unstable: usize) -> usize {
    if period > 1 {
        period - 1 + unstable
    } else {
        1
    }
}

fn di_lookback(period: usize, unstable: usize) -> usize {
    if period > 1 {
        period + unstable
    } else {
        1
    }
}

/// Plus Directional Movement.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero and `InconsistentLength`
/// if high and low differ in length.
pub fn plus_dm<T: TaFloat>(
    high: &[T],
    low: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    directional_movement(high, low, period, plus_dm_lookback(period, unstable), Side::Plus)
}

/// Minus Directional Movement.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero and `InconsistentLength`
/// if high and low differ in length.
pub fn minus_dm<T: TaFloat>(
    high: &[T],
    low: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    directional_movement(high, low, period, minus_dm_lookback(period, unstable), Side::Minus)
}

/// Plus Directional Indicator.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero and `InconsistentLength`
/// if the inputs differ in length.
pub fn plus_di<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    directional_indicator(high, low, close, period, plus_di_lookback(period, unstable), Side::Plus)
}

/// Minus Directional Indicator.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero and `InconsistentLength`
/// if the inputs differ in length.
pub fn minus_di<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    directional_indicator(
        high,
        low,
        close,
        period,
        minus_di_lookback(period, unstable),
        Side::Minus,
    )
}

/// Directional Movement Index.
///
/// # Formula
///
/// DX = 100 * |+DI - -DI| / (+DI + -DI)
///
/// A bar where DX is undefined repeats the previous value (0 for the first).
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2 and `InconsistentLength`
/// if the inputs differ in length.
pub fn dx<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    let len = check_hlc(high, low, close)?;
    let lookback = dx_lookback(period, unstable);
    if len <= lookback {
        return Ok(Series::new());
    }

    let mut walk = DirectionalWalk::new(high, low, Some(close), period);
    for _ in 1..period {
        walk.accumulate();
    }
    for _ in 0..=unstable.get(FuncUnstId::Dx) {
        walk.smooth();
    }

    let mut result = Series::with_capacity(len - lookback);
    let mut previous = walk.dx().unwrap_or(T::ZERO);
    result.push(previous);
    while walk.has_next() {
        walk.smooth();
        previous = walk.dx().unwrap_or(previous);
        result.push(previous);
    }
    Ok(result)
}

/// Average Directional Movement Index.
///
/// Seeded with the mean of the first `period` DX values, then Wilder-averaged:
/// `ADX = (ADX[-1] * (period - 1) + DX) / period`.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2 and `InconsistentLength`
/// if the inputs differ in length.
pub fn adx<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    let len = check_hlc(high, low, close)?;
    let lookback = adx_lookback(period, unstable);
    if len <= lookback {
        return Ok(Series::new());
    }

    let divisor = <T as TaFloat>::from_usize(period);
    let keep = <T as TaFloat>::from_usize(period - 1);
    let mut walk = DirectionalWalk::new(high, low, Some(close), period);
    for _ in 1..period {
        walk.accumulate();
    }

    let mut sum_dx = T::ZERO;
    for _ in 0..period {
        walk.smooth();
        if let Some(dx) = walk.dx() {
            sum_dx = sum_dx + dx;
        }
    }
    let mut adx = sum_dx / divisor;
    for _ in 0..unstable.get(FuncUnstId::Adx) {
        adx = next_adx(&mut walk, adx, keep, divisor);
    }

    let mut result = Series::with_capacity(len - lookback);
    result.push(adx);
    while walk.has_next() {
        adx = next_adx(&mut walk, adx, keep, divisor);
        result.push(adx);
    }
    Ok(result)
}

fn next_adx<T: TaFloat>(walk: &mut DirectionalWalk<'_, T>, adx: T, keep: T, divisor: T) -> T {
    walk.smooth();
    match walk.dx() {
        Some(dx) => (adx * keep + dx) / divisor,
        None => adx,
    }
}

/// Average Directional Movement Index Rating: `(ADX + ADX[period - 1 bars ago]) / 2`.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2 and `InconsistentLength`
/// if the inputs differ in length.
pub fn adxr<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    let len = check_hlc(high, low, close)?;
    if len <= adxr_lookback(period, unstable) {
        return Ok(Series::new());
    }

    let adx = adx(high, low, close, period, unstable)?;
    let lag = period - 1;
    let rating: Series<T> = adx.as_slice()[lag..]
        .iter()
        .zip(adx.iter())
        .map(|(&current, &earlier)| (current + earlier) / T::TWO)
        .collect();
    Ok(rating.skip(unstable.get(FuncUnstId::Adxr)))
}

fn check_hlc<T>(high: &[T], low: &[T], close: &[T]) -> Result<usize> {
    check_same_len(&[
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
    ])
}

fn directional_movement<T: TaFloat>(
    high: &[T],
    low: &[T],
    period: usize,
    lookback: usize,
    side: Side,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    let len = check_same_len(&[("high", high.len()), ("low", low.len())])?;
    if len <= lookback {
        return Ok(Series::new());
    }

    let mut walk = DirectionalWalk::new(high, low, None, period);
    let mut result = Series::with_capacity(len - lookback);
    if period == 1 {
        while walk.has_next() {
            result.push(walk.next_move().side(side));
        }
        return Ok(result);
    }

    for _ in 1..period {
        walk.accumulate();
    }
    while walk.today < lookback {
        walk.smooth();
    }
    result.push(walk.dm(side));
    while walk.has_next() {
        walk.smooth();
        result.push(walk.dm(side));
    }
    Ok(result)
}

fn directional_indicator<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    lookback: usize,
    side: Side,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    let len = check_hlc(high, low, close)?;
    if len <= lookback {
        return Ok(Series::new());
    }

    let mut walk = DirectionalWalk::new(high, low, Some(close), period);
    let mut result = Series::with_capacity(len - lookback);
    if period == 1 {
        while walk.has_next() {
            let step = walk.next_move();
            let movement = step.side(side);
            result.push(if movement > T::ZERO && !step.true_range.is_near_zero() {
                T::HUNDRED * (movement / step.true_range)
            } else {
                T::ZERO
            });
        }
        return Ok(result);
    }

    let pick = |walk: &DirectionalWalk<'_, T>| {
        walk.di().map_or(T::ZERO, |(plus, minus)| match side {
            Side::Plus => plus,
            Side::Minus => minus,
        })
    };

    for _ in 1..period {
        walk.accumulate();
    }
    while walk.today < lookback {
        walk.smooth();
    }
    result.push(pick(&walk));
    while walk.has_next() {
        walk.smooth();
        result.push(pick(&walk));
    }
    Ok(result)
}
