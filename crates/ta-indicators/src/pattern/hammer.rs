//! CDLHAMMER: small body near the top of the range with a long lower shadow,
//! sitting at or below the previous low.

use ta_core::{error::Result, num::TaFloat};

use super::settings::{CandleSettings, PeriodTotal};
use super::candles;

/// Lookback of CDLHAMMER.
#[must_use]
pub fn cdl_hammer_lookback(settings: &CandleSettings) -> usize {
    settings
        .body_short
        .avg_period
        .max(settings.shadow_long.avg_period)
        .max(settings.shadow_very_short.avg_period)
        .max(settings.near.avg_period)
        + 1
}

/// Hammer: 100 when
///
/// - the real body is short,
/// - the lower shadow is long,
/// - the upper shadow is very short or absent,
/// - the body is near or below the previous bar's low.
///
/// # Errors
///
/// Returns `InconsistentLength` if the price inputs differ in length.
pub fn cdl_hammer<T: TaFloat>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    settings: &CandleSettings,
) -> Result<Vec<i32>> {
    let bars = candles(open, high, low, close)?;
    let lookback = cdl_hammer_lookback(settings);
    if bars.len() <= lookback {
        return Ok(Vec::new());
    }

    let mut body = PeriodTotal::new(settings.body_short, &bars, lookback);
    let mut shadow_long = PeriodTotal::new(settings.shadow_long, &bars, lookback);
    let mut shadow_very_short = PeriodTotal::new(settings.shadow_very_short, &bars, lookback);
    let mut near = PeriodTotal::new(settings.near, &bars, lookback - 1);

    let mut result = Vec::with_capacity(bars.len() - lookback);
    for i in lookback..bars.len() {
        let (prev, bar) = (&bars[i - 1], &bars[i]);
        let hammer = bar.real_body() < body.average(bar)
            && bar.lower_shadow() > shadow_long.average(bar)
            && bar.upper_shadow() < shadow_very_short.average(bar)
            && bar.close.min(bar.open) <= prev.low + near.average(prev);
        result.push(if hammer { 100 } else { 0 });

        body.advance(&bars, i);
        shadow_long.advance(&bars, i);
        shadow_very_short.advance(&bars, i);
        near.advance(&bars, i - 1);
    }
    Ok(result)
}
