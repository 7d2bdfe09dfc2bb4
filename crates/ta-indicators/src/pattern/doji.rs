//! CDLDOJI: a candle whose real body is tiny compared to recent ranges.

use ta_core::{error::Result, num::TaFloat};

use super::settings::{CandleSettings, PeriodTotal};
use super::candles;

/// Lookback of CDLDOJI.
#[must_use]
pub fn cdl_doji_lookback(settings: &CandleSettings) -> usize {
    settings.body_doji.avg_period
}

/// Doji: 100 when the real body is no larger than the doji threshold, else 0.
///
/// # Errors
///
/// Returns `InconsistentLength` if the price inputs differ in length.
pub fn cdl_doji<T: TaFloat>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
    settings: &CandleSettings,
) -> Result<Vec<i32>> {
    let bars = candles(open, high, low, close)?;
    let lookback = cdl_doji_lookback(settings);
    if bars.len() <= lookback {
        return Ok(Vec::new());
    }

    let mut body_doji = PeriodTotal::new(settings.body_doji, &bars, lookback);
    let mut result = Vec::with_capacity(bars.len() - lookback);
    for i in lookback..bars.len() {
        let bar = &bars[i];
        result.push(if bar.real_body() <= body_doji.average(bar) {
            100
        } else {
            0
        });
        body_doji.advance(&bars, i);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doji_detection() {
        // Ten ordinary candles with range 2, then a doji and a long body.
        let mut open = vec![10.0; 10];
        let mut high = vec![11.0; 10];
        let mut low = vec![9.0; 10];
        let mut close = vec![10.5; 10];
        open.extend([10.0, 10.0]);
        high.extend([11.0, 11.0]);
        low.extend([9.0, 9.0]);
        close.extend([10.1, 10.9]);

        let result = cdl_doji(&open, &high, &low, &close, &CandleSettings::default()).unwrap();
        assert_eq!(result, vec![100, 0]);
        assert_eq!(cdl_doji_lookback(&CandleSettings::default()), 10);
    }
}
