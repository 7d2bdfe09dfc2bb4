//! CDLENGULFING: a real body that engulfs the opposite-colored body before it.

use ta_core::{error::Result, num::TaFloat};

use super::candles;

/// Lookback of CDLENGULFING.
#[must_use]
pub fn cdl_engulfing_lookback() -> usize {
    2
}

/// Engulfing pattern: +100 bullish, -100 bearish, 0 otherwise.
///
/// # Errors
///
/// Returns `InconsistentLength` if the price inputs differ in length.
pub fn cdl_engulfing<T: TaFloat>(
    open: &[T],
    high: &[T],
    low: &[T],
    close: &[T],
) -> Result<Vec<i32>> {
    let bars = candles(open, high, low, close)?;
    let lookback = cdl_engulfing_lookback();
    if bars.len() <= lookback {
        return Ok(Vec::new());
    }

    Ok((lookback..bars.len())
        .map(|i| {
            let (prev, bar) = (&bars[i - 1], &bars[i]);
            let bullish = bar.color() == 1
                && prev.color() == -1
                && bar.close > prev.open
                && bar.open < prev.close;
            let bearish = bar.color() == -1
                && prev.color() == 1
                && bar.open > prev.close
                && bar.close < prev.open;
            if bullish || bearish {
                bar.color() * 100
            } else {
                0
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engulfing() {
        // bar 2: white engulfs black, bar 3: black engulfs white, bar 4: none
        let open = [5.0, 10.0, 8.8, 11.5, 9.0];
        let close = [5.5, 9.0, 11.0, 8.5, 9.2];
        let high = [6.0, 10.5, 11.2, 11.8, 9.5];
        let low = [4.5, 8.5, 8.5, 8.2, 8.8];
        let result = cdl_engulfing(&open, &high, &low, &close).unwrap();
        assert_eq!(result, vec![100, -100, 0]);
    }

    #[test]
    fn test_engulfing_short_input() {
        let result = cdl_engulfing(&[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0]).unwrap();
        assert!(result.is_empty());
    }
}
