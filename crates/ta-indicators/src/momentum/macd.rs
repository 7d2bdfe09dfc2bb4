//! Moving Average Convergence/Divergence (MACD).
//!
//! MACD = EMA(fast) - EMA(slow); the signal line is an EMA of MACD and the
//! histogram their difference. The fast EMA is seeded so that its first value
//! lands on the same bar as the slow EMA's.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::UnstablePeriods,
    utils::{check_period, per_to_k},
};

use crate::overlap::{ema_from, ema_lookback};

/// Configuration for MACD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MacdConfig {
    /// Fast EMA period (default: 12).
    pub fast_period: usize,
    /// Slow EMA period (default: 26).
    pub slow_period: usize,
    /// Signal EMA period (default: 9).
    pub signal_period: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl MacdConfig {
    /// Create a new MACD configuration.
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    /// `(fast, slow)` with the shorter period first.
    fn ordered(&self) -> (usize, usize) {
        if self.slow_period < self.fast_period {
            (self.slow_period, self.fast_period)
        } else {
            (self.fast_period, self.slow_period)
        }
    }
}

/// Output of MACD.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput<T: TaFloat> {
    /// MACD line.
    pub macd: Series<T>,
    /// Signal line.
    pub signal: Series<T>,
    /// MACD minus signal.
    pub histogram: Series<T>,
}

/// Number of leading samples consumed before the first MACD value.
#[must_use]
pub fn macd_lookback(config: &MacdConfig, unstable: &UnstablePeriods) -> usize {
    let (_, slow) = config.ordered();
    ema_lookback(slow, unstable) + ema_lookback(config.signal_period, unstable)
}

/// Moving Average Convergence/Divergence.
///
/// Fast and slow periods are swapped when given in the wrong order.
///
/// # Errors
///
/// Returns `InvalidParameter` if the fast or slow period is below 2 or the
/// signal period is zero.
pub fn macd<T: TaFloat>(
    input: &[T],
    config: &MacdConfig,
    unstable: &UnstablePeriods,
) -> Result<MacdOutput<T>> {
    check_period("optInFastPeriod", config.fast_period, 2)?;
    check_period("optInSlowPeriod", config.slow_period, 2)?;
    check_period("optInSignalPeriod", config.signal_period, 1)?;

    let lookback = macd_lookback(config, unstable);
    if input.len() <= lookback {
        return Ok(MacdOutput {
            macd: Series::new(),
            signal: Series::new(),
            histogram: Series::new(),
        });
    }

    let (fast, slow) = config.ordered();
    let signal_period = config.signal_period;
    let slow_lookback = ema_lookback(slow, unstable);
    let signal_lookback = ema_lookback(signal_period, unstable);

    let fast_ema = ema_from(
        input,
        fast,
        per_to_k(fast),
        ema_lookback(fast, unstable),
        slow_lookback,
    );
    let slow_ema = ema_from(input, slow, per_to_k(slow), slow_lookback, slow_lookback);
    let line: Vec<T> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(&f, &s)| f - s)
        .collect();

    let signal = ema_from(
        &line,
        signal_period,
        per_to_k(signal_period),
        signal_lookback,
        signal_lookback,
    );
    let macd: Series<T> = Series::from(&line[signal_lookback..]);
    let histogram = macd
        .iter()
        .zip(signal.iter())
        .map(|(&m, &s)| m - s)
        .collect();

    Ok(MacdOutput {
        macd,
        signal,
        histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::ema;
    use approx::assert_relative_eq;
    use ta_core::unstable::FuncUnstId;

    fn prices() -> Vec<f64> {
        (0..80)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn test_macd_lookback() {
        assert_eq!(macd_lookback(&MacdConfig::default(), &UnstablePeriods::new()), 33);
        assert_eq!(
            macd_lookback(&MacdConfig::default(), &UnstablePeriods::new().with(FuncUnstId::Ema, 2)),
            37
        );
    }

    #[test]
    fn test_macd_lengths() {
        let data = prices();
        let output = macd(&data, &MacdConfig::default(), &UnstablePeriods::new()).unwrap();
        assert_eq!(output.macd.len(), 47);
        assert_eq!(output.signal.len(), 47);
        assert_eq!(output.histogram.len(), 47);
    }

    #[test]
    fn test_macd_histogram_is_difference() {
        let data = prices();
        let output = macd(&data, &MacdConfig::new(5, 10, 4), &UnstablePeriods::new()).unwrap();
        for i in 0..output.macd.len() {
            assert_relative_eq!(output.histogram[i], output.macd[i] - output.signal[i]);
        }
    }

    #[test]
    fn test_macd_slow_line_matches_ema() {
        // The slow EMA inside MACD is a plain EMA; the line minus the fast
        // EMA seeded on the same bar must give it back.
        let data = prices();
        let unstable = UnstablePeriods::new();
        let config = MacdConfig::new(3, 6, 1);
        let output = macd(&data, &config, &unstable).unwrap();
        let slow = ema(&data, 6, &unstable).unwrap();
        let fast = ema_from(&data, 3, per_to_k::<f64>(3), 2, 5);
        for i in 0..output.macd.len() {
            assert_relative_eq!(output.macd[i], fast[i] - slow[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_macd_swaps_periods() {
        let data = prices();
        let unstable = UnstablePeriods::new();
        let normal = macd(&data, &MacdConfig::new(5, 10, 4), &unstable).unwrap();
        let swapped = macd(&data, &MacdConfig::new(10, 5, 4), &unstable).unwrap();
        assert_eq!(normal, swapped);
    }
}
