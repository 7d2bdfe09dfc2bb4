//! Bollinger Bands.
//!
//! A moving average (middle band) enveloped by upper and lower bands placed a
//! multiple of the rolling standard deviation away from it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ta_core::{
    error::Result, num::TaFloat, series::Series, unstable::UnstablePeriods, utils::check_period,
};

use super::{ma, ma_lookback, sma, MaType};
use crate::statistic::{deviation, stddev};

/// Configuration for Bollinger Bands.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BbandsConfig {
    /// Period of the moving average and the deviation (default: 5).
    pub period: usize,
    /// Deviation multiplier of the upper band (default: 2.0).
    pub nb_dev_up: f64,
    /// Deviation multiplier of the lower band (default: 2.0).
    pub nb_dev_dn: f64,
    /// Kind of moving average for the middle band (default: SMA).
    pub ma_type: MaType,
}

impl Default for BbandsConfig {
    fn default() -> Self {
        Self {
            period: 5,
            nb_dev_up: 2.0,
            nb_dev_dn: 2.0,
            ma_type: MaType::Sma,
        }
    }
}

impl BbandsConfig {
    /// Create a new configuration with the default multipliers and SMA.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    /// Set both deviation multipliers.
    pub fn with_deviations(mut self, up: f64, down: f64) -> Self {
        self.nb_dev_up = up;
        self.nb_dev_dn = down;
        self
    }

    /// Set the moving average kind.
    pub fn with_ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }
}

/// Output of Bollinger Bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BbandsOutput<T: TaFloat> {
    /// Upper band.
    pub upper: Series<T>,
    /// Middle band (the moving average).
    pub middle: Series<T>,
    /// Lower band.
    pub lower: Series<T>,
}

/// Number of leading samples consumed before the first band values.
#[must_use]
pub fn bbands_lookback(config: &BbandsConfig, unstable: &UnstablePeriods) -> usize {
    ma_lookback(config.period, config.ma_type, unstable).max(config.period.saturating_sub(1))
}

/// Bollinger Bands.
///
/// With an SMA middle band the deviation is taken around that same average.
/// Other averages are paired with the plain rolling standard deviation of the
/// window ending on the same bar.
///
/// # Errors
///
/// Returns `InvalidParameter` if the period is below 2.
pub fn bbands<T: TaFloat>(
    input: &[T],
    config: &BbandsConfig,
    unstable: &UnstablePeriods,
) -> Result<BbandsOutput<T>> {
    let period = config.period;
    check_period("optInTimePeriod", period, 2)?;
    let lookback = bbands_lookback(config, unstable);
    let mut output = BbandsOutput {
        upper: Series::new(),
        middle: Series::new(),
        lower: Series::new(),
    };
    if input.len() <= lookback {
        return Ok(output);
    }
    let count = input.len() - lookback;

    let averages = ma(input, period, config.ma_type, unstable)?;
    let middle = &averages.as_slice()[averages.len() - count..];

    let deviations: Vec<T> = if config.ma_type == MaType::Sma {
        let squares: Vec<T> = input.iter().map(|&value| value * value).collect();
        let mean_squares = sma(&squares, period)?;
        middle
            .iter()
            .zip(&mean_squares.as_slice()[mean_squares.len() - count..])
            .map(|(&mean, &mean_square)| deviation(mean_square - mean * mean))
            .collect()
    } else {
        let full = stddev(input, period, 1.0)?;
        full.as_slice()[full.len() - count..].to_vec()
    };

    let up = T::from_f64_lossy(config.nb_dev_up);
    let down = T::from_f64_lossy(config.nb_dev_dn);
    output.upper = Series::with_capacity(count);
    output.middle = Series::with_capacity(count);
    output.lower = Series::with_capacity(count);
    for (&mean, &spread) in middle.iter().zip(&deviations) {
        output.upper.push(mean + spread * up);
        output.middle.push(mean);
        output.lower.push(mean - spread * down);
    }
    Ok(output)
}
