//! Stochastic oscillators: STOCHF, STOCH and STOCHRSI.
//!
//! The raw %K locates the close within the high-low range of the last
//! `fast_k_period` bars; the remaining lines are moving averages of it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    utils::{check_period, check_same_len},
};

use super::{rsi, rsi_lookback};
use crate::overlap::{ma, ma_lookback, MaType};

/// Configuration for the fast stochastic (STOCHF).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StochFConfig {
    /// %K window (default: 5).
    pub fast_k_period: usize,
    /// %D smoothing period (default: 3).
    pub fast_d_period: usize,
    /// %D smoothing kind (default: SMA).
    pub fast_d_ma: MaType,
}

impl Default for StochFConfig {
    fn default() -> Self {
        Self {
            fast_k_period: 5,
            fast_d_period: 3,
            fast_d_ma: MaType::Sma,
        }
    }
}

impl StochFConfig {
    /// Create a new configuration with an SMA %D.
    pub fn new(fast_k_period: usize, fast_d_period: usize) -> Self {
        Self {
            fast_k_period,
            fast_d_period,
            ..Self::default()
        }
    }

    /// Set the %D smoothing kind.
    pub fn with_ma_type(mut self, ma_type: MaType) -> Self {
        self.fast_d_ma = ma_type;
        self
    }
}

/// Configuration for the slow stochastic (STOCH).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StochConfig {
    /// Raw %K window (default: 5).
    pub fast_k_period: usize,
    /// Slow %K smoothing period (default: 3).
    pub slow_k_period: usize,
    /// Slow %K smoothing kind (default: SMA).
    pub slow_k_ma: MaType,
    /// Slow %D smoothing period (default: 3).
    pub slow_d_period: usize,
    /// Slow %D smoothing kind (default: SMA).
    pub slow_d_ma: MaType,
}

impl Default for StochConfig {
    fn default() -> Self {
        Self {
            fast_k_period: 5,
            slow_k_period: 3,
            slow_k_ma: MaType::Sma,
            slow_d_period: 3,
            slow_d_ma: MaType::Sma,
        }
    }
}

impl StochConfig {
    /// Create a new configuration with SMA smoothing.
    pub fn new(fast_k_period: usize, slow_k_period: usize, slow_d_period: usize) -> Self {
        Self {
            fast_k_period,
            slow_k_period,
            slow_d_period,
            ..Self::default()
        }
    }

    /// Set both smoothing kinds.
    pub fn with_ma_types(mut self, slow_k_ma: MaType, slow_d_ma: MaType) -> Self {
        self.slow_k_ma = slow_k_ma;
        self.slow_d_ma = slow_d_ma;
        self
    }
}

/// Configuration for the stochastic RSI (STOCHRSI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StochRsiConfig {
    /// RSI period (default: 14).
    pub period: usize,
    /// %K window over the RSI (default: 5).
    pub fast_k_period: usize,
    /// %D smoothing period (default: 3).
    pub fast_d_period: usize,
    /// %D smoothing kind (default: SMA).
    pub fast_d_ma: MaType,
}

impl Default for StochRsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            fast_k_period: 5,
            fast_d_period: 3,
            fast_d_ma: MaType::Sma,
        }
    }
}

impl StochRsiConfig {
    /// Create a new configuration with an SMA %D.
    pub fn new(period: usize, fast_k_period: usize, fast_d_period: usize) -> Self {
        Self {
            period,
            fast_k_period,
            fast_d_period,
            ..Self::default()
        }
    }

    fn stochf(&self) -> StochFConfig {
        StochFConfig {
            fast_k_period: self.fast_k_period,
            fast_d_period: self.fast_d_period,
            fast_d_ma: self.fast_d_ma,
        }
    }
}

/// Output of STOCHF and STOCHRSI.
#[derive(Debug, Clone, PartialEq)]
pub struct StochFOutput<T: TaFloat> {
    /// Fast %K.
    pub fast_k: Series<T>,
    /// Fast %D.
    pub fast_d: Series<T>,
}

/// Output of STOCH.
#[derive(Debug, Clone, PartialEq)]
pub struct StochOutput<T: TaFloat> {
    /// Slow %K.
    pub slow_k: Series<T>,
    /// Slow %D.
    pub slow_d: Series<T>,
}

/// Lookback of STOCHF.
#[must_use]
pub fn stochf_lookback(config: &StochFConfig, unstable: &UnstablePeriods) -> usize {
    config.fast_k_period.saturating_sub(1)
        + ma_lookback(config.fast_d_period, config.fast_d_ma, unstable)
}

/// Lookback of STOCH.
#[must_use]
pub fn stoch_lookback(config: &StochConfig, unstable: &UnstablePeriods) -> usize {
    config.fast_k_period.saturating_sub(1)
        + ma_lookback(config.slow_k_period, config.slow_k_ma, unstable)
        + ma_lookback(config.slow_d_period, config.slow_d_ma, unstable)
}

/// Lookback of STOCHRSI.
#[must_use]
pub fn stochrsi_lookback(config: &StochRsiConfig, unstable: &UnstablePeriods) -> usize {
    rsi_lookback(config.period, unstable)
        + stochf_lookback(&config.stochf(), unstable)
        + unstable.get(FuncUnstId::Stochrsi)
}

/// Fast Stochastic.
///
/// # Errors
///
/// Returns `InvalidParameter` for a zero period and `InconsistentLength` if
/// the inputs differ in length.
pub fn stochf<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    config: &StochFConfig,
    unstable: &UnstablePeriods,
) -> Result<StochFOutput<T>> {
    check_period("optInFastK_Period", config.fast_k_period, 1)?;
    check_period("optInFastD_Period", config.fast_d_period, 1)?;
    let len = check_same_len(&[
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
    ])?;
    if len <= stochf_lookback(config, unstable) {
        return Ok(StochFOutput {
            fast_k: Series::new(),
            fast_d: Series::new(),
        });
    }

    let raw_k = raw_k(high, low, close, config.fast_k_period);
    let fast_d = ma(raw_k.as_slice(), config.fast_d_period, config.fast_d_ma, unstable)?;
    let fast_k = raw_k.skip(ma_lookback(config.fast_d_period, config.fast_d_ma, unstable));
    Ok(StochFOutput { fast_k, fast_d })
}

/// Slow Stochastic.
///
/// # Errors
///
/// Returns `InvalidParameter` for a zero period and `InconsistentLength` if
/// the inputs differ in length.
pub fn stoch<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    config: &StochConfig,
    unstable: &UnstablePeriods,
) -> Result<StochOutput<T>> {
    check_period("optInFastK_Period", config.fast_k_period, 1)?;
    check_period("optInSlowK_Period", config.slow_k_period, 1)?;
    check_period("optInSlowD_Period", config.slow_d_period, 1)?;
    let len = check_same_len(&[
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
    ])?;
    if len <= stoch_lookback(config, unstable) {
        return Ok(StochOutput {
            slow_k: Series::new(),
            slow_d: Series::new(),
        });
    }

    let raw_k = raw_k(high, low, close, config.fast_k_period);
    let slow_k = ma(raw_k.as_slice(), config.slow_k_period, config.slow_k_ma, unstable)?;
    let slow_d = ma(slow_k.as_slice(), config.slow_d_period, config.slow_d_ma, unstable)?;
    let slow_k = slow_k.skip(ma_lookback(config.slow_d_period, config.slow_d_ma, unstable));
    Ok(StochOutput { slow_k, slow_d })
}

/// Stochastic Relative Strength Index: STOCHF applied to RSI.
///
/// # Errors
///
/// Returns `InvalidParameter` if the RSI period is below 2 or a stochastic
/// period is zero.
pub fn stochrsi<T: TaFloat>(
    input: &[T],
    config: &StochRsiConfig,
    unstable: &UnstablePeriods,
) -> Result<StochFOutput<T>> {
    let stochf_config = config.stochf();
    let rsi = rsi(input, config.period, unstable)?;
    let output = stochf(
        rsi.as_slice(),
        rsi.as_slice(),
        rsi.as_slice(),
        &stochf_config,
        unstable,
    )?;
    let skip = unstable.get(FuncUnstId::Stochrsi);
    Ok(StochFOutput {
        fast_k: output.fast_k.skip(skip),
        fast_d: output.fast_d.skip(skip),
    })
}

/// Raw %K from bar `period - 1` onwards.
///
/// The window extremes are tracked by index and only rescanned when the
/// current extreme drops out of the window.
fn raw_k<T: TaFloat>(high: &[T], low: &[T], close: &[T], period: usize) -> Series<T> {
    let lookback = period - 1;
    let len = close.len();
    let mut result = Series::with_capacity(len.saturating_sub(lookback));

    let mut lowest_idx: Option<usize> = None;
    let mut highest_idx: Option<usize> = None;
    let mut lowest = T::ZERO;
    let mut highest = T::ZERO;

    for today in lookback..len {
        let trailing = today - lookback;

        match lowest_idx {
            Some(idx) if idx >= trailing => {
                if low[today] <= lowest {
                    lowest_idx = Some(today);
                    lowest = low[today];
                }
            }
            _ => {
                let mut idx = trailing;
                lowest = low[idx];
                for i in trailing + 1..=today {
                    if low[i] < lowest {
                        idx = i;
                        lowest = low[i];
                    }
                }
                lowest_idx = Some(idx);
            }
        }

        match highest_idx {
            Some(idx) if idx >= trailing => {
                if high[today] >= highest {
                    highest_idx = Some(today);
                    highest = high[today];
                }
            }
            _ => {
                let mut idx = trailing;
                highest = high[idx];
                for i in trailing + 1..=today {
                    if high[i] > highest {
                        idx = i;
                        highest = high[i];
                    }
                }
                highest_idx = Some(idx);
            }
        }

        let range = (highest - lowest) / T::HUNDRED;
        result.push(if range != T::ZERO {
            (close[today] - lowest) / range
        } else {
            T::ZERO
        });
    }
    result
}
