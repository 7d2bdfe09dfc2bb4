//! Candle settings: how "short", "long" or "near" is measured.
//!
//! Each setting averages a candle range over the preceding bars and scales it
//! by a factor. A zero averaging period compares against the current candle's
//! own range instead.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ta_core::{num::TaFloat, ohlcv::Bar};

/// Which part of a candle a setting measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RangeType {
    /// `|close - open|`
    RealBody,
    /// `high - low`
    HighLow,
    /// Upper plus lower shadow.
    Shadows,
}

/// One candle setting.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandleSetting {
    /// Range being averaged.
    pub range_type: RangeType,
    /// Number of preceding bars averaged; 0 uses the current bar.
    pub avg_period: usize,
    /// Multiplier applied to the average.
    pub factor: f64,
}

impl CandleSetting {
    /// Create a new setting.
    pub const fn new(range_type: RangeType, avg_period: usize, factor: f64) -> Self {
        Self {
            range_type,
            avg_period,
            factor,
        }
    }

    /// The measured range of one candle.
    pub fn range<T: TaFloat>(&self, bar: &Bar<T>) -> T {
        match self.range_type {
            RangeType::RealBody => bar.real_body(),
            RangeType::HighLow => bar.range(),
            RangeType::Shadows => bar.upper_shadow() + bar.lower_shadow(),
        }
    }

    /// Threshold for `bar` given the running total of the preceding ranges.
    pub fn average<T: TaFloat>(&self, total: T, bar: &Bar<T>) -> T {
        let base = if self.avg_period != 0 {
            total / <T as TaFloat>::from_usize(self.avg_period)
        } else {
            self.range(bar)
        };
        let scaled = T::from_f64_lossy(self.factor) * base;
        if self.range_type == RangeType::Shadows {
            scaled / T::TWO
        } else {
            scaled
        }
    }
}

/// The settings table used by the pattern functions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandleSettings {
    /// Real body is like a doji when shorter than 10% of the average range.
    pub body_doji: CandleSetting,
    /// Real body is short when shorter than the average body.
    pub body_short: CandleSetting,
    /// Shadow is long when longer than the real body.
    pub shadow_long: CandleSetting,
    /// Shadow is very short when shorter than 10% of the average range.
    pub shadow_very_short: CandleSetting,
    /// Prices are near when within 20% of the average range.
    pub near: CandleSetting,
}

impl Default for CandleSettings {
    fn default() -> Self {
        Self {
            body_doji: CandleSetting::new(RangeType::HighLow, 10, 0.1),
            body_short: CandleSetting::new(RangeType::RealBody, 10, 1.0),
            shadow_long: CandleSetting::new(RangeType::RealBody, 0, 1.0),
            shadow_very_short: CandleSetting::new(RangeType::HighLow, 10, 0.1),
            near: CandleSetting::new(RangeType::HighLow, 5, 0.2),
        }
    }
}

/// Running total of one setting's range over the `avg_period` bars before
/// the current one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PeriodTotal<T> {
    setting: CandleSetting,
    total: T,
    trailing: usize,
}

impl<T: TaFloat> PeriodTotal<T> {
    /// Prime the total for a first evaluation at bar `first`.
    pub(crate) fn new(setting: CandleSetting, bars: &[Bar<T>], first: usize) -> Self {
        let trailing = first - setting.avg_period;
        let total = bars[trailing..first]
            .iter()
            .fold(T::ZERO, |acc, bar| acc + setting.range(bar));
        Self {
            setting,
            total,
            trailing,
        }
    }

    /// Threshold for bar `bar`.
    pub(crate) fn average(&self, bar: &Bar<T>) -> T {
        self.setting.average(self.total, bar)
    }

    /// Slide the window past bar `current`.
    pub(crate) fn advance(&mut self, bars: &[Bar<T>], current: usize) {
        self.total = self.total + self.setting.range(&bars[current])
            - self.setting.range(&bars[self.trailing]);
        self.trailing += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_setting_ranges() {
        let bar = Bar::new(10.0, 14.0, 8.0, 11.0, 0.0);
        let body = CandleSetting::new(RangeType::RealBody, 0, 1.0);
        let high_low = CandleSetting::new(RangeType::HighLow, 0, 1.0);
        let shadows = CandleSetting::new(RangeType::Shadows, 0, 1.0);
        assert_relative_eq!(body.range(&bar), 1.0);
        assert_relative_eq!(high_low.range(&bar), 6.0);
        assert_relative_eq!(shadows.range(&bar), 5.0);
        // Shadows are halved; zero period measures the bar itself.
        assert_relative_eq!(shadows.average(123.0, &bar), 2.5);
    }

    #[test]
    fn test_setting_average_uses_period() {
        let bar = Bar::new(10.0, 14.0, 8.0, 11.0, 0.0);
        let setting = CandleSetting::new(RangeType::HighLow, 10, 0.1);
        assert_relative_eq!(setting.average(50.0, &bar), 0.5);
    }

    #[test]
    fn test_period_total_slides() {
        let bars: Vec<Bar<f64>> = (0..6)
            .map(|i| Bar::new(10.0, 10.0 + i as f64, 9.0, 10.0, 0.0))
            .collect();
        let setting = CandleSetting::new(RangeType::HighLow, 2, 1.0);
        let mut total = PeriodTotal::new(setting, &bars, 2);
        // Ranges 1 and 2 precede bar 2.
        assert_relative_eq!(total.average(&bars[2]), 1.5);
        total.advance(&bars, 2);
        assert_relative_eq!(total.average(&bars[3]), 2.5);
    }
}
