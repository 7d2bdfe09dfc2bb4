//! Generic moving average selected by [`MaType`].
//!
//! Several composite indicators (BBANDS, STOCH, MACDEXT style callers) take the
//! kind of smoothing as a parameter; they all go through [`ma`].

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ta_core::{
    error::{Result, TaError},
    num::TaFloat,
    series::Series,
    unstable::UnstablePeriods,
    utils::check_period,
};

use super::{
    dema, dema_lookback, ema, ema_lookback, kama, kama_lookback, mama, mama_lookback, sma,
    sma_lookback, t3, t3_lookback, tema, tema_lookback, trima, trima_lookback, wma, wma_lookback,
    MamaConfig, T3Config,
};

/// Moving average kinds, numbered by their wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum MaType {
    /// Simple.
    #[default]
    Sma = 0,
    /// Exponential.
    Ema = 1,
    /// Weighted.
    Wma = 2,
    /// Double exponential.
    Dema = 3,
    /// Triple exponential.
    Tema = 4,
    /// Triangular.
    Trima = 5,
    /// Kaufman adaptive.
    Kama = 6,
    /// MESA adaptive.
    Mama = 7,
    /// Tillson T3.
    T3 = 8,
}

impl MaType {
    /// Every kind in code order.
    pub const ALL: [MaType; 9] = [
        MaType::Sma,
        MaType::Ema,
        MaType::Wma,
        MaType::Dema,
        MaType::Tema,
        MaType::Trima,
        MaType::Kama,
        MaType::Mama,
        MaType::T3,
    ];

    /// Numeric code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Upper-case short name (`"SMA"`, `"T3"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            MaType::Sma => "SMA",
            MaType::Ema => "EMA",
            MaType::Wma => "WMA",
            MaType::Dema => "DEMA",
            MaType::Tema => "TEMA",
            MaType::Trima => "TRIMA",
            MaType::Kama => "KAMA",
            MaType::Mama => "MAMA",
            MaType::T3 => "T3",
        }
    }

    /// Kind for a numeric code.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaType {
    type Err = TaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TaError::invalid_parameter("optInMAType", s, "moving average name"))
    }
}

/// Lookback of [`ma`]. A period of 1 is a plain copy with no lookback.
#[must_use]
pub fn ma_lookback(period: usize, ma_type: MaType, unstable: &UnstablePeriods) -> usize {
    if period <= 1 {
        return 0;
    }
    match ma_type {
        MaType::Sma => sma_lookback(period),
        MaType::Ema => ema_lookback(period, unstable),
        MaType::Wma => wma_lookback(period),
        MaType::Dema => dema_lookback(period, unstable),
        MaType::Tema => tema_lookback(period, unstable),
        MaType::Trima => trima_lookback(period),
        MaType::Kama => kama_lookback(period, unstable),
        MaType::Mama => mama_lookback(unstable),
        MaType::T3 => t3_lookback(period, unstable),
    }
}

/// Moving average of the given kind.
///
/// MAMA ignores the period and runs with its default limits; T3 uses the
/// default volume factor.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero.
pub fn ma<T: TaFloat>(
    input: &[T],
    period: usize,
    ma_type: MaType,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    if period == 1 {
        return Ok(Series::from(input));
    }
    match ma_type {
        MaType::Sma => sma(input, period),
        MaType::Ema => ema(input, period, unstable),
        MaType::Wma => wma(input, period),
        MaType::Dema => dema(input, period, unstable),
        MaType::Tema => tema(input, period, unstable),
        MaType::Trima => trima(input, period),
        MaType::Kama => kama(input, period, unstable),
        MaType::Mama => Ok(mama(input, &MamaConfig::default(), unstable)?.mama),
        MaType::T3 => t3(input, &T3Config::new(period), unstable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ma_type_codes() {
        for (code, kind) in MaType::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, code);
            assert_eq!(MaType::from_code(code as i64), Some(*kind));
        }
        assert_eq!(MaType::from_code(9), None);
        assert_eq!(MaType::from_code(-1), None);
    }

    #[test]
    fn test_ma_type_names() {
        assert_eq!("ema".parse::<MaType>().unwrap(), MaType::Ema);
        assert_eq!("T3".parse::<MaType>().unwrap(), MaType::T3);
        assert!("HMA".parse::<MaType>().is_err());
        assert_eq!(MaType::Trima.to_string(), "TRIMA");
    }

    #[test]
    fn test_ma_period_one_is_copy() {
        let data = [3.0, 1.0, 4.0, 1.0, 5.0];
        for kind in MaType::ALL {
            let result = ma(&data, 1, kind, &UnstablePeriods::new()).unwrap();
            assert_eq!(result.as_slice(), &data);
            assert_eq!(ma_lookback(1, kind, &UnstablePeriods::new()), 0);
        }
    }

    #[test]
    fn test_ma_length_matches_lookback() {
        let unstable = UnstablePeriods::new();
        let data: Vec<f64> = (0..120).map(|i| 50.0 + (i as f64 * 0.2).cos() * 4.0).collect();
        for kind in MaType::ALL {
            let result = ma(&data, 6, kind, &unstable).unwrap();
            assert_eq!(result.len(), data.len() - ma_lookback(6, kind, &unstable), "{kind}");
        }
    }

    #[test]
    fn test_ma_dispatches_to_sma() {
        let result = ma(&[1.0, 2.0, 3.0, 4.0], 2, MaType::Sma, &UnstablePeriods::new()).unwrap();
        assert_relative_eq!(result[0], 1.5);
        assert_relative_eq!(result[2], 3.5);
    }
}
