//! Function identifiers and groups.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Every indicator the engine can run.
///
/// The registry maps names to entries carrying one of these ids; the
/// lookback calculator and the kernel table match on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FuncId {
    // Cycle Indicators
    HtDcperiod,
    HtDcphase,
    HtPhasor,
    HtSine,
    HtTrendmode,
    // Momentum Indicators
    Adx,
    Adxr,
    Cmo,
    Dx,
    Imi,
    Macd,
    Mfi,
    MinusDi,
    MinusDm,
    Mom,
    PlusDi,
    PlusDm,
    Roc,
    Rsi,
    Stoch,
    Stochf,
    Stochrsi,
    // Overlap Studies
    Bbands,
    Dema,
    Ema,
    HtTrendline,
    Kama,
    Ma,
    Mama,
    Sma,
    T3,
    Tema,
    Trima,
    Wma,
    // Pattern Recognition
    CdlDoji,
    CdlEngulfing,
    CdlHammer,
    // Price Transform
    AvgPrice,
    MedPrice,
    TypPrice,
    WclPrice,
    // Statistic Functions
    Correl,
    Stddev,
    Var,
    // Volatility Indicators
    Atr,
    Natr,
    Trange,
    // Volume Indicators
    Obv,
}

/// Function group, ordered alphabetically by display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    /// Hilbert-transform cycle measures.
    #[serde(rename = "Cycle Indicators")]
    Cycle,
    /// Oscillators and directional movement.
    #[serde(rename = "Momentum Indicators")]
    Momentum,
    /// Moving averages and bands drawn over price.
    #[serde(rename = "Overlap Studies")]
    Overlap,
    /// Candlestick patterns.
    #[serde(rename = "Pattern Recognition")]
    Pattern,
    /// Per-bar price combinations.
    #[serde(rename = "Price Transform")]
    PriceTransform,
    /// Rolling statistics.
    #[serde(rename = "Statistic Functions")]
    Statistic,
    /// Range based volatility measures.
    #[serde(rename = "Volatility Indicators")]
    Volatility,
    /// Volume based measures.
    #[serde(rename = "Volume Indicators")]
    Volume,
}

impl Group {
    /// Display name of the group.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cycle => "Cycle Indicators",
            Self::Momentum => "Momentum Indicators",
            Self::Overlap => "Overlap Studies",
            Self::Pattern => "Pattern Recognition",
            Self::PriceTransform => "Price Transform",
            Self::Statistic => "Statistic Functions",
            Self::Volatility => "Volatility Indicators",
            Self::Volume => "Volume Indicators",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
