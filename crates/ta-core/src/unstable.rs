//! Unstable-period table.
//!
//! Recursive indicators (EMA, RSI, ATR, the Hilbert-transform family, ...)
//! depend on every sample seen so far. Their unstable period is the number of
//! extra leading outputs to suppress so the remaining ones are close to what
//! an infinitely long history would produce. The period is kept per indicator
//! family in an [`UnstablePeriods`] table.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TaError;

/// Indicator families with a configurable unstable period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[allow(missing_docs)]
pub enum FuncUnstId {
    Adx = 0,
    Adxr,
    Atr,
    Cmo,
    Dx,
    Ema,
    HtDcperiod,
    HtDcphase,
    HtPhasor,
    HtSine,
    HtTrendline,
    HtTrendmode,
    Imi,
    Kama,
    Mama,
    Mfi,
    MinusDi,
    MinusDm,
    Natr,
    PlusDi,
    PlusDm,
    Rsi,
    Stochrsi,
    T3,
}

impl FuncUnstId {
    const COUNT: usize = 24;

    /// Every family, in table order.
    pub const ALL: [FuncUnstId; Self::COUNT] = [
        Self::Adx,
        Self::Adxr,
        Self::Atr,
        Self::Cmo,
        Self::Dx,
        Self::Ema,
        Self::HtDcperiod,
        Self::HtDcphase,
        Self::HtPhasor,
        Self::HtSine,
        Self::HtTrendline,
        Self::HtTrendmode,
        Self::Imi,
        Self::Kama,
        Self::Mama,
        Self::Mfi,
        Self::MinusDi,
        Self::MinusDm,
        Self::Natr,
        Self::PlusDi,
        Self::PlusDm,
        Self::Rsi,
        Self::Stochrsi,
        Self::T3,
    ];

    /// Upper-case family name, identical to the indicator name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Adx => "ADX",
            Self::Adxr => "ADXR",
            Self::Atr => "ATR",
            Self::Cmo => "CMO",
            Self::Dx => "DX",
            Self::Ema => "EMA",
            Self::HtDcperiod => "HT_DCPERIOD",
            Self::HtDcphase => "HT_DCPHASE",
            Self::HtPhasor => "HT_PHASOR",
            Self::HtSine => "HT_SINE",
            Self::HtTrendline => "HT_TRENDLINE",
            Self::HtTrendmode => "HT_TRENDMODE",
            Self::Imi => "IMI",
            Self::Kama => "KAMA",
            Self::Mama => "MAMA",
            Self::Mfi => "MFI",
            Self::MinusDi => "MINUS_DI",
            Self::MinusDm => "MINUS_DM",
            Self::Natr => "NATR",
            Self::PlusDi => "PLUS_DI",
            Self::PlusDm => "PLUS_DM",
            Self::Rsi => "RSI",
            Self::Stochrsi => "STOCHRSI",
            Self::T3 => "T3",
        }
    }

    /// Position of the family in the table.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FuncUnstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FuncUnstId {
    type Err = TaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| TaError::UnknownFamily(s.to_string()))
    }
}

/// Unstable period of every family.
///
/// A plain value: the engine keeps one shared instance and hands each call a
/// copy, so a call never observes a table that changes while it runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnstablePeriods {
    periods: [u32; FuncUnstId::COUNT],
}

impl UnstablePeriods {
    /// A table with every period at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unstable period of a family.
    #[must_use]
    pub fn get(&self, id: FuncUnstId) -> usize {
        self.periods[id.index()] as usize
    }

    /// Set the unstable period of one family.
    pub fn set(&mut self, id: FuncUnstId, period: u32) {
        self.periods[id.index()] = period;
    }

    /// Set the unstable period of every family.
    pub fn set_all(&mut self, period: u32) {
        self.periods = [period; FuncUnstId::COUNT];
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, id: FuncUnstId, period: u32) -> Self {
        self.set(id, period);
        self
    }

    /// Iterate over `(family, period)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (FuncUnstId, u32)> + '_ {
        FuncUnstId::ALL.iter().map(move |&id| (id, self.periods[id.index()]))
    }
}
