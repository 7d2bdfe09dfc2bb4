//! Kernel execution table.
//!
//! Maps a registry entry onto its kernel in `ta-indicators`, feeding it the
//! collected input slices and resolved parameters and flattening its output
//! into one series per output slot.

use serde::{Deserialize, Serialize};
use ta_core::{PriceField, Result, Series, TaError, UnstablePeriods};
use ta_indicators::prelude::*;

use crate::func::FuncId;
use crate::params::ResolvedParams;
use crate::signature::{FunctionDef, ValueType};

/// Values of one output slot.
///
/// Serialises as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputValues {
    /// Integer output, such as a pattern signal.
    Integer(Vec<i32>),
    /// Real output.
    Real(Vec<f64>),
}

impl OutputValues {
    /// An empty series of the given type.
    #[must_use]
    pub fn empty(kind: ValueType) -> Self {
        match kind {
            ValueType::Real => Self::Real(Vec::new()),
            ValueType::Integer => Self::Integer(Vec::new()),
        }
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Real(values) => values.len(),
            Self::Integer(values) => values.len(),
        }
    }

    /// Whether there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Real values, if this is a real output.
    #[must_use]
    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            Self::Real(values) => Some(values),
            Self::Integer(_) => None,
        }
    }

    /// Integer values, if this is an integer output.
    #[must_use]
    pub fn as_integer(&self) -> Option<&[i32]> {
        match self {
            Self::Integer(values) => Some(values),
            Self::Real(_) => None,
        }
    }
}

/// Input slices of one kernel run, all of the same length.
#[derive(Debug, Clone, Default)]
pub struct KernelInputs<'a> {
    prices: Vec<(PriceField, &'a [f64])>,
    reals: Vec<&'a [f64]>,
    integers: Vec<&'a [i32]>,
}

impl<'a> KernelInputs<'a> {
    /// No inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the column of a price field.
    pub fn push_price(&mut self, field: PriceField, values: &'a [f64]) {
        self.prices.push((field, values));
    }

    /// Add the next real slot.
    pub fn push_real(&mut self, values: &'a [f64]) {
        self.reals.push(values);
    }

    /// Add the next integer slot.
    pub fn push_integer(&mut self, values: &'a [i32]) {
        self.integers.push(values);
    }

    /// Column of a price field.
    ///
    /// # Errors
    ///
    /// Returns [`TaError::MissingParameter`] if the field was not added.
    pub fn price(&self, field: PriceField) -> Result<&'a [f64]> {
        self.prices
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|&(_, values)| values)
            .ok_or_else(|| TaError::missing(field.key()))
    }

    /// Real slot number `slot`, counting real slots only.
    ///
    /// # Errors
    ///
    /// Returns [`TaError::MissingParameter`] if there is no such slot.
    pub fn real(&self, slot: usize) -> Result<&'a [f64]> {
        self.reals
            .get(slot)
            .copied()
            .ok_or_else(|| TaError::missing(format!("inReal{slot}")))
    }

    /// Integer slot number `slot`, counting integer slots only.
    ///
    /// # Errors
    ///
    /// Returns [`TaError::MissingParameter`] if there is no such slot.
    pub fn integer(&self, slot: usize) -> Result<&'a [i32]> {
        self.integers
            .get(slot)
            .copied()
            .ok_or_else(|| TaError::missing(format!("inInteger{slot}")))
    }

    /// The samples `[start, end)` of every input. Bounds must be valid for
    /// the common length.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> KernelInputs<'a> {
        KernelInputs {
            prices: self
                .prices
                .iter()
                .map(|&(field, values)| (field, &values[start..end]))
                .collect(),
            reals: self.reals.iter().map(|values| &values[start..end]).collect(),
            integers: self
                .integers
                .iter()
                .map(|values| &values[start..end])
                .collect(),
        }
    }
}

fn real(series: Series<f64>) -> Vec<OutputValues> {
    vec![OutputValues::Real(series.into_vec())]
}

fn reals<const N: usize>(series: [Series<f64>; N]) -> Vec<OutputValues> {
    series
        .into_iter()
        .map(|values| OutputValues::Real(values.into_vec()))
        .collect()
}

fn integer(values: Vec<i32>) -> Vec<OutputValues> {
    vec![OutputValues::Integer(values)]
}

/// Run the kernel of `def` over `inputs`.
///
/// Returns one series per output slot, each holding only the valid outputs.
///
/// # Errors
///
/// Propagates kernel validation errors and reports inputs missing from
/// `inputs` as [`TaError::MissingParameter`].
pub fn execute(
    def: &FunctionDef,
    inputs: &KernelInputs<'_>,
    params: &ResolvedParams,
    unstable: &UnstablePeriods,
) -> Result<Vec<OutputValues>> {
    use PriceField::{Close, High, Low, Open, Volume};

    let u = unstable;
    let p = params;
    let outputs = match def.id {
        FuncId::HtDcperiod => real(ht_dcperiod(inputs.real(0)?, u)?),
        FuncId::HtDcphase => real(ht_dcphase(inputs.real(0)?, u)?),
        FuncId::HtPhasor => {
            let output = ht_phasor(inputs.real(0)?, u)?;
            reals([output.in_phase, output.quadrature])
        }
        FuncId::HtSine => {
            let output = ht_sine(inputs.real(0)?, u)?;
            reals([output.sine, output.lead_sine])
        }
        FuncId::HtTrendmode => integer(ht_trendmode(inputs.real(0)?, u)?),
        FuncId::HtTrendline => real(ht_trendline(inputs.real(0)?, u)?),

        FuncId::Adx => real(adx(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            p.period(0),
            u,
        )?),
        FuncId::Adxr => real(adxr(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            p.period(0),
            u,
        )?),
        FuncId::Dx => real(dx(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            p.period(0),
            u,
        )?),
        FuncId::PlusDi => real(plus_di(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            p.period(0),
            u,
        )?),
        FuncId::MinusDi => real(minus_di(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            p.period(0),
            u,
        )?),
        FuncId::PlusDm => real(plus_dm(
            inputs.price(High)?,
            inputs.price(Low)?,
            p.period(0),
            u,
        )?),
        FuncId::MinusDm => real(minus_dm(
            inputs.price(High)?,
            inputs.price(Low)?,
            p.period(0),
            u,
        )?),

        FuncId::Cmo => real(cmo(inputs.real(0)?, p.period(0), u)?),
        FuncId::Rsi => real(rsi(inputs.real(0)?, p.period(0), u)?),
        FuncId::Imi => real(imi(
            inputs.price(Open)?,
            inputs.price(Close)?,
            p.period(0),
            u,
        )?),
        FuncId::Mfi => real(mfi(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            inputs.price(Volume)?,
            p.period(0),
            u,
        )?),
        FuncId::Mom => real(mom(inputs.real(0)?, p.period(0))?),
        FuncId::Roc => real(roc(inputs.real(0)?, p.period(0))?),
        FuncId::Macd => {
            let output = macd(inputs.real(0)?, &p.macd(), u)?;
            reals([output.macd, output.signal, output.histogram])
        }
        FuncId::Stoch => {
            let output = stoch(
                inputs.price(High)?,
                inputs.price(Low)?,
                inputs.price(Close)?,
                &p.stoch(),
                u,
            )?;
            reals([output.slow_k, output.slow_d])
        }
        FuncId::Stochf => {
            let output = stochf(
                inputs.price(High)?,
                inputs.price(Low)?,
                inputs.price(Close)?,
                &p.stochf(),
                u,
            )?;
            reals([output.fast_k, output.fast_d])
        }
        FuncId::Stochrsi => {
            let output = stochrsi(inputs.real(0)?, &p.stochrsi(), u)?;
            reals([output.fast_k, output.fast_d])
        }

        FuncId::Bbands => {
            let output = bbands(inputs.real(0)?, &p.bbands(), u)?;
            reals([output.upper, output.middle, output.lower])
        }
        FuncId::Dema => real(dema(inputs.real(0)?, p.period(0), u)?),
        FuncId::Ema => real(ema(inputs.real(0)?, p.period(0), u)?),
        FuncId::Kama => real(kama(inputs.real(0)?, p.period(0), u)?),
        FuncId::Ma => real(ma(inputs.real(0)?, p.period(0), p.ma_type(1), u)?),
        FuncId::Mama => {
            let output = mama(inputs.real(0)?, &p.mama(), u)?;
            reals([output.mama, output.fama])
        }
        FuncId::Sma => real(sma(inputs.real(0)?, p.period(0))?),
        FuncId::T3 => real(t3(inputs.real(0)?, &p.t3(), u)?),
        FuncId::Tema => real(tema(inputs.real(0)?, p.period(0), u)?),
        FuncId::Trima => real(trima(inputs.real(0)?, p.period(0))?),
        FuncId::Wma => real(wma(inputs.real(0)?, p.period(0))?),

        FuncId::CdlDoji => integer(cdl_doji(
            inputs.price(Open)?,
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            &CandleSettings::default(),
        )?),
        FuncId::CdlEngulfing => integer(cdl_engulfing(
            inputs.price(Open)?,
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
        )?),
        FuncId::CdlHammer => integer(cdl_hammer(
            inputs.price(Open)?,
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            &CandleSettings::default(),
        )?),

        FuncId::AvgPrice => real(avgprice(
            inputs.price(Open)?,
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
        )?),
        FuncId::MedPrice => real(medprice(inputs.price(High)?, inputs.price(Low)?)?),
        FuncId::TypPrice => real(typprice(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
        )?),
        FuncId::WclPrice => real(wclprice(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
        )?),

        FuncId::Correl => real(correl(inputs.real(0)?, inputs.real(1)?, p.period(0))?),
        FuncId::Stddev => real(stddev(inputs.real(0)?, p.period(0), p.real(1))?),
        // optInNbDev is accepted for VAR but does not scale the variance.
        FuncId::Var => real(var(inputs.real(0)?, p.period(0))?),

        FuncId::Atr => real(atr(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            p.period(0),
            u,
        )?),
        FuncId::Natr => real(natr(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
            p.period(0),
            u,
        )?),
        FuncId::Trange => real(trange(
            inputs.price(High)?,
            inputs.price(Low)?,
            inputs.price(Close)?,
        )?),

        FuncId::Obv => real(obv(inputs.real(0)?, inputs.price(Volume)?)?),
    };
    Ok(outputs)
}
