//! Optional parameter resolution.
//!
//! A call names its parameters; kernels want them positionally and typed.
//! [`resolve`] walks the function's parameter slots in order, fills gaps from
//! the declared defaults and validates every value against its range or list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ta_core::{Result, TaError};
use ta_indicators::{
    BbandsConfig, MacdConfig, MaType, MamaConfig, StochConfig, StochFConfig, StochRsiConfig,
    T3Config,
};
use tracing::debug;

use crate::signature::{FunctionDef, OptInputDef, OptInputKind};

/// A parameter value as supplied by a caller.
///
/// In JSON, integral numbers parse as [`Integer`](Self::Integer), other
/// numbers as [`Real`](Self::Real) and strings as [`Name`](Self::Name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integral value.
    Integer(i64),
    /// Real value.
    Real(f64),
    /// Symbolic list entry, such as a moving-average name.
    Name(String),
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<MaType> for ParamValue {
    fn from(value: MaType) -> Self {
        Self::Integer(i64::from(value.code()))
    }
}

/// A validated parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved {
    /// Integer slot value.
    Integer(i64),
    /// Real slot value.
    Real(f64),
}

impl Resolved {
    fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Real(value) => value,
        }
    }
}

/// Validated parameters of one call, in slot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParams {
    values: Vec<Resolved>,
}

impl ResolvedParams {
    /// Declared defaults of every slot of `def`.
    #[must_use]
    pub fn defaults(def: &FunctionDef) -> Self {
        Self {
            values: def.opt_inputs.iter().map(default_of).collect(),
        }
    }

    /// Resolved values in slot order.
    #[must_use]
    pub fn values(&self) -> &[Resolved] {
        &self.values
    }

    /// Slot `slot` as a period. Ranges keep periods positive.
    #[must_use]
    pub fn period(&self, slot: usize) -> usize {
        match self.values[slot] {
            Resolved::Integer(value) => usize::try_from(value).unwrap_or(0),
            Resolved::Real(value) => value as usize,
        }
    }

    /// Slot `slot` as a real.
    #[must_use]
    pub fn real(&self, slot: usize) -> f64 {
        self.values[slot].as_f64()
    }

    /// Slot `slot` as a moving-average kind.
    #[must_use]
    pub fn ma_type(&self, slot: usize) -> MaType {
        match self.values[slot] {
            Resolved::Integer(code) => MaType::from_code(code).unwrap_or_default(),
            Resolved::Real(_) => MaType::default(),
        }
    }

    pub(crate) fn bbands(&self) -> BbandsConfig {
        BbandsConfig::new(self.period(0))
            .with_deviations(self.real(1), self.real(2))
            .with_ma_type(self.ma_type(3))
    }

    pub(crate) fn macd(&self) -> MacdConfig {
        MacdConfig::new(self.period(0), self.period(1), self.period(2))
    }

    pub(crate) fn mama(&self) -> MamaConfig {
        MamaConfig::new(self.real(0), self.real(1))
    }

    pub(crate) fn t3(&self) -> T3Config {
        T3Config::new(self.period(0)).with_v_factor(self.real(1))
    }

    pub(crate) fn stoch(&self) -> StochConfig {
        StochConfig::new(self.period(0), self.period(1), self.period(3))
            .with_ma_types(self.ma_type(2), self.ma_type(4))
    }

    pub(crate) fn stochf(&self) -> StochFConfig {
        StochFConfig::new(self.period(0), self.period(1)).with_ma_type(self.ma_type(2))
    }

    pub(crate) fn stochrsi(&self) -> StochRsiConfig {
        StochRsiConfig {
            fast_d_ma: self.ma_type(3),
            ..StochRsiConfig::new(self.period(0), self.period(1), self.period(2))
        }
    }
}

fn default_of(slot: &OptInputDef) -> Resolved {
    match slot.kind {
        OptInputKind::RealRange(_) => Resolved::Real(slot.default_value),
        OptInputKind::IntegerRange(_) | OptInputKind::IntegerList(_) => {
            Resolved::Integer(slot.default_value as i64)
        }
    }
}

/// Resolve the supplied parameters against the slots of `def`.
///
/// Absent slots take their declared default unless `strict` is set. Names
/// that match no slot are ignored.
///
/// # Errors
///
/// - [`TaError::MissingParameter`] for an absent slot when `strict` is set.
/// - [`TaError::InvalidParameter`] for a value outside its range, a
///   non-integral value for an integer slot, or an entry not in the list.
pub fn resolve(
    def: &FunctionDef,
    supplied: &BTreeMap<String, ParamValue>,
    strict: bool,
) -> Result<ResolvedParams> {
    for name in supplied.keys() {
        if !def.opt_inputs.iter().any(|slot| slot.name == name.as_str()) {
            debug!(function = def.name, parameter = %name, "ignoring unknown parameter");
        }
    }

    let values = def
        .opt_inputs
        .iter()
        .map(|slot| match supplied.get(slot.name) {
            Some(value) => validate(slot, value),
            None if strict => Err(TaError::missing(slot.name)),
            None => Ok(default_of(slot)),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ResolvedParams { values })
}

fn validate(slot: &OptInputDef, value: &ParamValue) -> Result<Resolved> {
    match slot.kind {
        OptInputKind::IntegerRange(range) => {
            let integer = integral(slot, value)?;
            if !range.contains(integer) {
                return Err(TaError::invalid_parameter(
                    slot.name,
                    integer,
                    format!("integer in [{}, {}]", range.min, range.max),
                ));
            }
            Ok(Resolved::Integer(integer))
        }
        OptInputKind::RealRange(range) => {
            let real = match value {
                ParamValue::Integer(v) => *v as f64,
                ParamValue::Real(v) => *v,
                ParamValue::Name(name) => {
                    return Err(TaError::invalid_parameter(slot.name, name, "real number"))
                }
            };
            if !range.contains(real) {
                return Err(TaError::invalid_parameter(
                    slot.name,
                    real,
                    format!("real in [{}, {}]", range.min, range.max),
                ));
            }
            Ok(Resolved::Real(real))
        }
        OptInputKind::IntegerList(entries) => {
            let expected = || {
                let names: Vec<_> = entries.iter().map(|&(name, _)| name).collect();
                format!("one of {}", names.join(", "))
            };
            let code = match value {
                ParamValue::Name(name) => entries
                    .iter()
                    .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
                    .map(|&(_, code)| i64::from(code))
                    .ok_or_else(|| TaError::invalid_parameter(slot.name, name, expected()))?,
                other => {
                    let code = integral(slot, other)?;
                    if !entries.iter().any(|&(_, entry)| i64::from(entry) == code) {
                        return Err(TaError::invalid_parameter(slot.name, code, expected()));
                    }
                    code
                }
            };
            Ok(Resolved::Integer(code))
        }
    }
}

fn integral(slot: &OptInputDef, value: &ParamValue) -> Result<i64> {
    match value {
        ParamValue::Integer(v) => Ok(*v),
        ParamValue::Real(v) if v.is_finite() && v.fract() == 0.0 => Ok(*v as i64),
        ParamValue::Real(v) => Err(TaError::invalid_parameter(slot.name, v, "integer")),
        ParamValue::Name(name) => Err(TaError::invalid_parameter(slot.name, name, "integer")),
    }
}
