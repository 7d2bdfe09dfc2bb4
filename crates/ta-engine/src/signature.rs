//! Function signatures.
//!
//! Two layers describe a function:
//!
//! - [`FunctionDef`] and its parts are `'static` data compiled into the
//!   registry table. The dispatcher reads them directly.
//! - [`FunctionSignature`] is the owned, serialisable record handed out by
//!   `describe`. Its JSON layout matches the call boundary: `inputs`,
//!   `opt_inputs` and `outputs` arrays, each entry carrying a `type` and an
//!   optional `flags` list.

use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ta_core::{FuncUnstId, PriceField};

use crate::func::{FuncId, Group};

/// Element type of a series or parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Floating point.
    Real,
    /// 32-bit integer.
    Integer,
}

/// What an input slot consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// One series per flagged price field, each supplied under its key.
    Price(&'static [PriceField]),
    /// A real series supplied under the slot name.
    Real,
    /// An integer series supplied under the slot name.
    Integer,
}

/// Input slot of a function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputDef {
    /// Slot name (`inReal`, `inPriceHLC`, ...).
    pub name: &'static str,
    /// What the slot consumes.
    pub kind: InputKind,
}

impl InputDef {
    /// Price slot reading the given fields.
    pub const fn price(name: &'static str, fields: &'static [PriceField]) -> Self {
        Self {
            name,
            kind: InputKind::Price(fields),
        }
    }

    /// Real series slot.
    pub const fn real(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Real,
        }
    }

    /// Integer series slot.
    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Integer,
        }
    }
}

/// Accepted values of an integer parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerRange {
    /// Smallest accepted value.
    pub min: i32,
    /// Largest accepted value.
    pub max: i32,
    /// Start of the range suggested for optimisation sweeps.
    pub suggested_start: i32,
    /// End of the suggested range.
    pub suggested_end: i32,
    /// Step of the suggested range.
    pub suggested_increment: i32,
}

impl IntegerRange {
    /// Whether `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (i64::from(self.min)..=i64::from(self.max)).contains(&value)
    }
}

/// Accepted values of a real parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealRange {
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
    /// Number of decimals worth displaying.
    pub precision: u32,
    /// Start of the range suggested for optimisation sweeps.
    pub suggested_start: f64,
    /// End of the suggested range.
    pub suggested_end: f64,
    /// Step of the suggested range.
    pub suggested_increment: f64,
}

impl RealRange {
    /// Whether `value` is finite and lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && (self.min..=self.max).contains(&value)
    }
}

/// Domain of an optional parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OptInputKind {
    /// Integer within a range.
    IntegerRange(IntegerRange),
    /// Real within a range.
    RealRange(RealRange),
    /// One of an enumerated set of `(name, code)` entries.
    IntegerList(&'static [(&'static str, i32)]),
}

impl OptInputKind {
    /// Element type of the parameter.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::RealRange(_) => ValueType::Real,
            Self::IntegerRange(_) | Self::IntegerList(_) => ValueType::Integer,
        }
    }
}

/// Display flags of an optional parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum OptInputFlag {
    Percent,
    Degree,
    Currency,
    Advanced,
}

/// Optional parameter slot of a function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptInputDef {
    /// Parameter name (`optInTimePeriod`, ...).
    pub name: &'static str,
    /// Short human readable name.
    pub display_name: &'static str,
    /// Value used when the caller omits the parameter.
    pub default_value: f64,
    /// One line description.
    pub hint: &'static str,
    /// Accepted values.
    pub kind: OptInputKind,
    /// Display flags.
    pub flags: &'static [OptInputFlag],
}

/// Display flags of an output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum OutputFlag {
    Line,
    DotLine,
    DashLine,
    Dot,
    Histogram,
    PatternBool,
    PatternBullBear,
    PatternStrength,
    Positive,
    Negative,
    Zero,
    UpperLimit,
    LowerLimit,
}

/// Output slot of a function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputDef {
    /// Output name (`outReal`, `outMACDSignal`, ...).
    pub name: &'static str,
    /// Element type.
    pub kind: ValueType,
    /// Display flags.
    pub flags: &'static [OutputFlag],
}

impl OutputDef {
    /// Real output.
    pub const fn real(name: &'static str, flags: &'static [OutputFlag]) -> Self {
        Self {
            name,
            kind: ValueType::Real,
            flags,
        }
    }

    /// Integer output.
    pub const fn integer(name: &'static str, flags: &'static [OutputFlag]) -> Self {
        Self {
            name,
            kind: ValueType::Integer,
            flags,
        }
    }
}

/// Registry entry of one function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FunctionDef {
    /// Kernel selector.
    pub id: FuncId,
    /// Upper-case identifier.
    pub name: &'static str,
    /// Group the function is listed under.
    pub group: Group,
    /// Human readable title.
    pub hint: &'static str,
    /// Unstable-period family the function reads, if any.
    pub unstable: Option<FuncUnstId>,
    /// Input slots in call order.
    pub inputs: &'static [InputDef],
    /// Optional parameters in call order.
    pub opt_inputs: &'static [OptInputDef],
    /// Outputs in result order.
    pub outputs: &'static [OutputDef],
}

impl FunctionDef {
    /// Owned, serialisable description of this function.
    #[must_use]
    pub fn signature(&self) -> FunctionSignature {
        FunctionSignature {
            name: self.name.to_string(),
            group: self.group,
            hint: self.hint.to_string(),
            unstable_family: self.unstable,
            inputs: self.inputs.iter().map(InputRecord::from).collect(),
            opt_inputs: self.opt_inputs.iter().map(OptInputRecord::from).collect(),
            outputs: self.outputs.iter().map(OutputRecord::from).collect(),
        }
    }

    /// Series keys a call must supply, in slot order.
    pub fn input_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inputs.iter().flat_map(|input| match input.kind {
            InputKind::Price(fields) => fields.iter().map(|field| field.key()).collect::<Vec<_>>(),
            InputKind::Real | InputKind::Integer => vec![input.name],
        })
    }
}

// ============================================================================
// Records
// ============================================================================

/// Serialisable description of a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Upper-case identifier.
    pub name: String,
    /// Group the function is listed under.
    pub group: Group,
    /// Human readable title.
    pub hint: String,
    /// Unstable-period family the function reads, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstable_family: Option<FuncUnstId>,
    /// Input slots.
    pub inputs: Vec<InputRecord>,
    /// Optional parameters.
    pub opt_inputs: Vec<OptInputRecord>,
    /// Outputs.
    pub outputs: Vec<OutputRecord>,
}

/// Type of an input slot in a signature record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum InputType {
    Price,
    Real,
    Integer,
}

/// Input slot record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Slot name.
    pub name: String,
    /// Slot type.
    #[serde(rename = "type")]
    pub kind: InputType,
    /// Price fields read by a price slot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<PriceField>,
}

impl From<&InputDef> for InputRecord {
    fn from(def: &InputDef) -> Self {
        let (kind, flags) = match def.kind {
            InputKind::Price(fields) => (InputType::Price, fields.to_vec()),
            InputKind::Real => (InputType::Real, Vec::new()),
            InputKind::Integer => (InputType::Integer, Vec::new()),
        };
        Self {
            name: def.name.to_string(),
            kind,
            flags,
        }
    }
}

/// Range of a parameter record; integer ranges serialise integral bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum RangeRecord {
    Integer(IntegerRange),
    Real(RealRange),
}

/// Enumerated parameter values, kept in declaration order.
///
/// Serialises as a JSON object mapping each symbolic name to its code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumList(pub Vec<(String, i32)>);

impl EnumList {
    /// Code of a symbolic name.
    #[must_use]
    pub fn code(&self, name: &str) -> Option<i32> {
        self.0
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|&(_, code)| code)
    }
}

impl Serialize for EnumList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, code) in &self.0 {
            map.serialize_entry(name, code)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EnumList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnumListVisitor;

        impl<'de> Visitor<'de> for EnumListVisitor {
            type Value = EnumList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of names to integer codes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<EnumList, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, code)) = access.next_entry::<String, i32>()? {
                    entries.push((name, code));
                }
                Ok(EnumList(entries))
            }
        }

        deserializer.deserialize_map(EnumListVisitor)
    }
}

/// Optional parameter record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptInputRecord {
    /// Parameter name.
    pub name: String,
    /// Short human readable name.
    pub display_name: String,
    /// Default value.
    pub default_value: f64,
    /// One line description.
    pub hint: String,
    /// Element type.
    #[serde(rename = "type")]
    pub kind: ValueType,
    /// Accepted range, for range parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeRecord>,
    /// Accepted entries, for enumerated parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<EnumList>,
    /// Display flags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<OptInputFlag>,
}

impl From<&OptInputDef> for OptInputRecord {
    fn from(def: &OptInputDef) -> Self {
        let (range, list) = match def.kind {
            OptInputKind::IntegerRange(range) => (Some(RangeRecord::Integer(range)), None),
            OptInputKind::RealRange(range) => (Some(RangeRecord::Real(range)), None),
            OptInputKind::IntegerList(entries) => (
                None,
                Some(EnumList(
                    entries
                        .iter()
                        .map(|&(name, code)| (name.to_string(), code))
                        .collect(),
                )),
            ),
        };
        Self {
            name: def.name.to_string(),
            display_name: def.display_name.to_string(),
            default_value: def.default_value,
            hint: def.hint.to_string(),
            kind: def.kind.value_type(),
            range,
            list,
            flags: def.flags.to_vec(),
        }
    }
}

/// Output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Output name.
    pub name: String,
    /// Element type.
    #[serde(rename = "type")]
    pub kind: ValueType,
    /// Display flags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<OutputFlag>,
}

impl From<&OutputDef> for OutputRecord {
    fn from(def: &OutputDef) -> Self {
        Self {
            name: def.name.to_string(),
            kind: def.kind,
            flags: def.flags.to_vec(),
        }
    }
}
