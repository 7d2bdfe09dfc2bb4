//! Call dispatcher.
//!
//! [`invoke`] validates a [`CallRequest`] completely before running anything:
//! it resolves the function, collects and length-checks its input series,
//! resolves parameters, snapshots the unstable periods, computes the lookback
//! and checks the range. Only then does the kernel run, over the requested
//! `[start, end)` samples as an isolated input.
//!
//! # Example
//!
//! ```
//! use ta_engine::prelude::*;
//!
//! let request = CallRequest::new("SMA")
//!     .input("inReal", vec![1.0, 2.0, 3.0, 4.0, 5.0])
//!     .param("optInTimePeriod", 3);
//! let result = invoke_with(&request, &UnstablePeriods::new()).unwrap();
//!
//! assert_eq!(result.out_beg_idx, 2);
//! assert_eq!(result.out_nb_element, 3);
//! assert_eq!(result.real("outReal"), Some(&[2.0, 3.0, 4.0][..]));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ta_core::utils::check_same_len;
use ta_core::{OhlcvSeries, PriceField, Result, Series, TaError, UnstablePeriods};
use tracing::debug;

use crate::execute::{self, KernelInputs, OutputValues};
use crate::lookback::lookback;
use crate::params::{self, ParamValue};
use crate::registry;
use crate::signature::{FunctionDef, InputKind, ValueType};
use crate::unstable;

/// A series supplied to a call.
///
/// In JSON every numeric array parses as [`Real`](Self::Real).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputSeries {
    /// Floating point series.
    Real(Vec<f64>),
    /// Integer series.
    Integer(Vec<i32>),
}

impl InputSeries {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Real(values) => values.len(),
            Self::Integer(values) => values.len(),
        }
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Real(_) => ValueType::Real,
            Self::Integer(_) => ValueType::Integer,
        }
    }
}

impl From<Vec<f64>> for InputSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::Real(values)
    }
}

impl From<&[f64]> for InputSeries {
    fn from(values: &[f64]) -> Self {
        Self::Real(values.to_vec())
    }
}

impl From<Series<f64>> for InputSeries {
    fn from(series: Series<f64>) -> Self {
        Self::Real(series.into_vec())
    }
}

impl From<Vec<i32>> for InputSeries {
    fn from(values: Vec<i32>) -> Self {
        Self::Integer(values)
    }
}

/// Explicit `[start, end)` range of a call.
///
/// Signed so that a negative bound from the wire is reported as
/// [`TaError::InvalidRange`] rather than a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRange {
    /// First sample to use.
    pub start: i64,
    /// One past the last sample to use.
    pub end: i64,
}

impl CallRange {
    /// `[start, end)` as indices into a series of `len` samples.
    ///
    /// # Errors
    ///
    /// [`TaError::InvalidRange`] unless `0 <= start <= end <= len`.
    pub fn bounds(self, len: usize) -> Result<(usize, usize)> {
        match (usize::try_from(self.start), usize::try_from(self.end)) {
            (Ok(start), Ok(end)) if start <= end && end <= len => Ok((start, end)),
            _ => Err(TaError::InvalidRange {
                start: self.start,
                end: self.end,
                len,
            }),
        }
    }
}

/// One indicator call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// Indicator name.
    pub name: String,
    /// Series keyed by slot name (`inReal`) or price field key (`close`).
    #[serde(default)]
    pub inputs: BTreeMap<String, InputSeries>,
    /// Parameter values keyed by parameter name.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
    /// Samples to compute over; the whole input when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<CallRange>,
    /// Require every parameter instead of falling back to defaults.
    #[serde(default)]
    pub strict_params: bool,
}

impl CallRequest {
    /// A call of `name` with no inputs or parameters yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a series under `key` (builder pattern).
    #[must_use]
    pub fn input(mut self, key: impl Into<String>, series: impl Into<InputSeries>) -> Self {
        self.inputs.insert(key.into(), series.into());
        self
    }

    /// Add every column of a price bundle under its field key.
    #[must_use]
    pub fn prices(mut self, bundle: &OhlcvSeries<f64>) -> Self {
        for field in PriceField::ALL {
            if let Some(column) = bundle.column(field) {
                self.inputs
                    .insert(field.key().to_string(), column.as_slice().into());
            }
        }
        self
    }

    /// Set a parameter (builder pattern).
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Restrict the call to the samples `[start, end)`.
    #[must_use]
    pub fn range(mut self, start: usize, end: usize) -> Self {
        self.range = Some(CallRange {
            start: i64::try_from(start).unwrap_or(i64::MAX),
            end: i64::try_from(end).unwrap_or(i64::MAX),
        });
        self
    }

    /// Require every parameter to be supplied.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_params = strict;
        self
    }
}

/// One named output series of a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedOutput {
    /// Output slot name.
    pub name: String,
    /// Valid values.
    pub values: OutputValues,
}

/// Value used for positions before the first valid output when aligning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignFill {
    /// `NaN` for real outputs.
    #[default]
    Nan,
    /// `0.0` for real outputs.
    Zero,
}

impl AlignFill {
    fn real(self) -> f64 {
        match self {
            Self::Nan => f64::NAN,
            Self::Zero => 0.0,
        }
    }
}

/// Outputs of a successful call.
///
/// Each output holds `out_nb_element` values; the first belongs to input
/// index `out_beg_idx`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    /// One series per output slot, in slot order.
    pub outputs: Vec<NamedOutput>,
    /// Input index of the first output value.
    #[serde(rename = "outBegIdx")]
    pub out_beg_idx: usize,
    /// Number of values in every output.
    #[serde(rename = "outNBElement")]
    pub out_nb_element: usize,
}

impl CallResult {
    fn empty(def: &FunctionDef, out_beg_idx: usize) -> Self {
        Self {
            outputs: def
                .outputs
                .iter()
                .map(|output| NamedOutput {
                    name: output.name.to_string(),
                    values: OutputValues::empty(output.kind),
                })
                .collect(),
            out_beg_idx,
            out_nb_element: 0,
        }
    }

    /// Output named `name`.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&OutputValues> {
        self.outputs
            .iter()
            .find(|output| output.name == name)
            .map(|output| &output.values)
    }

    /// Real output named `name`.
    #[must_use]
    pub fn real(&self, name: &str) -> Option<&[f64]> {
        self.output(name).and_then(OutputValues::as_real)
    }

    /// Integer output named `name`.
    #[must_use]
    pub fn integer(&self, name: &str) -> Option<&[i32]> {
        self.output(name).and_then(OutputValues::as_integer)
    }

    /// Outputs re-expanded to `len` positions, each value at its input index.
    ///
    /// Positions without a value hold `fill` for real outputs and `0` for
    /// integer outputs.
    #[must_use]
    pub fn aligned(&self, len: usize, fill: AlignFill) -> Vec<NamedOutput> {
        let begin = self.out_beg_idx.min(len);
        self.outputs
            .iter()
            .map(|output| {
                let values = match &output.values {
                    OutputValues::Real(values) => {
                        OutputValues::Real(place(values, begin, len, fill.real()))
                    }
                    OutputValues::Integer(values) => {
                        OutputValues::Integer(place(values, begin, len, 0))
                    }
                };
                NamedOutput {
                    name: output.name.clone(),
                    values,
                }
            })
            .collect()
    }
}

fn place<V: Copy>(values: &[V], begin: usize, len: usize, fill: V) -> Vec<V> {
    let mut out = vec![fill; len];
    for (slot, &value) in out[begin..].iter_mut().zip(values) {
        *slot = value;
    }
    out
}

/// Run `request` against the current process-wide unstable periods.
///
/// # Errors
///
/// See [`invoke_with`].
pub fn invoke(request: &CallRequest) -> Result<CallResult> {
    invoke_with(request, &unstable::snapshot())
}

/// Run `request` against an explicit unstable-period table.
///
/// # Errors
///
/// - [`TaError::UnknownFunction`] for an unregistered name.
/// - [`TaError::MissingParameter`] for an absent input series, or an absent
///   parameter of a strict request.
/// - [`TaError::InvalidInput`] for a series of the wrong element type.
/// - [`TaError::InconsistentLength`] when input series differ in length.
/// - [`TaError::InvalidParameter`] for a parameter outside its domain.
/// - [`TaError::InvalidRange`] when the range does not fit the input.
pub fn invoke_with(request: &CallRequest, unstable: &UnstablePeriods) -> Result<CallResult> {
    let def = registry::lookup(&request.name)?;
    let (inputs, len) = collect_inputs(def, &request.inputs)?;
    let params = params::resolve(def, &request.params, request.strict_params)?;
    let lookback = lookback(def, &params, unstable);

    let (start, end) = match request.range {
        Some(range) => range.bounds(len)?,
        None => (0, len),
    };

    let out_beg_idx = start + lookback;
    if end - start <= lookback {
        debug!(
            function = def.name,
            start, end, lookback, "input shorter than lookback"
        );
        return Ok(CallResult::empty(def, out_beg_idx));
    }

    let values = execute::execute(def, &inputs.slice(start, end), &params, unstable)?;
    let out_nb_element = end - out_beg_idx;
    debug_assert!(values.iter().all(|v| v.len() == out_nb_element));
    debug!(
        function = def.name,
        start, end, lookback, out_nb_element, "call dispatched"
    );

    Ok(CallResult {
        outputs: def
            .outputs
            .iter()
            .zip(values)
            .map(|(output, values)| NamedOutput {
                name: output.name.to_string(),
                values,
            })
            .collect(),
        out_beg_idx,
        out_nb_element,
    })
}

fn collect_inputs<'a>(
    def: &FunctionDef,
    supplied: &'a BTreeMap<String, InputSeries>,
) -> Result<(KernelInputs<'a>, usize)> {
    let mut inputs = KernelInputs::new();
    let mut lengths: Vec<(&str, usize)> = Vec::new();

    let fetch = |key: &str| supplied.get(key).ok_or_else(|| TaError::missing(key));
    let real = |key: &str, series: &'a InputSeries| match series {
        InputSeries::Real(values) => Ok(values.as_slice()),
        InputSeries::Integer(_) => Err(TaError::InvalidInput {
            name: key.to_string(),
            reason: "expected a real series, got integers".to_string(),
        }),
    };

    for input in def.inputs {
        match input.kind {
            InputKind::Price(fields) => {
                for &field in fields {
                    let values = real(field.key(), fetch(field.key())?)?;
                    lengths.push((field.key(), values.len()));
                    inputs.push_price(field, values);
                }
            }
            InputKind::Real => {
                let values = real(input.name, fetch(input.name)?)?;
                lengths.push((input.name, values.len()));
                inputs.push_real(values);
            }
            InputKind::Integer => match fetch(input.name)? {
                InputSeries::Integer(values) => {
                    lengths.push((input.name, values.len()));
                    inputs.push_integer(values);
                }
                InputSeries::Real(_) => {
                    return Err(TaError::InvalidInput {
                        name: input.name.to_string(),
                        reason: "expected an integer series, got reals".to_string(),
                    })
                }
            },
        }
    }

    for key in supplied.keys() {
        if !def.input_keys().any(|used| used == key.as_str()) {
            debug!(function = def.name, series = %key, "ignoring unused series");
        }
    }

    let len = check_same_len(&lengths)?;
    Ok((inputs, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::{FuncId, Group};
    use crate::signature::InputDef;
    use approx::assert_relative_eq;

    fn none() -> UnstablePeriods {
        UnstablePeriods::new()
    }

    #[test]
    fn test_sma_scenario() {
        let request = CallRequest::new("SMA")
            .input("inReal", vec![1.0, 2.0, 3.0, 4.0, 5.0])
            .param("optInTimePeriod", 3);
        let result = invoke_with(&request, &none()).unwrap();
        assert_eq!(result.out_beg_idx, 2);
        assert_eq!(result.out_nb_element, 3);
        assert_eq!(result.real("outReal").unwrap(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_unknown_function() {
        let err = invoke_with(&CallRequest::new("UNKNOWN_NAME"), &none()).unwrap_err();
        assert_eq!(err, TaError::UnknownFunction("UNKNOWN_NAME".to_string()));
    }

    #[test]
    fn test_missing_price_field() {
        let request = CallRequest::new("ATR")
            .input("high", vec![2.0; 20])
            .input("close", vec![1.5; 20]);
        assert_eq!(
            invoke_with(&request, &none()).unwrap_err(),
            TaError::missing("low")
        );
    }

    #[test]
    fn test_inconsistent_lengths() {
        let request = CallRequest::new("MEDPRICE")
            .input("high", vec![2.0; 10])
            .input("low", vec![1.0; 9]);
        assert_eq!(
            invoke_with(&request, &none()).unwrap_err(),
            TaError::InconsistentLength {
                name: "low".to_string(),
                expected: 10,
                actual: 9,
            }
        );
    }

    // No catalog function declares an integer slot.
    static MIXED: FunctionDef = FunctionDef {
        id: FuncId::Sma,
        name: "MIXED",
        group: Group::Statistic,
        hint: "Real and integer inputs",
        unstable: None,
        inputs: &[InputDef::real("inReal"), InputDef::integer("inInteger")],
        opt_inputs: &[],
        outputs: &[],
    };

    #[test]
    fn test_integer_slot_accepts_integers() {
        let supplied = BTreeMap::from([
            ("inReal".to_string(), InputSeries::from(vec![1.0, 2.0, 3.0])),
            ("inInteger".to_string(), InputSeries::from(vec![4, 5, 6])),
        ]);
        let (inputs, len) = collect_inputs(&MIXED, &supplied).unwrap();
        assert_eq!(len, 3);
        assert_eq!(inputs.real(0).unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(inputs.integer(0).unwrap(), &[4, 5, 6]);
        assert_eq!(inputs.slice(1, 3).integer(0).unwrap(), &[5, 6]);
    }

    #[test]
    fn test_integer_slot_rejects_reals() {
        let supplied = BTreeMap::from([
            ("inReal".to_string(), InputSeries::from(vec![1.0, 2.0, 3.0])),
            ("inInteger".to_string(), InputSeries::from(vec![4.0, 5.0, 6.0])),
        ]);
        let err = collect_inputs(&MIXED, &supplied).unwrap_err();
        assert_eq!(err.error_id(), "InvalidInput");
        assert!(matches!(err, TaError::InvalidInput { ref name, .. } if name == "inInteger"));
    }

    #[test]
    fn test_integer_slot_length_mismatch() {
        let supplied = BTreeMap::from([
            ("inReal".to_string(), InputSeries::from(vec![1.0, 2.0, 3.0])),
            ("inInteger".to_string(), InputSeries::from(vec![4, 5])),
        ]);
        assert_eq!(
            collect_inputs(&MIXED, &supplied).unwrap_err(),
            TaError::InconsistentLength {
                name: "inInteger".to_string(),
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_integer_series_in_real_slot() {
        let request = CallRequest::new("SMA").input("inReal", vec![1, 2, 3]);
        assert_eq!(
            invoke_with(&request, &none()).unwrap_err().error_id(),
            "InvalidInput"
        );
    }

    #[test]
    fn test_invalid_ranges() {
        let base = CallRequest::new("SMA").input("inReal", vec![1.0; 10]);
        for (start, end) in [(4, 2), (0, 11), (11, 11)] {
            let err = invoke_with(&base.clone().range(start, end), &none()).unwrap_err();
            assert_eq!(
                err,
                TaError::InvalidRange {
                    start: start as i64,
                    end: end as i64,
                    len: 10
                }
            );
        }
    }

    #[test]
    fn test_negative_range_from_json() {
        let request: CallRequest = serde_json::from_str(
            r#"{"name": "SMA", "inputs": {"inReal": [1, 2, 3, 4]}, "range": {"start": -1, "end": 3}}"#,
        )
        .unwrap();
        assert_eq!(request.range, Some(CallRange { start: -1, end: 3 }));
        assert_eq!(
            invoke_with(&request, &none()).unwrap_err(),
            TaError::InvalidRange {
                start: -1,
                end: 3,
                len: 4
            }
        );
    }

    #[test]
    fn test_short_input_is_empty_success() {
        let request = CallRequest::new("SMA")
            .input("inReal", vec![1.0, 2.0, 3.0])
            .param("optInTimePeriod", 3)
            .range(1, 3);
        let result = invoke_with(&request, &none()).unwrap();
        assert_eq!(result.out_beg_idx, 3);
        assert_eq!(result.out_nb_element, 0);
        assert_eq!(result.outputs.len(), 1);
        assert!(result.outputs[0].values.is_empty());
    }

    #[test]
    fn test_range_is_an_isolated_input() {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let request = CallRequest::new("SMA")
            .input("inReal", data)
            .param("optInTimePeriod", 3)
            .range(4, 8);
        let result = invoke_with(&request, &none()).unwrap();
        assert_eq!(result.out_beg_idx, 6);
        assert_eq!(result.out_nb_element, 2);
        // Samples 5..=8; the window never reaches back before `start`.
        assert_eq!(result.real("outReal").unwrap(), &[6.0, 7.0]);
    }

    #[test]
    fn test_unused_series_are_ignored() {
        let request = CallRequest::new("MEDPRICE")
            .input("high", vec![3.0, 5.0])
            .input("low", vec![1.0, 1.0])
            .input("close", vec![9.0])
            .input("extra", vec![7]);
        let result = invoke_with(&request, &none()).unwrap();
        assert_eq!(result.real("outReal").unwrap(), &[2.0, 3.0]);
    }

    #[test]
    fn test_aligned_outputs() {
        let request = CallRequest::new("SMA")
            .input("inReal", vec![1.0, 2.0, 3.0, 4.0, 5.0])
            .param("optInTimePeriod", 3);
        let result = invoke_with(&request, &none()).unwrap();

        let aligned = result.aligned(5, AlignFill::Zero);
        assert_eq!(
            aligned[0].values,
            OutputValues::Real(vec![0.0, 0.0, 2.0, 3.0, 4.0])
        );

        let aligned = result.aligned(5, AlignFill::Nan);
        let values = aligned[0].values.as_real().unwrap();
        assert!(values[0].is_nan() && values[1].is_nan());
        assert_relative_eq!(values[4], 4.0);
    }

    #[test]
    fn test_integer_outputs_align_with_zero() {
        let request = CallRequest::new("CDLENGULFING")
            .input("open", vec![10.0, 10.0, 10.0, 9.0])
            .input("high", vec![11.0, 11.0, 11.0, 12.0])
            .input("low", vec![9.0, 9.0, 9.0, 8.5])
            .input("close", vec![10.5, 10.5, 9.5, 11.0]);
        let result = invoke_with(&request, &none()).unwrap();
        assert_eq!(result.out_beg_idx, 2);
        assert_eq!(result.integer("outInteger").unwrap(), &[0, 100]);
        let aligned = result.aligned(4, AlignFill::Nan);
        assert_eq!(aligned[0].values, OutputValues::Integer(vec![0, 0, 0, 100]));
    }

    #[test]
    fn test_request_json() {
        let json = r#"{
            "name": "MA",
            "inputs": {"inReal": [1, 2, 3, 4, 5]},
            "params": {"optInTimePeriod": 2, "optInMAType": "WMA"},
            "range": {"start": 1, "end": 5},
            "strictParams": true
        }"#;
        let request: CallRequest = serde_json::from_str(json).unwrap();
        assert!(request.strict_params);
        let result = invoke_with(&request, &none()).unwrap();
        assert_eq!(result.out_beg_idx, 2);
        let values = result.real("outReal").unwrap();
        assert_relative_eq!(values[0], (2.0 + 2.0 * 3.0) / 3.0);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outBegIdx"], 2);
        assert_eq!(json["outNBElement"], 3);
        assert_eq!(json["outputs"][0]["name"], "outReal");
    }

    #[test]
    fn test_prices_builder() {
        let bundle: OhlcvSeries<f64> = [
            ta_core::Bar::new(10.0, 12.0, 9.0, 11.0, 100.0),
            ta_core::Bar::new(11.0, 13.0, 10.0, 12.0, 150.0),
        ]
        .into_iter()
        .collect();
        let request = CallRequest::new("TYPPRICE").prices(&bundle);
        assert_eq!(request.inputs.len(), 5);
        let result = invoke_with(&request, &none()).unwrap();
        assert_relative_eq!(result.real("outReal").unwrap()[1], 35.0 / 3.0);

        let bundle = bundle.with_open_interest(vec![5.0, 6.0].into()).unwrap();
        let request = CallRequest::new("TYPPRICE").prices(&bundle);
        assert_eq!(request.inputs.len(), 6);
        assert_eq!(
            request.inputs.get("openInterest"),
            Some(&InputSeries::Real(vec![5.0, 6.0]))
        );
    }
}
