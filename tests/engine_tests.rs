//! End-to-end tests of the call engine over the whole catalog.
//!
//! Every call here passes an explicit unstable-period table, so the tests do
//! not depend on (or touch) the process-wide one.

mod common;

use std::collections::BTreeMap;

use proptest::prelude::*;
use ta_engine::api;
use ta_engine::prelude::*;
use ta_engine::signature::{EnumList, RangeRecord};

use common::{assert_series_eq, full_request, sample_bars};

fn none() -> UnstablePeriods {
    UnstablePeriods::new()
}

fn lookback_of(name: &str) -> usize {
    let def = lookup(name).unwrap();
    ta_engine::lookback(def, &ResolvedParams::defaults(def), &none())
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_list_then_describe() {
    let names = api::list_functions();
    assert_eq!(names.len(), 48);
    assert_eq!(names.first(), Some(&"HT_DCPERIOD"));
    assert_eq!(names.last(), Some(&"OBV"));

    for name in names {
        let signature = api::describe_function(name).unwrap();
        assert_eq!(signature.name, name);
        assert!(!signature.inputs.is_empty(), "{name}");
        assert!(!signature.outputs.is_empty(), "{name}");
    }
}

#[test]
fn test_sma_over_five_samples() {
    let request = CallRequest::new("SMA")
        .input("inReal", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .param("optInTimePeriod", 3);
    let result = api::call(&request).unwrap();
    assert_eq!((result.out_beg_idx, result.out_nb_element), (2, 3));
    assert_eq!(result.real("outReal").unwrap(), &[2.0, 3.0, 4.0]);
}

#[test]
fn test_unknown_function_record() {
    let err = api::call(&CallRequest::new("NOPE")).unwrap_err();
    assert_eq!(err.error_id, "UnknownFunction");
    assert_eq!(
        api::describe_function("sma").unwrap_err().error_id,
        "UnknownFunction"
    );
}

#[test]
fn test_call_json_round_trip() {
    let response = api::call_json(
        r#"{"name": "BBANDS",
            "inputs": {"inReal": [1, 2, 3, 4, 5, 6, 7]},
            "params": {"optInTimePeriod": 3, "optInNbDevUp": 1, "optInMAType": "SMA"}}"#,
    );
    let result: CallResult = serde_json::from_str(&response).unwrap();
    assert_eq!(result.out_beg_idx, 2);
    assert_eq!(result.out_nb_element, 5);

    let middle = result.real("outRealMiddleBand").unwrap();
    assert_series_eq(middle, &[2.0, 3.0, 4.0, 5.0, 6.0], 1e-12, "middle");
    let spread = (2.0_f64 / 3.0).sqrt();
    let upper = result.real("outRealUpperBand").unwrap();
    assert_series_eq(upper, &[2.0 + spread, 3.0 + spread, 4.0 + spread, 5.0 + spread, 6.0 + spread], 1e-12, "upper");
}

#[test]
fn test_integer_outputs_round_trip_through_json() {
    let bars = sample_bars(80, 3);
    let request = serde_json::to_string(&full_request("HT_TRENDMODE", &bars)).unwrap();
    let result: CallResult = serde_json::from_str(&api::call_json(&request)).unwrap();
    let values = result.integer("outInteger").unwrap();
    assert_eq!(values.len(), 80 - 63);
    assert!(values.iter().all(|&mode| mode == 0 || mode == 1));
}

#[test]
fn test_dispatcher_matches_kernels() {
    use ta_indicators::prelude as kernels;

    let bars = sample_bars(120, 11);
    let close = bars.close().as_slice();
    let u = none();

    let result = invoke_with(&full_request("RSI", &bars), &u).unwrap();
    let direct = kernels::rsi(close, 14, &u).unwrap();
    assert_eq!(result.real("outReal").unwrap(), direct.as_slice());

    let request = full_request("ATR", &bars).param("optInTimePeriod", 5);
    let result = invoke_with(&request, &u).unwrap();
    let direct = kernels::atr(
        bars.high().as_slice(),
        bars.low().as_slice(),
        close,
        5,
        &u,
    )
    .unwrap();
    assert_eq!(result.real("outReal").unwrap(), direct.as_slice());
}

#[test]
fn test_explicit_range_equals_sliced_input() {
    let bars = sample_bars(200, 5);
    let close = bars.close().as_slice();
    for name in ["EMA", "KAMA", "RSI", "MACD", "HT_SINE"] {
        let ranged = invoke_with(
            &CallRequest::new(name).input("inReal", close).range(40, 180),
            &none(),
        )
        .unwrap();
        let sliced = invoke_with(
            &CallRequest::new(name).input("inReal", &close[40..180]),
            &none(),
        )
        .unwrap();
        assert_eq!(ranged.out_beg_idx, sliced.out_beg_idx + 40, "{name}");
        assert_eq!(ranged.outputs, sliced.outputs, "{name}");
    }
}

// ============================================================================
// Catalog-wide invariants
// ============================================================================

#[test]
fn test_every_function_output_shape() {
    let bars = sample_bars(300, 42);
    for def in functions() {
        let result = invoke_with(&full_request(def.name, &bars), &none()).unwrap();
        let lookback = lookback_of(def.name);

        assert_eq!(result.out_beg_idx, lookback, "{}", def.name);
        assert_eq!(result.out_beg_idx + result.out_nb_element, 300, "{}", def.name);
        assert_eq!(result.outputs.len(), def.outputs.len(), "{}", def.name);
        for (output, declared) in result.outputs.iter().zip(def.outputs) {
            assert_eq!(output.name, declared.name);
            assert_eq!(output.values.len(), result.out_nb_element, "{}", def.name);
            match (&output.values, declared.kind) {
                (OutputValues::Real(values), ValueType::Real) => {
                    assert!(values.iter().all(|v| v.is_finite()), "{}", def.name)
                }
                (OutputValues::Integer(_), ValueType::Integer) => {}
                _ => panic!("{}: {} has the wrong type", def.name, output.name),
            }
        }
    }
}

#[test]
fn test_lookback_boundary_for_every_function() {
    let bars = sample_bars(300, 8);
    for def in functions() {
        let lookback = lookback_of(def.name);

        let short = invoke_with(&full_request(def.name, &bars).range(0, lookback), &none()).unwrap();
        assert_eq!(short.out_nb_element, 0, "{}", def.name);
        assert!(short.outputs.iter().all(|o| o.values.is_empty()), "{}", def.name);

        let exact =
            invoke_with(&full_request(def.name, &bars).range(0, lookback + 1), &none()).unwrap();
        assert_eq!(exact.out_beg_idx, lookback, "{}", def.name);
        assert_eq!(exact.out_nb_element, 1, "{}", def.name);
        assert!(exact.outputs.iter().all(|o| o.values.len() == 1), "{}", def.name);
    }
}

#[test]
fn test_every_parameter_bound_and_entry_is_accepted() {
    let bars = sample_bars(150, 21);
    for def in functions() {
        let signature = def.signature();
        for param in &signature.opt_inputs {
            let mut values: Vec<ParamValue> = Vec::new();
            let mut rejected: Vec<ParamValue> = Vec::new();
            match (&param.range, &param.list) {
                (Some(RangeRecord::Integer(range)), _) => {
                    values.push(i64::from(range.min).into());
                    values.push(i64::from(range.max).into());
                    rejected.push((i64::from(range.min) - 1).into());
                    rejected.push((i64::from(range.max) + 1).into());
                }
                (Some(RangeRecord::Real(range)), _) => {
                    values.push(range.min.into());
                    values.push(range.max.into());
                    rejected.push((range.max * 2.0 + 1.0).into());
                }
                (None, Some(EnumList(entries))) => {
                    for (name, code) in entries {
                        values.push(name.as_str().into());
                        values.push(i64::from(*code).into());
                    }
                    rejected.push("NOT_AN_ENTRY".into());
                }
                (None, None) => panic!("{}: {} has no domain", def.name, param.name),
            }

            for value in values {
                let request = full_request(def.name, &bars).param(param.name.as_str(), value.clone());
                let result = invoke_with(&request, &none());
                assert!(
                    result.is_ok(),
                    "{} {}={:?}: {:?}",
                    def.name,
                    param.name,
                    value,
                    result.err()
                );
            }
            for value in rejected {
                let request = full_request(def.name, &bars).param(param.name.as_str(), value.clone());
                let err = invoke_with(&request, &none()).unwrap_err();
                assert_eq!(err.error_id(), "InvalidParameter", "{} {:?}", def.name, value);
            }
        }
    }
}

#[test]
fn test_strict_params_need_every_value() {
    let bars = sample_bars(60, 2);
    for def in functions().iter().filter(|def| !def.opt_inputs.is_empty()) {
        let err = invoke_with(&full_request(def.name, &bars).strict(true), &none()).unwrap_err();
        assert_eq!(err, TaError::missing(def.opt_inputs[0].name), "{}", def.name);

        let mut request = full_request(def.name, &bars).strict(true);
        for param in def.opt_inputs {
            request = request.param(param.name, param.default_value);
        }
        let strict = invoke_with(&request, &none()).unwrap();
        let lenient = invoke_with(&full_request(def.name, &bars), &none()).unwrap();
        assert_eq!(strict, lenient, "{}", def.name);
    }
}

#[test]
fn test_concurrent_calls_match_sequential() {
    let bars = sample_bars(250, 99);
    let u = none();
    let sequential: Vec<CallResult> = functions()
        .iter()
        .map(|def| invoke_with(&full_request(def.name, &bars), &u).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    functions()
                        .iter()
                        .map(|def| invoke_with(&full_request(def.name, &bars), &u).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), sequential);
        }
    });
}

#[test]
fn test_aligned_outputs_for_every_function() {
    let bars = sample_bars(120, 4);
    for def in functions() {
        let result = invoke_with(&full_request(def.name, &bars), &none()).unwrap();
        for output in result.aligned(120, AlignFill::Zero) {
            assert_eq!(output.values.len(), 120, "{}", def.name);
            if let OutputValues::Real(values) = &output.values {
                assert!(values[..result.out_beg_idx].iter().all(|&v| v == 0.0));
            }
        }
    }
}

#[test]
fn test_params_map_from_json() {
    let params: BTreeMap<String, ParamValue> =
        serde_json::from_str(r#"{"optInFastPeriod": 5, "optInSlowPeriod": 8.0, "optInSignalPeriod": 3}"#)
            .unwrap();
    let request = CallRequest {
        name: "MACD".to_string(),
        params,
        ..CallRequest::default()
    }
    .input("inReal", sample_bars(60, 1).close().as_slice());
    let result = invoke_with(&request, &none()).unwrap();
    assert_eq!(result.out_beg_idx, 9);
}

// ============================================================================
// Property-based tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sma_count(data in prop::collection::vec(1.0f64..1000.0, 0..80), period in 2i64..30) {
        let request = CallRequest::new("SMA")
            .input("inReal", data.clone())
            .param("optInTimePeriod", period);
        let result = invoke_with(&request, &none()).unwrap();
        let lookback = (period - 1) as usize;
        prop_assert_eq!(result.out_beg_idx, lookback);
        prop_assert_eq!(result.out_nb_element, data.len().saturating_sub(lookback));
    }

    #[test]
    fn prop_range_bounds(len in 0usize..120, start in 0usize..130, end in 0usize..130) {
        let bars = sample_bars(len, 17);
        let request = full_request("EMA", &bars).param("optInTimePeriod", 5).range(start, end);
        match invoke_with(&request, &none()) {
            Ok(result) => {
                prop_assert!(start <= end && end <= len);
                prop_assert_eq!(result.out_beg_idx, start + 4);
                prop_assert_eq!(result.out_nb_element, (end - start).saturating_sub(4));
            }
            Err(err) => {
                prop_assert!(start > end || end > len);
                prop_assert_eq!(
                    err,
                    TaError::InvalidRange { start: start as i64, end: end as i64, len }
                );
            }
        }
    }

    #[test]
    fn prop_every_function_counts(len in 0usize..140, seed in 0u64..1000) {
        let bars = sample_bars(len, seed);
        for def in functions() {
            let result = invoke_with(&full_request(def.name, &bars), &none()).unwrap();
            let lookback = lookback_of(def.name);
            prop_assert_eq!(result.out_nb_element, len.saturating_sub(lookback));
            for output in &result.outputs {
                prop_assert_eq!(output.values.len(), result.out_nb_element);
            }
        }
    }
}
