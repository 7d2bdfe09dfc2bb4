//! Boundary operations.
//!
//! Every failure crosses this boundary as an [`ErrorRecord`]: a stable error
//! id plus a human readable message. The `*_json` variants speak JSON in and
//! out and wrap failures in an `{"error": {...}}` envelope.

use serde::{Deserialize, Serialize};
use ta_core::TaError;

use crate::dispatcher::{self, CallRequest, CallResult};
use crate::registry;
use crate::signature::FunctionSignature;
use crate::unstable::{self, UnstableTarget};

/// A failure as reported at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Stable error kind, such as `UnknownFunction`.
    #[serde(rename = "id")]
    pub error_id: String,
    /// Human readable description.
    pub message: String,
}

impl From<TaError> for ErrorRecord {
    fn from(err: TaError) -> Self {
        Self {
            error_id: err.error_id().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a ErrorRecord,
}

fn envelope(record: &ErrorRecord) -> String {
    serde_json::to_string(&ErrorEnvelope { error: record })
        .unwrap_or_else(|_| format!(r#"{{"error":{{"id":"{}"}}}}"#, record.error_id))
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        envelope(&ErrorRecord {
            error_id: "Serialization".to_string(),
            message: err.to_string(),
        })
    })
}

/// Names of every registered function, grouped and sorted.
#[must_use]
pub fn list_functions() -> Vec<&'static str> {
    registry::list()
}

/// [`list_functions`] as a JSON array.
#[must_use]
pub fn function_list_json() -> String {
    to_json(&list_functions())
}

/// Signature of `name`.
///
/// # Errors
///
/// `UnknownFunction` for an unregistered name.
pub fn describe_function(name: &str) -> Result<FunctionSignature, ErrorRecord> {
    Ok(registry::describe(name)?)
}

/// [`describe_function`] as JSON: the signature or an error envelope.
#[must_use]
pub fn describe_function_json(name: &str) -> String {
    match describe_function(name) {
        Ok(signature) => to_json(&signature),
        Err(record) => envelope(&record),
    }
}

/// Run one call.
///
/// # Errors
///
/// Any dispatcher error, converted to an [`ErrorRecord`].
pub fn call(request: &CallRequest) -> Result<CallResult, ErrorRecord> {
    Ok(dispatcher::invoke(request)?)
}

/// Run one call given as a JSON [`CallRequest`]; returns a JSON
/// [`CallResult`] or an error envelope.
#[must_use]
pub fn call_json(request: &str) -> String {
    let request: CallRequest = match serde_json::from_str(request) {
        Ok(request) => request,
        Err(err) => {
            return envelope(&ErrorRecord::from(TaError::InvalidInput {
                name: "request".to_string(),
                reason: err.to_string(),
            }))
        }
    };
    match call(&request) {
        Ok(result) => to_json(&result),
        Err(record) => envelope(&record),
    }
}

/// Set the unstable period of a family name or `ALL`.
///
/// Returns `None` on success and the error message otherwise.
#[must_use]
pub fn set_unstable_period(target: &str, period: u32) -> Option<String> {
    match target.parse::<UnstableTarget>() {
        Ok(target) => {
            unstable::set_unstable_period(target, period);
            None
        }
        Err(err) => Some(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_list_json() {
        let names: Vec<String> = serde_json::from_str(&function_list_json()).unwrap();
        assert_eq!(names.len(), registry::functions().len());
        assert_eq!(names[0], "HT_DCPERIOD");
    }

    #[test]
    fn test_describe_json() {
        let value: Value = serde_json::from_str(&describe_function_json("RSI")).unwrap();
        assert_eq!(value["name"], "RSI");
        assert_eq!(value["group"], "Momentum Indicators");
        assert_eq!(value["opt_inputs"][0]["name"], "optInTimePeriod");
        assert_eq!(value["opt_inputs"][0]["default_value"], 14.0);

        let value: Value = serde_json::from_str(&describe_function_json("rsi")).unwrap();
        assert_eq!(value["error"]["id"], "UnknownFunction");
        assert_eq!(value["error"]["message"], "Unknown function: 'rsi'");
    }

    #[test]
    fn test_error_record() {
        let record = ErrorRecord::from(TaError::missing("inReal"));
        assert_eq!(record.error_id, "MissingParameter");
        assert_eq!(record.message, "[inReal] is required");
    }

    #[test]
    fn test_call_json_malformed_request() {
        let value: Value = serde_json::from_str(&call_json("[1, 2")).unwrap();
        assert_eq!(value["error"]["id"], "InvalidInput");
        assert!(value["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid input 'request'"));
    }

    #[test]
    fn test_call_json_errors() {
        let value: Value = serde_json::from_str(&call_json(
            r#"{"name": "SMA", "inputs": {"inReal": [1, 2, 3]}, "params": {"optInTimePeriod": 1}}"#,
        ))
        .unwrap();
        assert_eq!(value["error"]["id"], "InvalidParameter");

        for range in [r#"{"start": -1, "end": 3}"#, r#"{"start": 3, "end": 1}"#] {
            let request = format!(
                r#"{{"name": "SMA", "inputs": {{"inReal": [1, 2, 3, 4]}}, "range": {range}}}"#
            );
            let value: Value = serde_json::from_str(&call_json(&request)).unwrap();
            assert_eq!(value["error"]["id"], "InvalidRange", "{range}");
        }
    }

    #[test]
    fn test_set_unstable_period_unknown_family() {
        assert_eq!(
            set_unstable_period("NOT_A_FAMILY", 3),
            Some("Unknown unstable-period family: 'NOT_A_FAMILY'".to_string())
        );
    }
}
