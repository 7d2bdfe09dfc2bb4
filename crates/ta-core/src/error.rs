//! Error types for technical analysis operations.
//!
//! Every failure the engine can report is a [`TaError`]. Validation happens
//! before any kernel runs, so an error never comes with partial output.

use thiserror::Error;

/// Result type alias for operations that may fail.
pub type Result<T> = core::result::Result<T, TaError>;

/// Errors raised while resolving, validating or running an indicator call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaError {
    /// The requested indicator name is not registered.
    #[error("Unknown function: '{0}'")]
    UnknownFunction(String),

    /// A required input series or parameter was not supplied.
    #[error("[{name}] is required")]
    MissingParameter {
        /// Name of the missing input slot, price field or parameter.
        name: String,
    },

    /// A parameter value is outside its declared range or list.
    #[error("Invalid parameter '{name}': {value} (expected {expected})")]
    InvalidParameter {
        /// Name of the parameter.
        name: String,
        /// Provided value as string.
        value: String,
        /// Description of the accepted values.
        expected: String,
    },

    /// Input series of one call do not share a single length.
    #[error("Inconsistent length for '{name}': expected {expected}, got {actual}")]
    InconsistentLength {
        /// Name of the offending series.
        name: String,
        /// Length of the first series of the call.
        expected: usize,
        /// Length of the offending series.
        actual: usize,
    },

    /// The explicit `[start, end)` range does not fit the input.
    #[error("Invalid range [{start}, {end}) for input of length {len}")]
    InvalidRange {
        /// Requested first index.
        start: i64,
        /// Requested end index (exclusive).
        end: i64,
        /// Length of the input series.
        len: usize,
    },

    /// The unstable-period family name is not known.
    #[error("Unknown unstable-period family: '{0}'")]
    UnknownFamily(String),

    /// A supplied series does not have the type its slot declares.
    #[error("Invalid input '{name}': {reason}")]
    InvalidInput {
        /// Name of the input slot.
        name: String,
        /// What was wrong with the series.
        reason: String,
    },
}

impl TaError {
    /// Stable identifier of the error kind, used in boundary error records.
    #[must_use]
    pub fn error_id(&self) -> &'static str {
        match self {
            Self::UnknownFunction(_) => "UnknownFunction",
            Self::MissingParameter { .. } => "MissingParameter",
            Self::InvalidParameter { .. } => "InvalidParameter",
            Self::InconsistentLength { .. } => "InconsistentLength",
            Self::InvalidRange { .. } => "InvalidRange",
            Self::UnknownFamily(_) => "UnknownFamily",
            Self::InvalidInput { .. } => "InvalidInput",
        }
    }

    /// Shorthand for [`TaError::MissingParameter`].
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Shorthand for [`TaError::InvalidParameter`].
    #[must_use]
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl core::fmt::Display,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}
