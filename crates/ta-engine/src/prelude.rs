//! Prelude module for convenient imports.
//!
//! Re-exports the engine's call surface together with the
//! [`ta_core::prelude`] types it takes and returns.

pub use ta_core::prelude::*;

pub use crate::api::ErrorRecord;
pub use crate::config::{ConfigError, EngineConfig};
pub use crate::dispatcher::{
    invoke, invoke_with, AlignFill, CallRange, CallRequest, CallResult, InputSeries, NamedOutput,
};
pub use crate::execute::OutputValues;
pub use crate::func::{FuncId, Group};
pub use crate::lookback::default_lookback;
pub use crate::params::{ParamValue, ResolvedParams};
pub use crate::registry::{describe, functions, list, lookup};
pub use crate::signature::{FunctionDef, FunctionSignature, ValueType};
pub use crate::unstable::{
    reset_unstable_periods, set_unstable_period, snapshot, unstable_period, UnstableTarget,
};
