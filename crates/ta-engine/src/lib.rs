//! # ta-engine
//!
//! Call engine over the [`ta_indicators`] kernels.
//!
//! - [`registry`] - catalog of every callable function and its signature
//! - [`lookback`] - leading samples each call consumes before its first output
//! - [`dispatcher`] - validates a [`CallRequest`] and runs its kernel
//! - [`unstable`] - process-wide unstable-period table
//! - [`config`] - startup configuration file
//! - [`api`] - boundary operations with stable error records and JSON forms
//!
//! Calls are independent: any number may run concurrently. The unstable-period
//! table is the only shared state and each call reads one consistent copy.
//!
//! ## Example
//!
//! ```rust
//! use ta_engine::prelude::*;
//!
//! let closes: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i)).collect();
//! let request = CallRequest::new("EMA")
//!     .input("inReal", closes)
//!     .param("optInTimePeriod", 10);
//! let result = invoke_with(&request, &UnstablePeriods::new()).unwrap();
//!
//! assert_eq!(result.out_beg_idx, 9);
//! assert_eq!(result.out_nb_element, 31);
//! assert_eq!(default_lookback("EMA").unwrap(), 29);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod execute;
pub mod func;
pub mod lookback;
pub mod params;
pub mod prelude;
pub mod registry;
pub mod signature;
pub mod unstable;

pub use config::{ConfigError, EngineConfig};
pub use dispatcher::{
    invoke, invoke_with, AlignFill, CallRange, CallRequest, CallResult, InputSeries, NamedOutput,
};
pub use execute::OutputValues;
pub use func::{FuncId, Group};
pub use lookback::{default_lookback, lookback};
pub use params::{ParamValue, ResolvedParams};
pub use signature::{FunctionDef, FunctionSignature};
pub use unstable::{
    reset_unstable_periods, set_unstable_period, snapshot, unstable_period, UnstableTarget,
};
