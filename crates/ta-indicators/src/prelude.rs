//! Prelude for ta-indicators.
//!
//! Re-exports every kernel, its lookback function and its configuration and
//! output types, together with the core types kernels are called with.

pub use ta_core::prelude::*;

pub use crate::cycle::*;
pub use crate::momentum::*;
pub use crate::overlap::*;
pub use crate::pattern::*;
pub use crate::price::*;
pub use crate::statistic::*;
pub use crate::trend::*;
pub use crate::volatility::*;
pub use crate::volume::*;
