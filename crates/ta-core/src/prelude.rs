//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from ta-core.
//!
//! # Example
//!
//! ```rust
//! use ta_core::prelude::*;
//!
//! let series: Series<f64> = Series::new();
//! let bar = Bar::new(100.0, 105.0, 98.0, 103.0, 1_000_000.0);
//! ```

// Core types
pub use crate::num::TaFloat;
pub use crate::ohlcv::{Bar, OhlcvSeries, PriceField};
pub use crate::series::Series;
pub use crate::unstable::{FuncUnstId, UnstablePeriods};
pub use crate::window::RingBuffer;

// Error types
pub use crate::error::{Result, TaError};

// Utility functions
pub use crate::utils::{bar_true_range, check_period, check_same_len, per_to_k, true_range};
