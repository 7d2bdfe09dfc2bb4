//! # ta-core
//!
//! Core types for the rust-ta technical analysis engine.
//!
//! This crate provides the foundational abstractions shared by the indicator
//! kernels and the call engine:
//!
//! - [`TaFloat`] - Trait for numeric types (f32/f64)
//! - [`Series`] - Time series data container
//! - [`Bar`], [`OhlcvSeries`] and [`PriceField`] - Price data types
//! - [`RingBuffer`] - Circular buffer used by history-keeping kernels
//! - [`UnstablePeriods`] and [`FuncUnstId`] - Unstable-period table
//! - [`TaError`] - Every error the engine reports
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```rust
//! use ta_core::prelude::*;
//!
//! let closes: Series<f64> = Series::from(vec![100.0, 101.5, 99.8, 102.3, 101.0]);
//! let mut unstable = UnstablePeriods::new();
//! unstable.set(FuncUnstId::Ema, 10);
//!
//! assert_eq!(closes.len(), 5);
//! assert_eq!(unstable.get(FuncUnstId::Ema), 10);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod num;
pub mod ohlcv;
pub mod prelude;
pub mod series;
pub mod unstable;
pub mod utils;
pub mod window;

// Re-export core types at crate root
pub use error::{Result, TaError};
pub use num::TaFloat;
pub use ohlcv::{Bar, OhlcvSeries, PriceField};
pub use series::Series;
pub use unstable::{FuncUnstId, UnstablePeriods};
pub use window::RingBuffer;
