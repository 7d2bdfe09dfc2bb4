//! # ta-indicators
//!
//! Batch technical-analysis kernels for the rust-ta engine.
//!
//! Every kernel is a plain function over input slices that returns only its
//! valid outputs: for an input of `n` samples and a lookback of `l`, the result
//! holds `n - l` values (none when `n <= l`), the first one belonging to input
//! index `l`. Each kernel comes with a `*_lookback` function computing `l` from
//! the same parameters. Kernels whose early values depend on where the
//! computation started take an [`UnstablePeriods`](ta_core::UnstablePeriods)
//! snapshot and suppress that many extra leading values.
//!
//! Kernels are grouped the way they are catalogued:
//!
//! - [`overlap`]: moving averages, Bollinger Bands, MAMA, HT_TRENDLINE
//! - [`momentum`]: RSI, CMO, stochastics, MACD, MOM, ROC, IMI
//! - [`trend`]: directional movement (+DM/-DM, +DI/-DI, DX, ADX, ADXR)
//! - [`volatility`]: TRANGE, ATR, NATR
//! - [`volume`]: MFI, OBV
//! - [`cycle`]: Hilbert-transform cycle indicators
//! - [`pattern`]: candlestick patterns
//! - [`statistic`]: VAR, STDDEV, CORREL
//! - [`price`]: price transforms
//!
//! # Example
//!
//! ```
//! use ta_indicators::prelude::*;
//!
//! let close = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&close, 3).unwrap();
//! assert_eq!(sma_lookback(3), 2);
//! assert_eq!(result.as_slice(), &[2.0, 3.0, 4.0]);
//!
//! let unstable = UnstablePeriods::new();
//! let rsi = rsi(&close, 2, &unstable).unwrap();
//! assert_eq!(rsi.len(), close.len() - rsi_lookback(2, &unstable));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cycle;
pub mod momentum;
pub mod overlap;
pub mod pattern;
pub mod price;
pub mod statistic;
pub mod trend;
pub mod volatility;
pub mod volume;

pub mod prelude;

pub use prelude::*;
