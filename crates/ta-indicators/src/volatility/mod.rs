//! Volatility indicators: TRANGE, ATR, NATR.

mod atr;

pub use atr::{atr, atr_lookback, natr, natr_lookback, trange, trange_lookback};
