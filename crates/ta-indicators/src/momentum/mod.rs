//! Momentum indicators.
//!
//! - RSI, CMO (Wilder-smoothed gain/loss oscillators)
//! - STOCHF, STOCH, STOCHRSI
//! - MACD
//! - MOM, ROC
//! - IMI (Intraday Momentum Index)
//!
//! The directional movement family lives in [`crate::trend`] and MFI in
//! [`crate::volume`].

mod imi;
mod macd;
mod roc;
mod rsi;
mod stoch;

pub use imi::{imi, imi_lookback};
pub use macd::{macd, macd_lookback, MacdConfig, MacdOutput};
pub use roc::{mom, mom_lookback, roc, roc_lookback};
pub use rsi::{cmo, cmo_lookback, rsi, rsi_lookback};
pub use stoch::{
    stoch, stoch_lookback, stochf, stochf_lookback, stochrsi, stochrsi_lookback, StochConfig,
    StochFConfig, StochFOutput, StochOutput, StochRsiConfig,
};
