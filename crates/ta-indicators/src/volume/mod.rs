//! Volume indicators: MFI and OBV.

mod mfi;
mod obv;

pub use mfi::{mfi, mfi_lookback};
pub use obv::{obv, obv_lookback};
