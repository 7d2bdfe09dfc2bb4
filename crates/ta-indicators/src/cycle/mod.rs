//! Hilbert-transform cycle indicators.
//!
//! HT_TRENDLINE belongs to the overlap studies but shares this machinery, so
//! it is implemented here and re-exported from [`crate::overlap`].

pub(crate) mod hilbert;
mod ht;

pub use ht::{
    ht_dcperiod, ht_dcperiod_lookback, ht_dcphase, ht_dcphase_lookback, ht_phasor,
    ht_phasor_lookback, ht_sine, ht_sine_lookback, ht_trendline, ht_trendline_lookback,
    ht_trendmode, ht_trendmode_lookback, PhasorOutput, SineOutput,
};
