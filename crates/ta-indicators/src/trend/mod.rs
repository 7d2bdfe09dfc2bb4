//! Trend-strength indicators: the directional movement family.
//!
//! +DM/-DM, +DI/-DI, DX, ADX and ADXR share one Wilder walk over the bars.

mod directional;

pub use directional::{
    adx, adx_lookback, adxr, adxr_lookback, dx, dx_lookback, minus_di, minus_di_lookback,
    minus_dm, minus_dm_lookback, plus_di, plus_di_lookback, plus_dm, plus_dm_lookback,
};
