//! Overlap studies: moving averages and bands plotted on the price scale.
//!
//! - SMA, EMA, WMA, DEMA, TEMA, TRIMA, KAMA, T3, MAMA
//! - MA (any of the above, selected by [`MaType`])
//! - BBANDS
//! - HT_TRENDLINE (implemented with the cycle indicators)

mod bbands;
mod ema;
mod kama;
mod ma;
mod mama;
mod sma;
mod t3;
mod trima;
mod wma;

pub use bbands::{bbands, bbands_lookback, BbandsConfig, BbandsOutput};
pub(crate) use ema::ema_from;
pub use ema::{dema, dema_lookback, ema, ema_lookback, tema, tema_lookback};
pub use kama::{kama, kama_lookback};
pub use ma::{ma, ma_lookback, MaType};
pub use mama::{mama, mama_lookback, MamaConfig, MamaOutput};
pub use sma::{sma, sma_lookback};
pub use t3::{t3, t3_lookback, T3Config};
pub use trima::{trima, trima_lookback};
pub use wma::{wma, wma_lookback};

pub use crate::cycle::{ht_trendline, ht_trendline_lookback};
