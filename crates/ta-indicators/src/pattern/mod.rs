//! Candlestick pattern recognition.
//!
//! Pattern functions return one integer per bar: 100 (bullish or plain
//! detection), -100 (bearish) or 0.

mod doji;
mod engulfing;
mod hammer;
mod settings;

use ta_core::{error::Result, num::TaFloat, ohlcv::Bar, utils::check_same_len};

pub use doji::{cdl_doji, cdl_doji_lookback};
pub use engulfing::{cdl_engulfing, cdl_engulfing_lookback};
pub use hammer::{cdl_hammer, cdl_hammer_lookback};
pub use settings::{CandleSetting, CandleSettings, RangeType};

/// Zip the price columns into bars after checking their lengths.
fn candles<T: TaFloat>(open: &[T], high: &[T], low: &[T], close: &[T]) -> Result<Vec<Bar<T>>> {
    check_same_len(&[
        ("open", open.len()),
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
    ])?;
    Ok(open
        .iter()
        .zip(high)
        .zip(low)
        .zip(close)
        .map(|(((&o, &h), &l), &c)| Bar::new(o, h, l, c, T::ZERO))
        .collect())
}
