//! On Balance Volume (OBV).

use ta_core::{error::Result, num::TaFloat, series::Series, utils::check_same_len};

/// Lookback of OBV.
#[must_use]
pub fn obv_lookback() -> usize {
    0
}

/// On Balance Volume.
///
/// Starts at the first bar's volume and adds (subtracts) each bar's volume
/// when the price closes above (below) the previous one.
///
/// # Errors
///
/// Returns `InconsistentLength` if price and volume differ in length.
pub fn obv<T: TaFloat>(input: &[T], volume: &[T]) -> Result<Series<T>> {
    let len = check_same_len(&[("inReal", input.len()), ("volume", volume.len())])?;
    let mut result = Series::with_capacity(len);
    if len == 0 {
        return Ok(result);
    }

    let mut balance = volume[0];
    let mut prev = input[0];
    result.push(balance);
    for (&price, &vol) in input[1..].iter().zip(&volume[1..]) {
        if price > prev {
            balance = balance + vol;
        } else if price < prev {
            balance = balance - vol;
        }
        prev = price;
        result.push(balance);
    }
    Ok(result)
}
