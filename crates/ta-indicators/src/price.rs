//! Price transforms: per-bar combinations of the price fields.
//!
//! None of them looks back, so every bar produces a value.

use ta_core::{error::Result, num::TaFloat, series::Series, utils::check_same_len};

/// Lookback shared by all price transforms.
#[must_use]
pub fn price_transform_lookback() -> usize {
    0
}

/// Average price: `(open + high + low + close) / 4`.
///
/// # Errors
///
/// Returns `InconsistentLength` if the inputs differ in length.
pub fn avgprice<T: TaFloat>(open: &[T], high: &[T], low: &[T], close: &[T]) -> Result<Series<T>> {
    check_same_len(&[
        ("open", open.len()),
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
    ])?;
    let four = T::from_f64_lossy(4.0);
    Ok(open
        .iter()
        .zip(high)
        .zip(low)
        .zip(close)
        .map(|(((&o, &h), &l), &c)| (h + l + c + o) / four)
        .collect())
}

/// Median price: `(high + low) / 2`.
///
/// # Errors
///
/// Returns `InconsistentLength` if the inputs differ in length.
pub fn medprice<T: TaFloat>(high: &[T], low: &[T]) -> Result<Series<T>> {
    check_same_len(&[("high", high.len()), ("low", low.len())])?;
    Ok(high.iter().zip(low).map(|(&h, &l)| (h + l) / T::TWO).collect())
}

/// Typical price: `(high + low + close) / 3`.
///
/// # Errors
///
/// Returns `InconsistentLength` if the inputs differ in length.
pub fn typprice<T: TaFloat>(high: &[T], low: &[T], close: &[T]) -> Result<Series<T>> {
    check_hlc(high, low, close)?;
    let three = T::from_f64_lossy(3.0);
    Ok(high
        .iter()
        .zip(low)
        .zip(close)
        .map(|((&h, &l), &c)| (h + l + c) / three)
        .collect())
}

/// Weighted close price: `(high + low + 2 * close) / 4`.
///
/// # Errors
///
/// Returns `InconsistentLength` if the inputs differ in length.
pub fn wclprice<T: TaFloat>(high: &[T], low: &[T], close: &[T]) -> Result<Series<T>> {
    check_hlc(high, low, close)?;
    let four = T::from_f64_lossy(4.0);
    Ok(high
        .iter()
        .zip(low)
        .zip(close)
        .map(|((&h, &l), &c)| (h + l + c * T::TWO) / four)
        .collect())
}

fn check_hlc<T>(high: &[T], low: &[T], close: &[T]) -> Result<usize> {
    check_same_len(&[
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
    ])
}
