//! Money Flow Index (MFI).
//!
//! A volume-weighted RSI over the typical price `(high + low + close) / 3`.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    utils::{check_period, check_same_len},
    window::RingBuffer,
};

/// Lookback of MFI.
#[must_use]
pub fn mfi_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    period + unstable.get(FuncUnstId::Mfi)
}

/// Money Flow Index.
///
/// # Formula
///
/// - money flow = typical price * volume, counted as positive when the typical
///   price rose and negative when it fell
/// - MFI = 100 * positive flow / (positive flow + negative flow)
///
/// A total flow below 1 yields 0.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2 and `InconsistentLength`
/// if the inputs differ in length.
pub fn mfi<T: TaFloat>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    let len = check_same_len(&[
        ("high", high.len()),
        ("low", low.len()),
        ("close", close.len()),
        ("volume", volume.len()),
    ])?;
    let lookback = mfi_lookback(period, unstable);
    if len <= lookback {
        return Ok(Series::new());
    }

    let three = T::from_f64_lossy(3.0);
    let typical = |i: usize| (high[i] + low[i] + close[i]) / three;

    let mut flows = RingBuffer::filled((T::ZERO, T::ZERO), period);
    let mut positive = T::ZERO;
    let mut negative = T::ZERO;
    let mut prev_typical = typical(0);
    let mut result = Series::with_capacity(len - lookback);

    for today in 1..len {
        let price = typical(today);
        let change = price - prev_typical;
        prev_typical = price;
        let flow = price * volume[today];

        let entry = if change < T::ZERO {
            (T::ZERO, flow)
        } else if change > T::ZERO {
            (flow, T::ZERO)
        } else {
            (T::ZERO, T::ZERO)
        };
        if let Some((old_positive, old_negative)) = flows.push(entry) {
            positive = positive - old_positive;
            negative = negative - old_negative;
        }
        positive = positive + entry.0;
        negative = negative + entry.1;

        if today >= lookback {
            let total = positive + negative;
            result.push(if total < T::ONE {
                T::ZERO
            } else {
                T::HUNDRED * (positive / total)
            });
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mfi_values() {
        // Typical prices: 10, 11, 10.5, 12 with volume 100 each
        let high = [11.0, 12.0, 11.5, 13.0];
        let low = [9.0, 10.0, 9.5, 11.0];
        let close = [10.0, 11.0, 10.5, 12.0];
        let volume = [100.0; 4];
        let result = mfi(&high, &low, &close, &volume, 2, &UnstablePeriods::new()).unwrap();
        assert_eq!(result.len(), 2);
        // Bars 1, 2: +1100, -1050
        assert_relative_eq!(result[0], 100.0 * 1100.0 / 2150.0, epsilon = 1e-9);
        // Bars 2, 3: -1050, +1200
        assert_relative_eq!(result[1], 100.0 * 1200.0 / 2250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mfi_small_flow_is_zero() {
        let prices = [1.0, 1.0, 1.0, 1.0];
        let volume = [0.1; 4];
        let result = mfi(&prices, &prices, &prices, &volume, 2, &UnstablePeriods::new()).unwrap();
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_mfi_unstable_tail() {
        let close: Vec<f64> = (0..50).map(|i| 20.0 + (i as f64 * 0.6).sin() * 2.0).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 0.5).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 0.5).collect();
        let volume: Vec<f64> = (0..50).map(|i| 1000.0 + (i % 7) as f64 * 50.0).collect();

        let stable = mfi(&high, &low, &close, &volume, 14, &UnstablePeriods::new()).unwrap();
        let delayed = mfi(&high, &low, &close, &volume, 14, &UnstablePeriods::new().with(FuncUnstId::Mfi, 4)).unwrap();
        assert_eq!(stable.len(), 36);
        assert_eq!(delayed.len(), 32);
        for (a, b) in delayed.iter().zip(&stable.as_slice()[4..]) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }
}
