//! Intraday Momentum Index (IMI).
//!
//! An RSI built from the open-to-close body of each bar instead of
//! close-to-close changes.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    utils::{check_period, check_same_len},
};

/// Number of leading samples consumed before the first IMI value.
#[must_use]
pub fn imi_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    period.saturating_sub(1) + unstable.get(FuncUnstId::Imi)
}

/// Intraday Momentum Index.
///
/// # Formula
///
/// IMI = 100 * sum(up bodies) / (sum(up bodies) + sum(down bodies))
///
/// over the last `period` bars. A window of doji bars yields 0.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2 and
/// `InconsistentLength` if open and close differ in length.
pub fn imi<T: TaFloat>(
    open: &[T],
    close: &[T],
    period: usize,
    unstable: &UnstablePeriods,
) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    let len = check_same_len(&[("open", open.len()), ("close", close.len())])?;
    let lookback = imi_lookback(period, unstable);
    if len <= lookback {
        return Ok(Series::new());
    }

    let mut result = Series::with_capacity(len - lookback);
    for today in lookback..len {
        let mut up = T::ZERO;
        let mut down = T::ZERO;
        for i in today + 1 - period..=today {
            if close[i] > open[i] {
                up = up + (close[i] - open[i]);
            } else {
                down = down + (open[i] - close[i]);
            }
        }
        let total = up + down;
        result.push(if total.is_near_zero() {
            T::ZERO
        } else {
            T::HUNDRED * (up / total)
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_imi_lookback() {
        assert_eq!(imi_lookback(14, &UnstablePeriods::new()), 13);
        assert_eq!(imi_lookback(14, &UnstablePeriods::new().with(FuncUnstId::Imi, 3)), 16);
    }

    #[test]
    fn test_imi_values() {
        let open = [10.0, 11.0, 12.0, 11.0];
        let close = [11.0, 10.0, 13.0, 11.0];
        let result = imi(&open, &close, 3, &UnstablePeriods::new()).unwrap();
        assert_eq!(result.len(), 2);
        // Bars 0..=2: up 1 + 1, down 1
        assert_relative_eq!(result[0], 100.0 * 2.0 / 3.0, epsilon = 1e-12);
        // Bars 1..=3: up 1, down 1 + 0
        assert_relative_eq!(result[1], 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_imi_doji_window_is_zero() {
        let prices = [5.0; 6];
        let result = imi(&prices, &prices, 3, &UnstablePeriods::new()).unwrap();
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_imi_length_mismatch() {
        assert!(imi(&[1.0, 2.0, 3.0], &[1.0, 2.0], 2, &UnstablePeriods::new()).is_err());
    }
}
