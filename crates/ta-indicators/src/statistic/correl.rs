//! Pearson's correlation coefficient over a rolling window.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    utils::{check_period, check_same_len},
};

/// Number of leading samples consumed before the first coefficient.
#[must_use]
pub fn correl_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Pearson's correlation coefficient (r) of two series.
///
/// A window where either series is flat has no defined coefficient and
/// yields 0.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is zero and `InconsistentLength`
/// if the inputs differ in length.
pub fn correl<T: TaFloat>(input0: &[T], input1: &[T], period: usize) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 1)?;
    let len = check_same_len(&[("inReal0", input0.len()), ("inReal1", input1.len())])?;
    let lookback = correl_lookback(period);
    if len <= lookback {
        return Ok(Series::new());
    }

    let n = <T as TaFloat>::from_usize(period);
    let mut sum_x = T::ZERO;
    let mut sum_y = T::ZERO;
    let mut sum_x2 = T::ZERO;
    let mut sum_y2 = T::ZERO;
    let mut sum_xy = T::ZERO;
    let mut add = |x: T, y: T, sign: T| {
        sum_x = sum_x + sign * x;
        sum_y = sum_y + sign * y;
        sum_x2 = sum_x2 + sign * x * x;
        sum_y2 = sum_y2 + sign * y * y;
        sum_xy = sum_xy + sign * x * y;
        let spread = (sum_x2 - sum_x * sum_x / n) * (sum_y2 - sum_y * sum_y / n);
        if spread.is_zero_or_neg() {
            T::ZERO
        } else {
            (sum_xy - sum_x * sum_y / n) / spread.sqrt()
        }
    };

    for i in 0..lookback {
        add(input0[i], input1[i], T::ONE);
    }

    let mut result = Series::with_capacity(len - lookback);
    for today in lookback..len {
        result.push(add(input0[today], input1[today], T::ONE));
        let trailing = today - lookback;
        add(input0[trailing], input1[trailing], -T::ONE);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_correl_perfect() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let up: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();
        let down: Vec<f64> = x.iter().map(|v| -0.5 * v).collect();

        for value in correl(&x, &up, 5).unwrap().iter() {
            assert_relative_eq!(*value, 1.0, epsilon = 1e-9);
        }
        for value in correl(&x, &down, 5).unwrap().iter() {
            assert_relative_eq!(*value, -1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_correl_known_value() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 1.0, 4.0, 3.0];
        let result = correl(&x, &y, 4).unwrap();
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0], 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_correl_flat_window_is_zero() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [7.0; 4];
        let result = correl(&x, &y, 3).unwrap();
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_correl_length_mismatch() {
        assert!(correl(&[1.0, 2.0, 3.0], &[1.0, 2.0], 2).is_err());
    }
}
