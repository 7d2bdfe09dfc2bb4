//! Triangular Moving Average (TRIMA) indicator.
//!
//! A TRIMA is an SMA of an SMA; the combined weights rise linearly towards the
//! middle of the window and fall off again (1, 2, 3, 2, 1 for a period of 5).

use ta_core::{error::Result, num::TaFloat, series::Series, utils::check_period};

/// Number of leading samples consumed before the first TRIMA value.
#[must_use]
pub fn trima_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Triangular Moving Average.
///
/// The weighted sum is maintained incrementally with two partial sums: one
/// for the rising half of the window and one for the falling half.
///
/// # Errors
///
/// Returns `InvalidParameter` if `period` is below 2.
pub fn trima<T: TaFloat>(input: &[T], period: usize) -> Result<Series<T>> {
    check_period("optInTimePeriod", period, 2)?;
    let lookback = trima_lookback(period);
    if input.len() <= lookback {
        return Ok(Series::new());
    }

    let half = period / 2;
    let odd = period % 2 == 1;
    let factor = if odd {
        T::ONE / <T as TaFloat>::from_usize((half + 1) * (half + 1))
    } else {
        T::ONE / <T as TaFloat>::from_usize(half * (half + 1))
    };

    let mut trailing = 0;
    let mut middle = if odd { half } else { half - 1 };
    let mut today = middle + half;

    let mut numerator = T::ZERO;
    let mut numerator_sub = T::ZERO;
    for i in (trailing..=middle).rev() {
        numerator_sub = numerator_sub + input[i];
        numerator = numerator + numerator_sub;
    }

    let mut numerator_add = T::ZERO;
    middle += 1;
    for &value in &input[middle..=today] {
        numerator_add = numerator_add + value;
        numerator = numerator + numerator_add;
    }

    let mut result = Series::with_capacity(input.len() - lookback);
    let mut leaving = input[trailing];
    trailing += 1;
    result.push(numerator * factor);
    today += 1;

    while today < input.len() {
        numerator = numerator - numerator_sub;
        numerator_sub = numerator_sub - leaving;
        let crossing = input[middle];
        middle += 1;
        numerator_sub = numerator_sub + crossing;
        if odd {
            numerator = numerator + numerator_add;
            numerator_add = numerator_add - crossing;
        } else {
            numerator_add = numerator_add - crossing;
            numerator = numerator + numerator_add;
        }
        let entering = input[today];
        today += 1;
        numerator_add = numerator_add + entering;
        numerator = numerator + entering;

        leaving = input[trailing];
        trailing += 1;
        result.push(numerator * factor);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn direct_trima(data: &[f64], period: usize) -> Vec<f64> {
        let weights: Vec<f64> = (0..period)
            .map(|i| (i + 1).min(period - i) as f64)
            .collect();
        let total: f64 = weights.iter().sum();
        data.windows(period)
            .map(|w| w.iter().zip(&weights).map(|(x, k)| x * k).sum::<f64>() / total)
            .collect()
    }

    #[test]
    fn test_trima_odd_period() {
        let data: Vec<f64> = (0..30).map(|i| ((i * 13) % 7) as f64 + 1.0).collect();
        let result = trima(&data, 5).unwrap();
        let expected = direct_trima(&data, 5);

        assert_eq!(result.len(), expected.len());
        for (a, b) in result.iter().zip(&expected) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_trima_even_period() {
        let data: Vec<f64> = (0..30).map(|i| ((i * 5) % 9) as f64 - 2.0).collect();
        let result = trima(&data, 4).unwrap();
        let expected = direct_trima(&data, 4);

        assert_eq!(result.len(), expected.len());
        for (a, b) in result.iter().zip(&expected) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_trima_three() {
        let result = trima(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_relative_eq!(result[0], 2.0);
        assert_relative_eq!(result[1], 3.0);
    }

    #[test]
    fn test_trima_rejects_period_one() {
        assert!(trima(&[1.0, 2.0], 1).is_err());
    }
}
