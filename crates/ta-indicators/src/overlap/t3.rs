//! Tillson T3 moving average.
//!
//! T3 runs six EMAs in cascade and blends the last four with coefficients
//! derived from the volume factor `v`:
//!
//! - c1 = -v^3
//! - c2 = 3v^2 + 3v^3
//! - c3 = -6v^2 - 3v - 3v^3
//! - c4 = 1 + 3v + v^3 + 3v^2
//!
//! T3 = c1*e6 + c2*e5 + c3*e4 + c4*e3

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ta_core::{
    error::{Result, TaError},
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    utils::{check_period, per_to_k},
};

/// Configuration for T3.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct T3Config {
    /// Period of every EMA stage (default: 5).
    pub period: usize,
    /// Volume factor in `[0, 1]` (default: 0.7).
    pub v_factor: f64,
}

impl Default for T3Config {
    fn default() -> Self {
        Self {
            period: 5,
            v_factor: 0.7,
        }
    }
}

impl T3Config {
    /// Create a new configuration with the default volume factor.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    /// Set the volume factor.
    pub fn with_v_factor(mut self, v_factor: f64) -> Self {
        self.v_factor = v_factor;
        self
    }
}

/// Number of leading samples consumed before the first T3 value.
#[must_use]
pub fn t3_lookback(period: usize, unstable: &UnstablePeriods) -> usize {
    6 * period.saturating_sub(1) + unstable.get(FuncUnstId::T3)
}

/// Tillson T3.
///
/// Each stage is seeded with the average of its first `period` inputs, so
/// the six seeds together consume `6 * (period - 1) + 1` samples.
///
/// # Errors
///
/// Returns `InvalidParameter` if the period is zero or the volume factor is
/// outside `[0, 1]`.
pub fn t3<T: TaFloat>(input: &[T], config: &T3Config, unstable: &UnstablePeriods) -> Result<Series<T>> {
    let period = config.period;
    check_period("optInTimePeriod", period, 1)?;
    if !(0.0..=1.0).contains(&config.v_factor) {
        return Err(TaError::invalid_parameter(
            "optInVFactor",
            config.v_factor,
            "real in [0, 1]",
        ));
    }
    let lookback = t3_lookback(period, unstable);
    if input.len() <= lookback {
        return Ok(Series::new());
    }

    let k: T = per_to_k(period);
    let one_minus_k = T::ONE - k;
    let divisor = <T as TaFloat>::from_usize(period);
    let mut today = 0;

    // Stage seeds: stage n averages its first `period` values, the first of
    // which is the seed of stage n - 1.
    let mut e = [T::ZERO; 6];
    let mut total = T::ZERO;
    for _ in 0..period {
        total = total + input[today];
        today += 1;
    }
    e[0] = total / divisor;

    for stage in 1..6 {
        let mut total = e[stage - 1];
        for _ in 1..period {
            let mut value = input[today];
            today += 1;
            for level in e.iter_mut().take(stage) {
                *level = k * value + one_minus_k * *level;
                value = *level;
            }
            total = total + e[stage - 1];
        }
        e[stage] = total / divisor;
    }

    let advance = |e: &mut [T; 6], sample: T| {
        let mut value = sample;
        for level in e.iter_mut() {
            *level = k * value + one_minus_k * *level;
            value = *level;
        }
    };

    let start = lookback;
    while today <= start {
        advance(&mut e, input[today]);
        today += 1;
    }

    let v = T::from_f64_lossy(config.v_factor);
    let three = T::from_f64_lossy(3.0);
    let v_squared = v * v;
    let c1 = -v_squared * v;
    let c2 = three * (v_squared - c1);
    let c3 = T::from_f64_lossy(-6.0) * v_squared - three * (v - c1);
    let c4 = T::ONE + three * v - c1 + three * v_squared;
    let blend = |e: &[T; 6]| c1 * e[5] + c2 * e[4] + c3 * e[3] + c4 * e[2];

    let mut result = Series::with_capacity(input.len() - lookback);
    result.push(blend(&e));
    while today < input.len() {
        advance(&mut e, input[today]);
        today += 1;
        result.push(blend(&e));
    }

    Ok(result)
}
