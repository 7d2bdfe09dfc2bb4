//! MESA Adaptive Moving Average (MAMA) and its Following Adaptive Moving
//! Average (FAMA).
//!
//! The smoothing factor follows the rate of change of the Hilbert phase:
//! a fast phase change pushes alpha towards the fast limit, a slow one towards
//! the slow limit. FAMA applies half of that alpha to MAMA itself.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use ta_core::{
    error::{Result, TaError},
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
};

use crate::cycle::hilbert::{rad_to_deg, HilbertCycle};

/// Configuration for MAMA.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MamaConfig {
    /// Upper limit of the smoothing factor (default: 0.5).
    pub fast_limit: f64,
    /// Lower limit of the smoothing factor (default: 0.05).
    pub slow_limit: f64,
}

impl Default for MamaConfig {
    fn default() -> Self {
        Self {
            fast_limit: 0.5,
            slow_limit: 0.05,
        }
    }
}

impl MamaConfig {
    /// Create a new configuration.
    pub fn new(fast_limit: f64, slow_limit: f64) -> Self {
        Self {
            fast_limit,
            slow_limit,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("optInFastLimit", self.fast_limit),
            ("optInSlowLimit", self.slow_limit),
        ] {
            if !(0.01..=0.99).contains(&value) {
                return Err(TaError::invalid_parameter(name, value, "real in [0.01, 0.99]"));
            }
        }
        Ok(())
    }
}

/// Output of MAMA.
#[derive(Debug, Clone, PartialEq)]
pub struct MamaOutput<T: TaFloat> {
    /// MESA adaptive moving average.
    pub mama: Series<T>,
    /// Following adaptive moving average.
    pub fama: Series<T>,
}

/// Number of leading samples consumed before the first MAMA value.
#[must_use]
pub fn mama_lookback(unstable: &UnstablePeriods) -> usize {
    32 + unstable.get(FuncUnstId::Mama)
}

/// MESA Adaptive Moving Average.
///
/// # Errors
///
/// Returns `InvalidParameter` if either limit is outside `[0.01, 0.99]`.
pub fn mama<T: TaFloat>(
    input: &[T],
    config: &MamaConfig,
    unstable: &UnstablePeriods,
) -> Result<MamaOutput<T>> {
    config.validate()?;
    let lookback = mama_lookback(unstable);
    let mut output = MamaOutput {
        mama: Series::new(),
        fama: Series::new(),
    };
    if input.len() <= lookback {
        return Ok(output);
    }

    let fast = T::from_f64_lossy(config.fast_limit);
    let slow = T::from_f64_lossy(config.slow_limit);
    let half = T::from_f64_lossy(0.5);
    let rad_to_deg = rad_to_deg::<T>();

    let (mut cycle, mut today) = HilbertCycle::new(input, 9);
    let mut prev_phase = T::ZERO;
    let mut mama = T::ZERO;
    let mut fama = T::ZERO;
    output.mama = Series::with_capacity(input.len() - lookback);
    output.fama = Series::with_capacity(input.len() - lookback);

    while today < input.len() {
        let bar = cycle.step(today);

        let phase = if bar.in_phase != T::ZERO {
            (bar.quadrature / bar.in_phase).atan() * rad_to_deg
        } else {
            T::ZERO
        };
        let delta = (prev_phase - phase).max(T::ONE);
        prev_phase = phase;

        let alpha = if delta > T::ONE {
            (fast / delta).max(slow)
        } else {
            fast
        };

        let value = input[today];
        mama = alpha * value + (T::ONE - alpha) * mama;
        let alpha = alpha * half;
        fama = alpha * mama + (T::ONE - alpha) * fama;

        if today >= lookback {
            output.mama.push(mama);
            output.fama.push(fama);
        }
        today += 1;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mama_default_config() {
        let config = MamaConfig::default();
        assert_eq!(config, MamaConfig::new(0.5, 0.05));
    }

    #[test]
    fn test_mama_lookback() {
        assert_eq!(mama_lookback(&UnstablePeriods::new()), 32);
        assert_eq!(
            mama_lookback(&UnstablePeriods::new().with(FuncUnstId::Mama, 8)),
            40
        );
    }

    #[test]
    fn test_mama_length() {
        let data: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.4).sin() * 3.0).collect();
        let output = mama(&data, &MamaConfig::default(), &UnstablePeriods::new()).unwrap();
        assert_eq!(output.mama.len(), 48);
        assert_eq!(output.fama.len(), 48);

        let output = mama(&data[..32], &MamaConfig::default(), &UnstablePeriods::new()).unwrap();
        assert!(output.mama.is_empty());
    }

    #[test]
    fn test_mama_follows_constant_price() {
        // Alpha never drops below the slow limit, so after enough bars both
        // averages sit on the price.
        let data: Vec<f64> = vec![20.0; 1000];
        let output = mama(&data, &MamaConfig::default(), &UnstablePeriods::new()).unwrap();
        assert!((output.mama.last().unwrap() - 20.0).abs() < 1e-6);
        assert!((output.fama.last().unwrap() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_mama_rejects_out_of_range_limits() {
        let data = vec![1.0; 50];
        let unstable = UnstablePeriods::new();
        assert!(mama(&data, &MamaConfig::new(1.0, 0.05), &unstable).is_err());
        assert!(mama(&data, &MamaConfig::new(0.5, 0.0), &unstable).is_err());
    }
}
