//! Hilbert-transform cycle indicators.
//!
//! - HT_DCPERIOD: dominant cycle period
//! - HT_DCPHASE: dominant cycle phase
//! - HT_PHASOR: in-phase and quadrature components
//! - HT_SINE: sine wave and lead sine (phase + 45 degrees)
//! - HT_TRENDMODE: 1 while the market trends, 0 while it cycles
//! - HT_TRENDLINE: instantaneous trendline
//!
//! All of them read their own unstable period; the Hilbert recursion never
//! fully forgets its start, so the suppressed bars matter.

use ta_core::{
    error::Result,
    num::TaFloat,
    series::Series,
    unstable::{FuncUnstId, UnstablePeriods},
    window::RingBuffer,
};

use super::hilbert::{
    cycle_average, deg_to_rad, dominant_cycle_phase, smooth_period, HilbertCycle, Trendline,
    SMOOTH_PRICE_SIZE,
};

/// Bars consumed before the period estimate is usable.
const PERIOD_LOOKBACK: usize = 32;
/// Bars consumed before the phase estimate is usable.
const PHASE_LOOKBACK: usize = 63;
/// Smoother warm-up of the period-based indicators.
const PERIOD_WARMUP: usize = 9;
/// Smoother warm-up of the phase-based indicators.
const PHASE_WARMUP: usize = 34;

/// Lookback of HT_DCPERIOD.
#[must_use]
pub fn ht_dcperiod_lookback(unstable: &UnstablePeriods) -> usize {
    PERIOD_LOOKBACK + unstable.get(FuncUnstId::HtDcperiod)
}

/// Lookback of HT_PHASOR.
#[must_use]
pub fn ht_phasor_lookback(unstable: &UnstablePeriods) -> usize {
    PERIOD_LOOKBACK + unstable.get(FuncUnstId::HtPhasor)
}

/// Lookback of HT_DCPHASE.
#[must_use]
pub fn ht_dcphase_lookback(unstable: &UnstablePeriods) -> usize {
    PHASE_LOOKBACK + unstable.get(FuncUnstId::HtDcphase)
}

/// Lookback of HT_SINE.
#[must_use]
pub fn ht_sine_lookback(unstable: &UnstablePeriods) -> usize {
    PHASE_LOOKBACK + unstable.get(FuncUnstId::HtSine)
}

/// Lookback of HT_TRENDMODE.
#[must_use]
pub fn ht_trendmode_lookback(unstable: &UnstablePeriods) -> usize {
    PHASE_LOOKBACK + unstable.get(FuncUnstId::HtTrendmode)
}

/// Lookback of HT_TRENDLINE.
#[must_use]
pub fn ht_trendline_lookback(unstable: &UnstablePeriods) -> usize {
    PHASE_LOOKBACK + unstable.get(FuncUnstId::HtTrendline)
}

/// Output of HT_PHASOR.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasorOutput<T: TaFloat> {
    /// In-phase component.
    pub in_phase: Series<T>,
    /// Quadrature component.
    pub quadrature: Series<T>,
}

/// Output of HT_SINE.
#[derive(Debug, Clone, PartialEq)]
pub struct SineOutput<T: TaFloat> {
    /// Sine of the dominant cycle phase.
    pub sine: Series<T>,
    /// Sine of the phase advanced by 45 degrees.
    pub lead_sine: Series<T>,
}

/// Hilbert Transform - Dominant Cycle Period.
pub fn ht_dcperiod<T: TaFloat>(input: &[T], unstable: &UnstablePeriods) -> Result<Series<T>> {
    let lookback = ht_dcperiod_lookback(unstable);
    if input.len() <= lookback {
        return Ok(Series::new());
    }

    let (mut cycle, mut today) = HilbertCycle::new(input, PERIOD_WARMUP);
    let mut smoothed_period = T::ZERO;
    let mut result = Series::with_capacity(input.len() - lookback);
    while today < input.len() {
        cycle.step(today);
        smoothed_period = smooth_period(cycle.period(), smoothed_period);
        if today >= lookback {
            result.push(smoothed_period);
        }
        today += 1;
    }
    Ok(result)
}

/// Hilbert Transform - Phasor Components.
pub fn ht_phasor<T: TaFloat>(input: &[T], unstable: &UnstablePeriods) -> Result<PhasorOutput<T>> {
    let lookback = ht_phasor_lookback(unstable);
    let mut in_phase = Series::new();
    let mut quadrature = Series::new();
    if input.len() > lookback {
        let (mut cycle, mut today) = HilbertCycle::new(input, PERIOD_WARMUP);
        while today < input.len() {
            let bar = cycle.step(today);
            if today >= lookback {
                in_phase.push(bar.in_phase);
                quadrature.push(bar.quadrature);
            }
            today += 1;
        }
    }
    Ok(PhasorOutput {
        in_phase,
        quadrature,
    })
}

/// Per-bar state of the phase-based indicators.
#[derive(Debug, Clone, Copy)]
struct PhaseBar<T> {
    smoothed: T,
    smooth_period: T,
    phase: T,
    prev_phase: T,
}

/// Walk `input` through the Hilbert pipeline and the phase DFT, handing every
/// bar from the first processed one onwards to `visit`.
fn walk_phase<T: TaFloat>(input: &[T], mut visit: impl FnMut(usize, PhaseBar<T>)) {
    let (mut cycle, mut today) = HilbertCycle::new(input, PHASE_WARMUP);
    let mut smooth_price = RingBuffer::filled(T::ZERO, SMOOTH_PRICE_SIZE);
    let mut smoothed_period = T::ZERO;
    let mut phase = T::ZERO;

    while today < input.len() {
        let bar = cycle.step(today);
        smooth_price.push(bar.smoothed);
        smoothed_period = smooth_period(cycle.period(), smoothed_period);
        let prev_phase = phase;
        phase = dominant_cycle_phase(&smooth_price, smoothed_period, phase);
        visit(
            today,
            PhaseBar {
                smoothed: bar.smoothed,
                smooth_period: smoothed_period,
                phase,
                prev_phase,
            },
        );
        today += 1;
    }
}

/// Hilbert Transform - Dominant Cycle Phase.
pub fn ht_dcphase<T: TaFloat>(input: &[T], unstable: &UnstablePeriods) -> Result<Series<T>> {
    let lookback = ht_dcphase_lookback(unstable);
    if input.len() <= lookback {
        return Ok(Series::new());
    }

    let mut result = Series::with_capacity(input.len() - lookback);
    walk_phase(input, |today, bar| {
        if today >= lookback {
            result.push(bar.phase);
        }
    });
    Ok(result)
}

/// Hilbert Transform - SineWave.
pub fn ht_sine<T: TaFloat>(input: &[T], unstable: &UnstablePeriods) -> Result<SineOutput<T>> {
    let lookback = ht_sine_lookback(unstable);
    let mut sine = Series::new();
    let mut lead_sine = Series::new();
    if input.len() > lookback {
        let deg_to_rad = deg_to_rad::<T>();
        let lead = T::from_f64_lossy(45.0);
        walk_phase(input, |today, bar| {
            if today >= lookback {
                sine.push((bar.phase * deg_to_rad).sin());
                lead_sine.push(((bar.phase + lead) * deg_to_rad).sin());
            }
        });
    }
    Ok(SineOutput { sine, lead_sine })
}

/// Hilbert Transform - Instantaneous Trendline.
pub fn ht_trendline<T: TaFloat>(input: &[T], unstable: &UnstablePeriods) -> Result<Series<T>> {
    let lookback = ht_trendline_lookback(unstable);
    if input.len() <= lookback {
        return Ok(Series::new());
    }

    let (mut cycle, mut today) = HilbertCycle::new(input, PHASE_WARMUP);
    let mut smoothed_period = T::ZERO;
    let mut trendline = Trendline::new();
    let mut result = Series::with_capacity(input.len() - lookback);
    while today < input.len() {
        cycle.step(today);
        smoothed_period = smooth_period(cycle.period(), smoothed_period);
        let value = trendline.next(cycle_average(input, today, smoothed_period));
        if today >= lookback {
            result.push(value);
        }
        today += 1;
    }
    Ok(result)
}

/// Hilbert Transform - Trend vs Cycle Mode.
///
/// A bar is in trend mode (1) unless one of these cycle signals fires:
///
/// - the sine and lead sine crossed within the last half cycle,
/// - the phase advanced by 0.67x..1.5x of the expected per-bar change.
///
/// A smoothed price at least 1.5% away from the trendline forces trend mode.
pub fn ht_trendmode<T: TaFloat>(input: &[T], unstable: &UnstablePeriods) -> Result<Vec<i32>> {
    let lookback = ht_trendmode_lookback(unstable);
    if input.len() <= lookback {
        return Ok(Vec::new());
    }

    let deg_to_rad = deg_to_rad::<T>();
    let lead = T::from_f64_lossy(45.0);
    let full_circle = T::from_f64_lossy(360.0);
    let half = T::from_f64_lossy(0.5);
    let slow = T::from_f64_lossy(0.67);
    let fast = T::from_f64_lossy(1.5);
    let deviation = T::from_f64_lossy(0.015);

    let mut trendline = Trendline::new();
    let mut sine = T::ZERO;
    let mut lead_sine = T::ZERO;
    let mut days_in_trend: usize = 0;
    let mut result = Vec::with_capacity(input.len() - lookback);

    walk_phase(input, |today, bar| {
        let prev_sine = sine;
        let prev_lead_sine = lead_sine;
        sine = (bar.phase * deg_to_rad).sin();
        lead_sine = ((bar.phase + lead) * deg_to_rad).sin();

        let line = trendline.next(cycle_average(input, today, bar.smooth_period));

        let mut trend = 1;
        if (sine > lead_sine && prev_sine <= prev_lead_sine)
            || (sine < lead_sine && prev_sine >= prev_lead_sine)
        {
            days_in_trend = 0;
            trend = 0;
        }
        days_in_trend += 1;
        if <T as TaFloat>::from_usize(days_in_trend) < half * bar.smooth_period {
            trend = 0;
        }

        let phase_change = bar.phase - bar.prev_phase;
        if bar.smooth_period != T::ZERO
            && phase_change > slow * full_circle / bar.smooth_period
            && phase_change < fast * full_circle / bar.smooth_period
        {
            trend = 0;
        }

        if line != T::ZERO && ((bar.smoothed - line) / line).abs() >= deviation {
            trend = 1;
        }

        if today >= lookback {
            result.push(trend);
        }
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f64::consts::PI;

    fn sine_wave(len: usize, period: f64) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + 5.0 * (2.0 * PI * i as f64 / period).sin())
            .collect()
    }

    #[test]
    fn test_lookbacks() {
        let unstable = UnstablePeriods::new();
        assert_eq!(ht_dcperiod_lookback(&unstable), 32);
        assert_eq!(ht_phasor_lookback(&unstable), 32);
        assert_eq!(ht_dcphase_lookback(&unstable), 63);
        assert_eq!(ht_sine_lookback(&unstable), 63);
        assert_eq!(ht_trendmode_lookback(&unstable), 63);
        assert_eq!(ht_trendline_lookback(&unstable), 63);

        let unstable = unstable.with(FuncUnstId::HtSine, 10);
        assert_eq!(ht_sine_lookback(&unstable), 73);
        assert_eq!(ht_dcphase_lookback(&unstable), 63);
    }

    #[test]
    fn test_output_lengths() {
        let unstable = UnstablePeriods::new();
        let data = sine_wave(100, 20.0);

        assert_eq!(ht_dcperiod(&data, &unstable).unwrap().len(), 68);
        let phasor = ht_phasor(&data, &unstable).unwrap();
        assert_eq!(phasor.in_phase.len(), 68);
        assert_eq!(phasor.quadrature.len(), 68);
        assert_eq!(ht_dcphase(&data, &unstable).unwrap().len(), 37);
        assert_eq!(ht_sine(&data, &unstable).unwrap().sine.len(), 37);
        assert_eq!(ht_trendmode(&data, &unstable).unwrap().len(), 37);
        assert_eq!(ht_trendline(&data, &unstable).unwrap().len(), 37);
    }

    #[test]
    fn test_short_input_is_empty() {
        let unstable = UnstablePeriods::new();
        let data = sine_wave(63, 20.0);
        assert!(ht_dcphase(&data, &unstable).unwrap().is_empty());
        assert!(ht_trendmode(&data, &unstable).unwrap().is_empty());
        assert_eq!(ht_dcperiod(&data, &unstable).unwrap().len(), 31);
        assert!(ht_dcperiod(&data[..32], &unstable).unwrap().is_empty());
    }

    #[test]
    fn test_dcperiod_detects_cycle_length() {
        let data = sine_wave(400, 20.0);
        let periods = ht_dcperiod(&data, &UnstablePeriods::new()).unwrap();
        assert_relative_eq!(*periods.last().unwrap(), 20.0, epsilon = 1.0);
    }

    #[test]
    fn test_sine_outputs_bounded() {
        let data = sine_wave(200, 15.0);
        let output = ht_sine(&data, &UnstablePeriods::new()).unwrap();
        for (&s, &l) in output.sine.iter().zip(output.lead_sine.iter()) {
            assert!((-1.0..=1.0).contains(&s));
            assert!((-1.0..=1.0).contains(&l));
        }
    }

    #[test]
    fn test_trendmode_values_are_binary() {
        let mut data = sine_wave(150, 20.0);
        data.extend((0..150).map(|i| 100.0 + i as f64));
        let modes = ht_trendmode(&data, &UnstablePeriods::new()).unwrap();
        assert!(modes.iter().all(|&m| m == 0 || m == 1));
        // A steady ramp is far from its cycle average: trend mode.
        assert_eq!(*modes.last().unwrap(), 1);
    }

    #[test]
    fn test_trendline_of_constant() {
        let data = vec![50.0; 120];
        let line = ht_trendline(&data, &UnstablePeriods::new()).unwrap();
        for value in line.iter() {
            assert_relative_eq!(*value, 50.0, epsilon = 1e-9);
        }
    }
}
