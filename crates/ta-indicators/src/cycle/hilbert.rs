//! Hilbert-transform machinery shared by MAMA and the HT_* cycle indicators.
//!
//! Every bar runs the same pipeline:
//!
//! 1. a 4-bar WMA smooths the price,
//! 2. a Hilbert FIR cascade derives the detrended in-phase (I1) and quadrature
//!    (Q1) components, with separate filter banks for even and odd bars,
//! 3. the homodyne discriminator turns I2/Q2 into a dominant-cycle period,
//!    clamped to a 0.67x..1.5x change per bar and to the 6..50 range.

use ta_core::{num::TaFloat, window::RingBuffer};

/// Hilbert FIR coefficient applied to the newest input.
const HILBERT_A: f64 = 0.0962;
/// Hilbert FIR coefficient applied to the input two bars back.
const HILBERT_B: f64 = 0.5769;

/// Size of the smoothed-price history kept by the phase-based indicators.
pub(crate) const SMOOTH_PRICE_SIZE: usize = 50;

/// Degrees per radian.
pub(crate) fn rad_to_deg<T: TaFloat>() -> T {
    T::from_f64_lossy(45.0) / T::ONE.atan()
}

/// Radians per degree.
pub(crate) fn deg_to_rad<T: TaFloat>() -> T {
    T::ONE / rad_to_deg::<T>()
}

/// Outputs of one pipeline step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HilbertBar<T> {
    /// WMA-smoothed price of the bar.
    pub smoothed: T,
    /// In-phase component three bars back.
    pub in_phase: T,
    /// Quadrature component.
    pub quadrature: T,
}

/// 4-bar weighted moving average (weights 1, 2, 3, 4) of the raw price.
#[derive(Debug)]
struct PriceSmoother<'a, T> {
    input: &'a [T],
    period_sub: T,
    period_sum: T,
    trailing_value: T,
    trailing: usize,
}

impl<'a, T: TaFloat> PriceSmoother<'a, T> {
    /// Prime the smoother with the first three samples.
    fn new(input: &'a [T]) -> Self {
        let mut period_sub = T::ZERO;
        let mut period_sum = T::ZERO;
        for (weight, &value) in input[..3].iter().enumerate() {
            period_sub = period_sub + value;
            period_sum = period_sum + value * <T as TaFloat>::from_usize(weight + 1);
        }
        Self {
            input,
            period_sub,
            period_sum,
            trailing_value: T::ZERO,
            trailing: 0,
        }
    }

    fn next(&mut self, price: T) -> T {
        self.period_sub = self.period_sub + price;
        self.period_sub = self.period_sub - self.trailing_value;
        self.period_sum = self.period_sum + price * T::from_f64_lossy(4.0);
        self.trailing_value = self.input[self.trailing];
        self.trailing += 1;
        let smoothed = self.period_sum * T::from_f64_lossy(0.1);
        self.period_sum = self.period_sum - self.period_sub;
        smoothed
    }
}

/// One Hilbert FIR filter bank (either the even or the odd one).
#[derive(Debug, Clone, Copy)]
struct FilterBank<T> {
    taps: [T; 3],
    prev: T,
    prev_input: T,
}

impl<T: TaFloat> FilterBank<T> {
    fn new() -> Self {
        Self {
            taps: [T::ZERO; 3],
            prev: T::ZERO,
            prev_input: T::ZERO,
        }
    }

    fn transform(&mut self, input: T, tap: usize, adjusted_period: T) -> T {
        let scaled = T::from_f64_lossy(HILBERT_A) * input;
        let mut value = -self.taps[tap];
        self.taps[tap] = scaled;
        value = value + scaled;
        value = value - self.prev;
        self.prev = T::from_f64_lossy(HILBERT_B) * self.prev_input;
        value = value + self.prev;
        self.prev_input = input;
        value * adjusted_period
    }
}

/// Even and odd filter banks of one transformed quantity.
#[derive(Debug, Clone, Copy)]
struct Transform<T> {
    even: FilterBank<T>,
    odd: FilterBank<T>,
}

impl<T: TaFloat> Transform<T> {
    fn new() -> Self {
        Self {
            even: FilterBank::new(),
            odd: FilterBank::new(),
        }
    }

    fn bank(&mut self, even: bool) -> &mut FilterBank<T> {
        if even {
            &mut self.even
        } else {
            &mut self.odd
        }
    }
}

/// Running state of the dominant-cycle pipeline over one input slice.
#[derive(Debug)]
pub(crate) struct HilbertCycle<'a, T> {
    input: &'a [T],
    smoother: PriceSmoother<'a, T>,
    detrender: Transform<T>,
    q1: Transform<T>,
    ji: Transform<T>,
    jq: Transform<T>,
    tap: usize,
    i1_even_prev2: T,
    i1_even_prev3: T,
    i1_odd_prev2: T,
    i1_odd_prev3: T,
    prev_i2: T,
    prev_q2: T,
    re: T,
    im: T,
    period: T,
    rad_to_deg: T,
}

impl<'a, T: TaFloat> HilbertCycle<'a, T> {
    /// Prime the smoother with three samples plus `warmup` more.
    ///
    /// Returns the pipeline and the index of the first bar to [`step`](Self::step).
    /// The input must hold more than `3 + warmup` samples.
    pub(crate) fn new(input: &'a [T], warmup: usize) -> (Self, usize) {
        let mut smoother = PriceSmoother::new(input);
        let mut today = 3;
        for _ in 0..warmup {
            smoother.next(input[today]);
            today += 1;
        }

        let cycle = Self {
            input,
            smoother,
            detrender: Transform::new(),
            q1: Transform::new(),
            ji: Transform::new(),
            jq: Transform::new(),
            tap: 0,
            i1_even_prev2: T::ZERO,
            i1_even_prev3: T::ZERO,
            i1_odd_prev2: T::ZERO,
            i1_odd_prev3: T::ZERO,
            prev_i2: T::ZERO,
            prev_q2: T::ZERO,
            re: T::ZERO,
            im: T::ZERO,
            period: T::ZERO,
            rad_to_deg: rad_to_deg(),
        };
        (cycle, today)
    }

    /// Current dominant-cycle period estimate.
    pub(crate) fn period(&self) -> T {
        self.period
    }

    /// Run the pipeline for bar `today` and update the period estimate.
    pub(crate) fn step(&mut self, today: usize) -> HilbertBar<T> {
        let point_two = T::from_f64_lossy(0.2);
        let point_eight = T::from_f64_lossy(0.8);
        let adjusted = T::from_f64_lossy(0.075) * self.period + T::from_f64_lossy(0.54);

        let smoothed = self.smoother.next(self.input[today]);
        let even = today % 2 == 0;
        let tap = self.tap;
        let i1_prev3 = if even {
            self.i1_even_prev3
        } else {
            self.i1_odd_prev3
        };

        let detrender = self.detrender.bank(even).transform(smoothed, tap, adjusted);
        let q1 = self.q1.bank(even).transform(detrender, tap, adjusted);
        let ji = self.ji.bank(even).transform(i1_prev3, tap, adjusted);
        let jq = self.jq.bank(even).transform(q1, tap, adjusted);

        if even {
            self.tap = (self.tap + 1) % 3;
            self.i1_odd_prev3 = self.i1_odd_prev2;
            self.i1_odd_prev2 = detrender;
        } else {
            self.i1_even_prev3 = self.i1_even_prev2;
            self.i1_even_prev2 = detrender;
        }

        let q2 = point_two * (q1 + ji) + point_eight * self.prev_q2;
        let i2 = point_two * (i1_prev3 - jq) + point_eight * self.prev_i2;

        self.re = point_two * (i2 * self.prev_i2 + q2 * self.prev_q2) + point_eight * self.re;
        self.im = point_two * (i2 * self.prev_q2 - q2 * self.prev_i2) + point_eight * self.im;
        self.prev_q2 = q2;
        self.prev_i2 = i2;

        let previous = self.period;
        if self.im != T::ZERO && self.re != T::ZERO {
            self.period = T::from_f64_lossy(360.0) / ((self.im / self.re).atan() * self.rad_to_deg);
        }
        let upper = T::from_f64_lossy(1.5) * previous;
        if self.period > upper {
            self.period = upper;
        }
        let lower = T::from_f64_lossy(0.67) * previous;
        if self.period < lower {
            self.period = lower;
        }
        if self.period < T::from_f64_lossy(6.0) {
            self.period = T::from_f64_lossy(6.0);
        } else if self.period > T::from_f64_lossy(50.0) {
            self.period = T::from_f64_lossy(50.0);
        }
        self.period = point_two * self.period + point_eight * previous;

        HilbertBar {
            smoothed,
            in_phase: i1_prev3,
            quadrature: q1,
        }
    }
}

/// Smoothed dominant-cycle period: `0.33 * period + 0.67 * previous`.
pub(crate) fn smooth_period<T: TaFloat>(period: T, previous: T) -> T {
    T::from_f64_lossy(0.33) * period + T::from_f64_lossy(0.67) * previous
}

/// Whole bars in the smoothed period, rounded half up.
pub(crate) fn whole_period<T: TaFloat>(smooth_period: T) -> usize {
    (smooth_period + T::from_f64_lossy(0.5)).to_usize().unwrap_or(0)
}

/// Dominant-cycle phase in degrees, from a DFT of the smoothed price over one
/// dominant cycle.
///
/// `previous` is returned adjusted when the imaginary part vanishes.
pub(crate) fn dominant_cycle_phase<T: TaFloat>(
    smooth_price: &RingBuffer<T>,
    smooth_period: T,
    previous: T,
) -> T {
    let dc_period = whole_period(smooth_period);
    let two_pi = T::ONE.atan() * T::from_f64_lossy(8.0);
    let mut real_part = T::ZERO;
    let mut imag_part = T::ZERO;
    if dc_period > 0 {
        let divisor = <T as TaFloat>::from_usize(dc_period);
        for (i, &price) in smooth_price.iter_newest_first().take(dc_period).enumerate() {
            let angle = (<T as TaFloat>::from_usize(i) * two_pi) / divisor;
            real_part = real_part + angle.sin() * price;
            imag_part = imag_part + angle.cos() * price;
        }
    }

    let ninety = T::from_f64_lossy(90.0);
    let mut phase = previous;
    let abs_imag = imag_part.abs();
    if abs_imag > T::ZERO {
        phase = (real_part / imag_part).atan() * rad_to_deg::<T>();
    } else if abs_imag <= T::from_f64_lossy(0.01) {
        if real_part < T::ZERO {
            phase = phase - ninety;
        } else if real_part > T::ZERO {
            phase = phase + ninety;
        }
    }
    phase = phase + ninety;
    phase = phase + T::from_f64_lossy(360.0) / smooth_period;
    if imag_part < T::ZERO {
        phase = phase + T::from_f64_lossy(180.0);
    }
    if phase > T::from_f64_lossy(315.0) {
        phase = phase - T::from_f64_lossy(360.0);
    }
    phase
}

/// Simple average of the raw price over the last whole dominant cycle,
/// ending at `today`.
pub(crate) fn cycle_average<T: TaFloat>(input: &[T], today: usize, smooth_period: T) -> T {
    let count = whole_period(smooth_period).min(today + 1);
    if count == 0 {
        return T::ZERO;
    }
    let mut total = T::ZERO;
    for &value in input[today + 1 - count..=today].iter().rev() {
        total = total + value;
    }
    total / <T as TaFloat>::from_usize(count)
}

/// Trendline blend of the current and three previous cycle averages.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Trendline<T> {
    history: [T; 3],
}

impl<T: TaFloat> Trendline<T> {
    pub(crate) fn new() -> Self {
        Self {
            history: [T::ZERO; 3],
        }
    }

    /// `(4 * avg + 3 * avg[-1] + 2 * avg[-2] + avg[-3]) / 10`
    pub(crate) fn next(&mut self, average: T) -> T {
        let [t1, t2, t3] = self.history;
        let value = (T::from_f64_lossy(4.0) * average
            + T::from_f64_lossy(3.0) * t1
            + T::TWO * t2
            + t3)
            / T::from_f64_lossy(10.0);
        self.history = [average, t1, t2];
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_constants() {
        assert_relative_eq!(rad_to_deg::<f64>(), 180.0 / core::f64::consts::PI, epsilon = 1e-12);
        assert_relative_eq!(deg_to_rad::<f64>() * 180.0, core::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_price_smoother_weights() {
        let input = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut smoother = PriceSmoother::new(&input);
        // (1*1 + 2*2 + 3*3 + 4*4) / 10
        assert_relative_eq!(smoother.next(4.0), 3.0, epsilon = 1e-12);
        // (1*2 + 2*3 + 3*4 + 4*5) / 10
        assert_relative_eq!(smoother.next(5.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_period_tracks_pure_sine() {
        let input: Vec<f64> = (0..300)
            .map(|i| 100.0 + 5.0 * (2.0 * core::f64::consts::PI * i as f64 / 20.0).sin())
            .collect();
        let (mut cycle, mut today) = HilbertCycle::new(&input, 9);
        while today < input.len() {
            cycle.step(today);
            if today > 40 {
                assert!(cycle.period() >= 6.0 && cycle.period() <= 50.0);
            }
            today += 1;
        }
        assert_relative_eq!(cycle.period(), 20.0, epsilon = 0.5);
    }

    #[test]
    fn test_trendline_blend() {
        let mut trendline = Trendline::new();
        assert_relative_eq!(trendline.next(10.0), 4.0);
        assert_relative_eq!(trendline.next(10.0), 7.0);
        assert_relative_eq!(trendline.next(10.0), 9.0);
        assert_relative_eq!(trendline.next(10.0), 10.0);
    }

    #[test]
    fn test_cycle_average() {
        let input = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        // Smoothed period 2.6 rounds to 3 bars: (4 + 5 + 6) / 3
        assert_relative_eq!(cycle_average(&input, 5, 2.6), 5.0);
        // Never reaches before the first sample
        assert_relative_eq!(cycle_average(&input, 1, 10.0), 1.5);
    }
}
