//! Common test utilities for the engine tests.
//!
//! Float comparison, synthetic data generation and request builders.

use ta_engine::prelude::*;

/// Float comparison: absolute near zero, relative elsewhere. NaN only
/// matches NaN.
pub fn assert_float_eq(actual: f64, expected: f64, epsilon: f64, context: &str) {
    if expected.is_nan() {
        assert!(
            actual.is_nan(),
            "{}: Expected NaN but got {}",
            context,
            actual
        );
        return;
    }

    if actual.is_nan() {
        panic!("{}: Got NaN but expected {}", context, expected);
    }

    if expected.is_infinite() {
        assert!(
            actual.is_infinite() && actual.signum() == expected.signum(),
            "{}: Expected {} but got {}",
            context,
            expected,
            actual
        );
        return;
    }

    let abs_expected = expected.abs();

    // For values very close to zero, use absolute comparison
    if abs_expected < 1e-10 {
        let diff = (actual - expected).abs();
        assert!(
            diff < epsilon,
            "{}: Expected {} but got {} (diff: {})",
            context,
            expected,
            actual,
            diff
        );
        return;
    }

    // For other values, use relative comparison
    let rel_diff = ((actual - expected) / expected).abs();
    assert!(
        rel_diff < epsilon,
        "{}: Expected {} but got {} (rel diff: {:.2e})",
        context,
        expected,
        actual,
        rel_diff
    );
}

/// Assert two series are equal with tolerance.
pub fn assert_series_eq(actual: &[f64], expected: &[f64], epsilon: f64, name: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: Length mismatch: {} vs {}",
        name,
        actual.len(),
        expected.len()
    );

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let context = format!("{}[{}]", name, i);
        assert_float_eq(a, e, epsilon, &context);
    }
}

// ============================================================================
// Synthetic Data Generators
// ============================================================================

/// Generate random walk price series with deterministic seed.
pub fn generate_random_walk(start: f64, volatility: f64, len: usize, seed: u64) -> Vec<f64> {
    // Simple LCG for deterministic random numbers
    let mut rng_state = seed;
    let lcg_next = |state: &mut u64| -> f64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        // Convert to [-1, 1]
        (*state as f64 / u64::MAX as f64) * 2.0 - 1.0
    };

    let mut prices = Vec::with_capacity(len);
    prices.push(start);

    for _ in 1..len {
        let change = lcg_next(&mut rng_state) * volatility;
        let last = *prices.last().unwrap();
        prices.push((last + change).max(0.01)); // Ensure positive price
    }

    prices
}

/// Generate OHLCV data from close prices.
pub fn generate_ohlcv_from_close(close: &[f64], range_pct: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
    let len = close.len();
    let mut open = Vec::with_capacity(len);
    let mut high = Vec::with_capacity(len);
    let mut low = Vec::with_capacity(len);
    let mut volume = Vec::with_capacity(len);

    for (i, &c) in close.iter().enumerate() {
        let range = c * range_pct;
        let o = if i == 0 { c } else { close[i - 1] };
        let h = c.max(o) + range * 0.5;
        let l = c.min(o) - range * 0.5;
        let v = 1000.0 + (i as f64 * 100.0);

        open.push(o);
        high.push(h);
        low.push(l);
        volume.push(v);
    }

    (open, high, low, close.to_vec(), volume)
}

// ============================================================================
// Requests
// ============================================================================

/// Deterministic bar data for engine calls.
pub fn sample_bars(len: usize, seed: u64) -> OhlcvSeries<f64> {
    let mut close = generate_random_walk(100.0, 1.5, len, seed);
    close.truncate(len);
    let (open, high, low, close, volume) = generate_ohlcv_from_close(&close, 0.02);
    // The generated columns always share one length.
    OhlcvSeries::from_series(
        open.into(),
        high.into(),
        low.into(),
        close.into(),
        volume.into(),
    )
    .unwrap()
}

/// A request for `name` with every price field and real slot filled from
/// `bars`, and no parameters.
pub fn full_request(name: &str, bars: &OhlcvSeries<f64>) -> CallRequest {
    CallRequest::new(name)
        .prices(bars)
        .input("inReal", bars.close().as_slice())
        .input("inReal0", bars.close().as_slice())
        .input("inReal1", bars.open().as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_float_eq_normal() {
        assert_float_eq(1.0, 1.0, 1e-10, "test");
        assert_float_eq(100.0, 100.0000001, 1e-6, "test");
    }

    #[test]
    fn test_assert_float_eq_nan() {
        assert_float_eq(f64::NAN, f64::NAN, 1e-10, "test");
    }

    #[test]
    #[should_panic]
    fn test_assert_float_eq_nan_mismatch() {
        assert_float_eq(1.0, f64::NAN, 1e-10, "test");
    }

    #[test]
    fn test_sample_bars_are_consistent() {
        let bars = sample_bars(50, 7);
        assert_eq!(bars.len(), 50);
        assert!(bars.iter().all(|bar| bar.is_valid()));
    }

    #[test]
    fn test_generate_random_walk_deterministic() {
        let data1 = generate_random_walk(100.0, 1.0, 10, 12345);
        let data2 = generate_random_walk(100.0, 1.0, 10, 12345);
        assert_eq!(data1, data2);
    }
}
