//! Floating point helpers for scale alignment.
//!
//! Every comparison is made relative to an interval size so that values
//! produced by repeated step additions still land on the expected tick.

const EPS: f64 = 1.0e-6;
/// Relative tolerance for floating point rounding noise.
const NOISE_EPS: f64 = 1.0e-12;

/// Compares two values with a tolerance of `1e-6 * interval_size`.
///
/// Returns `-1` when `value1` is clearly below `value2`, `1` when clearly
/// above and `0` when both are considered equal.
#[must_use]
pub fn fuzzy_compare(value1: f64, value2: f64, interval_size: f64) -> i32 {
    let eps = (EPS * interval_size).abs();
    if value2 - value1 > eps {
        -1
    } else if value1 - value2 > eps {
        1
    } else {
        0
    }
}

/// Whether `value1` and `value2` differ only by rounding noise relative to
/// `magnitude`.
#[must_use]
pub fn is_rounding_noise(value1: f64, value2: f64, magnitude: f64) -> bool {
    (value1 - value2).abs() <= (NOISE_EPS * magnitude).abs()
}

/// Rounds `value` up to a multiple of `interval_size`, ignoring tiny overshoots.
#[must_use]
pub fn ceil_eps(value: f64, interval_size: f64) -> f64 {
    let eps = EPS * interval_size;
    let steps = (value - eps) / interval_size;
    steps.ceil() * interval_size
}

/// Rounds `value` down to a multiple of `interval_size`, ignoring tiny undershoots.
#[must_use]
pub fn floor_eps(value: f64, interval_size: f64) -> f64 {
    let eps = EPS * interval_size;
    let steps = (value + eps) / interval_size;
    steps.floor() * interval_size
}

/// Divides an interval into steps, shrinking it slightly first.
#[must_use]
pub fn divide_eps(interval_size: f64, num_steps: f64) -> f64 {
    if num_steps == 0.0 || interval_size == 0.0 {
        return 0.0;
    }
    (interval_size - EPS * interval_size) / num_steps
}

/// Smallest step of the pattern `{1, 2, 5} * base^n` (for base 10) that
/// splits `interval_size` into at most `num_steps` steps.
#[must_use]
pub fn divide_interval(interval_size: f64, num_steps: usize, base: u32) -> f64 {
    if num_steps == 0 {
        return 0.0;
    }

    let raw = divide_eps(interval_size, num_steps as f64);
    if raw == 0.0 || !raw.is_finite() {
        return 0.0;
    }

    let base_f = f64::from(base);
    let lx = raw.abs().ln() / base_f.ln();
    let p = lx.floor();
    let fraction = base_f.powf(lx - p);

    // Integer halving: for base 10 the candidates are 10, 5, 2 and 1.
    let mut n = base;
    while n > 1 && fraction <= f64::from(n / 2) {
        n /= 2;
    }

    let step = f64::from(n) * base_f.powf(p);
    if raw < 0.0 { -step } else { step }
}
