//! Numeric value generators.

use fsi_core::GeneratedValue;
use rand::Rng;

/// Random integer in the given range (inclusive).
pub fn int_range<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> GeneratedValue {
    if min >= max {
        return GeneratedValue::Int64(min);
    }
    GeneratedValue::Int64(rng.random_range(min..=max))
}

/// Random float in the given range (inclusive).
pub fn float_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Random money amount in the given range, rounded to cents.
pub fn money_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> GeneratedValue {
    GeneratedValue::money(float_range(rng, min, max))
}

/// Random rate in the given range with `scale` fractional digits.
pub fn rate_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, scale: u32) -> GeneratedValue {
    GeneratedValue::decimal(float_range(rng, min, max), scale)
}

/// Normally distributed sample clamped to `[min, max]` (Box-Muller).
pub fn normal_clamped<R: Rng + ?Sized>(
    rng: &mut R,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
) -> f64 {
    // random::<f64>() is in [0, 1); shift to (0, 1] so ln() stays finite
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    (mean + z * std_dev).clamp(min, max)
}

/// Log-uniform sample in `[min, max]`, for skewed magnitudes such as revenue.
pub fn log_uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min <= 0.0 || min >= max {
        return min;
    }
    float_range(rng, min.ln(), max.ln()).exp().clamp(min, max)
}

/// Round to the nearest multiple of `step`.
pub fn round_to(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}
