//! Numeric value generators.

use fixture_core::Value;
use rand::Rng;

/// Generate a random integer in the given range (inclusive).
///
/// Callers validate `min <= max`; an inverted range yields `min`.
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> Value {
    if max <= min {
        return Value::Int(min);
    }
    Value::Int(rng.random_range(min..=max))
}

/// Generate a random float in the given range (inclusive), optionally
/// rounded to `decimals` places.
///
/// Callers validate the range; an empty range or one whose width overflows
/// yields `min`, and rounding that would overflow leaves the value as drawn.
pub fn generate_float_range<R: Rng>(
    rng: &mut R,
    min: f64,
    max: f64,
    decimals: Option<u32>,
) -> Value {
    let value = if max <= min || !(max - min).is_finite() {
        min
    } else {
        rng.random_range(min..=max)
    };
    let value = match decimals.map(|d| 10f64.powi(d.min(i32::MAX as u32) as i32)) {
        Some(scale) if (value * scale).is_finite() => (value * scale).round() / scale,
        _ => value,
    };
    Value::Float(value)
}

/// Generate a boolean that is true with probability `true_weight`.
pub fn generate_weighted_bool<R: Rng>(rng: &mut R, true_weight: f64) -> Value {
    Value::Bool(rng.random_bool(true_weight.clamp(0.0, 1.0)))
}
