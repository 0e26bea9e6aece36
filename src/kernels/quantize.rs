//! This module contains the pure, stateless kernels for fixed-precision
//! decimal quantization and its inverse.
//!
//! Quantization scales a decimal by `10^precision` and rounds to the nearest
//! integer (ties away from zero), producing values that survive the trip
//! through an integer-shaped wire format. The precision selection policy —
//! which precision a given value should be quantized at — belongs to the
//! triple encoder, not to this kernel.

//==================================================================================
// 1. Public API
//==================================================================================

/// Quantizes a decimal value to an integer at the given precision.
///
/// The result is returned as `f64` because it travels inside the numeric
/// triple wire format. At precision 18, magnitudes at or above 1.0 exceed the
/// exactly-representable integer range of a double; callers must not rely on
/// exactness outside the fractional domain `0 < |value| < 1` there.
pub fn quantize(value: f64, precision: i32) -> f64 {
    (value * 10f64.powi(precision)).round()
}

/// Quantizes a numeric string at the given precision, or `None` when the
/// string does not parse as a number.
pub fn quantize_str(value: &str, precision: i32) -> Option<f64> {
    let parsed: f64 = value.trim().parse().ok()?;
    Some(quantize(parsed, precision))
}

/// The exact inverse of [`quantize`]: scales the integer back down.
pub fn unquantize(value: f64, precision: i32) -> f64 {
    value / 10f64.powi(precision)
}

/// Rounds a value to a fixed number of decimal places (ties away from zero).
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
