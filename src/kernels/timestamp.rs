//! This module contains the pure, stateless kernel for cyclical timestamp
//! encoding and decoding.
//!
//! Millisecond-epoch timestamps are split into a day count and a time-of-day
//! angle represented as (sin, cos), so that nearby times of day are nearby in
//! the encoded space even across midnight. The inverse recovers milliseconds
//! via `atan2`; the round trip is exact up to floating-point trigonometric
//! precision (about 1e-9 relative), not to integer milliseconds.

use chrono::{DateTime, Utc};
use std::f64::consts::TAU;

/// Milliseconds per day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

// The millisecond-epoch heuristic window: [2001-09-09, 2033-05-18).
const MS_EPOCH_MIN: f64 = 1e12;
const MS_EPOCH_MAX: f64 = 2e12;

//==================================================================================
// 1. Public API
//==================================================================================

/// Returns `true` when a field value is likely a millisecond-epoch timestamp:
/// numeric, within `[1e12, 2e12)`, and mapping to a valid UTC date.
///
/// The key is accepted for contract symmetry with the encoder but does not
/// gate the decision; the value range alone identifies timestamps.
pub fn is_timestamp(_key: &str, value: f64) -> bool {
    if !value.is_finite() || value < MS_EPOCH_MIN || value >= MS_EPOCH_MAX {
        return false;
    }
    DateTime::<Utc>::from_timestamp_millis(value as i64).is_some()
}

/// Encodes a millisecond-epoch timestamp as `(day, sin, cos)`.
pub fn encode_timestamp(ms: f64) -> (f64, f64, f64) {
    let day = (ms / MS_PER_DAY).floor();
    let frac = (ms - day * MS_PER_DAY) / MS_PER_DAY;
    let angle = TAU * frac;
    (day, angle.sin(), angle.cos())
}

/// Decodes a `(day, sin, cos)` triple back to epoch milliseconds.
pub fn decode_timestamp(day: f64, sin: f64, cos: f64) -> f64 {
    let mut angle = sin.atan2(cos);
    if angle < 0.0 {
        angle += TAU;
    }
    let frac = angle / TAU;
    (day + frac) * MS_PER_DAY
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
