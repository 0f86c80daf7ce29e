// ABOUTME: Total conversion of loosely typed score and latency values into finite floats
// ABOUTME: Applied wherever provider or stored data enters arithmetic; never fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! Numeric coercion.
//!
//! Numbers pass through, text is trimmed and parsed, anything else (absent,
//! unparsable, `NaN`, infinite) resolves to the caller's default. Keeping the
//! result finite means every score downstream stays comparable and bounded.

use kaiwa_core::models::ScoreValue;

/// Coerce a value, reporting whether it carried a usable number
///
/// `None` means the value did not contribute a signal.
#[must_use]
pub fn try_coerce(value: Option<&ScoreValue>) -> Option<f64> {
    let number = match value? {
        ScoreValue::Number(n) => *n,
        ScoreValue::Text(text) => text.trim().parse::<f64>().ok()?,
    };
    number.is_finite().then_some(number)
}

/// Coerce a value, falling back to `default`
#[must_use]
pub fn coerce(value: Option<&ScoreValue>, default: f64) -> f64 {
    try_coerce(value).unwrap_or(default)
}

/// Coerce a value and clamp it into `[min, max]`
#[must_use]
pub fn coerce_clamped(value: Option<&ScoreValue>, default: f64, min: f64, max: f64) -> f64 {
    coerce(value, default).clamp(min, max)
}
