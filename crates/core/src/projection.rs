//! Time projection for countdown records.
//!
//! A countdown record stores where a running period began (`started_at`), the
//! value at that moment, and the per-second rate. The displayed value is
//! always recomputed from that fixed anchor, never accumulated tick by tick,
//! so calling [`calculate_current_value`] once a second cannot drift.
//!
//! The remaining helpers are display-only: they decide how many decimals to
//! show and sanitise the text the user types into the value/rate inputs.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Milliseconds per second, used to turn a `chrono::Duration` into
/// fractional seconds.
const MILLIS_PER_SEC: f64 = 1000.0;

/// Floor applied to every projected value.
pub const MIN_DISPLAY_VALUE: f64 = 0.0;

/// Digits with at most one `.`; ASCII digits only.
static DECIMAL_INPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("valid regex"));

// ---------------------------------------------------------------------------
// ProjectionInput
// ---------------------------------------------------------------------------

/// The four fields the projection model reads from a countdown record.
///
/// Implemented by the database row model and by the client's wire type so
/// both sides share one formula.
pub trait ProjectionInput {
    fn start_value(&self) -> f64;
    fn rate_per_second(&self) -> f64;
    fn started_at(&self) -> Timestamp;
    fn is_running(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Compute the displayed value of `record` at instant `now`.
///
/// A paused record is frozen at its `start_value`. A running record loses
/// `rate_per_second` for every elapsed second (fractional seconds count) and
/// is clamped at zero.
pub fn calculate_current_value<R: ProjectionInput + ?Sized>(record: &R, now: Timestamp) -> f64 {
    if !record.is_running() {
        return record.start_value();
    }

    let elapsed_secs = elapsed_seconds(record.started_at(), now);
    let value = record.start_value() - elapsed_secs * record.rate_per_second();

    value.max(MIN_DISPLAY_VALUE)
}

/// [`calculate_current_value`] evaluated at the current wall-clock time.
pub fn current_value<R: ProjectionInput + ?Sized>(record: &R) -> f64 {
    calculate_current_value(record, Utc::now())
}

/// Fractional seconds between `anchor` and `now`.
///
/// Negative when `now` precedes `anchor` (clock skew between client and
/// server).
fn elapsed_seconds(anchor: Timestamp, now: Timestamp) -> f64 {
    (now - anchor).num_milliseconds() as f64 / MILLIS_PER_SEC
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Number of digits after the decimal point in `input`, or 0 without one.
fn decimal_places(input: &str) -> usize {
    input.split('.').nth(1).map_or(0, |frac| frac.chars().count())
}

/// The larger fractional-digit count of the two input strings.
///
/// Used only to choose display precision; never affects the stored numbers.
pub fn get_max_decimal_places(start_value: &str, rate: &str) -> usize {
    decimal_places(start_value).max(decimal_places(rate))
}

/// Fixed-point rendering of `value` with exactly `decimals` fractional digits.
pub fn format_count(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Plain decimal rendering of a stored number for seeding an input field.
///
/// `f64`'s `Display` never switches to exponent notation and drops trailing
/// zeros, which is exactly what an editable field needs. Non-finite values
/// render as `"0"`.
pub fn format_decimal_string(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "0".to_string()
    }
}

/// Whether `input` is an acceptable partially-typed decimal.
///
/// Accepts digits with at most one `.`, including the empty string and a bare
/// `"."`, so users can type freely. Signs and exponents are rejected.
pub fn is_valid_decimal_input(input: &str) -> bool {
    DECIMAL_INPUT_RE.is_match(input)
}

/// Parse an input field, falling back to `0.0` when empty or unparsable.
pub fn parse_decimal_input(input: &str) -> f64 {
    input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
