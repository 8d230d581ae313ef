//! Trend indicators computed over the candle window.
//!
//! Indicator functions are slice-in/series-out: they take the current window
//! and produce a series of identical length, recomputed from scratch each
//! tick. An empty or malformed input yields an empty series — callers treat
//! empty as "not yet computable" rather than an error.

pub mod atr;
pub mod supertrend;

pub use atr::{average_true_range, true_range};
pub use supertrend::{supertrend, supertrend_states, BandState, TrendDirection};

/// Create candles from (high, low, close) triples for testing.
///
/// Timestamps are spaced one second apart; open and last_price track close.
#[cfg(test)]
pub fn make_candles(data: &[(f64, f64, f64)]) -> Vec<crate::domain::Candle> {
    use crate::domain::Candle;
    use chrono::{TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(high, low, close))| Candle {
            timestamp: base + chrono::Duration::seconds(i as i64),
            open: close,
            high,
            low,
            close,
            last_price: close,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
