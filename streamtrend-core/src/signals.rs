//! Crossover detection between close prices and the Supertrend band.
//!
//! A signal needs two consecutive candles: the previous one on or beyond the
//! band, the current one strictly across it. The strict/non-strict boundary
//! pair makes BUY and SELL mutually exclusive at any index.

use crate::domain::{Candle, Signal, SignalKind, SignalOrigin};

/// Scan a window for band crossings.
///
/// BUY at i when close[i-1] <= band[i-1] and close[i] > band[i].
/// SELL at i when close[i-1] >= band[i-1] and close[i] < band[i].
/// Fewer than two candles, or a candle/band length mismatch, yields no
/// signals.
pub fn generate_signals(candles: &[Candle], band: &[f64]) -> Vec<Signal> {
    if candles.len() != band.len() || candles.len() < 2 {
        return Vec::new();
    }

    let mut signals = Vec::new();
    for i in 1..candles.len() {
        let prev_close = candles[i - 1].close;
        let close = candles[i].close;

        let kind = if prev_close <= band[i - 1] && close > band[i] {
            Some(SignalKind::Buy)
        } else if prev_close >= band[i - 1] && close < band[i] {
            Some(SignalKind::Sell)
        } else {
            None
        };

        if let Some(kind) = kind {
            signals.push(Signal {
                kind,
                origin: SignalOrigin::Supertrend,
                index: i,
                timestamp: candles[i].timestamp,
                price: close,
            });
        }
    }

    signals
}
