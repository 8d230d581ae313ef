//! Candle — the aggregated market data unit downstream components read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tick::Tick;

/// OHLC candle derived from a single tick.
///
/// Owned by the aggregator until appended to the window; read-only for every
/// component after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub last_price: f64,
}

impl Candle {
    pub fn from_tick(tick: &Tick) -> Self {
        Self {
            timestamp: tick.timestamp,
            open: tick.open,
            high: tick.high,
            low: tick.low,
            close: tick.close,
            last_price: tick.last_price,
        }
    }

    /// Midpoint of the high/low range — the band anchor for Supertrend.
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_candle() -> Candle {
        Candle {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            last_price: 103.5,
        }
    }

    #[test]
    fn candle_from_tick_copies_fields() {
        let tick = Tick {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap(),
            open: 100.0,
            high: 105.0,
            low: 98.0,
            close: 103.0,
            last_price: 103.5,
        };
        let candle = Candle::from_tick(&tick);
        assert_eq!(candle.timestamp, tick.timestamp);
        assert_eq!(candle.open, 100.0);
        assert_eq!(candle.high, 105.0);
        assert_eq!(candle.low, 98.0);
        assert_eq!(candle.close, 103.0);
        assert_eq!(candle.last_price, 103.5);
    }

    #[test]
    fn candle_hl2_is_range_midpoint() {
        assert_eq!(sample_candle().hl2(), 101.5);
    }

    #[test]
    fn candle_serialization_roundtrip() {
        let candle = sample_candle();
        let json = serde_json::to_string(&candle).unwrap();
        let deser: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(candle.timestamp, deser.timestamp);
        assert_eq!(candle.close, deser.close);
        assert_eq!(candle.last_price, deser.last_price);
    }
}
