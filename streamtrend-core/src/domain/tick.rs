//! Tick — the raw market data unit pushed by the transport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single market tick for one instrument.
///
/// Carries the session OHLC as reported by the feed plus the last traded
/// price. The engine derives exactly one candle per tick; there is no
/// intra-period merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tick {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub last_price: f64,
}

impl Tick {
    /// Price fields with their names, in OHLC + last order.
    ///
    /// Used by the aggregator to report which field failed validation.
    pub fn price_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("last_price", self.last_price),
        ]
    }

    /// Basic sanity check: all prices finite and positive, high >= low.
    pub fn is_sane(&self) -> bool {
        self.price_fields()
            .iter()
            .all(|(_, value)| value.is_finite() && *value > 0.0)
            && self.high >= self.low
    }
}
