//! Tick-to-candle aggregation with stale-input rejection.

use chrono::{DateTime, Utc};

use crate::domain::{Candle, Tick};
use crate::window::CandleWindow;

#[derive(Debug, thiserror::Error)]
pub enum TickError {
    #[error("stale tick: timestamp {got} is earlier than last candle at {last}")]
    StaleTimestamp {
        last: DateTime<Utc>,
        got: DateTime<Utc>,
    },

    #[error("invalid {field} price: {value}")]
    InvalidPrice { field: &'static str, value: f64 },

    #[error("inverted range: high {high} below low {low}")]
    InvalidRange { high: f64, low: f64 },
}

/// Converts ticks into candles and maintains the bounded window.
///
/// `append` either pushes one candle (evicting the oldest past capacity) and
/// returns the refreshed window, or rejects the tick without touching any
/// state. Ticks with a timestamp equal to the window tail are accepted; only
/// strictly earlier timestamps count as stale.
#[derive(Debug)]
pub struct CandleAggregator {
    window: CandleWindow,
}

impl CandleAggregator {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: CandleWindow::new(capacity),
        }
    }

    pub fn append(&mut self, tick: &Tick) -> Result<&[Candle], TickError> {
        self.validate(tick)?;
        self.window.push(Candle::from_tick(tick));
        Ok(self.window.as_slice())
    }

    fn validate(&self, tick: &Tick) -> Result<(), TickError> {
        for (field, value) in tick.price_fields() {
            if !value.is_finite() || value <= 0.0 {
                return Err(TickError::InvalidPrice { field, value });
            }
        }
        if tick.high < tick.low {
            return Err(TickError::InvalidRange {
                high: tick.high,
                low: tick.low,
            });
        }
        if let Some(last) = self.window.last() {
            if tick.timestamp < last.timestamp {
                return Err(TickError::StaleTimestamp {
                    last: last.timestamp,
                    got: tick.timestamp,
                });
            }
        }
        Ok(())
    }

    pub fn window(&self) -> &CandleWindow {
        &self.window
    }

    /// The current window, oldest first.
    pub fn candles(&self) -> &[Candle] {
        self.window.as_slice()
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tick(seq: i64, close: f64) -> Tick {
        Tick {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap()
                + chrono::Duration::seconds(seq),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            last_price: close,
        }
    }

    #[test]
    fn append_builds_window_in_order() {
        let mut agg = CandleAggregator::new(5);
        agg.append(&tick(0, 100.0)).unwrap();
        agg.append(&tick(1, 101.0)).unwrap();
        let candles = agg.append(&tick(2, 102.0)).unwrap();
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![100.0, 101.0, 102.0]);
    }

    #[test]
    fn append_evicts_past_capacity() {
        let mut agg = CandleAggregator::new(2);
        agg.append(&tick(0, 100.0)).unwrap();
        agg.append(&tick(1, 101.0)).unwrap();
        let candles = agg.append(&tick(2, 102.0)).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 101.0);
    }

    #[test]
    fn rejects_stale_timestamp_without_mutating() {
        let mut agg = CandleAggregator::new(5);
        agg.append(&tick(10, 100.0)).unwrap();

        let err = agg.append(&tick(5, 101.0)).unwrap_err();
        assert!(matches!(err, TickError::StaleTimestamp { .. }));
        assert_eq!(agg.candles().len(), 1);
        assert_eq!(agg.candles()[0].close, 100.0);
    }

    #[test]
    fn accepts_equal_timestamp() {
        let mut agg = CandleAggregator::new(5);
        agg.append(&tick(10, 100.0)).unwrap();
        agg.append(&tick(10, 101.0)).unwrap();
        assert_eq!(agg.candles().len(), 2);
    }

    #[test]
    fn rejects_nan_price() {
        let mut agg = CandleAggregator::new(5);
        let mut bad = tick(0, 100.0);
        bad.close = f64::NAN;
        let err = agg.append(&bad).unwrap_err();
        assert!(matches!(
            err,
            TickError::InvalidPrice { field: "close", .. }
        ));
        assert!(agg.candles().is_empty());
    }

    #[test]
    fn rejects_negative_price() {
        let mut agg = CandleAggregator::new(5);
        let mut bad = tick(0, 100.0);
        bad.last_price = -2.5;
        let err = agg.append(&bad).unwrap_err();
        assert!(matches!(
            err,
            TickError::InvalidPrice {
                field: "last_price",
                ..
            }
        ));
    }

    #[test]
    fn rejects_inverted_range() {
        let mut agg = CandleAggregator::new(5);
        let mut bad = tick(0, 100.0);
        bad.high = bad.low - 1.0;
        let err = agg.append(&bad).unwrap_err();
        assert!(matches!(err, TickError::InvalidRange { .. }));
    }
}
