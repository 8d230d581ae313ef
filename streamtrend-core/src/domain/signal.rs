//! Signal — immutable trade events emitted by the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade side of an emitted signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    Buy,
    Sell,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
        }
    }
}

/// Which of the two independent rule paths produced a signal.
///
/// The band-crossover path and the SMA stance path are computed from the same
/// tick stream but never reconciled; consumers gate on whichever they trust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalOrigin {
    Supertrend,
    SmaCross,
}

/// An immutable trade event. Emitted once, never retained by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub origin: SignalOrigin,
    /// Index of the triggering candle within the window at emission time.
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}
