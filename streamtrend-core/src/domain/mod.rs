//! Domain types — ticks, candles, and emitted signals.

pub mod candle;
pub mod signal;
pub mod tick;

pub use candle::Candle;
pub use signal::{Signal, SignalKind, SignalOrigin};
pub use tick::Tick;
