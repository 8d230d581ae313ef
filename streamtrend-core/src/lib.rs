//! StreamTrend Core — streaming tick-to-signal engine.
//!
//! One tick in, one candle appended to a bounded window, trend indicators
//! recomputed over the window, discrete trade signals out:
//! - Domain types (ticks, candles, signals)
//! - Candle aggregation with stale-input rejection and FIFO eviction
//! - True Range / ATR / Supertrend over the candle window
//! - Band-crossover signal generation
//! - SMA-crossover stance machine (independent of the band path)
//! - Per-instrument engine with a single feed-event dispatch point
//!
//! The engine processes one instrument's stream; tracking several
//! instruments means one engine instance per instrument, each driven from
//! its own feed callback.

pub mod aggregator;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod signals;
pub mod sink;
pub mod stance;
pub mod window;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engine state and domain types are Send.
    ///
    /// One engine per instrument on its own feed thread is the supported
    /// concurrency model; a non-Send engine would break it the moment a
    /// second instrument is tracked.
    #[allow(dead_code)]
    fn assert_send() {
        fn require_send<T: Send>() {}

        // Domain types
        require_send::<domain::Tick>();
        require_send::<domain::Candle>();
        require_send::<domain::Signal>();

        // Engine state
        require_send::<window::CandleWindow>();
        require_send::<aggregator::CandleAggregator>();
        require_send::<stance::StanceTracker>();
        require_send::<engine::EngineConfig>();
        require_send::<engine::FeedEvent>();

        // Engines over the shipped sinks
        require_send::<engine::Engine<sink::NullSink>>();
        require_send::<engine::Engine<sink::ChannelSink>>();
        require_send::<engine::Engine<sink::VecSink>>();
    }
}
