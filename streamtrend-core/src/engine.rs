//! Per-instrument engine — owns every piece of mutable state and exposes a
//! single dispatch point for feed events.
//!
//! Pipeline per tick: validate/append -> True Range -> ATR -> Supertrend ->
//! crossover check on the newest candle -> stance update -> sink. The whole
//! pipeline is synchronous and O(window) with no I/O; signal delivery is the
//! sink's problem and must not block.
//!
//! One instrument per instance. Running several instruments means several
//! engines, each fed from its own transport callback; instances share no
//! mutable state.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregator::{CandleAggregator, TickError};
use crate::domain::{Candle, Signal, SignalOrigin, Tick};
use crate::indicators::{average_true_range, supertrend_states, true_range, TrendDirection};
use crate::signals::generate_signals;
use crate::sink::SignalSink;
use crate::stance::{Stance, StanceTracker};

/// Engine tuning parameters. Injected at construction, never global.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Candle window capacity (W).
    pub window_capacity: usize,
    /// ATR averaging period (P).
    pub atr_period: usize,
    /// Supertrend band multiplier (M).
    pub multiplier: f64,
    /// Stance SMA period (S).
    pub sma_period: usize,
}

impl Default for EngineConfig {
    /// The common intraday Supertrend setup: 7-period ATR with a 3x band,
    /// 10-candle window and a 10-period SMA.
    fn default() -> Self {
        Self {
            window_capacity: 10,
            atr_period: 7,
            multiplier: 3.0,
            sma_period: 10,
        }
    }
}

/// Feed lifecycle events. Everything the transport reports funnels through
/// [`Engine::on_event`]; the transport itself (subscriptions, backoff,
/// reconnects) lives entirely outside the core.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Tick(Tick),
    Connected,
    Disconnected { code: i32, reason: String },
    Reconnecting { attempt: u32, delay: Duration },
    ReconnectsExhausted { attempts: u32 },
}

/// Indicator state observed right after a tick was absorbed.
///
/// Band, direction and SMA are `None` until enough history exists.
#[derive(Debug, Clone, Copy)]
pub struct TickSnapshot {
    pub window_len: usize,
    pub band: Option<f64>,
    pub direction: Option<TrendDirection>,
    pub sma: Option<f64>,
    pub stance: Stance,
}

/// Streaming engine for a single instrument.
pub struct Engine<S: SignalSink> {
    config: EngineConfig,
    aggregator: CandleAggregator,
    tracker: StanceTracker,
    sink: S,
    ticks_accepted: u64,
    ticks_rejected: u64,
    signals_emitted: u64,
}

impl<S: SignalSink> Engine<S> {
    pub fn new(config: EngineConfig, sink: S) -> Self {
        assert!(config.window_capacity >= 1, "window capacity must be >= 1");
        assert!(config.atr_period >= 1, "ATR period must be >= 1");
        assert!(config.multiplier > 0.0, "multiplier must be > 0");
        assert!(config.sma_period >= 1, "SMA period must be >= 1");

        let aggregator = CandleAggregator::new(config.window_capacity);
        let tracker = StanceTracker::new(config.sma_period);
        Self {
            config,
            aggregator,
            tracker,
            sink,
            ticks_accepted: 0,
            ticks_rejected: 0,
            signals_emitted: 0,
        }
    }

    /// Single dispatch point for the transport.
    ///
    /// Lifecycle events are logged and leave indicator state untouched: a
    /// timestamp gap after a reconnect continues the same window. Only an
    /// explicit [`reset`](Self::reset) starts over.
    pub fn on_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Tick(tick) => {
                if let Err(e) = self.on_tick(tick) {
                    warn!(error = %e, "tick rejected");
                }
            }
            FeedEvent::Connected => info!("feed connected"),
            FeedEvent::Disconnected { code, reason } => {
                warn!(code, %reason, "feed closed");
            }
            FeedEvent::Reconnecting { attempt, delay } => {
                info!(attempt, ?delay, "feed reconnecting");
            }
            FeedEvent::ReconnectsExhausted { attempts } => {
                warn!(attempts, "feed gave up reconnecting");
            }
        }
    }

    /// Absorb one tick: append a candle, recompute indicators over the
    /// window, emit any signal fired by the newest candle, advance the
    /// stance. Rejected ticks leave all state unchanged.
    pub fn on_tick(&mut self, tick: Tick) -> Result<TickSnapshot, TickError> {
        let timestamp = tick.timestamp;
        let last_price = tick.last_price;

        let candles = match self.aggregator.append(&tick) {
            Ok(candles) => candles,
            Err(e) => {
                self.ticks_rejected += 1;
                return Err(e);
            }
        };
        self.ticks_accepted += 1;

        let tr = true_range(candles);
        let atr = average_true_range(&tr, self.config.atr_period);
        let states = supertrend_states(candles, &atr, self.config.multiplier);
        let band: Vec<f64> = states.iter().map(|s| s.band).collect();

        // Only the newest index can fire: every older index was evaluated
        // back when its candle was the newest, and signals are emitted once.
        let newest = candles.len() - 1;
        let mut emitted = 0;
        for signal in generate_signals(candles, &band) {
            if signal.index == newest {
                debug!(kind = %signal.kind, price = signal.price, "band crossover");
                self.sink.on_signal(&signal);
                emitted += 1;
            }
        }

        if let Some(kind) = self.tracker.update(last_price) {
            let signal = Signal {
                kind,
                origin: SignalOrigin::SmaCross,
                index: newest,
                timestamp,
                price: last_price,
            };
            debug!(kind = %signal.kind, price = last_price, "stance flip");
            self.sink.on_signal(&signal);
            emitted += 1;
        }
        self.signals_emitted += emitted;

        Ok(TickSnapshot {
            window_len: candles.len(),
            band: states.last().map(|s| s.band),
            direction: states.last().map(|s| s.direction),
            sma: self.tracker.sma(),
            stance: self.tracker.stance(),
        })
    }

    /// Drop the candle window and stance history. Lifetime counters are kept.
    pub fn reset(&mut self) {
        self.aggregator.clear();
        self.tracker.reset();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current candle window, oldest first.
    pub fn window(&self) -> &[Candle] {
        self.aggregator.candles()
    }

    pub fn stance(&self) -> Stance {
        self.tracker.stance()
    }

    pub fn ticks_accepted(&self) -> u64 {
        self.ticks_accepted
    }

    pub fn ticks_rejected(&self) -> u64 {
        self.ticks_rejected
    }

    pub fn signals_emitted(&self) -> u64 {
        self.signals_emitted
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Tear down the engine, handing back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
