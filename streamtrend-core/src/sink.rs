//! Signal delivery boundary — sinks consume, the engine never persists.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use tracing::warn;

use crate::domain::Signal;

/// Caller-supplied consumer of emitted signals.
pub trait SignalSink {
    fn on_signal(&mut self, signal: &Signal);
}

/// Bounded-queue sink backed by a std `mpsc` sync channel.
///
/// Delivery uses `try_send`, keeping the tick callback non-blocking: when
/// the consumer falls behind and the queue fills, the signal is dropped and
/// counted instead of stalling ingestion.
#[derive(Debug)]
pub struct ChannelSink {
    tx: SyncSender<Signal>,
    dropped: u64,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its queue.
    pub fn new(capacity: usize) -> (Self, Receiver<Signal>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (Self { tx, dropped: 0 }, rx)
    }

    /// Signals lost to a full or disconnected queue.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl SignalSink for ChannelSink {
    fn on_signal(&mut self, signal: &Signal) {
        match self.tx.try_send(signal.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                warn!(kind = %signal.kind, "signal queue full, dropping");
            }
            Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
                warn!(kind = %signal.kind, "signal consumer gone, dropping");
            }
        }
    }
}

/// Sink that discards everything. Stub for benches and warm-up runs.
#[derive(Debug, Default)]
pub struct NullSink;

impl SignalSink for NullSink {
    fn on_signal(&mut self, _signal: &Signal) {}
}

/// Sink that collects signals in memory, for tests and batch inspection.
#[derive(Debug, Default)]
pub struct VecSink {
    pub signals: Vec<Signal>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SignalSink for VecSink {
    fn on_signal(&mut self, signal: &Signal) {
        self.signals.push(signal.clone());
    }
}
