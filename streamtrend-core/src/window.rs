//! Bounded candle window — insertion-ordered, FIFO eviction.
//!
//! Invariant: length never exceeds capacity; order is insertion order,
//! oldest first. Backed by a contiguous `Vec` so indicator functions can
//! consume the window as a plain slice.

use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct CandleWindow {
    candles: Vec<Candle>,
    capacity: usize,
}

impl CandleWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "window capacity must be >= 1");
        Self {
            candles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a candle, evicting and returning the oldest one when the
    /// window is already full.
    pub fn push(&mut self, candle: Candle) -> Option<Candle> {
        self.candles.push(candle);
        if self.candles.len() > self.capacity {
            Some(self.candles.remove(0))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.candles.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest candle, if any.
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// The full window, oldest first.
    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    pub fn clear(&mut self) {
        self.candles.clear();
    }
}
