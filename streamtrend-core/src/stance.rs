//! SMA-crossover stance tracking — the coarse bull/bear position machine.
//!
//! Independent of the Supertrend path: it keeps its own bounded window of
//! last-traded prices and compares each new price against the window mean.
//! The stance is process-lifetime state, mutated only here.

use crate::domain::SignalKind;

/// Coarse market position. `None` until the price window first fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Stance {
    None,
    Bull,
    Bear,
}

/// Tracks the stance over a bounded window of last prices.
///
/// Transitions are evaluated only while the window holds exactly `period`
/// prices — every update after warm-up, since eviction pins the length
/// there. The first full-window evaluation initializes the stance silently;
/// afterwards a price strictly across the mean on the opposing side flips it
/// and reports the trade side. A price equal to the mean never transitions.
#[derive(Debug, Clone)]
pub struct StanceTracker {
    period: usize,
    prices: Vec<f64>,
    sum: f64,
    stance: Stance,
}

impl StanceTracker {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            prices: Vec::with_capacity(period),
            sum: 0.0,
            stance: Stance::None,
        }
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    /// Mean of the price window, once it is full.
    pub fn sma(&self) -> Option<f64> {
        if self.prices.len() == self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }

    /// Absorb one last-traded price; returns the trade side when the stance
    /// flips. Initialization (None -> Bull/Bear) reports nothing.
    pub fn update(&mut self, last_price: f64) -> Option<SignalKind> {
        self.prices.push(last_price);
        self.sum += last_price;
        if self.prices.len() > self.period {
            self.sum -= self.prices.remove(0);
        }
        if self.prices.len() < self.period {
            return None;
        }

        let sma = self.sum / self.period as f64;
        match self.stance {
            Stance::Bear if last_price > sma => {
                self.stance = Stance::Bull;
                Some(SignalKind::Buy)
            }
            Stance::Bull if last_price < sma => {
                self.stance = Stance::Bear;
                Some(SignalKind::Sell)
            }
            Stance::None => {
                self.stance = if last_price > sma {
                    Stance::Bull
                } else {
                    Stance::Bear
                };
                None
            }
            _ => None,
        }
    }

    /// Drop all prices and return to the uninitialized stance.
    pub fn reset(&mut self) {
        self.prices.clear();
        self.sum = 0.0;
        self.stance = Stance::None;
    }
}
