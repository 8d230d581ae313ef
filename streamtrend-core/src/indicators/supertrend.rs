//! Supertrend — ATR-banded directional indicator.
//!
//! Inherently sequential: each value depends on the previous band and a
//! direction flag. The carried state is an explicit [`BandState`] stepped
//! candle-by-candle, never a hidden loop variable.
//!
//! Output: the active band value — the lower band (support) while trending
//! up, the upper band (resistance) while trending down.

use crate::domain::Candle;

/// Direction carried across steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
}

/// Supertrend recurrence state after one step: the active band value and the
/// direction it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandState {
    pub band: f64,
    pub direction: TrendDirection,
}

impl BandState {
    /// State for the first candle: lower band, assuming an uptrend.
    pub fn seed(candle: &Candle, atr: f64, multiplier: f64) -> Self {
        Self {
            band: candle.hl2() - multiplier * atr,
            direction: TrendDirection::Up,
        }
    }

    /// Advance the recurrence by one candle.
    ///
    /// The continuation band is computed and assigned first; the flip test
    /// then compares close against that continuation value, not the raw
    /// upper/lower band. Equality never flips.
    pub fn step(self, candle: &Candle, atr: f64, multiplier: f64) -> Self {
        let basic = candle.hl2();
        let upper = basic + multiplier * atr;
        let lower = basic - multiplier * atr;

        match self.direction {
            TrendDirection::Up => {
                // Support may only tighten upward while the trend holds.
                let band = lower.max(self.band);
                if candle.close < band {
                    Self {
                        band: upper,
                        direction: TrendDirection::Down,
                    }
                } else {
                    Self {
                        band,
                        direction: TrendDirection::Up,
                    }
                }
            }
            TrendDirection::Down => {
                // Resistance may only tighten downward while the trend holds.
                let band = upper.min(self.band);
                if candle.close > band {
                    Self {
                        band: lower,
                        direction: TrendDirection::Up,
                    }
                } else {
                    Self {
                        band,
                        direction: TrendDirection::Down,
                    }
                }
            }
        }
    }
}

/// Run the recurrence over a whole window, returning the state at each index.
///
/// A length mismatch between candles and ATR, or empty input, yields an
/// empty result.
pub fn supertrend_states(candles: &[Candle], atr: &[f64], multiplier: f64) -> Vec<BandState> {
    if candles.is_empty() || candles.len() != atr.len() {
        return Vec::new();
    }

    let mut states = Vec::with_capacity(candles.len());
    let mut state = BandState::seed(&candles[0], atr[0], multiplier);
    states.push(state);

    for (candle, &atr_value) in candles.iter().zip(atr).skip(1) {
        state = state.step(candle, atr_value, multiplier);
        states.push(state);
    }

    states
}

/// The Supertrend band series for a window.
pub fn supertrend(candles: &[Candle], atr: &[f64], multiplier: f64) -> Vec<f64> {
    supertrend_states(candles, atr, multiplier)
        .iter()
        .map(|s| s.band)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, average_true_range, make_candles, true_range, DEFAULT_EPSILON};

    #[test]
    fn seed_is_lower_band_trending_up() {
        let candles = make_candles(&[(10.0, 8.0, 9.0)]);
        let state = BandState::seed(&candles[0], 2.0, 1.0);
        assert_approx(state.band, 7.0, DEFAULT_EPSILON); // (10+8)/2 - 1*2
        assert_eq!(state.direction, TrendDirection::Up);
    }

    #[test]
    fn uptrend_band_ratchets_up() {
        // Rising market: the support band must never move down.
        let candles = make_candles(&[
            (10.0, 8.0, 9.0),
            (11.0, 9.0, 10.0),
            (12.0, 10.0, 11.0),
            (13.0, 11.0, 12.0),
        ]);
        let tr = true_range(&candles);
        let atr = average_true_range(&tr, 2);
        let states = supertrend_states(&candles, &atr, 1.0);

        assert!(states.iter().all(|s| s.direction == TrendDirection::Up));
        for pair in states.windows(2) {
            assert!(pair[1].band >= pair[0].band);
        }
    }

    #[test]
    fn close_below_continuation_flips_down() {
        // Third candle collapses far below the carried support band.
        let candles = make_candles(&[
            (10.0, 8.0, 9.0),
            (11.0, 9.0, 10.0),
            (7.0, 5.0, 5.5),
        ]);
        let tr = true_range(&candles);
        let atr = average_true_range(&tr, 2);
        let states = supertrend_states(&candles, &atr, 1.0);

        assert_eq!(states[2].direction, TrendDirection::Down);
        // After the flip the band is the raw upper band of that candle.
        let upper = candles[2].hl2() + atr[2];
        assert_approx(states[2].band, upper, DEFAULT_EPSILON);
    }

    #[test]
    fn tie_with_band_does_not_flip() {
        // The carried band continues at 8 while the close lands exactly
        // on it: equality must not flip the direction.
        let candles = make_candles(&[
            (10.0, 8.0, 9.0),
            (11.0, 9.0, 10.0),
            (9.0, 7.0, 8.0),
        ]);
        let tr = true_range(&candles);
        let atr = average_true_range(&tr, 2);
        let states = supertrend_states(&candles, &atr, 1.0);

        let bands: Vec<f64> = states.iter().map(|s| s.band).collect();
        assert_approx(bands[0], 7.0, DEFAULT_EPSILON);
        assert_approx(bands[1], 8.0, DEFAULT_EPSILON);
        assert_approx(bands[2], 8.0, DEFAULT_EPSILON);
        assert!(states.iter().all(|s| s.direction == TrendDirection::Up));
    }

    #[test]
    fn downtrend_recovery_flips_back_up() {
        let candles = make_candles(&[
            (10.0, 8.0, 9.0),
            (7.0, 5.0, 5.5),  // collapse: flips down
            (14.0, 12.0, 13.5), // rally above resistance: flips back up
        ]);
        let tr = true_range(&candles);
        let atr = average_true_range(&tr, 2);
        let states = supertrend_states(&candles, &atr, 1.0);

        assert_eq!(states[1].direction, TrendDirection::Down);
        assert_eq!(states[2].direction, TrendDirection::Up);
    }

    #[test]
    fn length_mismatch_is_empty() {
        let candles = make_candles(&[(10.0, 8.0, 9.0), (11.0, 9.0, 10.0)]);
        assert!(supertrend(&candles, &[2.0], 1.0).is_empty());
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(supertrend(&[], &[], 1.0).is_empty());
    }

    #[test]
    fn band_series_matches_states() {
        let candles = make_candles(&[(10.0, 8.0, 9.0), (11.0, 9.0, 10.0), (9.0, 7.0, 8.0)]);
        let tr = true_range(&candles);
        let atr = average_true_range(&tr, 2);
        let states = supertrend_states(&candles, &atr, 1.0);
        let bands = supertrend(&candles, &atr, 1.0);
        assert_eq!(bands.len(), states.len());
        for (band, state) in bands.iter().zip(&states) {
            assert_eq!(*band, state.band);
        }
    }
}
