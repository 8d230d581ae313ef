//! True Range and Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR here is a trailing arithmetic mean of TR whose window shortens at the
//! start of history, so a value exists from the very first candle — no NaN
//! warmup prefix. The averaging denominator is the count of contributing
//! elements, minimum 1.

use crate::domain::Candle;

/// Compute the True Range series for a candle window.
///
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[i] = max(high[i]-low[i], |high[i]-close[i-1]|, |low[i]-close[i-1]|).
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    let n = candles.len();
    if n == 0 {
        return Vec::new();
    }

    let mut tr = Vec::with_capacity(n);
    tr.push(candles[0].high - candles[0].low);

    for i in 1..n {
        let h = candles[i].high;
        let l = candles[i].low;
        let pc = candles[i - 1].close;
        tr.push((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }

    tr
}

/// Average the True Range series over a trailing window of `period` values.
///
/// ATR[i] is the mean of TR[max(0, i-period+1) ..= i]. A zero period or an
/// empty series yields an empty result.
pub fn average_true_range(tr: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || tr.is_empty() {
        return Vec::new();
    }

    let mut atr = Vec::with_capacity(tr.len());
    for i in 0..tr.len() {
        let start = i.saturating_sub(period - 1);
        let count = (i - start + 1) as f64;
        let sum: f64 = tr[start..=i].iter().sum();
        atr.push(sum / count);
    }

    atr
}
