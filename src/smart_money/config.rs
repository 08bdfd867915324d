//! Detector tuning knobs
//!
//! These are heuristics, not canonical constants. The defaults favour fewer,
//! cleaner structures over catching every marginal pattern; callers running
//! on fast timeframes may want a shorter confirmation window.

#[derive(Debug, Clone)]
pub struct SmartMoneyConfig {
    /// Candles required on each side of a local extreme before it counts as
    /// a confirmed swing. Filters single-candle wick noise.
    pub swing_confirmation: usize,
    /// A candle is impulsive when its range exceeds this multiple of ATR.
    pub impulse_atr_mult: f64,
    /// ATR lookback used for the impulse threshold and block strength.
    pub atr_period: usize,
    /// Share of total volume the value area must cover. A lower bound, not
    /// an exact target: on a sparse histogram the area can only stop at a
    /// populated bin, and may swallow the whole span when volume clusters
    /// in a few far-apart bins.
    pub value_area_pct: f64,
    /// Number of price bins in the volume profile.
    pub profile_bins: usize,
}

impl Default for SmartMoneyConfig {
    fn default() -> Self {
        Self {
            swing_confirmation: 3,
            impulse_atr_mult: 1.5,
            atr_period: 14,
            value_area_pct: 0.70,
            profile_bins: 24,
        }
    }
}

impl SmartMoneyConfig {
    /// Fewest candles on which at least one swing can be confirmed.
    pub fn min_window(&self) -> usize {
        2 * self.swing_confirmation + 1
    }
}
