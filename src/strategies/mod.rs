//! Strategy evaluators: named compositions of catalog indicators
//!
//! Each strategy inspects one series snapshot and either emits a
//! [`StrategySignal`] or abstains. The consensus engine fans these in.

pub mod macd_trend;
pub mod rsi_reversal;
pub mod supertrend_follow;

use crate::indicators::registry::IndicatorCategory;
use crate::models::candle::CandleSeries;
use crate::models::signal::{SignalType, StrategyResult};

pub use macd_trend::MacdTrendStrategy;
pub use rsi_reversal::RsiReversalStrategy;
pub use supertrend_follow::SupertrendFollowStrategy;

/// A named signal evaluator over one candle-series snapshot.
///
/// Implementations must be pure: no internal state may survive between
/// `evaluate` calls, so the same snapshot always yields the same result.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Dominant indicator category the strategy draws on.
    fn category(&self) -> IndicatorCategory;

    fn evaluate(&self, series: &CandleSeries) -> StrategyResult;
}

/// Ordered collection of strategies. Registration order is part of the
/// consensus contract: it breaks otherwise-exact ties deterministically.
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// The built-in strategy set, in its canonical order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RsiReversalStrategy));
        registry.register(Box::new(MacdTrendStrategy));
        registry.register(Box::new(SupertrendFollowStrategy));
        registry
    }

    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Strategy> {
        self.strategies.iter().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// ATR-scaled stop-loss / take-profit bracket around an entry price.
pub(crate) fn atr_bracket(price: f64, atr: f64, direction: SignalType) -> (Option<f64>, Option<f64>) {
    if atr <= 0.0 {
        return (None, None);
    }
    match direction {
        SignalType::Buy => (Some(price - 1.5 * atr), Some(price + 3.0 * atr)),
        SignalType::Sell => (Some(price + 1.5 * atr), Some(price - 3.0 * atr)),
        SignalType::Hold => (None, None),
    }
}

pub(crate) fn category_name(category: IndicatorCategory) -> &'static str {
    match category {
        IndicatorCategory::Momentum => "momentum",
        IndicatorCategory::Trend => "trend",
        IndicatorCategory::Volatility => "volatility",
        IndicatorCategory::Volume => "volume",
        IndicatorCategory::Structure => "structure",
    }
}
