//! Trend-following strategy: MACD momentum gated by EMA ribbon alignment

use std::collections::HashMap;

use serde_json::json;

use crate::indicators::momentum::macd::calculate_macd_default;
use crate::indicators::registry::IndicatorCategory;
use crate::indicators::trend::ema::calculate_ema_ribbon;
use crate::indicators::volatility::atr::calculate_atr_default;
use crate::models::candle::CandleSeries;
use crate::models::indicators::{RibbonAlignment, TrendSignal};
use crate::models::signal::{SignalType, StrategyResult, StrategySignal};
use crate::strategies::{atr_bracket, category_name, Strategy};

/// Shorter stack than the default ribbon so the strategy stays usable on
/// mid-length histories.
const RIBBON_PERIODS: [u32; 3] = [10, 20, 50];

const ALIGNED_CONFIDENCE: f64 = 0.75;
const UNCONFIRMED_CONFIDENCE: f64 = 0.55;
const CONFLICT_CONFIDENCE: f64 = 0.3;

pub struct MacdTrendStrategy;

impl Strategy for MacdTrendStrategy {
    fn name(&self) -> &'static str {
        "macd_trend"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn evaluate(&self, series: &CandleSeries) -> StrategyResult {
        let (macd, ribbon) = match (
            calculate_macd_default(series),
            calculate_ema_ribbon(series, &RIBBON_PERIODS),
        ) {
            (Ok(macd), Ok(ribbon)) => (macd, ribbon),
            _ => return StrategyResult::abstain(self.name()),
        };

        let (direction, confidence, note) = match (macd.trend, ribbon.alignment) {
            (TrendSignal::Neutral, _) => return StrategyResult::abstain(self.name()),
            (TrendSignal::Bullish, RibbonAlignment::Bullish) => {
                (SignalType::Buy, ALIGNED_CONFIDENCE, "ribbon aligned")
            }
            (TrendSignal::Bullish, RibbonAlignment::Mixed) => {
                (SignalType::Buy, UNCONFIRMED_CONFIDENCE, "ribbon mixed")
            }
            (TrendSignal::Bearish, RibbonAlignment::Bearish) => {
                (SignalType::Sell, ALIGNED_CONFIDENCE, "ribbon aligned")
            }
            (TrendSignal::Bearish, RibbonAlignment::Mixed) => {
                (SignalType::Sell, UNCONFIRMED_CONFIDENCE, "ribbon mixed")
            }
            // momentum against the stacked ribbon: stand aside explicitly
            _ => (SignalType::Hold, CONFLICT_CONFIDENCE, "ribbon conflict"),
        };

        let price = match series.last() {
            Some(candle) => candle.close,
            None => return StrategyResult::abstain(self.name()),
        };
        let atr = calculate_atr_default(series).map(|a| a.value).unwrap_or(0.0);
        let (stop_loss, take_profit) = atr_bracket(price, atr, direction);

        let reasoning = format!(
            "MACD {:.4} with {} momentum, {}",
            macd.macd,
            match macd.trend {
                TrendSignal::Bullish => "bullish",
                TrendSignal::Bearish => "bearish",
                TrendSignal::Neutral => "neutral",
            },
            note,
        );
        let mut metadata = HashMap::new();
        metadata.insert("category".to_string(), json!(category_name(self.category())));
        metadata.insert("histogram".to_string(), json!(macd.histogram));
        metadata.insert("alignment".to_string(), json!(ribbon.alignment));

        StrategyResult::with_signal(
            self.name(),
            StrategySignal {
                signal_type: direction,
                price,
                confidence,
                stop_loss,
                take_profit,
                reasoning,
                metadata,
            },
        )
    }
}
