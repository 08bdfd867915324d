//! Breakout strategy: Supertrend flips filtered by ADX trend strength

use std::collections::HashMap;

use serde_json::json;

use crate::indicators::registry::IndicatorCategory;
use crate::indicators::trend::adx::calculate_adx_default;
use crate::indicators::trend::supertrend::calculate_supertrend_default;
use crate::indicators::volatility::atr::calculate_atr_default;
use crate::models::candle::CandleSeries;
use crate::models::indicators::TrendStrength;
use crate::models::signal::{SignalType, StrategyResult, StrategySignal};
use crate::strategies::{atr_bracket, category_name, Strategy};

const FLIP_CONFIDENCE: f64 = 0.6;
const STRONG_TREND_BONUS: f64 = 0.2;

pub struct SupertrendFollowStrategy;

impl Strategy for SupertrendFollowStrategy {
    fn name(&self) -> &'static str {
        "supertrend_follow"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn evaluate(&self, series: &CandleSeries) -> StrategyResult {
        let (supertrend, adx) = match (
            calculate_supertrend_default(series),
            calculate_adx_default(series),
        ) {
            (Ok(supertrend), Ok(adx)) => (supertrend, adx),
            _ => return StrategyResult::abstain(self.name()),
        };

        // only the flip candle is actionable
        let direction = match supertrend.signal {
            SignalType::Hold => return StrategyResult::abstain(self.name()),
            other => other,
        };
        // a flip inside a trendless chop is noise
        if adx.strength == TrendStrength::NoTrend {
            return StrategyResult::abstain(self.name());
        }

        let mut confidence = FLIP_CONFIDENCE;
        if adx.strength == TrendStrength::StrongTrend {
            confidence += STRONG_TREND_BONUS;
        }

        let price = match series.last() {
            Some(candle) => candle.close,
            None => return StrategyResult::abstain(self.name()),
        };
        let atr = calculate_atr_default(series).map(|a| a.value).unwrap_or(0.0);
        let (stop_loss, take_profit) = atr_bracket(price, atr, direction);

        let reasoning = format!(
            "Supertrend flipped {} with ADX {:.1}",
            match direction {
                SignalType::Buy => "up",
                _ => "down",
            },
            adx.adx,
        );
        let mut metadata = HashMap::new();
        metadata.insert("category".to_string(), json!(category_name(self.category())));
        metadata.insert("supertrend".to_string(), json!(supertrend.value));
        metadata.insert("adx".to_string(), json!(adx.adx));

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
