//! Mean-reversion strategy: RSI extremes confirmed by Bollinger position

use std::collections::HashMap;

use serde_json::json;

use crate::indicators::momentum::rsi::{
    calculate_rsi_default, RSI_OVERBOUGHT, RSI_OVERSOLD,
};
use crate::indicators::registry::IndicatorCategory;
use crate::indicators::volatility::atr::calculate_atr_default;
use crate::indicators::volatility::bollinger::calculate_bollinger_default;
use crate::models::candle::CandleSeries;
use crate::models::indicators::{BandPosition, OscillatorSignal};
use crate::models::signal::{SignalType, StrategyResult, StrategySignal};
use crate::strategies::{atr_bracket, category_name, Strategy};

const BASE_CONFIDENCE: f64 = 0.55;
const BAND_CONFIRMATION_BONUS: f64 = 0.2;
const MAX_CONFIDENCE: f64 = 0.95;

pub struct RsiReversalStrategy;

impl Strategy for RsiReversalStrategy {
    fn name(&self) -> &'static str {
        "rsi_reversal"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn evaluate(&self, series: &CandleSeries) -> StrategyResult {
        let (rsi, bollinger) = match (
            calculate_rsi_default(series),
            calculate_bollinger_default(series),
        ) {
            (Ok(rsi), Ok(bollinger)) => (rsi, bollinger),
            _ => return StrategyResult::abstain(self.name()),
        };

        let (direction, depth, confirmed) = match rsi.signal {
            OscillatorSignal::Oversold => (
                SignalType::Buy,
                (RSI_OVERSOLD - rsi.value) / RSI_OVERSOLD,
                bollinger.position == BandPosition::BelowLower,
            ),
            OscillatorSignal::Overbought => (
                SignalType::Sell,
                (rsi.value - RSI_OVERBOUGHT) / (100.0 - RSI_OVERBOUGHT),
                bollinger.position == BandPosition::AboveUpper,
            ),
            OscillatorSignal::Neutral => return StrategyResult::abstain(self.name()),
        };

        let mut confidence = BASE_CONFIDENCE + 0.25 * depth.clamp(0.0, 1.0);
        if confirmed {
            confidence += BAND_CONFIRMATION_BONUS;
        }
        let confidence = confidence.min(MAX_CONFIDENCE);

        let price = match series.last() {
            Some(candle) => candle.close,
            None => return StrategyResult::abstain(self.name()),
        };
        let atr = calculate_atr_default(series).map(|a| a.value).unwrap_or(0.0);
        let (stop_loss, take_profit) = atr_bracket(price, atr, direction);

        let reasoning = format!(
            "RSI {:.1} is {}{}",
            rsi.value,
            match direction {
                SignalType::Buy => "oversold",
                _ => "overbought",
            },
            if confirmed {
                ", price outside Bollinger band"
            } else {
                ""
            },
        );
        let mut metadata = HashMap::new();
        metadata.insert("category".to_string(), json!(category_name(self.category())));
        metadata.insert("rsi".to_string(), json!(rsi.value));
        metadata.insert("bollingerPosition".to_string(), json!(bollinger.position));

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
