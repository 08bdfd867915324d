//! Top-level analysis pass: indicators, consensus, and structure in one call
//!
//! Pure per invocation. Callers analyzing many (symbol, timeframe) pairs can
//! fan out freely; nothing here shares state between calls.

use serde::Serialize;
use tracing::info;

use crate::indicators::{evaluate_all, IndicatorError};
use crate::models::candle::CandleSeries;
use crate::models::indicators::IndicatorSet;
use crate::models::signal::{ConsensusResult, SignalType};
use crate::models::smart_money::SmartMoneyReport;
use crate::signals::ConsensusEngine;
use crate::smart_money::{SmartMoneyConfig, SmartMoneyDetector};
use crate::strategies::StrategyRegistry;

/// Consensus confidence at or above this upgrades BUY/SELL to the strong
/// rating.
pub const STRONG_RATING_CONFIDENCE: f64 = 0.75;

#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub smart_money: SmartMoneyConfig,
}

/// Headline rating derived from the consensus direction and confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalRating {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl SignalRating {
    fn from_consensus(consensus: &ConsensusResult) -> Self {
        let strong = consensus.confidence >= STRONG_RATING_CONFIDENCE;
        match consensus.consensus {
            SignalType::Buy if strong => SignalRating::StrongBuy,
            SignalType::Buy => SignalRating::Buy,
            SignalType::Sell if strong => SignalRating::StrongSell,
            SignalType::Sell => SignalRating::Sell,
            SignalType::Hold => SignalRating::Neutral,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub indicators: IndicatorSet,
    pub consensus: ConsensusResult,
    pub rating: SignalRating,
    pub smart_money: SmartMoneyReport,
}

/// Run the full pass with the built-in strategy registry.
pub fn analyze(
    series: &CandleSeries,
    config: &AnalysisConfig,
) -> Result<MarketAnalysis, IndicatorError> {
    analyze_with_registry(series, config, &StrategyRegistry::with_defaults())
}

/// Run the full pass against a caller-supplied strategy registry.
///
/// Fails only on an empty series; everything downstream degrades locally
/// (absent indicator slots, abstaining strategies, empty structure report).
pub fn analyze_with_registry(
    series: &CandleSeries,
    config: &AnalysisConfig,
    registry: &StrategyRegistry,
) -> Result<MarketAnalysis, IndicatorError> {
    let indicators = evaluate_all(series)?;
    let consensus = ConsensusEngine::evaluate(registry, series);
    let rating = SignalRating::from_consensus(&consensus);
    let smart_money = SmartMoneyDetector::new(config.smart_money.clone()).detect(series);

    info!(
        symbol = %indicators.symbol,
        timeframe = %indicators.timeframe,
        rating = ?rating,
        confidence = consensus.confidence,
        "analysis complete"
    );

    Ok(MarketAnalysis {
        indicators,
        consensus,
        rating,
        smart_money,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::series_from_closes;

    #[test]
    fn test_empty_series_fails() {
        let series = CandleSeries::new("BTCUSDT", "1h", Vec::new()).unwrap();
        assert!(analyze(&series, &AnalysisConfig::default()).is_err());
    }

    #[test]
    fn test_flat_series_rates_neutral() {
        let series = series_from_closes(&[100.0; 40]);
        let analysis = analyze(&series, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.consensus.consensus, SignalType::Hold);
        assert_eq!(analysis.rating, SignalRating::Neutral);
        assert_eq!(analysis.consensus.confidence, 0.0);
    }

    #[test]
    fn test_rating_thresholds() {
        use crate::models::signal::StrategyResult;
        use crate::signals::ConsensusEngine as Engine;
        use std::collections::HashMap;

        let buy = |confidence: f64| {
            StrategyResult::with_signal(
                "s",
                crate::models::signal::StrategySignal {
                    signal_type: SignalType::Buy,
                    price: 100.0,
                    confidence,
                    stop_loss: None,
                    take_profit: None,
                    reasoning: String::new(),
                    metadata: HashMap::new(),
                },
            )
        };
        let strong = Engine::reduce(vec![buy(0.8)]);
        assert_eq!(SignalRating::from_consensus(&strong), SignalRating::StrongBuy);
        let plain = Engine::reduce(vec![buy(0.6)]);
        assert_eq!(SignalRating::from_consensus(&plain), SignalRating::Buy);
    }

    #[test]
    fn test_rating_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&SignalRating::StrongBuy).unwrap(),
            "\"STRONG_BUY\""
        );
        assert_eq!(
            serde_json::to_string(&SignalRating::Neutral).unwrap(),
            "\"NEUTRAL\""
        );
    }
}
