//! Strategy and consensus signal models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Directional call emitted by a strategy or by the consensus reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
}

/// A concrete signal from one strategy. `confidence` is in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySignal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub price: f64,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

/// One strategy's verdict; `signal: None` means the strategy abstained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub strategy_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<StrategySignal>,
}

impl StrategyResult {
    pub fn abstain(strategy_name: impl Into<String>) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            signal: None,
        }
    }

    pub fn with_signal(strategy_name: impl Into<String>, signal: StrategySignal) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            signal: Some(signal),
        }
    }
}

/// Fan-in of every registered strategy over one series snapshot.
///
/// `agreement_rate` = strategies agreeing with the majority call divided by
/// strategies that did not abstain; `confidence` = mean confidence of the
/// agreeing strategies. Both are always within [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusResult {
    pub strategies: HashMap<String, StrategyResult>,
    pub consensus: SignalType,
    pub agreement_rate: f64,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&SignalType::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&SignalType::Hold).unwrap(), "\"HOLD\"");
    }

    #[test]
    fn test_strategy_signal_field_names() {
        let signal = StrategySignal {
            signal_type: SignalType::Sell,
            price: 100.0,
            confidence: 0.8,
            stop_loss: Some(103.0),
            take_profit: None,
            reasoning: "test".to_string(),
            metadata: HashMap::new(),
        };
        let json = serde_json::to_string(&signal).unwrap();
        assert!(json.contains("\"type\":\"SELL\""));
        assert!(json.contains("\"stopLoss\":103.0"));
        assert!(!json.contains("takeProfit"));
    }

    #[test]
    fn test_abstain_has_no_signal_field() {
        let result = StrategyResult::abstain("rsi_reversal");
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("signal"));
        assert!(json.contains("\"strategyName\":\"rsi_reversal\""));
    }
}
