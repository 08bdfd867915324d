//! Consensus reduction across registered strategies
//!
//! Pure fan-in: every strategy sees the same series snapshot; the majority
//! directional call wins. Ties break on summed confidence-weighted votes,
//! then on registration order, so the result is fully deterministic.

use std::collections::HashMap;

use tracing::debug;

use crate::models::candle::CandleSeries;
use crate::models::signal::{ConsensusResult, SignalType, StrategyResult};
use crate::strategies::StrategyRegistry;

pub struct ConsensusEngine;

impl ConsensusEngine {
    pub fn evaluate(registry: &StrategyRegistry, series: &CandleSeries) -> ConsensusResult {
        let results: Vec<StrategyResult> =
            registry.iter().map(|s| s.evaluate(series)).collect();
        Self::reduce(results)
    }

    /// Reduce already-collected strategy results, in registration order.
    pub fn reduce(results: Vec<StrategyResult>) -> ConsensusResult {
        let votes: Vec<(SignalType, f64)> = results
            .iter()
            .filter_map(|r| r.signal.as_ref())
            .map(|s| (s.signal_type, s.confidence))
            .collect();

        let consensus = if votes.is_empty() {
            SignalType::Hold
        } else {
            Self::majority(&votes)
        };

        let agreeing: Vec<f64> = votes
            .iter()
            .filter(|(direction, _)| *direction == consensus)
            .map(|(_, confidence)| *confidence)
            .collect();

        let agreement_rate = if votes.is_empty() {
            0.0
        } else {
            agreeing.len() as f64 / votes.len() as f64
        };
        let confidence = if agreeing.is_empty() {
            0.0
        } else {
            agreeing.iter().sum::<f64>() / agreeing.len() as f64
        };

        debug!(
            consensus = ?consensus,
            agreement_rate,
            confidence,
            voters = votes.len(),
            "consensus reduced"
        );

        let strategies: HashMap<String, StrategyResult> = results
            .into_iter()
            .map(|r| (r.strategy_name.clone(), r))
            .collect();

        ConsensusResult {
            strategies,
            consensus,
            agreement_rate,
            confidence,
        }
    }

    fn majority(votes: &[(SignalType, f64)]) -> SignalType {
        let buy_count = votes.iter().filter(|(d, _)| *d == SignalType::Buy).count();
        let sell_count = votes.iter().filter(|(d, _)| *d == SignalType::Sell).count();

        if buy_count == 0 && sell_count == 0 {
            return SignalType::Hold;
        }
        if buy_count != sell_count {
            return if buy_count > sell_count {
                SignalType::Buy
            } else {
                SignalType::Sell
            };
        }

        // equal counts: the heavier confidence-weighted side wins
        let buy_weight: f64 = votes
            .iter()
            .filter(|(d, _)| *d == SignalType::Buy)
            .map(|(_, c)| c)
            .sum();
        let sell_weight: f64 = votes
            .iter()
            .filter(|(d, _)| *d == SignalType::Sell)
            .map(|(_, c)| c)
            .sum();
        if buy_weight > sell_weight {
            return SignalType::Buy;
        }
        if sell_weight > buy_weight {
            return SignalType::Sell;
        }

        // still tied: earliest-registered directional vote wins
        votes
            .iter()
            .find(|(d, _)| *d != SignalType::Hold)
            .map(|(d, _)| *d)
            .unwrap_or(SignalType::Hold)
    }
}
