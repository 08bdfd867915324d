//! Smart-money structural annotation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional bias of a structural feature; serialized lowercase
/// (`"bullish"` / `"bearish"`) per the presentation contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuralBias {
    Bullish,
    Bearish,
}

/// The last opposite-colored candle immediately preceding an impulsive move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBlock {
    pub time: DateTime<Utc>,
    pub low: f64,
    pub high: f64,
    #[serde(rename = "type")]
    pub block_type: StructuralBias,
    /// Impulse range relative to recent ATR, scaled to [0, 100].
    pub strength: f64,
}

/// Three-candle imbalance: candle 1's extreme does not overlap candle 3's.
/// Gaps are never retroactively removed when later filled; fill-tracking is
/// a presentation-layer concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairValueGap {
    pub time: DateTime<Utc>,
    pub low: f64,
    pub high: f64,
    #[serde(rename = "type")]
    pub gap_type: StructuralBias,
}

/// A wick through a confirmed swing extreme that closed back inside it
/// within the same or the next candle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquiditySweep {
    pub time: DateTime<Utc>,
    pub price: f64,
    #[serde(rename = "type")]
    pub sweep_type: StructuralBias,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureChangeType {
    /// Change of Character: first break against the prevailing direction.
    #[serde(rename = "CHoCH")]
    Choch,
    /// Break of Structure: continuation past the most recent swing extreme.
    #[serde(rename = "BoS")]
    Bos,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureChange {
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub change_type: StructureChangeType,
    pub direction: StructuralBias,
}

/// Everything the detector emitted for one series pass. Short histories
/// produce an empty report, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartMoneyReport {
    pub order_blocks: Vec<OrderBlock>,
    pub fair_value_gaps: Vec<FairValueGap>,
    pub liquidity_sweeps: Vec<LiquiditySweep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_change: Option<StructureChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_area_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_area_low: Option<f64>,
}

impl SmartMoneyReport {
    pub fn is_empty(&self) -> bool {
        self.order_blocks.is_empty()
            && self.fair_value_gaps.is_empty()
            && self.liquidity_sweeps.is_empty()
            && self.structure_change.is_none()
            && self.poc.is_none()
    }
}
