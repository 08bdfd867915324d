//! Per-indicator result models and the assembled indicator set
//!
//! Categorical enum values serialize to the exact strings the presentation
//! layer consumes (`OVERSOLD`, `ABOVE_UPPER`, ...) and struct fields travel
//! in camelCase (`nearestLevel`, `emaRibbon`, ...); both are part of the
//! compatibility surface and must not be renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::signal::SignalType;

/// Bounded-oscillator classification shared by RSI, StochRSI, CCI,
/// Williams %R and MFI. Thresholds are indicator-specific constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OscillatorSignal {
    Oversold,
    Overbought,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendSignal {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RibbonAlignment {
    Bullish,
    Bearish,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandPosition {
    AboveUpper,
    Between,
    BelowLower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityRegime {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VwapPosition {
    AboveVwap,
    AtVwap,
    BelowVwap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendStrength {
    NoTrend,
    WeakTrend,
    StrongTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudColor {
    Green,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceLocation {
    AboveCloud,
    InCloud,
    BelowCloud,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
    pub signal: OscillatorSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StochRsiIndicator {
    pub k: f64,
    pub d: f64,
    pub signal: OscillatorSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub trend: TrendSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CciIndicator {
    pub value: f64,
    pub period: u32,
    pub signal: OscillatorSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WilliamsRIndicator {
    pub value: f64,
    pub period: u32,
    pub signal: OscillatorSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfiIndicator {
    pub value: f64,
    pub period: u32,
    pub signal: OscillatorSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmaValue {
    pub period: u32,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmaRibbonIndicator {
    /// EMA values ordered by ascending period.
    pub emas: Vec<EmaValue>,
    pub alignment: RibbonAlignment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BollingerIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub period: u32,
    pub std_dev: f64,
    pub position: BandPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtrIndicator {
    pub value: f64,
    pub period: u32,
    /// Rolling mean of the trailing ATR series, the regime reference.
    pub baseline: f64,
    pub regime: VolatilityRegime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VwapIndicator {
    pub value: f64,
    /// (price - vwap) / vwap * 100
    pub deviation_pct: f64,
    pub signal: VwapPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObvIndicator {
    pub value: f64,
    pub ema: f64,
    pub trend: TrendSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupertrendIndicator {
    pub value: f64,
    pub direction: TrendDirection,
    pub signal: SignalType,
    pub period: u32,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLevel {
    pub label: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotPointsIndicator {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    pub nearest_level: PriceLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciIndicator {
    pub swing_high: f64,
    pub swing_low: f64,
    pub levels: Vec<PriceLevel>,
    pub nearest_level: PriceLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IchimokuIndicator {
    pub tenkan: f64,
    pub kijun: f64,
    pub senkou_a: f64,
    pub senkou_b: f64,
    pub chikou: f64,
    pub cloud: CloudColor,
    pub price_location: PriceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdxIndicator {
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
    pub period: u32,
    pub strength: TrendStrength,
    pub direction: TrendSignal,
}

/// The full catalog output for one evaluated candle: one optional slot per
/// indicator. An absent slot means that indicator was skipped (typically
/// `InsufficientData` on a short series); partial results are therefore
/// always distinguishable from total failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub symbol: String,
    pub timeframe: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<RsiIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema_ribbon: Option<EmaRibbonIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<AtrIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vwap: Option<VwapIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stoch_rsi: Option<StochRsiIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obv: Option<ObvIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supertrend: Option<SupertrendIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_points: Option<PivotPointsIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fibonacci: Option<FibonacciIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ichimoku: Option<IchimokuIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adx: Option<AdxIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cci: Option<CciIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub williams_r: Option<WilliamsRIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfi: Option<MfiIndicator>,
}

impl IndicatorSet {
    pub fn new(
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        timestamp: DateTime<Utc>,
        price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            timestamp,
            price,
            rsi: None,
            macd: None,
            ema_ribbon: None,
            bollinger: None,
            atr: None,
            vwap: None,
            stoch_rsi: None,
            obv: None,
            supertrend: None,
            pivot_points: None,
            fibonacci: None,
            ichimoku: None,
            adx: None,
            cci: None,
            williams_r: None,
            mfi: None,
        }
    }
}
