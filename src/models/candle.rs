//! Candle and candle-series input models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;

/// One OHLCV bar. Immutable once produced by the market-data layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// (high + low + close) / 3, the price used by VWAP, CCI and MFI.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Ordered, immutable candle sequence for one (symbol, timeframe) pair.
///
/// Invariants enforced at construction: strictly increasing timestamps,
/// non-negative OHLCV fields, `high >= low`. Gaps between timestamps are
/// permitted and never interpolated; indicators operate on the series as
/// given.
#[derive(Debug, Clone, Serialize)]
pub struct CandleSeries {
    symbol: String,
    timeframe: String,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        candles: Vec<Candle>,
    ) -> Result<Self, IndicatorError> {
        for (i, candle) in candles.iter().enumerate() {
            if candle.open < 0.0
                || candle.high < 0.0
                || candle.low < 0.0
                || candle.close < 0.0
                || candle.volume < 0.0
            {
                return Err(IndicatorError::InvalidParameter(format!(
                    "negative OHLCV field at index {i}"
                )));
            }
            if candle.high < candle.low {
                return Err(IndicatorError::InvalidParameter(format!(
                    "high below low at index {i}"
                )));
            }
            if i > 0 && candle.timestamp <= candles[i - 1].timestamp {
                return Err(IndicatorError::InvalidParameter(format!(
                    "non-increasing timestamp at index {i}"
                )));
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            candles,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }
}
