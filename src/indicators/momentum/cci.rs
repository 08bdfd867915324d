//! CCI (Commodity Channel Index) indicator
//!
//! CCI = (typical price - SMA(tp)) / (0.015 * mean deviation)

use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{CciIndicator, OscillatorSignal};

pub const DEFAULT_CCI_PERIOD: u32 = 20;
pub const CCI_OVERSOLD: f64 = -100.0;
pub const CCI_OVERBOUGHT: f64 = 100.0;
const CCI_SCALE: f64 = 0.015;

pub fn calculate_cci(series: &CandleSeries, period: u32) -> Result<CciIndicator, IndicatorError> {
    validate_period("cci", period)?;
    let p = period as usize;
    require_len(series, p)?;

    let candles = series.candles();
    let tps: Vec<f64> = candles[candles.len() - p..]
        .iter()
        .map(|c| c.typical_price())
        .collect();
    let mean = tps.iter().sum::<f64>() / p as f64;
    let mean_dev = tps.iter().map(|tp| (tp - mean).abs()).sum::<f64>() / p as f64;

    // perfectly flat window: defined sentinel instead of a 0/0
    let value = if mean_dev == 0.0 {
        0.0
    } else {
        (tps[p - 1] - mean) / (CCI_SCALE * mean_dev)
    };

    Ok(CciIndicator {
        value,
        period,
        signal: classify_cci(value),
    })
}

pub fn calculate_cci_default(series: &CandleSeries) -> Result<CciIndicator, IndicatorError> {
    calculate_cci(series, DEFAULT_CCI_PERIOD)
}

pub fn classify_cci(value: f64) -> OscillatorSignal {
    if value <= CCI_OVERSOLD {
        OscillatorSignal::Oversold
    } else if value >= CCI_OVERBOUGHT {
        OscillatorSignal::Overbought
    } else {
        OscillatorSignal::Neutral
    }
}
