//! Williams %R indicator
//!
//! %R = (highest high - close) / (highest high - lowest low) * -100

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{OscillatorSignal, WilliamsRIndicator};

pub const DEFAULT_WILLIAMS_R_PERIOD: u32 = 14;
pub const WILLIAMS_R_OVERSOLD: f64 = -80.0;
pub const WILLIAMS_R_OVERBOUGHT: f64 = -20.0;

pub fn calculate_williams_r(
    series: &CandleSeries,
    period: u32,
) -> Result<WilliamsRIndicator, IndicatorError> {
    validate_period("williams %r", period)?;
    let p = period as usize;
    require_len(series, p)?;

    let candles = series.candles();
    let window = &candles[candles.len() - p..];
    let highest = math::highest(&window.iter().map(|c| c.high).collect::<Vec<_>>())
        .unwrap_or_default();
    let lowest = math::lowest(&window.iter().map(|c| c.low).collect::<Vec<_>>())
        .unwrap_or_default();
    let close = window[p - 1].close;

    // flat window sentinel: mid-scale
    let value = if highest == lowest {
        -50.0
    } else {
        (highest - close) / (highest - lowest) * -100.0
    };

    Ok(WilliamsRIndicator {
        value,
        period,
        signal: classify_williams_r(value),
    })
}

pub fn calculate_williams_r_default(
    series: &CandleSeries,
) -> Result<WilliamsRIndicator, IndicatorError> {
    calculate_williams_r(series, DEFAULT_WILLIAMS_R_PERIOD)
}

pub fn classify_williams_r(value: f64) -> OscillatorSignal {
    if value <= WILLIAMS_R_OVERSOLD {
        OscillatorSignal::Oversold
    } else if value >= WILLIAMS_R_OVERBOUGHT {
        OscillatorSignal::Overbought
    } else {
        OscillatorSignal::Neutral
    }
}
