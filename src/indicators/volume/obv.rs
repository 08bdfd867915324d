//! OBV (On-Balance Volume) indicator
//!
//! Cumulative signed volume; trend read from OBV relative to its own EMA.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{ObvIndicator, TrendSignal};

pub const DEFAULT_OBV_EMA_PERIOD: u32 = 20;

pub fn calculate_obv(
    series: &CandleSeries,
    ema_period: u32,
) -> Result<ObvIndicator, IndicatorError> {
    validate_period("obv ema", ema_period)?;
    require_len(series, ema_period as usize)?;

    let candles = series.candles();
    let mut obv_series = Vec::with_capacity(candles.len());
    obv_series.push(0.0);
    let mut obv = 0.0;
    for pair in candles.windows(2) {
        if pair[1].close > pair[0].close {
            obv += pair[1].volume;
        } else if pair[1].close < pair[0].close {
            obv -= pair[1].volume;
        }
        obv_series.push(obv);
    }

    let ema = math::ema(&obv_series, ema_period as usize)
        .ok_or_else(|| IndicatorError::insufficient(ema_period as usize, series.len()))?;

    let trend = if obv > ema {
        TrendSignal::Bullish
    } else if obv < ema {
        TrendSignal::Bearish
    } else {
        TrendSignal::Neutral
    };

    Ok(ObvIndicator {
        value: obv,
        ema,
        trend,
    })
}

pub fn calculate_obv_default(series: &CandleSeries) -> Result<ObvIndicator, IndicatorError> {
    calculate_obv(series, DEFAULT_OBV_EMA_PERIOD)
}
