//! Bollinger Bands indicator
//!
//! Middle = SMA(period); upper/lower = middle +/- std_dev * stddev(period).
//! `lower <= middle <= upper` holds for every valid input; a perfectly flat
//! window collapses all three bands onto the SMA.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_multiplier, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{BandPosition, BollingerIndicator};

pub const DEFAULT_BOLLINGER_PERIOD: u32 = 20;
pub const DEFAULT_BOLLINGER_STD_DEV: f64 = 2.0;

pub fn calculate_bollinger(
    series: &CandleSeries,
    period: u32,
    std_dev: f64,
) -> Result<BollingerIndicator, IndicatorError> {
    validate_period("bollinger", period)?;
    validate_multiplier("bollinger", std_dev)?;
    let p = period as usize;
    require_len(series, p)?;

    let closes = series.closes();
    let middle = math::sma(&closes, p)
        .ok_or_else(|| IndicatorError::insufficient(p, series.len()))?;
    let sd = math::standard_deviation(&closes, p)
        .ok_or_else(|| IndicatorError::insufficient(p, series.len()))?;

    let upper = middle + std_dev * sd;
    let lower = middle - std_dev * sd;

    let price = closes[closes.len() - 1];
    let position = if price > upper {
        BandPosition::AboveUpper
    } else if price < lower {
        BandPosition::BelowLower
    } else {
        BandPosition::Between
    };

    Ok(BollingerIndicator {
        upper,
        middle,
        lower,
        period,
        std_dev,
        position,
    })
}

pub fn calculate_bollinger_default(
    series: &CandleSeries,
) -> Result<BollingerIndicator, IndicatorError> {
    calculate_bollinger(series, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_STD_DEV)
}
