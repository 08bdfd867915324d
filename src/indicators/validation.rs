//! Shared parameter and lookback validation

use crate::indicators::error::IndicatorError;
use crate::models::candle::CandleSeries;

pub fn validate_period(name: &str, period: u32) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "{name} period must be positive"
        )));
    }
    Ok(())
}

pub fn validate_multiplier(name: &str, multiplier: f64) -> Result<(), IndicatorError> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "{name} multiplier must be positive, got {multiplier}"
        )));
    }
    Ok(())
}

pub fn require_len(series: &CandleSeries, required: usize) -> Result<(), IndicatorError> {
    if series.len() < required {
        return Err(IndicatorError::insufficient(required, series.len()));
    }
    Ok(())
}
