//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS)), RS = Wilder-smoothed average gain / loss.

use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{OscillatorSignal, RsiIndicator};

pub const DEFAULT_RSI_PERIOD: u32 = 14;
/// Thresholds are inclusive: RSI of exactly 30.0 classifies as OVERSOLD.
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

pub fn calculate_rsi(series: &CandleSeries, period: u32) -> Result<RsiIndicator, IndicatorError> {
    validate_period("rsi", period)?;
    let p = period as usize;
    require_len(series, p + 1)?;

    let values = rsi_series(&series.closes(), p);
    let value = values[values.len() - 1];

    Ok(RsiIndicator {
        value,
        period,
        signal: classify_rsi(value),
    })
}

pub fn calculate_rsi_default(series: &CandleSeries) -> Result<RsiIndicator, IndicatorError> {
    calculate_rsi(series, DEFAULT_RSI_PERIOD)
}

pub fn classify_rsi(value: f64) -> OscillatorSignal {
    if value <= RSI_OVERSOLD {
        OscillatorSignal::Oversold
    } else if value >= RSI_OVERBOUGHT {
        OscillatorSignal::Overbought
    } else {
        OscillatorSignal::Neutral
    }
}

/// Full Wilder RSI series over `closes`; output index 0 corresponds to
/// `closes[period]`. Callers must guarantee `closes.len() > period`.
pub(crate) fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    let mut out = Vec::with_capacity(gains.len() - period + 1);
    out.push(rsi_value(avg_gain, avg_loss));
    for i in period..gains.len() {
        avg_gain = (avg_gain * (period as f64 - 1.0) + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + losses[i]) / period as f64;
        out.push(rsi_value(avg_gain, avg_loss));
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    // flat window: no gains, no losses
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return 50.0;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
