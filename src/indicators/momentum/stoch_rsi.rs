//! Stochastic RSI indicator
//!
//! Stochastic oscillator applied to the Wilder RSI series, with SMA-smoothed
//! %K and %D lines. Shares the RSI oversold/overbought thresholds.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::rsi::{classify_rsi, rsi_series};
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::StochRsiIndicator;

pub const DEFAULT_STOCH_RSI_PERIOD: u32 = 14;
pub const DEFAULT_STOCH_PERIOD: u32 = 14;
pub const DEFAULT_K_SMOOTH: u32 = 3;
pub const DEFAULT_D_SMOOTH: u32 = 3;

pub fn calculate_stoch_rsi(
    series: &CandleSeries,
    rsi_period: u32,
    stoch_period: u32,
    k_smooth: u32,
    d_smooth: u32,
) -> Result<StochRsiIndicator, IndicatorError> {
    validate_period("stochrsi rsi", rsi_period)?;
    validate_period("stochrsi stoch", stoch_period)?;
    validate_period("stochrsi %K smoothing", k_smooth)?;
    validate_period("stochrsi %D smoothing", d_smooth)?;
    let required =
        (rsi_period + stoch_period + k_smooth + d_smooth) as usize - 2;
    require_len(series, required)?;

    let rsi_values = rsi_series(&series.closes(), rsi_period as usize);

    let stoch_p = stoch_period as usize;
    let raw: Vec<f64> = (stoch_p - 1..rsi_values.len())
        .map(|i| {
            let window = &rsi_values[i + 1 - stoch_p..=i];
            let min = window.iter().copied().fold(f64::INFINITY, f64::min);
            let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if max == min {
                // perfectly flat RSI window
                50.0
            } else {
                (rsi_values[i] - min) / (max - min) * 100.0
            }
        })
        .collect();

    let k_series: Vec<f64> = (k_smooth as usize - 1..raw.len())
        .map(|i| {
            raw[i + 1 - k_smooth as usize..=i].iter().sum::<f64>() / k_smooth as f64
        })
        .collect();

    let k = k_series[k_series.len() - 1];
    let d = math::sma(&k_series, d_smooth as usize)
        .ok_or_else(|| IndicatorError::insufficient(required, series.len()))?;

    Ok(StochRsiIndicator {
        k,
        d,
        signal: classify_rsi(k),
    })
}

pub fn calculate_stoch_rsi_default(
    series: &CandleSeries,
) -> Result<StochRsiIndicator, IndicatorError> {
    calculate_stoch_rsi(
        series,
        DEFAULT_STOCH_RSI_PERIOD,
        DEFAULT_STOCH_PERIOD,
        DEFAULT_K_SMOOTH,
        DEFAULT_D_SMOOTH,
    )
}
