//! Fibonacci retracement levels
//!
//! Levels between the visible window's swing high (0%) and swing low (100%).

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::structure::pivot_points::nearest;
use crate::indicators::validation::require_len;
use crate::models::candle::CandleSeries;
use crate::models::indicators::{FibonacciIndicator, PriceLevel};

pub const FIB_RATIOS: [(&str, f64); 7] = [
    ("0%", 0.0),
    ("23.6%", 0.236),
    ("38.2%", 0.382),
    ("50%", 0.5),
    ("61.8%", 0.618),
    ("78.6%", 0.786),
    ("100%", 1.0),
];

pub fn calculate_fibonacci(series: &CandleSeries) -> Result<FibonacciIndicator, IndicatorError> {
    require_len(series, 2)?;

    let swing_high = math::highest(&series.highs()).unwrap_or_default();
    let swing_low = math::lowest(&series.lows()).unwrap_or_default();
    let range = swing_high - swing_low;

    let levels: Vec<PriceLevel> = FIB_RATIOS
        .iter()
        .map(|&(label, ratio)| PriceLevel {
            label: label.to_string(),
            price: swing_high - range * ratio,
        })
        .collect();

    let price = series.candles()[series.len() - 1].close;
    let pairs: Vec<(&str, f64)> = FIB_RATIOS
        .iter()
        .zip(&levels)
        .map(|(&(label, _), level)| (label, level.price))
        .collect();
    let nearest_level = nearest(&pairs, price);

    Ok(FibonacciIndicator {
        swing_high,
        swing_low,
        levels,
        nearest_level,
    })
}
