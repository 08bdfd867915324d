//! Classic pivot points
//!
//! Pivot = (H + L + C) / 3 of the prior period; support/resistance levels
//! from the standard formulas.

use crate::indicators::error::IndicatorError;
use crate::indicators::validation::require_len;
use crate::models::candle::CandleSeries;
use crate::models::indicators::{PivotPointsIndicator, PriceLevel};

pub fn calculate_pivot_points(
    series: &CandleSeries,
) -> Result<PivotPointsIndicator, IndicatorError> {
    // the last candle is the one being evaluated, the one before is the
    // completed prior period
    require_len(series, 2)?;

    let candles = series.candles();
    let prior = &candles[candles.len() - 2];
    let (h, l, c) = (prior.high, prior.low, prior.close);

    let pivot = (h + l + c) / 3.0;
    let r1 = 2.0 * pivot - l;
    let s1 = 2.0 * pivot - h;
    let r2 = pivot + (h - l);
    let s2 = pivot - (h - l);
    let r3 = h + 2.0 * (pivot - l);
    let s3 = l - 2.0 * (h - pivot);

    let price = candles[candles.len() - 1].close;
    let levels = [
        ("PP", pivot),
        ("R1", r1),
        ("R2", r2),
        ("R3", r3),
        ("S1", s1),
        ("S2", s2),
        ("S3", s3),
    ];
    let nearest_level = nearest(&levels, price);

    Ok(PivotPointsIndicator {
        pivot,
        r1,
        r2,
        r3,
        s1,
        s2,
        s3,
        nearest_level,
    })
}

/// Level minimizing |price - level|; earlier entries win exact ties so the
/// result is deterministic.
pub(crate) fn nearest(levels: &[(&str, f64)], price: f64) -> PriceLevel {
    let mut best = &levels[0];
    for level in &levels[1..] {
        if (price - level.1).abs() < (price - best.1).abs() {
            best = level;
        }
    }
    PriceLevel {
        label: best.0.to_string(),
        price: best.1,
    }
}
