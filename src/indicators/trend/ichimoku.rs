//! Ichimoku Kinko Hyo indicator
//!
//! Tenkan(9), Kijun(26), Senkou A = (Tenkan+Kijun)/2 projected forward,
//! Senkou B(52) projected forward, Chikou = close shifted back. The cloud
//! bounding the evaluated candle is therefore sampled `displacement`
//! candles back.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::{Candle, CandleSeries};
use crate::models::indicators::{CloudColor, IchimokuIndicator, PriceLocation};

pub const DEFAULT_TENKAN_PERIOD: u32 = 9;
pub const DEFAULT_KIJUN_PERIOD: u32 = 26;
pub const DEFAULT_SENKOU_B_PERIOD: u32 = 52;
pub const DEFAULT_DISPLACEMENT: u32 = 26;

/// Midpoint of the highest high and lowest low over the last `period`
/// candles of `candles`.
fn midpoint(candles: &[Candle], period: usize) -> f64 {
    let window = &candles[candles.len() - period..];
    let high = math::highest(&window.iter().map(|c| c.high).collect::<Vec<_>>())
        .unwrap_or_default();
    let low = math::lowest(&window.iter().map(|c| c.low).collect::<Vec<_>>())
        .unwrap_or_default();
    (high + low) / 2.0
}

pub fn calculate_ichimoku(
    series: &CandleSeries,
    tenkan_period: u32,
    kijun_period: u32,
    senkou_b_period: u32,
    displacement: u32,
) -> Result<IchimokuIndicator, IndicatorError> {
    validate_period("ichimoku tenkan", tenkan_period)?;
    validate_period("ichimoku kijun", kijun_period)?;
    validate_period("ichimoku senkou b", senkou_b_period)?;
    validate_period("ichimoku displacement", displacement)?;
    let required = (senkou_b_period + displacement) as usize;
    require_len(series, required)?;

    let candles = series.candles();
    let tenkan = midpoint(candles, tenkan_period as usize);
    let kijun = midpoint(candles, kijun_period as usize);

    // cloud spanning the current candle was projected from `displacement`
    // candles back
    let shifted = &candles[..candles.len() - displacement as usize];
    let senkou_a = (midpoint(shifted, tenkan_period as usize)
        + midpoint(shifted, kijun_period as usize))
        / 2.0;
    let senkou_b = midpoint(shifted, senkou_b_period as usize);

    let price = candles[candles.len() - 1].close;
    let chikou = price;

    let cloud = if senkou_a > senkou_b {
        CloudColor::Green
    } else {
        CloudColor::Red
    };
    let cloud_top = senkou_a.max(senkou_b);
    let cloud_bottom = senkou_a.min(senkou_b);
    let price_location = if price > cloud_top {
        PriceLocation::AboveCloud
    } else if price < cloud_bottom {
        PriceLocation::BelowCloud
    } else {
        PriceLocation::InCloud
    };

    Ok(IchimokuIndicator {
        tenkan,
        kijun,
        senkou_a,
        senkou_b,
        chikou,
        cloud,
        price_location,
    })
}

pub fn calculate_ichimoku_default(
    series: &CandleSeries,
) -> Result<IchimokuIndicator, IndicatorError> {
    calculate_ichimoku(
        series,
        DEFAULT_TENKAN_PERIOD,
        DEFAULT_KIJUN_PERIOD,
        DEFAULT_SENKOU_B_PERIOD,
        DEFAULT_DISPLACEMENT,
    )
}
