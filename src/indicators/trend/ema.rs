//! EMA ribbon indicator
//!
//! A stack of EMAs with ascending periods. The ribbon is BULLISH when every
//! shorter EMA sits above every longer one, BEARISH for the strict reverse,
//! MIXED otherwise.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{EmaRibbonIndicator, EmaValue, RibbonAlignment};

pub const DEFAULT_RIBBON_PERIODS: [u32; 5] = [5, 10, 20, 50, 200];

pub fn calculate_ema_ribbon(
    series: &CandleSeries,
    periods: &[u32],
) -> Result<EmaRibbonIndicator, IndicatorError> {
    if periods.is_empty() {
        return Err(IndicatorError::InvalidParameter(
            "ema ribbon needs at least one period".to_string(),
        ));
    }
    for &period in periods {
        validate_period("ema ribbon", period)?;
    }
    if periods.windows(2).any(|w| w[0] >= w[1]) {
        return Err(IndicatorError::InvalidParameter(
            "ema ribbon periods must be strictly ascending".to_string(),
        ));
    }
    let longest = periods[periods.len() - 1] as usize;
    require_len(series, longest)?;

    let closes = series.closes();
    let mut emas = Vec::with_capacity(periods.len());
    for &period in periods {
        let value = math::ema(&closes, period as usize)
            .ok_or_else(|| IndicatorError::insufficient(longest, series.len()))?;
        emas.push(EmaValue { period, value });
    }

    let bullish = emas.windows(2).all(|w| w[0].value > w[1].value);
    let bearish = emas.windows(2).all(|w| w[0].value < w[1].value);
    let alignment = if bullish {
        RibbonAlignment::Bullish
    } else if bearish {
        RibbonAlignment::Bearish
    } else {
        RibbonAlignment::Mixed
    };

    Ok(EmaRibbonIndicator { emas, alignment })
}

pub fn calculate_ema_ribbon_default(
    series: &CandleSeries,
) -> Result<EmaRibbonIndicator, IndicatorError> {
    calculate_ema_ribbon(series, &DEFAULT_RIBBON_PERIODS)
}
