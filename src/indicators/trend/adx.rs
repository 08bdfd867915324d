//! ADX / +DI / -DI (directional movement) indicator
//!
//! Wilder-smoothed true range and directional movement; ADX is the
//! Wilder-smoothed DX series.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{AdxIndicator, TrendSignal, TrendStrength};

pub const DEFAULT_ADX_PERIOD: u32 = 14;
pub const ADX_WEAK_TREND: f64 = 20.0;
pub const ADX_STRONG_TREND: f64 = 40.0;

pub fn calculate_adx(series: &CandleSeries, period: u32) -> Result<AdxIndicator, IndicatorError> {
    validate_period("adx", period)?;
    let p = period as usize;
    // one DX value needs p smoothed bars; smoothing DX needs p more
    require_len(series, 2 * p)?;

    let candles = series.candles();
    let mut tr = Vec::with_capacity(candles.len() - 1);
    let mut plus_dm = Vec::with_capacity(candles.len() - 1);
    let mut minus_dm = Vec::with_capacity(candles.len() - 1);
    for pair in candles.windows(2) {
        tr.push(math::true_range(pair[1].high, pair[1].low, pair[0].close));
        let up = pair[1].high - pair[0].high;
        let down = pair[0].low - pair[1].low;
        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let smooth_tr = math::wilder_series(&tr, p);
    let smooth_plus = math::wilder_series(&plus_dm, p);
    let smooth_minus = math::wilder_series(&minus_dm, p);

    let mut plus_di_series = Vec::with_capacity(smooth_tr.len());
    let mut minus_di_series = Vec::with_capacity(smooth_tr.len());
    let mut dx = Vec::with_capacity(smooth_tr.len());
    for i in 0..smooth_tr.len() {
        let (pdi, mdi) = if smooth_tr[i] > 0.0 {
            (
                100.0 * smooth_plus[i] / smooth_tr[i],
                100.0 * smooth_minus[i] / smooth_tr[i],
            )
        } else {
            (0.0, 0.0)
        };
        plus_di_series.push(pdi);
        minus_di_series.push(mdi);
        let di_sum = pdi + mdi;
        dx.push(if di_sum > 0.0 {
            100.0 * (pdi - mdi).abs() / di_sum
        } else {
            0.0
        });
    }

    let adx_series = math::wilder_series(&dx, p);
    let adx = adx_series[adx_series.len() - 1];
    let plus_di = plus_di_series[plus_di_series.len() - 1];
    let minus_di = minus_di_series[minus_di_series.len() - 1];

    let strength = if adx < ADX_WEAK_TREND {
        TrendStrength::NoTrend
    } else if adx > ADX_STRONG_TREND {
        TrendStrength::StrongTrend
    } else {
        TrendStrength::WeakTrend
    };
    let direction = if plus_di > minus_di {
        TrendSignal::Bullish
    } else if plus_di < minus_di {
        TrendSignal::Bearish
    } else {
        TrendSignal::Neutral
    };

    Ok(AdxIndicator {
        adx,
        plus_di,
        minus_di,
        period,
        strength,
        direction,
    })
}

pub fn calculate_adx_default(series: &CandleSeries) -> Result<AdxIndicator, IndicatorError> {
    calculate_adx(series, DEFAULT_ADX_PERIOD)
}
