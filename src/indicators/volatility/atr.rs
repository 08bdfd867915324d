//! ATR (Average True Range) indicator
//!
//! Wilder-smoothed true range, with a volatility regime derived from the
//! ratio of the current ATR to the rolling mean of the trailing ATR series.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{AtrIndicator, VolatilityRegime};

pub const DEFAULT_ATR_PERIOD: u32 = 14;
/// Current ATR at or below this fraction of the baseline is LOW volatility.
pub const ATR_LOW_RATIO: f64 = 0.8;
/// Current ATR at or above this multiple of the baseline is HIGH volatility.
pub const ATR_HIGH_RATIO: f64 = 1.25;

pub fn calculate_atr(series: &CandleSeries, period: u32) -> Result<AtrIndicator, IndicatorError> {
    validate_period("atr", period)?;
    let p = period as usize;
    require_len(series, p + 1)?;

    let candles = series.candles();
    let tr: Vec<f64> = candles
        .windows(2)
        .map(|pair| math::true_range(pair[1].high, pair[1].low, pair[0].close))
        .collect();
    let atr_series = math::wilder_series(&tr, p);
    let value = atr_series[atr_series.len() - 1];

    let baseline_window = p.min(atr_series.len());
    let baseline = atr_series[atr_series.len() - baseline_window..]
        .iter()
        .sum::<f64>()
        / baseline_window as f64;

    let regime = classify_volatility(value, baseline);

    Ok(AtrIndicator {
        value,
        period,
        baseline,
        regime,
    })
}

pub fn calculate_atr_default(series: &CandleSeries) -> Result<AtrIndicator, IndicatorError> {
    calculate_atr(series, DEFAULT_ATR_PERIOD)
}

pub fn classify_volatility(value: f64, baseline: f64) -> VolatilityRegime {
    if baseline == 0.0 {
        // zero-range history
        return VolatilityRegime::Low;
    }
    let ratio = value / baseline;
    if ratio <= ATR_LOW_RATIO {
        VolatilityRegime::Low
    } else if ratio >= ATR_HIGH_RATIO {
        VolatilityRegime::High
    } else {
        VolatilityRegime::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::{series_from_closes, series_from_ohlcv};

    #[test]
    fn test_atr_constant_range_equals_range() {
        let bars = vec![(100.0, 102.0, 98.0, 100.0, 10.0); 20];
        let series = series_from_ohlcv(&bars);
        let atr = calculate_atr_default(&series).unwrap();
        assert!((atr.value - 4.0).abs() < 1e-9);
        assert_eq!(atr.regime, VolatilityRegime::Medium);
    }

    #[test]
    fn test_atr_flat_series_is_low_regime() {
        let series = series_from_closes(&[100.0; 20]);
        let atr = calculate_atr_default(&series).unwrap();
        assert_eq!(atr.value, 0.0);
        assert_eq!(atr.regime, VolatilityRegime::Low);
    }

    #[test]
    fn test_atr_expanding_range_is_high_regime() {
        let mut bars = vec![(100.0, 100.5, 99.5, 100.0, 10.0); 25];
        for bar in bars.iter_mut().skip(20) {
            *bar = (100.0, 115.0, 85.0, 100.0, 10.0);
        }
        let series = series_from_ohlcv(&bars);
        let atr = calculate_atr_default(&series).unwrap();
        assert_eq!(atr.regime, VolatilityRegime::High);
    }

    #[test]
    fn test_atr_never_negative() {
        let bars = vec![(100.0, 101.0, 99.0, 100.0, 10.0); 30];
        let series = series_from_ohlcv(&bars);
        let atr = calculate_atr_default(&series).unwrap();
        assert!(atr.value >= 0.0);
        assert!(atr.baseline >= 0.0);
    }

    #[test]
    fn test_atr_insufficient_data() {
        let series = series_from_closes(&[100.0; 14]);
        assert!(matches!(
            calculate_atr_default(&series),
            Err(IndicatorError::InsufficientData { required: 15, actual: 14 })
        ));
    }
}
