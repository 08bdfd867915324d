//! VWAP (Volume-Weighted Average Price) indicator
//!
//! Cumulative typical-price * volume over the visible window, divided by
//! cumulative volume.

use crate::indicators::error::IndicatorError;
use crate::indicators::validation::require_len;
use crate::models::candle::CandleSeries;
use crate::models::indicators::{VwapIndicator, VwapPosition};

/// Deviation band (in percent) inside which price counts as AT_VWAP.
pub const VWAP_EPSILON_PCT: f64 = 0.1;

pub fn calculate_vwap(series: &CandleSeries) -> Result<VwapIndicator, IndicatorError> {
    require_len(series, 1)?;

    let mut pv = 0.0;
    let mut volume = 0.0;
    for candle in series.candles() {
        pv += candle.typical_price() * candle.volume;
        volume += candle.volume;
    }
    if volume == 0.0 {
        return Err(IndicatorError::NumericDegenerate(
            "vwap window has zero cumulative volume".to_string(),
        ));
    }
    let value = pv / volume;
    if value == 0.0 {
        return Err(IndicatorError::NumericDegenerate(
            "vwap is zero, deviation undefined".to_string(),
        ));
    }

    let price = series.candles()[series.len() - 1].close;
    let deviation_pct = (price - value) / value * 100.0;
    let signal = if deviation_pct > VWAP_EPSILON_PCT {
        VwapPosition::AboveVwap
    } else if deviation_pct < -VWAP_EPSILON_PCT {
        VwapPosition::BelowVwap
    } else {
        VwapPosition::AtVwap
    };

    Ok(VwapIndicator {
        value,
        deviation_pct,
        signal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::{series_from_closes, series_from_ohlcv};

    #[test]
    fn test_vwap_flat_series_at_vwap() {
        let series = series_from_closes(&[100.0; 10]);
        let vwap = calculate_vwap(&series).unwrap();
        assert_eq!(vwap.value, 100.0);
        assert_eq!(vwap.deviation_pct, 0.0);
        assert_eq!(vwap.signal, VwapPosition::AtVwap);
    }

    #[test]
    fn test_vwap_weights_by_volume() {
        let bars = vec![
            (100.0, 100.0, 100.0, 100.0, 100.0),
            (200.0, 200.0, 200.0, 200.0, 300.0),
        ];
        let series = series_from_ohlcv(&bars);
        let vwap = calculate_vwap(&series).unwrap();
        // (100*100 + 200*300) / 400
        assert!((vwap.value - 175.0).abs() < 1e-9);
        assert_eq!(vwap.signal, VwapPosition::AboveVwap);
    }

    #[test]
    fn test_vwap_below_after_selloff() {
        let mut closes = vec![100.0; 20];
        closes.push(90.0);
        let series = series_from_closes(&closes);
        let vwap = calculate_vwap(&series).unwrap();
        assert_eq!(vwap.signal, VwapPosition::BelowVwap);
    }

    #[test]
    fn test_vwap_zero_volume_is_degenerate() {
        let bars = vec![(100.0, 101.0, 99.0, 100.0, 0.0); 5];
        let series = series_from_ohlcv(&bars);
        assert!(matches!(
            calculate_vwap(&series),
            Err(IndicatorError::NumericDegenerate(_))
        ));
    }

    #[test]
    fn test_vwap_empty_series_insufficient() {
        let series = crate::models::candle::CandleSeries::new("BTCUSDT", "1h", Vec::new())
            .unwrap();
        assert!(matches!(
            calculate_vwap(&series),
            Err(IndicatorError::InsufficientData { required: 1, actual: 0 })
        ));
    }
}
