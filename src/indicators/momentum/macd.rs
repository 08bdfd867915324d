//! MACD (Moving Average Convergence Divergence) indicator
//!
//! MACD line = EMA(fast) - EMA(slow); signal line = EMA of the MACD line;
//! histogram = MACD - signal.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{MacdIndicator, TrendSignal};

pub const DEFAULT_MACD_FAST: u32 = 12;
pub const DEFAULT_MACD_SLOW: u32 = 26;
pub const DEFAULT_MACD_SIGNAL: u32 = 9;

pub fn calculate_macd(
    series: &CandleSeries,
    fast: u32,
    slow: u32,
    signal_period: u32,
) -> Result<MacdIndicator, IndicatorError> {
    validate_period("macd fast", fast)?;
    validate_period("macd slow", slow)?;
    validate_period("macd signal", signal_period)?;
    if fast >= slow {
        return Err(IndicatorError::InvalidParameter(format!(
            "macd fast period {fast} must be below slow period {slow}"
        )));
    }
    // slow + signal candles give two histogram points, enough to judge
    // whether the histogram is rising or falling
    let required = (slow + signal_period) as usize;
    require_len(series, required)?;

    let closes = series.closes();
    let ema_fast = math::ema_series(&closes, fast as usize);
    let ema_slow = math::ema_series(&closes, slow as usize);

    let offset = (slow - fast) as usize;
    let macd_line: Vec<f64> = ema_slow
        .iter()
        .enumerate()
        .map(|(i, slow_v)| ema_fast[i + offset] - slow_v)
        .collect();

    let signal_line = math::ema_series(&macd_line, signal_period as usize);
    let macd = macd_line[macd_line.len() - 1];
    let signal = signal_line[signal_line.len() - 1];
    let histogram = macd - signal;

    let prev_macd = macd_line[macd_line.len() - 2];
    let prev_signal = signal_line[signal_line.len() - 2];
    let prev_histogram = prev_macd - prev_signal;

    // primary read: histogram momentum. A steady linear trend settles both
    // EMAs into a constant gap with a zero histogram, so when neither
    // histogram clause fires the MACD line's own sign decides.
    let trend = if histogram > 0.0 && histogram > prev_histogram {
        TrendSignal::Bullish
    } else if histogram < 0.0 && histogram < prev_histogram {
        TrendSignal::Bearish
    } else if macd > 0.0 {
        TrendSignal::Bullish
    } else if macd < 0.0 {
        TrendSignal::Bearish
    } else {
        TrendSignal::Neutral
    };

    Ok(MacdIndicator {
        macd,
        signal,
        histogram,
        trend,
    })
}

pub fn calculate_macd_default(series: &CandleSeries) -> Result<MacdIndicator, IndicatorError> {
    calculate_macd(series, DEFAULT_MACD_FAST, DEFAULT_MACD_SLOW, DEFAULT_MACD_SIGNAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::{series_from_closes, trending_series};

    #[test]
    fn test_macd_flat_series_is_zero_neutral() {
        let series = series_from_closes(&[100.0; 40]);
        let macd = calculate_macd_default(&series).unwrap();
        assert!(macd.macd.abs() < 1e-9);
        assert!(macd.histogram.abs() < 1e-9);
        assert_eq!(macd.trend, TrendSignal::Neutral);
    }

    #[test]
    fn test_macd_bullish_on_steady_uptrend() {
        let series = trending_series(100.0, 1.0, 60);
        let macd = calculate_macd_default(&series).unwrap();
        // linear trend: fast EMA leads the slow by a constant gap
        assert!(macd.macd > 0.0);
        assert_eq!(macd.trend, TrendSignal::Bullish);
    }

    #[test]
    fn test_macd_bearish_on_accelerating_downtrend() {
        let closes: Vec<f64> =
            (0..60).map(|i| 1000.0 - 0.002 * (i as f64).powi(3)).collect();
        let series = series_from_closes(&closes);
        let macd = calculate_macd_default(&series).unwrap();
        assert!(macd.histogram < 0.0);
        assert_eq!(macd.trend, TrendSignal::Bearish);
    }

    #[test]
    fn test_macd_bullish_on_accelerating_uptrend() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 * 1.03f64.powi(i)).collect();
        let series = series_from_closes(&closes);
        let macd = calculate_macd_default(&series).unwrap();
        assert!(macd.histogram > 0.0);
        assert_eq!(macd.trend, TrendSignal::Bullish);
    }

    #[test]
    fn test_macd_rejects_fast_not_below_slow() {
        let series = series_from_closes(&[100.0; 40]);
        assert!(matches!(
            calculate_macd(&series, 26, 26, 9),
            Err(IndicatorError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_macd_insufficient_data() {
        let series = series_from_closes(&[100.0; 34]);
        assert!(matches!(
            calculate_macd_default(&series),
            Err(IndicatorError::InsufficientData { required: 35, .. })
        ));
    }
}
