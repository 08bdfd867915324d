//! Supertrend indicator
//!
//! ATR-banded trailing stop. Bands carry forward until price violates them;
//! the active band flips when price closes through it. BUY/SELL fire only on
//! the flip candle, otherwise HOLD.

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_multiplier, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{SupertrendIndicator, TrendDirection};
use crate::models::signal::SignalType;

pub const DEFAULT_SUPERTREND_PERIOD: u32 = 10;
pub const DEFAULT_SUPERTREND_MULTIPLIER: f64 = 3.0;

pub fn calculate_supertrend(
    series: &CandleSeries,
    period: u32,
    multiplier: f64,
) -> Result<SupertrendIndicator, IndicatorError> {
    validate_period("supertrend", period)?;
    validate_multiplier("supertrend", multiplier)?;
    let p = period as usize;
    // ATR needs p+1 candles; one more so a flip at the last candle is
    // observable
    require_len(series, p + 2)?;

    let candles = series.candles();
    let tr: Vec<f64> = candles
        .windows(2)
        .map(|pair| math::true_range(pair[1].high, pair[1].low, pair[0].close))
        .collect();
    // atr[i] applies to candle index i + period
    let atr = math::wilder_series(&tr, p);

    let mut final_upper = f64::NAN;
    let mut final_lower = f64::NAN;
    let mut direction = TrendDirection::Up;
    let mut prev_direction = TrendDirection::Up;
    let mut value = 0.0;

    for (k, atr_value) in atr.iter().enumerate() {
        let i = k + p;
        let candle = &candles[i];
        let hl2 = (candle.high + candle.low) / 2.0;
        let basic_upper = hl2 + multiplier * atr_value;
        let basic_lower = hl2 - multiplier * atr_value;
        let prev_close = candles[i - 1].close;

        if k == 0 {
            final_upper = basic_upper;
            final_lower = basic_lower;
            direction = if candle.close > basic_upper {
                TrendDirection::Up
            } else {
                TrendDirection::Down
            };
            prev_direction = direction;
        } else {
            final_upper = if basic_upper < final_upper || prev_close > final_upper {
                basic_upper
            } else {
                final_upper
            };
            final_lower = if basic_lower > final_lower || prev_close < final_lower {
                basic_lower
            } else {
                final_lower
            };
            prev_direction = direction;
            if candle.close > final_upper {
                direction = TrendDirection::Up;
            } else if candle.close < final_lower {
                direction = TrendDirection::Down;
            }
        }

        value = match direction {
            TrendDirection::Up => final_lower,
            TrendDirection::Down => final_upper,
        };
    }

    let signal = match (prev_direction, direction) {
        (TrendDirection::Down, TrendDirection::Up) => SignalType::Buy,
        (TrendDirection::Up, TrendDirection::Down) => SignalType::Sell,
        _ => SignalType::Hold,
    };

    Ok(SupertrendIndicator {
        value,
        direction,
        signal,
        period,
        multiplier,
    })
}

pub fn calculate_supertrend_default(
    series: &CandleSeries,
) -> Result<SupertrendIndicator, IndicatorError> {
    calculate_supertrend(series, DEFAULT_SUPERTREND_PERIOD, DEFAULT_SUPERTREND_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::{series_from_closes, series_from_ohlcv};

    fn ranging_then_breakout(up: bool) -> CandleSeries {
        let mut bars: Vec<(f64, f64, f64, f64, f64)> = (0..20)
            .map(|i| {
                let close = if i % 2 == 0 { 100.0 } else { 101.0 };
                (close, close + 1.0, close - 1.0, close, 10.0)
            })
            .collect();
        // a move several ATRs beyond the band forces a flip
        if up {
            for i in 0..4 {
                let c = 110.0 + 10.0 * i as f64;
                bars.push((c - 8.0, c + 1.0, c - 9.0, c, 10.0));
            }
        } else {
            for i in 0..4 {
                let c = 90.0 - 10.0 * i as f64;
                bars.push((c + 8.0, c + 1.0, c - 1.0, c, 10.0));
            }
        }
        series_from_ohlcv(&bars)
    }

    #[test]
    fn test_supertrend_uptrend_direction_up() {
        let series = ranging_then_breakout(true);
        let st = calculate_supertrend_default(&series).unwrap();
        assert_eq!(st.direction, TrendDirection::Up);
        // trailing stop sits below price in an uptrend
        assert!(st.value < 140.0);
    }

    #[test]
    fn test_supertrend_downtrend_direction_down() {
        let series = ranging_then_breakout(false);
        let st = calculate_supertrend_default(&series).unwrap();
        assert_eq!(st.direction, TrendDirection::Down);
    }

    #[test]
    fn test_supertrend_hold_inside_range() {
        let series = series_from_closes(&[100.0; 20]);
        let st = calculate_supertrend_default(&series).unwrap();
        assert_eq!(st.signal, SignalType::Hold);
    }

    #[test]
    fn test_supertrend_buy_fires_on_flip_candle() {
        // flat range, then the final candle closes far above the upper band
        let mut bars: Vec<(f64, f64, f64, f64, f64)> = (0..20)
            .map(|i| {
                let close = if i % 2 == 0 { 100.0 } else { 101.0 };
                (close, close + 1.0, close - 1.0, close, 10.0)
            })
            .collect();
        bars.push((101.0, 131.0, 100.0, 130.0, 10.0));
        let series = series_from_ohlcv(&bars);
        let st = calculate_supertrend_default(&series).unwrap();
        assert_eq!(st.direction, TrendDirection::Up);
        assert_eq!(st.signal, SignalType::Buy);
    }

    #[test]
    fn test_supertrend_rejects_bad_multiplier() {
        let series = series_from_closes(&[100.0; 20]);
        assert!(matches!(
            calculate_supertrend(&series, 10, 0.0),
            Err(IndicatorError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_supertrend_insufficient_data() {
        let series = series_from_closes(&[100.0; 11]);
        assert!(matches!(
            calculate_supertrend_default(&series),
            Err(IndicatorError::InsufficientData { required: 12, actual: 11 })
        ));
    }
}
