//! Catalog evaluation: run every indicator against one series snapshot
//!
//! Failures are local: a failing indicator is logged and its slot left
//! absent, so one short lookback never blocks the rest of the catalog.

use tracing::debug;

use crate::indicators::error::IndicatorError;
use crate::indicators::{momentum, structure, trend, volatility, volume};
use crate::models::candle::CandleSeries;
use crate::models::indicators::IndicatorSet;

/// Grouping used by strategies and presentation to weigh related indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorCategory {
    Momentum,
    Trend,
    Volatility,
    Volume,
    Structure,
}

impl IndicatorCategory {
    pub fn all() -> [IndicatorCategory; 5] {
        [
            IndicatorCategory::Momentum,
            IndicatorCategory::Trend,
            IndicatorCategory::Volatility,
            IndicatorCategory::Volume,
            IndicatorCategory::Structure,
        ]
    }
}

/// Evaluate the full catalog with default parameters.
///
/// Fails only when the series is empty; otherwise returns a (possibly
/// partial) [`IndicatorSet`].
pub fn evaluate_all(series: &CandleSeries) -> Result<IndicatorSet, IndicatorError> {
    let last = series
        .last()
        .ok_or_else(|| IndicatorError::insufficient(1, 0))?;
    let mut set = IndicatorSet::new(
        series.symbol(),
        series.timeframe(),
        last.timestamp,
        last.close,
    );

    set.rsi = run("rsi", momentum::rsi::calculate_rsi_default(series));
    set.macd = run("macd", momentum::macd::calculate_macd_default(series));
    set.stoch_rsi = run(
        "stoch_rsi",
        momentum::stoch_rsi::calculate_stoch_rsi_default(series),
    );
    set.cci = run("cci", momentum::cci::calculate_cci_default(series));
    set.williams_r = run(
        "williams_r",
        momentum::williams_r::calculate_williams_r_default(series),
    );
    set.mfi = run("mfi", momentum::mfi::calculate_mfi_default(series));
    set.ema_ribbon = run(
        "ema_ribbon",
        trend::ema::calculate_ema_ribbon_default(series),
    );
    set.adx = run("adx", trend::adx::calculate_adx_default(series));
    set.ichimoku = run(
        "ichimoku",
        trend::ichimoku::calculate_ichimoku_default(series),
    );
    set.supertrend = run(
        "supertrend",
        trend::supertrend::calculate_supertrend_default(series),
    );
    set.atr = run("atr", volatility::atr::calculate_atr_default(series));
    set.bollinger = run(
        "bollinger",
        volatility::bollinger::calculate_bollinger_default(series),
    );
    set.vwap = run("vwap", volume::vwap::calculate_vwap(series));
    set.obv = run("obv", volume::obv::calculate_obv_default(series));
    set.pivot_points = run(
        "pivot_points",
        structure::pivot_points::calculate_pivot_points(series),
    );
    set.fibonacci = run(
        "fibonacci",
        structure::fibonacci::calculate_fibonacci(series),
    );

    Ok(set)
}

fn run<T>(name: &'static str, result: Result<T, IndicatorError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            debug!(indicator = name, %error, "indicator skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::{series_from_closes, trending_series};

    #[test]
    fn test_empty_series_is_total_failure() {
        let series = CandleSeries::new("BTCUSDT", "1h", Vec::new()).unwrap();
        assert!(matches!(
            evaluate_all(&series),
            Err(IndicatorError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_short_series_yields_partial_set() {
        // 20 candles: bollinger/cci/vwap succeed, ichimoku/ribbon cannot
        let series = series_from_closes(&[100.0; 20]);
        let set = evaluate_all(&series).unwrap();
        assert!(set.bollinger.is_some());
        assert!(set.cci.is_some());
        assert!(set.vwap.is_some());
        assert!(set.ichimoku.is_none());
        assert!(set.ema_ribbon.is_none());
    }

    #[test]
    fn test_long_series_fills_every_slot() {
        let series = trending_series(100.0, 0.5, 260);
        let set = evaluate_all(&series).unwrap();
        assert!(set.rsi.is_some());
        assert!(set.macd.is_some());
        assert!(set.stoch_rsi.is_some());
        assert!(set.cci.is_some());
        assert!(set.williams_r.is_some());
        assert!(set.mfi.is_some());
        assert!(set.ema_ribbon.is_some());
        assert!(set.adx.is_some());
        assert!(set.ichimoku.is_some());
        assert!(set.supertrend.is_some());
        assert!(set.atr.is_some());
        assert!(set.bollinger.is_some());
        assert!(set.vwap.is_some());
        assert!(set.obv.is_some());
        assert!(set.pivot_points.is_some());
        assert!(set.fibonacci.is_some());
    }

    #[test]
    fn test_set_carries_series_identity() {
        let series = series_from_closes(&[100.0; 5]);
        let set = evaluate_all(&series).unwrap();
        assert_eq!(set.symbol, "BTCUSDT");
        assert_eq!(set.timeframe, "1h");
        assert_eq!(set.price, 100.0);
    }
}
