//! Candle-series builders shared by unit tests

use chrono::{DateTime, Duration, Utc};

use crate::models::candle::{Candle, CandleSeries};

pub(crate) fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// Flat-bodied candles from a list of closes, one hour apart, volume 1000.
pub(crate) fn series_from_closes(closes: &[f64]) -> CandleSeries {
    let candles = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            timestamp: base_time() + Duration::hours(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        })
        .collect();
    CandleSeries::new("BTCUSDT", "1h", candles).unwrap()
}

/// Candles from (open, high, low, close, volume) tuples, one hour apart.
pub(crate) fn series_from_ohlcv(bars: &[(f64, f64, f64, f64, f64)]) -> CandleSeries {
    let candles = bars
        .iter()
        .enumerate()
        .map(|(i, &(open, high, low, close, volume))| Candle {
            timestamp: base_time() + Duration::hours(i as i64),
            open,
            high,
            low,
            close,
            volume,
        })
        .collect();
    CandleSeries::new("BTCUSDT", "1h", candles).unwrap()
}

/// Strictly increasing closes: `start`, `start + step`, ...
pub(crate) fn trending_series(start: f64, step: f64, len: usize) -> CandleSeries {
    let closes: Vec<f64> = (0..len).map(|i| start + step * i as f64).collect();
    series_from_closes(&closes)
}
