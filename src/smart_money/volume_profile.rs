//! Volume-by-price histogram over the visible window

use crate::models::candle::Candle;

#[derive(Debug, Clone, Copy)]
pub(crate) struct VolumeProfile {
    pub poc: f64,
    pub value_area_high: f64,
    pub value_area_low: f64,
}

/// Buckets candles into `bins` equal price bins by typical price, weighted
/// by volume. POC is the heaviest bin (lowest bin on ties); the value area
/// grows outward from the POC one bin at a time toward whichever neighbour
/// holds more volume, until it covers `value_area_pct` of total volume.
///
/// Coverage takes precedence over tightness: when no contiguous range short
/// of the full span reaches the target (volume concentrated in a few
/// far-apart bins), the value area widens to the whole histogram.
pub(crate) fn compute(
    candles: &[Candle],
    bins: usize,
    value_area_pct: f64,
) -> Option<VolumeProfile> {
    if candles.is_empty() || bins == 0 {
        return None;
    }
    let total: f64 = candles.iter().map(|c| c.volume).sum();
    if total <= 0.0 {
        return None;
    }

    let prices: Vec<f64> = candles.iter().map(|c| c.typical_price()).collect();
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= 0.0 {
        // every trade at one price: the profile collapses to a point
        return Some(VolumeProfile {
            poc: min,
            value_area_high: min,
            value_area_low: min,
        });
    }

    let width = span / bins as f64;
    let mut histogram = vec![0.0_f64; bins];
    for (price, candle) in prices.iter().zip(candles) {
        let idx = (((price - min) / width) as usize).min(bins - 1);
        histogram[idx] += candle.volume;
    }

    let poc_idx = histogram
        .iter()
        .enumerate()
        .max_by(|(ai, av), (bi, bv)| {
            av.partial_cmp(bv)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(bi.cmp(ai))
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    let target = value_area_pct * total;
    let mut lo = poc_idx;
    let mut hi = poc_idx;
    let mut covered = histogram[poc_idx];
    while covered < target && (lo > 0 || hi + 1 < bins) {
        let below = if lo > 0 { histogram[lo - 1] } else { f64::NEG_INFINITY };
        let above = if hi + 1 < bins { histogram[hi + 1] } else { f64::NEG_INFINITY };
        if below >= above {
            lo -= 1;
            covered += below;
        } else {
            hi += 1;
            covered += above;
        }
    }

    Some(VolumeProfile {
        poc: min + (poc_idx as f64 + 0.5) * width,
        value_area_high: min + (hi as f64 + 1.0) * width,
        value_area_low: min + lo as f64 * width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::{series_from_closes, series_from_ohlcv};

    #[test]
    fn test_flat_window_collapses_to_point() {
        let series = series_from_closes(&[100.0; 20]);
        let profile = compute(series.candles(), 24, 0.70).unwrap();
        assert_eq!(profile.poc, 100.0);
        assert_eq!(profile.value_area_high, 100.0);
        assert_eq!(profile.value_area_low, 100.0);
    }

    #[test]
    fn test_poc_tracks_heaviest_price() {
        // most volume traded near 105
        let bars: Vec<(f64, f64, f64, f64, f64)> = (0..30)
            .map(|i| {
                let close = 100.0 + (i % 10) as f64;
                let volume = if close == 105.0 { 5000.0 } else { 100.0 };
                (close, close, close, close, volume)
            })
            .collect();
        let series = series_from_ohlcv(&bars);
        let profile = compute(series.candles(), 24, 0.70).unwrap();
        assert!((profile.poc - 105.0).abs() < 0.5);
        assert!(profile.value_area_low <= profile.poc);
        assert!(profile.value_area_high >= profile.poc);
    }

    #[test]
    fn test_value_area_covers_target_share() {
        let bars: Vec<(f64, f64, f64, f64, f64)> = (0..48)
            .map(|i| {
                let close = 100.0 + (i % 12) as f64;
                // bell-ish weighting around the middle of the range
                let distance = ((i % 12) as f64 - 5.5).abs();
                let volume = 1000.0 / (1.0 + distance);
                (close, close, close, close, volume)
            })
            .collect();
        let series = series_from_ohlcv(&bars);
        let candles = series.candles();
        let profile = compute(candles, 24, 0.70).unwrap();

        let total: f64 = candles.iter().map(|c| c.volume).sum();
        let inside: f64 = candles
            .iter()
            .filter(|c| {
                let tp = c.typical_price();
                tp >= profile.value_area_low && tp <= profile.value_area_high
            })
            .map(|c| c.volume)
            .sum();
        assert!(inside >= 0.70 * total);
        assert!(inside < total);
    }

    #[test]
    fn test_sparse_histogram_value_area_spans_both_clusters() {
        // volume sits in only two far-apart bins at a 60/40 split, so no
        // contiguous range short of the full span can reach 70%
        let mut bars = vec![(100.0, 100.0, 100.0, 100.0, 300.0); 2];
        bars.extend(vec![(110.0, 110.0, 110.0, 110.0, 200.0); 2]);
        let series = series_from_ohlcv(&bars);
        let profile = compute(series.candles(), 24, 0.70).unwrap();

        assert!((profile.poc - 100.0).abs() < 0.5);
        assert!((profile.value_area_low - 100.0).abs() < 1e-9);
        assert!((profile.value_area_high - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_volume_window_has_no_profile() {
        let bars = vec![(100.0, 101.0, 99.0, 100.0, 0.0); 10];
        let series = series_from_ohlcv(&bars);
        assert!(compute(series.candles(), 24, 0.70).is_none());
    }
}
