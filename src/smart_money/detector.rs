//! Single-pass structural scanner
//!
//! Walks the series once, front to back. Swings are confirmed with a
//! two-sided window, so every downstream event (sweep, CHoCH, BoS) reacts
//! only to extremes that survived `swing_confirmation` candles of follow-up.
//! The pass is inherently ordered and must not be parallelized.

use tracing::debug;

use crate::common::math::{true_range, wilder_series};
use crate::models::candle::{Candle, CandleSeries};
use crate::models::smart_money::{
    FairValueGap, LiquiditySweep, OrderBlock, SmartMoneyReport, StructuralBias,
    StructureChange, StructureChangeType,
};
use crate::smart_money::config::SmartMoneyConfig;
use crate::smart_money::volume_profile;

/// Order blocks look this many candles back from the impulse for the last
/// opposite-colored candle.
const ORDER_BLOCK_LOOKBACK: usize = 3;

/// Scales impulse-range-over-ATR into the [0, 100] strength band. A clean
/// 4x-ATR impulse saturates at 100.
const STRENGTH_PER_ATR: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwingSide {
    High,
    Low,
}

/// A close beyond a confirmed swing. Held for one candle: if the next close
/// returns inside, the excursion was a sweep, otherwise a structure break.
#[derive(Debug, Clone, Copy)]
struct PendingBreak {
    index: usize,
    price: f64,
    side: SwingSide,
}

pub struct SmartMoneyDetector {
    config: SmartMoneyConfig,
}

impl Default for SmartMoneyDetector {
    fn default() -> Self {
        Self::new(SmartMoneyConfig::default())
    }
}

impl SmartMoneyDetector {
    pub fn new(config: SmartMoneyConfig) -> Self {
        Self { config }
    }

    /// Best-effort: histories too short to confirm a single swing yield an
    /// empty report, never an error.
    pub fn detect(&self, series: &CandleSeries) -> SmartMoneyReport {
        let candles = series.candles();
        if candles.len() < self.config.min_window() {
            debug!(
                candles = candles.len(),
                min_window = self.config.min_window(),
                "history too short for structure detection"
            );
            return SmartMoneyReport::default();
        }

        let mut pass = DetectorPass::new(&self.config, candles);
        for i in 0..candles.len() {
            pass.step(i);
        }
        let mut report = pass.finish();

        if let Some(profile) = volume_profile::compute(
            candles,
            self.config.profile_bins,
            self.config.value_area_pct,
        ) {
            report.poc = Some(profile.poc);
            report.value_area_high = Some(profile.value_area_high);
            report.value_area_low = Some(profile.value_area_low);
        }

        debug!(
            order_blocks = report.order_blocks.len(),
            fair_value_gaps = report.fair_value_gaps.len(),
            liquidity_sweeps = report.liquidity_sweeps.len(),
            structure_change = report.structure_change.is_some(),
            "structure pass complete"
        );
        report
    }
}

struct DetectorPass<'a> {
    config: &'a SmartMoneyConfig,
    candles: &'a [Candle],
    /// Wilder ATR aligned so `atr[i - atr_period]` covers candles `1..=i`.
    atr: Vec<f64>,
    swing_high: Option<(usize, f64)>,
    swing_low: Option<(usize, f64)>,
    pending: Option<PendingBreak>,
    trend: Option<StructuralBias>,
    last_block_index: Option<usize>,
    report: SmartMoneyReport,
}

impl<'a> DetectorPass<'a> {
    fn new(config: &'a SmartMoneyConfig, candles: &'a [Candle]) -> Self {
        let tr: Vec<f64> = candles
            .windows(2)
            .map(|pair| true_range(pair[1].high, pair[1].low, pair[0].close))
            .collect();
        Self {
            config,
            candles,
            atr: wilder_series(&tr, config.atr_period),
            swing_high: None,
            swing_low: None,
            pending: None,
            trend: None,
            last_block_index: None,
            report: SmartMoneyReport::default(),
        }
    }

    fn step(&mut self, i: usize) {
        self.resolve_pending(i);
        self.confirm_swings(i);
        self.check_liquidity(i);
        self.check_fair_value_gap(i);
        self.check_order_block(i);
    }

    fn finish(mut self) -> SmartMoneyReport {
        // an unresolved excursion at stream end never closed back: a break
        if let Some(pending) = self.pending.take() {
            self.record_break(pending);
        }
        self.report
    }

    /// ATR through candle `i`, once enough true ranges have accumulated.
    fn atr_at(&self, i: usize) -> Option<f64> {
        i.checked_sub(self.config.atr_period)
            .and_then(|idx| self.atr.get(idx))
            .copied()
    }

    /// A candle that closed beyond a swing gets one candle of grace: a close
    /// back inside reclassifies the excursion as a sweep.
    fn resolve_pending(&mut self, i: usize) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let close = self.candles[i].close;
        let closed_back = match pending.side {
            SwingSide::High => close <= pending.price,
            SwingSide::Low => close >= pending.price,
        };
        if closed_back {
            self.record_sweep(pending.index, pending.price, pending.side);
        } else {
            self.record_break(pending);
        }
    }

    /// Two-sided fractal: the candle `swing_confirmation` back is a swing
    /// when nothing on either side of it exceeded its extreme.
    fn confirm_swings(&mut self, i: usize) {
        let w = self.config.swing_confirmation;
        let Some(j) = i.checked_sub(w) else { return };
        if j < w {
            return;
        }

        let candidate = &self.candles[j];
        let around = self.candles[j - w..j].iter().chain(&self.candles[j + 1..=i]);
        let mut is_high = true;
        let mut is_low = true;
        for candle in around {
            if candle.high >= candidate.high {
                is_high = false;
            }
            if candle.low <= candidate.low {
                is_low = false;
            }
        }
        if is_high {
            self.swing_high = Some((j, candidate.high));
        }
        if is_low {
            self.swing_low = Some((j, candidate.low));
        }
    }

    fn check_liquidity(&mut self, i: usize) {
        let candle = &self.candles[i];

        if let Some((_, price)) = self.swing_high {
            if candle.high > price {
                if candle.close <= price {
                    self.record_sweep(i, price, SwingSide::High);
                } else {
                    self.pending = Some(PendingBreak {
                        index: i,
                        price,
                        side: SwingSide::High,
                    });
                    self.swing_high = None;
                }
            }
        }
        if let Some((_, price)) = self.swing_low {
            if candle.low < price {
                if candle.close >= price {
                    self.record_sweep(i, price, SwingSide::Low);
                } else {
                    self.pending = Some(PendingBreak {
                        index: i,
                        price,
                        side: SwingSide::Low,
                    });
                    self.swing_low = None;
                }
            }
        }
    }

    fn record_sweep(&mut self, index: usize, price: f64, side: SwingSide) {
        // a raided swing high traps breakout buyers: bearish implication
        let sweep_type = match side {
            SwingSide::High => StructuralBias::Bearish,
            SwingSide::Low => StructuralBias::Bullish,
        };
        self.report.liquidity_sweeps.push(LiquiditySweep {
            time: self.candles[index].timestamp,
            price,
            sweep_type,
        });
        match side {
            SwingSide::High => self.swing_high = None,
            SwingSide::Low => self.swing_low = None,
        }
    }

    fn record_break(&mut self, pending: PendingBreak) {
        let direction = match pending.side {
            SwingSide::High => StructuralBias::Bullish,
            SwingSide::Low => StructuralBias::Bearish,
        };
        let change_type = match self.trend {
            Some(prevailing) if prevailing != direction => StructureChangeType::Choch,
            _ => StructureChangeType::Bos,
        };
        self.trend = Some(direction);
        self.report.structure_change = Some(StructureChange {
            time: self.candles[pending.index].timestamp,
            change_type,
            direction,
        });
    }

    fn check_fair_value_gap(&mut self, i: usize) {
        if i < 2 {
            return;
        }
        let first = &self.candles[i - 2];
        let middle = &self.candles[i - 1];
        let third = &self.candles[i];
        if first.high < third.low {
            self.report.fair_value_gaps.push(FairValueGap {
                time: middle.timestamp,
                low: first.high,
                high: third.low,
                gap_type: StructuralBias::Bullish,
            });
        } else if first.low > third.high {
            self.report.fair_value_gaps.push(FairValueGap {
                time: middle.timestamp,
                low: third.high,
                high: first.low,
                gap_type: StructuralBias::Bearish,
            });
        }
    }

    fn check_order_block(&mut self, i: usize) {
        let Some(atr) = (i.checked_sub(1)).and_then(|prev| self.atr_at(prev)) else {
            return;
        };
        if atr <= 0.0 {
            return;
        }
        let impulse = &self.candles[i];
        let range = impulse.range();
        if range < self.config.impulse_atr_mult * atr {
            return;
        }

        let bullish = impulse.is_bullish();
        let start = i.saturating_sub(ORDER_BLOCK_LOOKBACK);
        let origin = self.candles[start..i]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, c)| if bullish { c.is_bearish() } else { c.is_bullish() })
            .map(|(offset, c)| (start + offset, c));
        let Some((index, origin)) = origin else {
            return;
        };
        if self.last_block_index == Some(index) {
            return;
        }
        self.last_block_index = Some(index);

        self.report.order_blocks.push(OrderBlock {
            time: origin.timestamp,
            low: origin.low,
            high: origin.high,
            block_type: if bullish {
                StructuralBias::Bullish
            } else {
                StructuralBias::Bearish
            },
            strength: (range / atr * STRENGTH_PER_ATR).min(100.0),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fixtures::{series_from_closes, series_from_ohlcv};

    fn flat_bar(price: f64) -> (f64, f64, f64, f64, f64) {
        (price, price + 1.0, price - 1.0, price, 1000.0)
    }

    #[test]
    fn test_short_history_is_empty_report() {
        let series = series_from_closes(&[100.0; 5]);
        let report = SmartMoneyDetector::default().detect(&series);
        assert!(report.is_empty());
    }

    #[test]
    fn test_flat_history_emits_only_profile() {
        let series = series_from_closes(&[100.0; 30]);
        let report = SmartMoneyDetector::default().detect(&series);
        assert!(report.order_blocks.is_empty());
        assert!(report.fair_value_gaps.is_empty());
        assert!(report.liquidity_sweeps.is_empty());
        assert!(report.structure_change.is_none());
        assert_eq!(report.poc, Some(100.0));
    }

    #[test]
    fn test_down_wick_through_swing_low_is_bullish_sweep() {
        // a clear swing low at 95, quiet follow-up, then one candle wicks
        // 2% below it and closes back above
        let mut bars = vec![
            flat_bar(100.0),
            flat_bar(99.0),
            flat_bar(98.0),
            (97.0, 98.0, 95.0, 97.0, 1000.0),
            flat_bar(98.0),
            flat_bar(99.0),
            flat_bar(100.0),
            flat_bar(100.0),
            flat_bar(100.0),
        ];
        bars.push((100.0, 100.5, 93.1, 99.0, 1500.0));
        bars.push(flat_bar(99.0));
        let series = series_from_ohlcv(&bars);
        let report = SmartMoneyDetector::default().detect(&series);

        assert_eq!(report.liquidity_sweeps.len(), 1);
        let sweep = &report.liquidity_sweeps[0];
        assert_eq!(sweep.price, 95.0);
        assert_eq!(sweep.sweep_type, StructuralBias::Bullish);
        assert!(report.structure_change.is_none());
    }

    #[test]
    fn test_close_beyond_swing_high_is_structure_break() {
        let mut bars = vec![
            flat_bar(100.0),
            flat_bar(101.0),
            flat_bar(102.0),
            (103.0, 105.0, 102.0, 103.0, 1000.0),
            flat_bar(102.0),
            flat_bar(101.0),
            flat_bar(100.0),
            flat_bar(100.0),
            flat_bar(100.0),
        ];
        // closes above the 105 swing high and stays there
        bars.push((100.0, 106.5, 99.5, 106.0, 1500.0));
        bars.push((106.0, 107.5, 105.5, 107.0, 1200.0));
        let series = series_from_ohlcv(&bars);
        let report = SmartMoneyDetector::default().detect(&series);

        assert!(report.liquidity_sweeps.is_empty());
        let change = report.structure_change.expect("break should be recorded");
        assert_eq!(change.change_type, StructureChangeType::Bos);
        assert_eq!(change.direction, StructuralBias::Bullish);
    }

    #[test]
    fn test_break_against_prior_trend_is_choch() {
        let mut bars = vec![
            flat_bar(100.0),
            flat_bar(101.0),
            flat_bar(102.0),
            (103.0, 105.0, 102.0, 103.0, 1000.0),
            flat_bar(102.8),
            flat_bar(102.9),
            flat_bar(103.0),
        ];
        // bullish break of the 105 swing high
        bars.push((103.0, 106.5, 102.8, 106.0, 1500.0));
        bars.push((106.0, 107.0, 105.5, 106.5, 1200.0));
        bars.push((106.5, 107.2, 105.2, 106.2, 1000.0));
        bars.push((106.2, 107.4, 105.4, 106.4, 1000.0));
        // pullback low at 104.2, held on both sides long enough to confirm
        bars.push((106.4, 106.9, 104.2, 106.2, 1000.0));
        bars.push((106.2, 106.6, 105.0, 106.0, 900.0));
        bars.push((106.0, 106.7, 105.1, 106.1, 900.0));
        bars.push((106.1, 106.8, 105.2, 106.2, 900.0));
        // close decisively below the swing low and stay there
        bars.push((106.0, 106.2, 103.0, 103.2, 1800.0));
        bars.push((103.2, 103.5, 102.0, 102.5, 1500.0));
        let series = series_from_ohlcv(&bars);
        let report = SmartMoneyDetector::default().detect(&series);

        let change = report.structure_change.expect("reversal should be recorded");
        assert_eq!(change.change_type, StructureChangeType::Choch);
        assert_eq!(change.direction, StructuralBias::Bearish);
    }

    #[test]
    fn test_overlapping_triples_emit_no_gap() {
        // every consecutive triple overlaps: ranges always share price
        let bars: Vec<(f64, f64, f64, f64, f64)> = (0..20)
            .map(|i| {
                let close = 100.0 + i as f64 * 0.5;
                (close - 0.25, close + 2.0, close - 2.0, close, 1000.0)
            })
            .collect();
        let series = series_from_ohlcv(&bars);
        let report = SmartMoneyDetector::default().detect(&series);
        assert!(report.fair_value_gaps.is_empty());
    }

    #[test]
    fn test_gap_up_triple_emits_bullish_fvg() {
        let mut bars = vec![flat_bar(100.0); 8];
        bars.push((101.0, 104.0, 101.0, 104.0, 2000.0));
        bars.push((105.0, 108.0, 104.5, 107.5, 2000.0));
        let series = series_from_ohlcv(&bars);
        let report = SmartMoneyDetector::default().detect(&series);

        let gap = report
            .fair_value_gaps
            .iter()
            .find(|g| g.gap_type == StructuralBias::Bullish)
            .expect("gap between 101 and 104.5 should be detected");
        assert_eq!(gap.low, 101.0);
        assert_eq!(gap.high, 104.5);
    }

    #[test]
    fn test_impulse_tags_last_opposite_candle() {
        // quiet tape, one red candle, then a violent green impulse
        let mut bars = vec![flat_bar(100.0); 20];
        bars.push((100.0, 100.5, 99.0, 99.2, 1000.0));
        bars.push((99.2, 112.0, 99.0, 111.5, 5000.0));
        let series = series_from_ohlcv(&bars);
        let report = SmartMoneyDetector::default().detect(&series);

        assert_eq!(report.order_blocks.len(), 1);
        let block = &report.order_blocks[0];
        assert_eq!(block.block_type, StructuralBias::Bullish);
        assert_eq!(block.low, 99.0);
        assert_eq!(block.high, 100.5);
        assert!(block.strength > 0.0);
        assert!(block.strength <= 100.0);
    }

    #[test]
    fn test_quiet_tape_has_no_order_blocks() {
        let bars: Vec<(f64, f64, f64, f64, f64)> = (0..30)
            .map(|i| {
                let close = 100.0 + (i % 2) as f64 * 0.2;
                (close, close + 0.5, close - 0.5, close, 1000.0)
            })
            .collect();
        let series = series_from_ohlcv(&bars);
        let report = SmartMoneyDetector::default().detect(&series);
        assert!(report.order_blocks.is_empty());
    }
}
