//! MFI (Money Flow Index) indicator
//!
//! Volume-weighted RSI analogue over typical-price money flow.

use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{require_len, validate_period};
use crate::models::candle::CandleSeries;
use crate::models::indicators::{MfiIndicator, OscillatorSignal};

pub const DEFAULT_MFI_PERIOD: u32 = 14;
pub const MFI_OVERSOLD: f64 = 20.0;
pub const MFI_OVERBOUGHT: f64 = 80.0;

pub fn calculate_mfi(series: &CandleSeries, period: u32) -> Result<MfiIndicator, IndicatorError> {
    validate_period("mfi", period)?;
    let p = period as usize;
    require_len(series, p + 1)?;

    let candles = series.candles();
    let window = &candles[candles.len() - p - 1..];
    if window.iter().all(|c| c.volume == 0.0) {
        return Err(IndicatorError::NumericDegenerate(
            "mfi window has zero cumulative volume".to_string(),
        ));
    }

    let mut positive_flow = 0.0;
    let mut negative_flow = 0.0;
    for pair in window.windows(2) {
        let prev_tp = pair[0].typical_price();
        let tp = pair[1].typical_price();
        let flow = tp * pair[1].volume;
        if tp > prev_tp {
            positive_flow += flow;
        } else if tp < prev_tp {
            negative_flow += flow;
        }
    }

    let value = if positive_flow == 0.0 && negative_flow == 0.0 {
        // volume present but typical price never moved
        50.0
    } else if negative_flow == 0.0 {
        100.0
    } else {
        let ratio = positive_flow / negative_flow;
        100.0 - (100.0 / (1.0 + ratio))
    };

    Ok(MfiIndicator {
        value,
        period,
        signal: classify_mfi(value),
    })
}

pub fn calculate_mfi_default(series: &CandleSeries) -> Result<MfiIndicator, IndicatorError> {
    calculate_mfi(series, DEFAULT_MFI_PERIOD)
}

pub fn classify_mfi(value: f64) -> OscillatorSignal {
    if value <= MFI_OVERSOLD {
        OscillatorSignal::Oversold
    } else if value >= MFI_OVERBOUGHT {
        OscillatorSignal::Overbought
    } else {
        OscillatorSignal::Neutral
    }
}
