//! Indicator error taxonomy

use thiserror::Error;

/// Errors reported by indicator computations and series construction.
///
/// Errors are local to the failing indicator: the catalog pass skips the
/// indicator and leaves its slot absent rather than aborting the analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// The series is shorter than the indicator's minimum lookback.
    #[error("insufficient data: {required} candles required, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Non-positive period/multiplier, or a malformed series (ordering,
    /// negative fields).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input that admits no defined sentinel value, e.g. a window with zero
    /// cumulative volume for volume-weighted indicators.
    #[error("degenerate input: {0}")]
    NumericDegenerate(String),
}

impl IndicatorError {
    pub fn insufficient(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
