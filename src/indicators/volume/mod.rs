pub mod obv;
pub mod vwap;
