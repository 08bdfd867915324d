pub mod cci;
pub mod macd;
pub mod mfi;
pub mod rsi;
pub mod stoch_rsi;
pub mod williams_r;
