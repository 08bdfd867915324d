pub mod adx;
pub mod ema;
pub mod ichimoku;
pub mod supertrend;
