//! Market-analysis core: indicator catalog, consensus signals, and
//! smart-money structure detection over OHLCV candle series.
//!
//! The crate consumes a plain ordered [`CandleSeries`] and produces plain
//! result records. It owns no I/O: market-data ingestion, persistence and
//! transport are the embedding application's concern. Every entry point is
//! pure per invocation, so callers may fan out one computation per
//! (symbol, timeframe) pair without coordination.

pub mod analysis;
pub mod common;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod signals;
pub mod smart_money;
pub mod strategies;

pub use analysis::{analyze, analyze_with_registry, AnalysisConfig, MarketAnalysis, SignalRating};
pub use indicators::IndicatorError;
pub use models::candle::{Candle, CandleSeries};
pub use models::indicators::IndicatorSet;
pub use models::signal::{ConsensusResult, SignalType, StrategyResult, StrategySignal};
pub use models::smart_money::SmartMoneyReport;
pub use smart_money::{SmartMoneyConfig, SmartMoneyDetector};
pub use strategies::{Strategy, StrategyRegistry};
