pub mod error;
pub mod registry;
pub mod validation;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use error::IndicatorError;
pub use registry::{evaluate_all, IndicatorCategory};
