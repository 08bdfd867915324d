pub mod config;
pub mod detector;
mod volume_profile;

pub use config::SmartMoneyConfig;
pub use detector::SmartMoneyDetector;
