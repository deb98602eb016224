pub mod aggregator;
pub mod config;

pub use aggregator::SignalAggregator;
pub use config::SignalConfig;
