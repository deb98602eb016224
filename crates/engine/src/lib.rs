pub mod binance;
pub mod scheduler;

pub use binance::BinanceClient;
pub use scheduler::{Scheduler, SchedulerConfig};
