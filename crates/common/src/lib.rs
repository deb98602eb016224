pub mod config;
pub mod error;
pub mod market;
pub mod notify;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use market::CandleSource;
pub use notify::Notifier;
pub use types::*;
