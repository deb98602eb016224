pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod snapshot;

pub use bollinger::{BollingerBands, BollingerIndicator};
pub use ema::EmaIndicator;
pub use macd::MacdIndicator;
pub use rsi::RsiIndicator;
pub use snapshot::IndicatorSnapshot;
