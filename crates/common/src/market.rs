use async_trait::async_trait;

use crate::{Candle, Result};

/// Abstraction over the candle data source.
///
/// `BinanceClient` in `crates/engine` implements this for live polling;
/// tests substitute in-memory sources. Every failure from this trait is
/// retryable — the scheduler treats fetch errors as recoverable cycle
/// errors, never as fatal.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch the most recent `limit` candles for a symbol/timeframe,
    /// ordered oldest first.
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: u32,
    ) -> Result<Vec<Candle>>;
}
