use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use tracing::debug;

use common::{Candle, CandleSource, Error, Result};

const BASE_URL: &str = "https://api.binance.com";

/// Upper bound on a single klines request. The inter-cycle cadence is
/// handled by the scheduler; this only keeps a hung exchange call from
/// stalling a cycle forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for Binance spot market data. Klines are a public
/// endpoint — no credentials or request signing involved.
pub struct BinanceClient {
    base_url: String,
    http: Client,
}

impl BinanceClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client at a different host (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::builder()
                .use_rustls_tls()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

/// "BTC/USDT" → "BTCUSDT". Binance spells pairs without the slash.
fn api_symbol(symbol: &str) -> String {
    symbol.replace('/', "")
}

#[async_trait]
impl CandleSource for BinanceClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: u32,
    ) -> Result<Vec<Candle>> {
        let url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base_url,
            api_symbol(symbol),
            timeframe,
            limit
        );

        debug!(symbol = %symbol, timeframe = %timeframe, limit, "Fetching klines");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::Exchange(format!("HTTP {status}: {body}")));
        }

        let klines: Vec<Kline> =
            serde_json::from_str(&body).map_err(|e| Error::Market(e.to_string()))?;

        klines.into_iter().map(parse_kline).collect()
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

/// One kline row as Binance returns it: open time in ms, OHLCV as
/// decimal strings, close time, then quote-volume/trade-count fields
/// we don't use.
type Kline = (
    i64,
    String,
    String,
    String,
    String,
    String,
    i64,
    String,
    u64,
    String,
    String,
    String,
);

fn parse_kline(kline: Kline) -> Result<Candle> {
    let (open_time, open, high, low, close, volume, ..) = kline;

    let timestamp = Utc
        .timestamp_millis_opt(open_time)
        .single()
        .ok_or_else(|| Error::Market(format!("invalid kline timestamp {open_time}")))?;

    Ok(Candle {
        timestamp,
        open: parse_field(&open, "open")?,
        high: parse_field(&high, "high")?,
        low: parse_field(&low, "low")?,
        close: parse_field(&close, "close")?,
        volume: parse_field(&volume, "volume")?,
    })
}

fn parse_field(value: &str, field: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| Error::Market(format!("invalid {field} value '{value}'")))
}
