use std::str::FromStr;

/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear
/// message — the loop must never start half-configured.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub telegram_token: String,
    pub telegram_chat_id: i64,

    // Market data
    /// Display form of the trading pair, e.g. "BTC/USDT".
    pub symbol: String,
    /// Candle timeframe, e.g. "1m".
    pub timeframe: String,
    /// Candles fetched per cycle.
    pub candle_limit: u32,

    // Signal thresholds
    pub rsi_buy: f64,
    pub rsi_sell: f64,

    // Cadence
    pub cycle_interval_secs: u64,
    pub error_cooldown_secs: u64,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Config {
            telegram_token: required_env("TELEGRAM_TOKEN"),
            telegram_chat_id: required_env("TELEGRAM_CHAT_ID")
                .parse()
                .unwrap_or_else(|_| {
                    panic!("TELEGRAM_CHAT_ID must be a numeric Telegram chat id")
                }),
            symbol: optional_env("SYMBOL").unwrap_or_else(|| "BTC/USDT".to_string()),
            timeframe: optional_env("TIMEFRAME").unwrap_or_else(|| "1m".to_string()),
            candle_limit: parsed_env("CANDLE_LIMIT", 100),
            rsi_buy: parsed_env("RSI_BUY", 30.0),
            rsi_sell: parsed_env("RSI_SELL", 70.0),
            cycle_interval_secs: parsed_env("CYCLE_INTERVAL_SECS", 60),
            error_cooldown_secs: parsed_env("ERROR_COOLDOWN_SECS", 30),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parsed_env<T: FromStr>(key: &str, default: T) -> T {
    optional_env(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
