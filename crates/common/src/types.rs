use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One closed OHLCV interval from the exchange.
///
/// Candle windows are ordered oldest-first and refreshed wholesale each
/// cycle — never incrementally updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Direction of a single indicator lean.
///
/// Tagged explicitly when the lean is created. Vote counting works on
/// this tag only and never inspects label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Polarity {
    Buy,
    Sell,
}

/// A single indicator's directional opinion for one cycle, carrying the
/// human-readable label used in alerts (e.g. "RSI Buy", "EMA Bearish").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lean {
    pub label: &'static str,
    pub polarity: Polarity,
}

impl Lean {
    pub const fn new(label: &'static str, polarity: Polarity) -> Self {
        Self { label, polarity }
    }
}

/// Aggregated outcome of one cycle's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Buy,
    Sell,
    None,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Buy => write!(f, "BUY"),
            Verdict::Sell => write!(f, "SELL"),
            Verdict::None => write!(f, "NONE"),
        }
    }
}

/// One cycle's verdict plus every lean produced, in fixed evaluation
/// order (RSI, MACD, EMA, Bollinger). The lean list is kept regardless
/// of the verdict so reports can show how close the vote was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub leans: Vec<Lean>,
}

impl Decision {
    pub fn labels(&self) -> Vec<&'static str> {
        self.leans.iter().map(|l| l.label).collect()
    }
}

/// Outbound alert payload. Built once per qualifying cycle and consumed
/// once by the notifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub symbol: String,
    pub verdict: Verdict,
    pub price: f64,
    pub leans: Vec<Lean>,
    pub timestamp: DateTime<Utc>,
}
