use serde::{Deserialize, Serialize};

/// Thresholds and vote requirements for signal aggregation.
///
/// Passed in at construction — aggregation never reads ambient state,
/// so decisions are deterministic for a given snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// RSI below this leans Buy.
    pub rsi_buy: f64,
    /// RSI above this leans Sell.
    pub rsi_sell: f64,
    /// Leans of one polarity required for a BUY/SELL verdict. With four
    /// indicators and the default of 3 this is a strict majority-of-4:
    /// undefined indicators shrink the pool but never the threshold.
    pub votes_required: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            rsi_buy: 30.0,
            rsi_sell: 70.0,
            votes_required: 3,
        }
    }
}
