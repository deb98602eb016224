use common::{Decision, Lean, Polarity, Verdict};
use indicators::IndicatorSnapshot;

use crate::config::SignalConfig;

/// Maps each indicator's latest value to a lean and tallies the vote.
///
/// Evaluation order is fixed (RSI, MACD, EMA, Bollinger) so the lean
/// list reads the same way in every alert. An undefined indicator
/// contributes no lean at all — it is never treated as zero.
pub struct SignalAggregator {
    config: SignalConfig,
}

impl SignalAggregator {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Derive one `Decision` from a snapshot. Pure and idempotent.
    pub fn decide(&self, snapshot: &IndicatorSnapshot) -> Decision {
        let mut leans: Vec<Lean> = Vec::with_capacity(4);

        if let Some(rsi) = snapshot.rsi {
            if rsi < self.config.rsi_buy {
                leans.push(Lean::new("RSI Buy", Polarity::Buy));
            } else if rsi > self.config.rsi_sell {
                leans.push(Lean::new("RSI Sell", Polarity::Sell));
            }
        }

        if let Some(histogram) = snapshot.macd_histogram {
            if histogram > 0.0 {
                leans.push(Lean::new("MACD Buy", Polarity::Buy));
            } else if histogram < 0.0 {
                leans.push(Lean::new("MACD Sell", Polarity::Sell));
            }
        }

        if let (Some(fast), Some(slow)) = (snapshot.ema_fast, snapshot.ema_slow) {
            if fast > slow {
                leans.push(Lean::new("EMA Bullish", Polarity::Buy));
            } else if fast < slow {
                leans.push(Lean::new("EMA Bearish", Polarity::Sell));
            }
        }

        if let (Some(upper), Some(lower)) = (snapshot.bb_upper, snapshot.bb_lower) {
            if snapshot.close < lower {
                leans.push(Lean::new("BB Buy", Polarity::Buy));
            } else if snapshot.close > upper {
                leans.push(Lean::new("BB Sell", Polarity::Sell));
            }
        }

        let buys = leans.iter().filter(|l| l.polarity == Polarity::Buy).count();
        let sells = leans.iter().filter(|l| l.polarity == Polarity::Sell).count();

        let verdict = if buys >= self.config.votes_required {
            Verdict::Buy
        } else if sells >= self.config.votes_required {
            Verdict::Sell
        } else {
            Verdict::None
        };

        Decision { verdict, leans }
    }
}
