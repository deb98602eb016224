use common::Candle;

use crate::{BollingerIndicator, EmaIndicator, MacdIndicator, RsiIndicator};

/// Default lookbacks, matching the standard parameterizations used by
/// the common TA libraries.
pub const RSI_PERIOD: usize = 14;
pub const EMA_FAST_PERIOD: usize = 9;
pub const EMA_SLOW_PERIOD: usize = 21;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BB_PERIOD: usize = 20;
pub const BB_STD_DEV: f64 = 2.0;

/// Latest value of each indicator series over one candle window.
///
/// A field is `None` when the window is shorter than that indicator's
/// minimum lookback. Undefined values are never coerced to zero; they
/// simply produce no lean downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub close: f64,
}

/// Compute the snapshot for a candle window (oldest first).
///
/// Pure function of its input; recomputed from scratch each cycle with
/// no state carried over. Returns `None` only for an empty window —
/// the scheduler reports that as malformed market data.
pub fn compute(candles: &[Candle]) -> Option<IndicatorSnapshot> {
    let last = candles.last()?;
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let bands = BollingerIndicator::new(BB_PERIOD, BB_STD_DEV).compute(&closes);

    Some(IndicatorSnapshot {
        rsi: RsiIndicator::new(RSI_PERIOD).compute(&closes),
        macd_histogram: MacdIndicator::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL)
            .histogram(&closes),
        ema_fast: EmaIndicator::new(EMA_FAST_PERIOD).compute(&closes),
        ema_slow: EmaIndicator::new(EMA_SLOW_PERIOD).compute(&closes),
        bb_upper: bands.as_ref().map(|b| b.upper),
        bb_lower: bands.as_ref().map(|b| b.lower),
        close: last.close,
    })
}
