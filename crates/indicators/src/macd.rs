use crate::ema::EmaIndicator;

/// MACD (Moving Average Convergence/Divergence) histogram.
///
/// MACD line = EMA(fast) − EMA(slow); signal = EMA(MACD line, signal
/// period); histogram = MACD line − signal. The sign of the histogram
/// tracks momentum direction.
#[derive(Debug, Clone)]
pub struct MacdIndicator {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdIndicator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(
            fast < slow,
            "MACD fast period must be less than slow period"
        );
        Self { fast, slow, signal }
    }

    /// Latest histogram value over `closes` (oldest first).
    /// Needs at least `slow + signal - 1` values; returns `None` below that.
    pub fn histogram(&self, closes: &[f64]) -> Option<f64> {
        let fast_series = EmaIndicator::new(self.fast).series(closes);
        let slow_series = EmaIndicator::new(self.slow).series(closes);
        if slow_series.is_empty() {
            return None;
        }

        // The slow EMA starts (slow - fast) entries later than the fast one
        let offset = self.slow - self.fast;
        let macd_line: Vec<f64> = fast_series[offset..]
            .iter()
            .zip(slow_series.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = EmaIndicator::new(self.signal).series(&macd_line);
        let signal = *signal_line.last()?;
        let macd = *macd_line.last()?;
        Some(macd - signal)
    }
}
