/// Exponential Moving Average, seeded with the SMA of the first
/// `period` values and then updated recursively with the standard
/// smoothing factor k = 2 / (period + 1).
#[derive(Debug, Clone)]
pub struct EmaIndicator {
    pub period: usize,
}

impl EmaIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self { period }
    }

    /// Latest EMA value over `closes` (oldest first).
    /// Returns `None` with fewer than `period` values.
    pub fn compute(&self, closes: &[f64]) -> Option<f64> {
        self.series(closes).last().copied()
    }

    /// Full EMA series: entry `i` is the EMA at `closes[i + period - 1]`.
    /// Empty when there is not enough data to seed the average.
    pub fn series(&self, closes: &[f64]) -> Vec<f64> {
        if closes.len() < self.period {
            return Vec::new();
        }

        let k = 2.0 / (self.period as f64 + 1.0);
        let mut ema = closes[..self.period].iter().sum::<f64>() / self.period as f64;

        let mut out = Vec::with_capacity(closes.len() - self.period + 1);
        out.push(ema);
        for &price in &closes[self.period..] {
            ema = price * k + ema * (1.0 - k);
            out.push(ema);
        }
        out
    }
}
