/// Bollinger Bands.
///
/// Middle band = SMA(period) over the trailing window, upper/lower =
/// middle ± `std_dev` × population standard deviation.
#[derive(Debug, Clone)]
pub struct BollingerIndicator {
    pub period: usize,
    pub std_dev: f64,
}

/// Band values for the latest close.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerIndicator {
    pub fn new(period: usize, std_dev: f64) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        Self { period, std_dev }
    }

    /// Compute bands over `closes` (oldest first).
    /// Returns `None` with fewer than `period` values.
    pub fn compute(&self, closes: &[f64]) -> Option<BollingerBands> {
        if closes.len() < self.period {
            return None;
        }

        let tail = &closes[closes.len() - self.period..];
        let middle = tail.iter().sum::<f64>() / self.period as f64;
        let variance =
            tail.iter().map(|c| (c - middle).powi(2)).sum::<f64>() / self.period as f64;
        let sigma = variance.sqrt();

        Some(BollingerBands {
            upper: middle + self.std_dev * sigma,
            middle,
            lower: middle - self.std_dev * sigma,
        })
    }
}
