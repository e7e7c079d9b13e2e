//! Moving average indicators.

use quantgate_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the last N values over a sliding window.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        for i in self.period..data.len() {
            sum += data[i] - data[i - self.period];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Recurrence `ema[t] = ema[t-1] + k * (x[t] - ema[t-1])` with
/// `k = 2 / (period + 1)`, seeded by the arithmetic mean of the first
/// `period` values.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        let seed: f64 = data[..self.period].iter().sum::<f64>() / self.period as f64;
        result.push(seed);

        let mut ema = seed;
        for &value in &data[self.period..] {
            ema += self.multiplier * (value - ema);
            result.push(ema);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let result = sma.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10);
        assert!((result[1] - 3.0).abs() < 1e-10);
        assert!((result[2] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        assert!(sma.calculate(&[1.0, 2.0, 3.0]).is_empty());
    }

    #[test]
    fn test_ema_seed_is_sma() {
        let ema = Ema::new(3);
        let result = ema.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(result.len(), 3);
        // Seed: (1+2+3)/3 = 2; k = 0.5
        assert!((result[0] - 2.0).abs() < 1e-10);
        // 2 + 0.5 * (4 - 2) = 3
        assert!((result[1] - 3.0).abs() < 1e-10);
        // 3 + 0.5 * (5 - 3) = 4
        assert!((result[2] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_ema_bounded_by_window_extremes() {
        let data: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() * 8.0).collect();
        let lo = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let ema = Ema::new(12);
        for value in ema.calculate(&data) {
            assert!(value >= lo && value <= hi);
        }
    }
}
