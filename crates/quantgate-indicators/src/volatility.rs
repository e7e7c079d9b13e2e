//! Volatility indicators.

use quantgate_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

/// Rolling population standard deviation.
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
}

impl StdDev {
    /// Create a new standard deviation indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period }
    }
}

impl Indicator for StdDev {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        data.windows(self.period)
            .map(|window| {
                let mean: f64 = window.iter().sum::<f64>() / period_f64;
                let variance: f64 =
                    window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f64;
                variance.sqrt()
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// One row of volatility-band output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BandsOutput {
    /// Upper band (mean + multiplier * stddev)
    pub upper: f64,
    /// Middle band (rolling mean)
    pub middle: f64,
    /// Lower band (mean - multiplier * stddev)
    pub lower: f64,
    /// Position of the close inside the bands: (close - lower) / (upper - lower).
    /// 0.5 when the bands collapse to a line.
    pub position: f64,
}

/// Volatility bands around a rolling mean.
///
/// Mean ± (multiplier × rolling standard deviation) over a fixed period.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    multiplier: f64,
}

impl BollingerBands {
    /// Create bands with the given period and standard-deviation multiplier.
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(multiplier > 0.0, "Multiplier must be positive");
        Self { period, multiplier }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BandsOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BandsOutput> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        for (i, window) in data.windows(self.period).enumerate() {
            let mean: f64 = window.iter().sum::<f64>() / period_f64;
            let variance: f64 =
                window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f64;
            let std_dev = variance.sqrt();

            let upper = mean + self.multiplier * std_dev;
            let lower = mean - self.multiplier * std_dev;

            let close = data[self.period - 1 + i];
            let position = if upper != lower {
                (close - lower) / (upper - lower)
            } else {
                0.5
            };

            result.push(BandsOutput {
                upper,
                middle: mean,
                lower,
                position,
            });
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "BollingerBands"
    }
}

/// Average True Range (ATR).
///
/// Wilder-smoothed true range over OHLC data; the stop-distance input for
/// ATR-based stop rules.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate ATR from OHLC data.
    pub fn calculate_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        let len = high.len().min(low.len()).min(close.len());
        if len < self.period + 1 {
            return vec![];
        }

        let mut tr = Vec::with_capacity(len - 1);
        for i in 1..len {
            let high_low = high[i] - low[i];
            let high_close = (high[i] - close[i - 1]).abs();
            let low_close = (low[i] - close[i - 1]).abs();
            tr.push(high_low.max(high_close).max(low_close));
        }

        let period_f64 = self.period as f64;
        let mut result = Vec::with_capacity(tr.len() - self.period + 1);

        let mut atr: f64 = tr[..self.period].iter().sum::<f64>() / period_f64;
        result.push(atr);

        for &tr_val in &tr[self.period..] {
            atr = (atr * (period_f64 - 1.0) + tr_val) / period_f64;
            result.push(atr);
        }

        result
    }

    /// Minimum bars required.
    pub fn period(&self) -> usize {
        self.period + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_dev() {
        let std_dev = StdDev::new(3);
        let result = std_dev.calculate(&[2.0, 4.0, 6.0, 8.0, 10.0]);

        assert_eq!(result.len(), 3);
        // [2,4,6]: mean 4, variance 8/3
        assert!((result[0] - (8.0f64 / 3.0).sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_bands_ordering() {
        let bands = BollingerBands::default();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0)
            .collect();

        let result = bands.calculate(&data);
        assert!(!result.is_empty());

        for output in &result {
            assert!(output.upper > output.middle);
            assert!(output.middle > output.lower);
        }
    }

    #[test]
    fn test_bands_collapse_position() {
        let bands = BollingerBands::new(5, 2.0);
        let result = bands.calculate(&[100.0; 5]);

        assert_eq!(result.len(), 1);
        assert!((result[0].position - 0.5).abs() < 1e-10);
        assert!((result[0].upper - result[0].lower).abs() < 1e-10);
    }

    #[test]
    fn test_atr_positive() {
        let atr = Atr::new(3);
        let high = vec![10.0, 11.0, 12.0, 11.0, 13.0, 14.0];
        let low = vec![8.0, 9.0, 10.0, 9.0, 11.0, 12.0];
        let close = vec![9.0, 10.0, 11.0, 10.0, 12.0, 13.0];

        let result = atr.calculate_ohlc(&high, &low, &close);
        assert!(!result.is_empty());
        for value in &result {
            assert!(*value > 0.0);
        }
    }

    #[test]
    fn test_atr_insufficient_data() {
        let atr = Atr::new(14);
        let data = vec![1.0; 10];
        assert!(atr.calculate_ohlc(&data, &data, &data).is_empty());
    }
}
