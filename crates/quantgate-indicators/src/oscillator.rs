//! Momentum oscillator.

use quantgate_core::traits::Indicator;

/// Relative Strength Index (RSI).
///
/// Wilder-smoothed ratio of average gains to average losses, mapped onto
/// [0, 100]. Values above ~70 read overbought, below ~30 oversold.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Wilder's smoothing: `avg = (prev_avg * (period - 1) + value) / period`,
    /// seeded by the arithmetic mean of the first `period` values.
    fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period {
            return vec![];
        }

        let period_f64 = period as f64;
        let mut result = Vec::with_capacity(values.len() - period + 1);

        let mut avg: f64 = values[..period].iter().sum::<f64>() / period_f64;
        result.push(avg);

        for &value in &values[period..] {
            avg = (avg * (period_f64 - 1.0) + value) / period_f64;
            result.push(avg);
        }

        result
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for i in 1..data.len() {
            let change = data[i] - data[i - 1];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let avg_gains = Self::wilder_smooth(&gains, self.period);
        let avg_losses = Self::wilder_smooth(&losses, self.period);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| {
                if loss == 0.0 {
                    // No losses in the window: saturated when gains exist,
                    // midpoint when the window is perfectly flat.
                    if gain == 0.0 {
                        50.0
                    } else {
                        100.0
                    }
                } else {
                    100.0 - (100.0 / (1.0 + gain / loss))
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Needs period+1 data points for period changes
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_range() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert!(!result.is_empty());
        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains_saturates() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

        assert!(!result.is_empty());
        assert!((result[0] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&[7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);

        assert!(!result.is_empty());
        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_window_reads_midpoint() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&[3.0; 8]);

        assert!(!result.is_empty());
        for value in &result {
            assert!((value - 50.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::new(14);
        assert!(rsi.calculate(&[1.0; 14]).is_empty());
    }
}
