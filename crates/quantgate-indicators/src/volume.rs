//! Volume indicators.

use quantgate_core::traits::Indicator;

/// Ratio of current volume to its rolling mean.
///
/// Values above 1 mean above-average participation; a surge past ~1.5
/// typically confirms a move. Defined as 1.0 when the rolling mean is zero
/// (dead market, nothing to compare against).
#[derive(Debug, Clone)]
pub struct VolumeRatio {
    period: usize,
}

impl VolumeRatio {
    /// Create a new volume ratio with the given averaging period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for VolumeRatio {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        let ratio = |sum: f64, current: f64| {
            let mean = sum / period_f64;
            if mean == 0.0 {
                1.0
            } else {
                current / mean
            }
        };

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(ratio(sum, data[self.period - 1]));

        for i in self.period..data.len() {
            sum += data[i] - data[i - self.period];
            result.push(ratio(sum, data[i]));
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "VolumeRatio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_ratio() {
        let ratio = VolumeRatio::new(3);
        let result = ratio.calculate(&[100.0, 100.0, 100.0, 400.0]);

        assert_eq!(result.len(), 2);
        // Flat volume: ratio 1
        assert!((result[0] - 1.0).abs() < 1e-10);
        // 400 against mean (100+100+400)/3 = 200
        assert!((result[1] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_volume_ratio_zero_mean() {
        let ratio = VolumeRatio::new(3);
        let result = ratio.calculate(&[0.0, 0.0, 0.0]);

        assert_eq!(result.len(), 1);
        assert!((result[0] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_volume_ratio_insufficient_data() {
        let ratio = VolumeRatio::new(20);
        assert!(ratio.calculate(&[1.0; 19]).is_empty());
    }
}
