//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for technical indicators.
///
/// Indicators process price or volume data and produce derived values
/// aligned with the tail of the input.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// Returns one value per input window; empty when the data is shorter
    /// than [`period`](Self::period).
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Multi-output indicator (e.g., volatility bands).
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}
