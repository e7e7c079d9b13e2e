//! Error types for the signal engine.
//!
//! Expected rejections (risk limits, cooldowns, dust quantities) are not
//! errors; they travel as [`crate::types::GateVerdict`] and
//! [`crate::types::SizingDecision`] values. The enums here cover the cases
//! where a computation cannot produce a result at all.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Sizing error: {0}")]
    Sizing(#[from] SizingError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Position sizing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizingError {
    #[error("Invalid stop distance: {distance} (must be positive)")]
    InvalidStopDistance { distance: Decimal },

    #[error("Invalid reference price: {price} (must be positive)")]
    InvalidReferencePrice { price: Decimal },
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
