//! Core types and traits for the signal engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, Timeframe)
//! - Signals and sizing decisions
//! - Risk context shared across symbol pipelines
//! - Indicator traits and the error hierarchy

pub mod error;
pub mod traits;
pub mod types;

pub use error::{EngineError, EngineResult, IndicatorError, SizingError};
pub use traits::*;
pub use types::*;
