//! Core data types for the signal engine.

mod decision;
mod ohlcv;
mod risk;
mod signal;
mod timeframe;

pub use decision::{GateVerdict, Instrument, RejectReason, SizingDecision};
pub use ohlcv::{Bar, BarSeries};
pub use risk::{RiskContext, SharedRiskContext};
pub use signal::{Direction, Signal};
pub use timeframe::Timeframe;
