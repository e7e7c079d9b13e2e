//! Risk management for the signal engine.
//!
//! The gate validates signals against account-wide limits and degrades
//! gracefully near them; the sizer turns approved signals into bounded
//! order quantities; stop rules derive the protective prices both rely on.

mod gate;
mod sizer;
mod stops;

pub use gate::{RiskGate, RiskLimits};
pub use sizer::{PositionSizer, SizerConfig};
pub use stops::StopRule;
