//! Signal scoring.
//!
//! Maps an indicator frame onto a [`quantgate_core::Signal`] by scoring
//! four independent categories (trend, momentum, mean-reversion, volume)
//! against a strategy profile's weights and thresholds. Long and short are
//! scored independently; neither side reaching the activation threshold
//! means no trade.

pub mod conditions;
pub mod profile;
pub mod scorer;

pub use conditions::CategoryScores;
pub use profile::{CategoryWeights, ProfileKind, ScoreThresholds, ScoringProfile};
pub use scorer::SignalScorer;
