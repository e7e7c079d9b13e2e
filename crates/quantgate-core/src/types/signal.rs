//! Trading signals produced by the scorer.

use serde::{Deserialize, Serialize};

use super::Timeframe;

/// Trade direction of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
    #[default]
    Flat,
}

impl Direction {
    /// Check if this is an actionable (non-flat) direction.
    #[inline]
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Direction::Flat)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
            Direction::Flat => write!(f, "FLAT"),
        }
    }
}

/// A scored trading signal for one symbol/timeframe at one bar.
///
/// Created by the scorer from a single indicator-frame snapshot, consumed
/// once by the risk gate, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Symbol the signal applies to
    pub symbol: String,
    /// Timeframe the signal was scored on
    pub timeframe: Timeframe,
    /// Trade direction
    pub direction: Direction,
    /// Confidence of the winning side in [0, 1]; 0 for flat
    pub strength: f64,
    /// Close price of the bar that produced the signal
    pub reference_price: f64,
    /// Timestamp of the bar that produced the signal (unix ms)
    pub generated_at: i64,
    /// Composite long score in [0, 1]
    pub long_score: f64,
    /// Composite short score in [0, 1]
    pub short_score: f64,
}

impl Signal {
    /// Create a flat (no-trade) signal, retaining the scores for diagnostics.
    pub fn flat(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        reference_price: f64,
        generated_at: i64,
        long_score: f64,
        short_score: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            direction: Direction::Flat,
            strength: 0.0,
            reference_price,
            generated_at,
            long_score,
            short_score,
        }
    }

    /// Check if the signal calls for a trade.
    #[inline]
    pub fn is_actionable(&self) -> bool {
        self.direction.is_actionable()
    }
}
