//! Stop-price rules.

use quantgate_core::types::Direction;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How the protective stop price is derived from the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum StopRule {
    /// Volatility-sized stop: ATR × multiplier away from entry
    Atr { multiplier: Decimal },
    /// Fixed fraction of the entry price (0.02 = 2%)
    FixedPercent { percent: Decimal },
}

impl Default for StopRule {
    fn default() -> Self {
        StopRule::Atr {
            multiplier: dec!(2),
        }
    }
}

impl StopRule {
    /// Stop price for an entry in the given direction.
    ///
    /// Longs stop below the entry, shorts above. Returns `None` for flat
    /// (no position, nothing to protect).
    pub fn stop_price(&self, entry: Decimal, direction: Direction, atr: Decimal) -> Option<Decimal> {
        let offset = match self {
            StopRule::Atr { multiplier } => atr * *multiplier,
            StopRule::FixedPercent { percent } => entry * *percent,
        };
        match direction {
            Direction::Long => Some(entry - offset),
            Direction::Short => Some(entry + offset),
            Direction::Flat => None,
        }
    }
}
