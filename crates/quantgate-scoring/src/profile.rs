//! Strategy profiles: the closed set of scoring parameterizations.

use quantgate_core::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weight tolerance when validating that weights sum to 1.
const WEIGHT_EPSILON: f64 = 1e-9;

/// The built-in strategy profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Short-interval trading weighted toward trend plus momentum confirmation
    #[default]
    Scalping,
    /// Ride established trends, ignore band reversion almost entirely
    TrendFollowing,
    /// Fade band extremes, momentum as a filter
    MeanReversion,
}

impl ProfileKind {
    /// All built-in profile kinds.
    pub fn all() -> &'static [ProfileKind] {
        &[
            ProfileKind::Scalping,
            ProfileKind::TrendFollowing,
            ProfileKind::MeanReversion,
        ]
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProfileKind::Scalping => "scalping",
            ProfileKind::TrendFollowing => "trend_following",
            ProfileKind::MeanReversion => "mean_reversion",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ProfileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scalping" => Ok(ProfileKind::Scalping),
            "trend_following" | "trend" => Ok(ProfileKind::TrendFollowing),
            "mean_reversion" | "reversion" => Ok(ProfileKind::MeanReversion),
            _ => Err(format!("Unknown profile: {}", s)),
        }
    }
}

/// How much each scoring category contributes to the composite score.
/// Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub trend: f64,
    pub momentum: f64,
    pub mean_reversion: f64,
    pub volume: f64,
}

impl CategoryWeights {
    /// Sum of all category weights.
    pub fn sum(&self) -> f64 {
        self.trend + self.momentum + self.mean_reversion + self.volume
    }
}

/// Thresholds the scoring conditions compare against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreThresholds {
    /// Minimum composite score for a direction to activate
    pub activation: f64,
    /// RSI level above which longs stop being attractive
    pub rsi_overbought: f64,
    /// RSI level below which shorts stop being attractive
    pub rsi_oversold: f64,
    /// Band position below which the long reversion zone begins
    pub band_long_entry: f64,
    /// Band position above which the short reversion zone begins
    pub band_short_entry: f64,
    /// Volume ratio that counts as a surge
    pub volume_surge: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            activation: 0.6,
            rsi_overbought: 75.0,
            rsi_oversold: 25.0,
            band_long_entry: 0.3,
            band_short_entry: 0.7,
            volume_surge: 1.5,
        }
    }
}

/// A fully parameterized scoring profile.
///
/// Constructed once from configuration; the scorer treats it as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    /// Which built-in profile this is
    pub kind: ProfileKind,
    /// Category weights, summing to 1
    pub weights: CategoryWeights,
    /// Condition thresholds
    pub thresholds: ScoreThresholds,
    /// Minimum bars between actionable signals per symbol/timeframe
    pub min_signal_interval: u32,
}

impl ScoringProfile {
    /// The preset parameterization for a profile kind.
    pub fn for_kind(kind: ProfileKind) -> Self {
        let (weights, activation, min_signal_interval) = match kind {
            ProfileKind::Scalping => (
                CategoryWeights {
                    trend: 0.4,
                    momentum: 0.3,
                    mean_reversion: 0.2,
                    volume: 0.1,
                },
                0.6,
                3,
            ),
            ProfileKind::TrendFollowing => (
                CategoryWeights {
                    trend: 0.55,
                    momentum: 0.3,
                    mean_reversion: 0.05,
                    volume: 0.1,
                },
                0.65,
                5,
            ),
            ProfileKind::MeanReversion => (
                CategoryWeights {
                    trend: 0.1,
                    momentum: 0.25,
                    mean_reversion: 0.5,
                    volume: 0.15,
                },
                0.6,
                4,
            ),
        };

        Self {
            kind,
            weights,
            thresholds: ScoreThresholds {
                activation,
                ..Default::default()
            },
            min_signal_interval,
        }
    }

    /// Validate weights and thresholds.
    pub fn validate(&self) -> Result<(), EngineError> {
        if (self.weights.sum() - 1.0).abs() > WEIGHT_EPSILON {
            return Err(EngineError::Config(format!(
                "Category weights must sum to 1.0, got {}",
                self.weights.sum()
            )));
        }
        if !(0.0..=1.0).contains(&self.thresholds.activation) || self.thresholds.activation == 0.0 {
            return Err(EngineError::Config(format!(
                "Activation threshold must be in (0, 1], got {}",
                self.thresholds.activation
            )));
        }
        if self.thresholds.rsi_oversold >= self.thresholds.rsi_overbought {
            return Err(EngineError::Config(
                "RSI oversold level must be below the overbought level".into(),
            ));
        }
        if self.thresholds.band_long_entry >= self.thresholds.band_short_entry {
            return Err(EngineError::Config(
                "Band long-entry zone must be below the short-entry zone".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::for_kind(ProfileKind::Scalping)
    }
}
