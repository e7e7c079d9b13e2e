//! Configuration structures.
//!
//! Domain config types (indicator periods, risk limits, sizing, stop rule)
//! are embedded directly so a TOML file maps one-to-one onto what the
//! pipeline stages consume.

use quantgate_indicators::IndicatorConfig;
use quantgate_risk::{RiskLimits, SizerConfig, StopRule};
use quantgate_scoring::{ProfileKind, ScoringProfile};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub logging: LoggingConfig,
    pub indicators: IndicatorConfig,
    pub scoring: ScoringSettings,
    pub risk: RiskLimits,
    pub sizing: SizerConfig,
    pub stops: StopRule,
}

impl AppConfig {
    /// Validate the cross-field constraints the serde layer cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.scoring.build_profile()?;
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "quantgate".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Scoring profile selection with optional overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringSettings {
    /// Which built-in profile to run
    pub profile: ProfileKind,
    /// Override the profile's activation threshold
    pub activation_threshold: Option<f64>,
    /// Override the profile's minimum signal interval (bars)
    pub min_signal_interval: Option<u32>,
}

impl ScoringSettings {
    /// Expand into a validated [`ScoringProfile`].
    pub fn build_profile(&self) -> Result<ScoringProfile, ConfigError> {
        let mut profile = ScoringProfile::for_kind(self.profile);
        if let Some(activation) = self.activation_threshold {
            profile.thresholds.activation = activation;
        }
        if let Some(interval) = self.min_signal_interval {
            profile.min_signal_interval = interval;
        }
        profile
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(profile)
    }
}
