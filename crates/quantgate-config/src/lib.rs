//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, LoggingConfig, ScoringSettings};

use config::{Config, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Load configuration from a TOML file layered with environment overrides.
///
/// Environment variables use the `QUANTGATE` prefix with `__` separators,
/// e.g. `QUANTGATE__RISK__MAX_POSITIONS=3`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("QUANTGATE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}
