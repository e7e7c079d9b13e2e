//! Validate configuration command.

use anyhow::Result;
use quantgate_config::load_config;
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Profile: {}", config.scoring.profile);
            println!("Max positions: {}", config.risk.max_positions);
            println!("Daily loss limit: {}", config.risk.daily_loss_limit);
            println!("Max total drawdown: {}", config.risk.max_total_drawdown);
            println!("Risk per trade: {}", config.sizing.risk_per_trade);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
