//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quantgate")]
#[command(author, version, about = "Signal scoring and risk-gated position sizing engine")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a CSV of bars through the signal pipeline
    Evaluate(EvaluateArgs),
    /// List the built-in scoring profiles
    Profiles,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct EvaluateArgs {
    /// OHLCV data file (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Symbol the data belongs to
    #[arg(short, long, default_value = "BTC/USDT")]
    pub symbol: String,

    /// Timeframe of the bars
    #[arg(short, long, default_value = "5m")]
    pub timeframe: String,

    /// Available capital
    #[arg(long, default_value = "10000")]
    pub capital: f64,

    /// Minimum tradable quantity increment
    #[arg(long, default_value = "0.0001")]
    pub increment: String,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}
