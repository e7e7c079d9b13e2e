//! Evaluate command: replay a CSV of bars through the pipeline.

use anyhow::{Context, Result};
use quantgate_config::load_config;
use quantgate_core::types::{
    BarSeries, Instrument, RiskContext, SharedRiskContext, Timeframe,
};
use quantgate_pipeline::{PipelineOutcome, SignalPipeline};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::cli::EvaluateArgs;
use crate::data::load_bars;

pub fn run(args: EvaluateArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let timeframe = Timeframe::from_str(&args.timeframe)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Invalid --timeframe")?;
    let increment = Decimal::from_str(&args.increment).context("Invalid --increment")?;
    let capital = Decimal::try_from(args.capital).context("Invalid --capital")?;

    let mut pipeline = SignalPipeline::new(
        config.indicators.clone(),
        config.scoring.build_profile()?,
        config.stops.clone(),
        config.risk.clone(),
        config.sizing.clone(),
    )?;

    let bars = load_bars(&args.data)?;
    info!(
        count = bars.len(),
        symbol = %args.symbol,
        "loaded bars, replaying through pipeline"
    );

    let instrument = Instrument::new(&args.symbol, increment);
    let ctx = SharedRiskContext::new(RiskContext::new(capital));
    let lookback = pipeline.required_lookback();

    // Rolling window: enough history to smooth the recursive indicators
    // without rescanning the whole file on every bar.
    let mut series = BarSeries::with_capacity(args.symbol.clone(), timeframe, lookback * 4);
    let mut evaluated = 0usize;
    let mut approved = 0usize;

    for bar in bars {
        if !series.push(bar) {
            continue;
        }
        if series.len() < lookback {
            continue;
        }

        let outcome = pipeline.evaluate(&series, &instrument, &ctx)?;
        if let PipelineOutcome::Evaluated { signal, decision } = &outcome {
            evaluated += 1;
            if decision.approved {
                approved += 1;
            }

            match args.output.as_str() {
                "json" => println!("{}", serde_json::to_string(decision)?),
                _ => {
                    let at = bar.datetime().format("%Y-%m-%d %H:%M");
                    if decision.approved {
                        println!(
                            "{}  {}  {}  strength {:.2}  qty {}  stop {}  target {}",
                            at,
                            signal.symbol,
                            signal.direction,
                            signal.strength,
                            decision.quantity,
                            decision
                                .stop_loss_price
                                .map(|p| p.round_dp(4).to_string())
                                .unwrap_or_default(),
                            decision
                                .take_profit_price
                                .map(|p| p.round_dp(4).to_string())
                                .unwrap_or_default(),
                        );
                    } else if let Some(reason) = decision.rejection_reason {
                        println!(
                            "{}  {}  {}  strength {:.2}  rejected: {}",
                            at, signal.symbol, signal.direction, signal.strength, reason
                        );
                    }
                }
            }
        }
    }

    println!();
    println!(
        "Evaluated {} actionable signals, {} approved.",
        evaluated, approved
    );

    Ok(())
}
