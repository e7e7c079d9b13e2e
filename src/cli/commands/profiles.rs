//! List profiles command.

use anyhow::Result;
use quantgate_scoring::{ProfileKind, ScoringProfile};

pub fn run() -> Result<()> {
    println!("Available Scoring Profiles");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for &kind in ProfileKind::all() {
        let profile = ScoringProfile::for_kind(kind);
        println!("  {}", kind);
        println!("  ───────────────────────────────────────────────────────");
        println!(
            "  weights: trend {:.2}, momentum {:.2}, reversion {:.2}, volume {:.2}",
            profile.weights.trend,
            profile.weights.momentum,
            profile.weights.mean_reversion,
            profile.weights.volume,
        );
        println!(
            "  activation {:.2}, min signal interval {} bars",
            profile.thresholds.activation, profile.min_signal_interval
        );
        println!();
    }

    println!("Select one with `profile = \"<name>\"` in the [scoring] section.");

    Ok(())
}
