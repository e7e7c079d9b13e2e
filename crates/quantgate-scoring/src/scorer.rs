//! The signal scorer.

use std::collections::HashMap;

use quantgate_core::types::{BarSeries, Direction, Signal, Timeframe};
use quantgate_indicators::IndicatorFrame;
use tracing::debug;

use crate::conditions::{long_scores, short_scores};
use crate::profile::ScoringProfile;

/// Scores indicator frames into signals.
///
/// Stateful: tracks the bar timestamp of the last actionable signal per
/// (symbol, timeframe) so a fresh signal inside the profile's minimum
/// interval is coerced to flat. Re-scoring the identical bar is a retry,
/// not a new signal, and is never suppressed.
pub struct SignalScorer {
    profile: ScoringProfile,
    last_active: HashMap<(String, Timeframe), i64>,
}

impl SignalScorer {
    /// Create a scorer for the given profile.
    pub fn new(profile: ScoringProfile) -> Self {
        Self {
            profile,
            last_active: HashMap::new(),
        }
    }

    /// The profile this scorer applies.
    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Forget all interval-suppression state.
    pub fn reset(&mut self) {
        self.last_active.clear();
    }

    /// Score the latest bar of a window into a signal.
    ///
    /// `frame` must have been computed from `series`; the latest frame row
    /// and the latest bar describe the same instant.
    pub fn score(&mut self, series: &BarSeries, frame: &IndicatorFrame) -> Signal {
        let row = *frame.latest();
        let prev = frame.previous();

        let bar = match series.last() {
            Some(bar) => *bar,
            None => {
                return Signal::flat(
                    series.symbol.clone(),
                    series.timeframe,
                    row.close,
                    row.timestamp,
                    0.0,
                    0.0,
                )
            }
        };

        let thresholds = &self.profile.thresholds;
        let long = long_scores(&bar, &row, prev, thresholds).composite(&self.profile.weights);
        let short = short_scores(&bar, &row, prev, thresholds).composite(&self.profile.weights);

        let direction = decide(long, short, thresholds.activation);

        if direction == Direction::Flat
            || self.suppressed(&series.symbol, series.timeframe, row.timestamp)
        {
            if direction != Direction::Flat {
                debug!(
                    symbol = %series.symbol,
                    timeframe = %series.timeframe,
                    %direction,
                    "signal inside minimum interval, coercing to flat"
                );
            }
            return Signal::flat(
                series.symbol.clone(),
                series.timeframe,
                row.close,
                row.timestamp,
                long,
                short,
            );
        }

        Signal {
            symbol: series.symbol.clone(),
            timeframe: series.timeframe,
            direction,
            strength: long.max(short).clamp(0.0, 1.0),
            reference_price: row.close,
            generated_at: row.timestamp,
            long_score: long,
            short_score: short,
        }
    }

    /// Check the minimum-interval gate and record the signal when it passes.
    fn suppressed(&mut self, symbol: &str, timeframe: Timeframe, timestamp: i64) -> bool {
        let key = (symbol.to_string(), timeframe);
        match self.last_active.get(&key) {
            Some(&last) => {
                let elapsed = timeframe.bars_between(last, timestamp);
                if elapsed > 0 && elapsed < i64::from(self.profile.min_signal_interval) {
                    return true;
                }
                if elapsed != 0 {
                    self.last_active.insert(key, timestamp);
                }
                false
            }
            None => {
                self.last_active.insert(key, timestamp);
                false
            }
        }
    }
}

/// Pick a direction from independent long and short scores.
///
/// An exact tie is ambiguous market structure and is never traded; a
/// winning side only activates at or above the threshold.
fn decide(long: f64, short: f64, activation: f64) -> Direction {
    if long == short {
        Direction::Flat
    } else if long > short && long >= activation {
        Direction::Long
    } else if short > long && short >= activation {
        Direction::Short
    } else {
        Direction::Flat
    }
}
