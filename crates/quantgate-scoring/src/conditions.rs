//! Named scoring conditions, grouped by category.
//!
//! Each category accumulates boolean and graded conditions whose weights
//! sum to 1.0, so every category score lands in [0, 1] on its own.

use quantgate_core::types::Bar;
use quantgate_indicators::IndicatorRow;

use crate::profile::{CategoryWeights, ScoreThresholds};

// Trend: EMA stack alignment, price location, fresh crossover.
const W_TREND_ALIGNMENT: f64 = 0.4;
const W_TREND_PRICE: f64 = 0.35;
const W_TREND_CROSS: f64 = 0.25;

// Momentum: which side of the RSI midline, how far, and the slope.
const W_MOMENTUM_SIDE: f64 = 0.5;
const W_MOMENTUM_GRADED: f64 = 0.3;
const W_MOMENTUM_SLOPE: f64 = 0.2;

// Mean-reversion: band touch and band zone.
const W_REVERSION_TOUCH: f64 = 0.6;
const W_REVERSION_ZONE: f64 = 0.4;

// Volume: surge and above-average participation.
const W_VOLUME_SURGE: f64 = 0.6;
const W_VOLUME_ABOVE_AVG: f64 = 0.4;

/// Per-category scores in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryScores {
    pub trend: f64,
    pub momentum: f64,
    pub mean_reversion: f64,
    pub volume: f64,
}

impl CategoryScores {
    /// Weighted composite in [0, 1].
    pub fn composite(&self, weights: &CategoryWeights) -> f64 {
        let score = self.trend * weights.trend
            + self.momentum * weights.momentum
            + self.mean_reversion * weights.mean_reversion
            + self.volume * weights.volume;
        score.clamp(0.0, 1.0)
    }
}

/// Score the long side of one indicator row.
pub fn long_scores(
    bar: &Bar,
    row: &IndicatorRow,
    prev: Option<&IndicatorRow>,
    thresholds: &ScoreThresholds,
) -> CategoryScores {
    let mut trend = 0.0;
    if row.ema_fast > row.ema_medium && row.ema_medium > row.ema_slow {
        trend += W_TREND_ALIGNMENT;
    }
    if row.close > row.ema_fast && row.close > row.ema_medium {
        trend += W_TREND_PRICE;
    }
    if let Some(prev) = prev {
        if row.ema_fast > row.ema_medium && prev.ema_fast <= prev.ema_medium {
            trend += W_TREND_CROSS;
        }
    }

    let mut momentum = 0.0;
    if row.rsi > 50.0 && row.rsi < thresholds.rsi_overbought {
        momentum += W_MOMENTUM_SIDE;
        // Graded: how deep into bullish territory, fading out at overbought
        let depth = (row.rsi - 50.0) / (thresholds.rsi_overbought - 50.0);
        momentum += W_MOMENTUM_GRADED * depth.clamp(0.0, 1.0);
    }
    if let Some(prev) = prev {
        if row.rsi > prev.rsi {
            momentum += W_MOMENTUM_SLOPE;
        }
    }

    let mut mean_reversion = 0.0;
    if bar.low <= row.bands.lower && row.close > row.bands.lower {
        mean_reversion += W_REVERSION_TOUCH;
    }
    if row.bands.position < thresholds.band_long_entry {
        mean_reversion += W_REVERSION_ZONE;
    }

    CategoryScores {
        trend,
        momentum,
        mean_reversion,
        volume: volume_score(row, thresholds),
    }
}

/// Score the short side of one indicator row. Mirror of [`long_scores`].
pub fn short_scores(
    bar: &Bar,
    row: &IndicatorRow,
    prev: Option<&IndicatorRow>,
    thresholds: &ScoreThresholds,
) -> CategoryScores {
    let mut trend = 0.0;
    if row.ema_fast < row.ema_medium && row.ema_medium < row.ema_slow {
        trend += W_TREND_ALIGNMENT;
    }
    if row.close < row.ema_fast && row.close < row.ema_medium {
        trend += W_TREND_PRICE;
    }
    if let Some(prev) = prev {
        if row.ema_fast < row.ema_medium && prev.ema_fast >= prev.ema_medium {
            trend += W_TREND_CROSS;
        }
    }

    let mut momentum = 0.0;
    if row.rsi < 50.0 && row.rsi > thresholds.rsi_oversold {
        momentum += W_MOMENTUM_SIDE;
        let depth = (50.0 - row.rsi) / (50.0 - thresholds.rsi_oversold);
        momentum += W_MOMENTUM_GRADED * depth.clamp(0.0, 1.0);
    }
    if let Some(prev) = prev {
        if row.rsi < prev.rsi {
            momentum += W_MOMENTUM_SLOPE;
        }
    }

    let mut mean_reversion = 0.0;
    if bar.high >= row.bands.upper && row.close < row.bands.upper {
        mean_reversion += W_REVERSION_TOUCH;
    }
    if row.bands.position > thresholds.band_short_entry {
        mean_reversion += W_REVERSION_ZONE;
    }

    CategoryScores {
        trend,
        momentum,
        mean_reversion,
        volume: volume_score(row, thresholds),
    }
}

/// Volume confirms either direction: participation, not bias.
fn volume_score(row: &IndicatorRow, thresholds: &ScoreThresholds) -> f64 {
    let mut volume = 0.0;
    if row.volume_ratio > thresholds.volume_surge {
        volume += W_VOLUME_SURGE;
    }
    if row.volume_ratio > 1.0 {
        volume += W_VOLUME_ABOVE_AVG;
    }
    volume
}
