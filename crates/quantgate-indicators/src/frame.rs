//! Indicator frame: the full battery evaluated over one bar window.

use quantgate_core::error::IndicatorError;
use quantgate_core::traits::{Indicator, MultiOutputIndicator};
use quantgate_core::types::BarSeries;
use serde::{Deserialize, Serialize};

use crate::{Atr, BandsOutput, BollingerBands, Ema, Rsi, VolumeRatio};

/// Periods and multipliers for the indicator battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Fast EMA period
    pub ema_fast: usize,
    /// Medium EMA period
    pub ema_medium: usize,
    /// Slow EMA period
    pub ema_slow: usize,
    /// RSI period
    pub rsi_period: usize,
    /// Volatility band period
    pub band_period: usize,
    /// Volatility band standard-deviation multiplier
    pub band_multiplier: f64,
    /// Volume ratio averaging period
    pub volume_period: usize,
    /// ATR period
    pub atr_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_fast: 8,
            ema_medium: 21,
            ema_slow: 55,
            rsi_period: 14,
            band_period: 20,
            band_multiplier: 2.0,
            volume_period: 20,
            atr_period: 14,
        }
    }
}

impl IndicatorConfig {
    /// Validate period relationships.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.ema_fast == 0 || self.rsi_period == 0 || self.volume_period == 0 || self.atr_period == 0
        {
            return Err(IndicatorError::InvalidParameter(
                "Periods must be greater than 0".into(),
            ));
        }
        if self.ema_fast >= self.ema_medium || self.ema_medium >= self.ema_slow {
            return Err(IndicatorError::InvalidParameter(
                "EMA periods must be strictly increasing (fast < medium < slow)".into(),
            ));
        }
        if self.band_period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "Band period must be at least 2".into(),
            ));
        }
        if self.band_multiplier <= 0.0 {
            return Err(IndicatorError::InvalidParameter(
                "Band multiplier must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Bars needed before the full battery produces its first row.
    pub fn required_lookback(&self) -> usize {
        self.ema_slow
            .max(self.rsi_period + 1)
            .max(self.band_period)
            .max(self.volume_period)
            .max(self.atr_period + 1)
    }
}

/// Indicator values for a single bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndicatorRow {
    /// Timestamp of the bar (unix ms)
    pub timestamp: i64,
    /// Close price of the bar
    pub close: f64,
    /// Fast EMA
    pub ema_fast: f64,
    /// Medium EMA
    pub ema_medium: f64,
    /// Slow EMA
    pub ema_slow: f64,
    /// RSI oscillator in [0, 100]
    pub rsi: f64,
    /// Volatility bands
    pub bands: BandsOutput,
    /// Volume relative to its rolling mean
    pub volume_ratio: f64,
    /// Average true range
    pub atr: f64,
}

/// Per-bar indicator rows aligned 1:1 with the tail of a bar window.
///
/// Always holds at least one row; produced only by
/// [`IndicatorSet::compute`].
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    /// Row for the latest bar.
    pub fn latest(&self) -> &IndicatorRow {
        &self.rows[self.rows.len() - 1]
    }

    /// Row for the bar before the latest, when the window covers it.
    pub fn previous(&self) -> Option<&IndicatorRow> {
        self.rows.len().checked_sub(2).map(|i| &self.rows[i])
    }

    /// Number of aligned rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, oldest first.
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }
}

/// The full indicator battery for one symbol/timeframe.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    config: IndicatorConfig,
    ema_fast: Ema,
    ema_medium: Ema,
    ema_slow: Ema,
    rsi: Rsi,
    bands: BollingerBands,
    volume_ratio: VolumeRatio,
    atr: Atr,
}

impl IndicatorSet {
    /// Build the battery from a validated configuration.
    pub fn new(config: IndicatorConfig) -> Result<Self, IndicatorError> {
        config.validate()?;
        Ok(Self {
            ema_fast: Ema::new(config.ema_fast),
            ema_medium: Ema::new(config.ema_medium),
            ema_slow: Ema::new(config.ema_slow),
            rsi: Rsi::new(config.rsi_period),
            bands: BollingerBands::new(config.band_period, config.band_multiplier),
            volume_ratio: VolumeRatio::new(config.volume_period),
            atr: Atr::new(config.atr_period),
            config,
        })
    }

    /// The configuration this battery was built from.
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Bars needed before [`compute`](Self::compute) succeeds.
    pub fn required_lookback(&self) -> usize {
        self.config.required_lookback()
    }

    /// Evaluate the battery over a bar window.
    ///
    /// The window length is checked against every enabled indicator's
    /// lookback before any arithmetic runs; a short window fails with
    /// `InsufficientData` and computes nothing.
    pub fn compute(&self, series: &BarSeries) -> Result<IndicatorFrame, IndicatorError> {
        let required = self.required_lookback();
        if series.len() < required {
            return Err(IndicatorError::InsufficientData {
                required,
                available: series.len(),
            });
        }

        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();
        let volumes = series.volumes();

        let ema_fast = self.ema_fast.calculate(&closes);
        let ema_medium = self.ema_medium.calculate(&closes);
        let ema_slow = self.ema_slow.calculate(&closes);
        let rsi = self.rsi.calculate(&closes);
        let bands = self.bands.calculate(&closes);
        let volume_ratio = self.volume_ratio.calculate(&volumes);
        let atr = self.atr.calculate_ohlc(&highs, &lows, &closes);

        // Every vector ends at the latest bar; keep the common tail.
        let rows_len = series.len() - required + 1;
        let tail = |v: &[f64]| -> Vec<f64> { v[v.len() - rows_len..].to_vec() };
        let ema_fast = tail(&ema_fast);
        let ema_medium = tail(&ema_medium);
        let ema_slow = tail(&ema_slow);
        let rsi = tail(&rsi);
        let bands = bands[bands.len() - rows_len..].to_vec();
        let volume_ratio = tail(&volume_ratio);
        let atr = tail(&atr);

        let first_bar = series.len() - rows_len;
        let mut rows = Vec::with_capacity(rows_len);
        for i in 0..rows_len {
            // Window length was validated above; the bar exists.
            let bar = match series.get(first_bar + i) {
                Some(bar) => bar,
                None => break,
            };
            rows.push(IndicatorRow {
                timestamp: bar.timestamp,
                close: bar.close,
                ema_fast: ema_fast[i],
                ema_medium: ema_medium[i],
                ema_slow: ema_slow[i],
                rsi: rsi[i],
                bands: bands[i],
                volume_ratio: volume_ratio[i],
                atr: atr[i],
            });
        }

        Ok(IndicatorFrame { rows })
    }
}
