//! Technical indicator battery.
//!
//! Batch implementations of the indicators the scorer consumes:
//! - Moving averages (SMA, EMA)
//! - RSI oscillator (Wilder smoothing)
//! - Volatility (standard deviation, bands, ATR)
//! - Volume ratio
//!
//! [`IndicatorSet`] bundles the battery and produces per-bar
//! [`IndicatorFrame`] rows aligned with the tail of a bar window.

pub mod frame;
pub mod moving_average;
pub mod oscillator;
pub mod volatility;
pub mod volume;

pub use frame::{IndicatorConfig, IndicatorFrame, IndicatorRow, IndicatorSet};
pub use moving_average::{Ema, Sma};
pub use oscillator::Rsi;
pub use volatility::{Atr, BandsOutput, BollingerBands, StdDev};
pub use volume::VolumeRatio;
