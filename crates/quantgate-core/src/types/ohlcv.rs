//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::Timeframe;

/// Compact OHLCV bar. Uses f64 for fast indicator calculations.
///
/// Bars are immutable once produced: prices are positive, volume is
/// non-negative, and timestamps increase monotonically within a series
/// (enforced by [`BarSeries::push`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Check if the bar is bullish (close > open).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if the bar is bearish (close < open).
    #[inline]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::<Utc>::MIN_UTC)
    }

    /// Calculate the true range relative to the previous close.
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.high - self.low,
        }
    }
}

/// Time-series window of bars for one symbol/timeframe.
///
/// Backed by a deque so a live feed can push new bars while old ones fall
/// off the back once the capacity is reached.
#[derive(Debug, Clone)]
pub struct BarSeries {
    /// Symbol identifier
    pub symbol: String,
    /// Timeframe of the bars
    pub timeframe: Timeframe,
    bars: VecDeque<Bar>,
    /// Maximum number of bars retained (0 = unlimited)
    capacity: usize,
}

impl BarSeries {
    /// Create a new empty bar series.
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            bars: VecDeque::new(),
            capacity: 0,
        }
    }

    /// Create a bar series with a maximum capacity.
    /// When capacity is reached, the oldest bars are removed.
    pub fn with_capacity(symbol: impl Into<String>, timeframe: Timeframe, capacity: usize) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            bars: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new bar, removing the oldest if at capacity.
    ///
    /// Returns false (and keeps the series unchanged) when the bar does not
    /// advance the series timestamp, preserving the monotonicity invariant.
    pub fn push(&mut self, bar: Bar) -> bool {
        if let Some(last) = self.bars.back() {
            if bar.timestamp <= last.timestamp {
                return false;
            }
        }
        if self.capacity > 0 && self.bars.len() >= self.capacity {
            self.bars.pop_front();
        }
        self.bars.push_back(bar);
        true
    }

    /// Push multiple bars, skipping any that violate monotonicity.
    pub fn extend(&mut self, bars: impl IntoIterator<Item = Bar>) {
        for bar in bars {
            self.push(bar);
        }
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.back()
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Extract volumes as a vector.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_calculations() {
        let bar = Bar::new(1000, 100.0, 110.0, 95.0, 105.0, 1_000_000.0);

        assert!((bar.range() - 15.0).abs() < 1e-10);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn test_bar_true_range() {
        let bar = Bar::new(1000, 100.0, 110.0, 95.0, 105.0, 1_000_000.0);

        // Without previous close
        assert!((bar.true_range(None) - 15.0).abs() < 1e-10);

        // A gap from the previous close widens the range
        assert!((bar.true_range(Some(90.0)) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_series_capacity_eviction() {
        let mut series = BarSeries::with_capacity("BTC/USDT", Timeframe::Minute5, 3);

        for i in 1..=4 {
            series.push(Bar::new(i, 100.0, 101.0, 99.0, 100.5, 1000.0));
        }
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(0).unwrap().timestamp, 2);
    }

    #[test]
    fn test_series_rejects_stale_timestamps() {
        let mut series = BarSeries::new("BTC/USDT", Timeframe::Minute5);

        assert!(series.push(Bar::new(100, 1.0, 2.0, 0.5, 1.5, 10.0)));
        assert!(!series.push(Bar::new(100, 1.0, 2.0, 0.5, 1.5, 10.0)));
        assert!(!series.push(Bar::new(50, 1.0, 2.0, 0.5, 1.5, 10.0)));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_series_extractions() {
        let mut series = BarSeries::new("ETH/USDT", Timeframe::Minute5);
        series.push(Bar::new(1, 100.0, 101.0, 99.0, 100.5, 1000.0));
        series.push(Bar::new(2, 100.5, 102.0, 100.0, 101.5, 2000.0));

        assert_eq!(series.closes(), vec![100.5, 101.5]);
        assert_eq!(series.volumes(), vec![1000.0, 2000.0]);
        assert_eq!(series.highs(), vec![101.0, 102.0]);
        assert_eq!(series.lows(), vec![99.0, 100.0]);
    }
}
