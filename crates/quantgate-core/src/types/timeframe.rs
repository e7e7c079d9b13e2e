//! Timeframe definitions for market data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timeframe for bars/candles.
///
/// Limited to the intraday-to-daily range the engine operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1 minute bars
    #[serde(rename = "1m")]
    Minute1,
    /// 5 minute bars
    #[serde(rename = "5m")]
    #[default]
    Minute5,
    /// 15 minute bars
    #[serde(rename = "15m")]
    Minute15,
    /// 30 minute bars
    #[serde(rename = "30m")]
    Minute30,
    /// 1 hour bars
    #[serde(rename = "1h")]
    Hour1,
    /// 4 hour bars
    #[serde(rename = "4h")]
    Hour4,
    /// Daily bars
    #[serde(rename = "1d")]
    Daily,
}

impl Timeframe {
    /// Get the duration of the timeframe in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Timeframe::Minute1 => 60,
            Timeframe::Minute5 => 300,
            Timeframe::Minute15 => 900,
            Timeframe::Minute30 => 1800,
            Timeframe::Hour1 => 3600,
            Timeframe::Hour4 => 14400,
            Timeframe::Daily => 86400,
        }
    }

    /// Get the duration of the timeframe in milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.as_secs() as i64 * 1000
    }

    /// Number of whole bars between two unix-ms timestamps.
    ///
    /// Negative when `later` precedes `earlier`.
    pub fn bars_between(&self, earlier: i64, later: i64) -> i64 {
        (later - earlier) / self.as_millis()
    }

    /// Get all available timeframes.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Minute1,
            Timeframe::Minute5,
            Timeframe::Minute15,
            Timeframe::Minute30,
            Timeframe::Hour1,
            Timeframe::Hour4,
            Timeframe::Daily,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
            Timeframe::Daily => "1d",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" => Ok(Timeframe::Minute1),
            "5m" | "5min" => Ok(Timeframe::Minute5),
            "15m" | "15min" => Ok(Timeframe::Minute15),
            "30m" | "30min" => Ok(Timeframe::Minute30),
            "1h" | "1hour" | "hour" => Ok(Timeframe::Hour1),
            "4h" | "4hour" => Ok(Timeframe::Hour4),
            "1d" | "day" | "daily" => Ok(Timeframe::Daily),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_duration() {
        assert_eq!(Timeframe::Minute5.as_secs(), 300);
        assert_eq!(Timeframe::Hour1.as_secs(), 3600);
        assert_eq!(Timeframe::Daily.as_millis(), 86_400_000);
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!(Timeframe::from_str("5m").unwrap(), Timeframe::Minute5);
        assert_eq!(Timeframe::from_str("1h").unwrap(), Timeframe::Hour1);
        assert_eq!(Timeframe::from_str("daily").unwrap(), Timeframe::Daily);
        assert!(Timeframe::from_str("2w").is_err());
    }

    #[test]
    fn test_timeframe_display() {
        assert_eq!(Timeframe::Minute5.to_string(), "5m");
        assert_eq!(Timeframe::Hour4.to_string(), "4h");
    }

    #[test]
    fn test_bars_between() {
        let tf = Timeframe::Minute5;
        let start = 1_700_000_000_000;
        assert_eq!(tf.bars_between(start, start), 0);
        assert_eq!(tf.bars_between(start, start + 3 * tf.as_millis()), 3);
        assert_eq!(tf.bars_between(start + tf.as_millis(), start), -1);
    }
}
