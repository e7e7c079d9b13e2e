//! CSV OHLCV loading for the evaluate command.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use quantgate_core::types::Bar;
use serde::Deserialize;
use std::path::Path;

/// CSV record format with common header spellings.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "Timestamp")]
    timestamp: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: f64,
}

/// Load bars from a CSV file, sorted by timestamp.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut bars = Vec::new();
    for result in reader.deserialize() {
        let record: CsvRecord = result.context("Failed to parse CSV record")?;
        let timestamp = parse_timestamp(&record.timestamp)?;
        bars.push(Bar::new(
            timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        ));
    }

    bars.sort_by_key(|b| b.timestamp);
    Ok(bars)
}

/// Parse a timestamp from common formats: unix seconds/millis, dates,
/// and date-times.
fn parse_timestamp(text: &str) -> Result<i64> {
    if let Ok(numeric) = text.parse::<i64>() {
        // Heuristic: values this large are already milliseconds
        return Ok(if numeric >= 100_000_000_000 {
            numeric
        } else {
            numeric * 1000
        });
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for format in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    anyhow::bail!("Unrecognized timestamp format: {}", text)
}
