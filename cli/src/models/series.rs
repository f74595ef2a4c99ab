use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, StrengthError};

/// Numeric columns published by the historical endpoint
pub const NUMERIC_COLUMNS: [&str; 7] = ["OPEN", "HIGH", "LOW", "PREV. CLOSE", "ltp", "close", "vwap"];

const DATE_COLUMN: &str = "Date";
const CLOSE_COLUMN: &str = "close";

/// One trading day of the provider's historical series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub prev_close: Option<f64>,
    pub ltp: Option<f64>,
    pub close: f64,
    pub vwap: Option<f64>,
    /// Columns without a dedicated field, keyed by trimmed header
    pub passthrough: BTreeMap<String, String>,
}

/// Coerce a provider cell to a float, dropping thousands separators
pub fn parse_numeric(raw: &str) -> Result<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| StrengthError::Parse(format!("'{}' is not a number", raw)))
}

fn parse_optional_numeric(raw: Option<&str>) -> Result<Option<f64>> {
    match raw {
        Some(value) if !value.trim().is_empty() => parse_numeric(value).map(Some),
        _ => Ok(None),
    }
}

/// A parsed series in the order the provider sent it (newest first)
#[derive(Debug, Clone, Default)]
pub struct Series {
    pub records: Vec<SeriesRecord>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Close of the most recent trading day
    pub fn latest_close(&self) -> Option<f64> {
        self.records.first().map(|r| r.close)
    }

    /// Closing prices oldest first
    pub fn chronological_closes(&self) -> Vec<f64> {
        self.records.iter().rev().map(|r| r.close).collect()
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read(path)?;
        Self::from_bytes(&content)
    }

    /// Parse provider CSV. Headers are trimmed and a leading BOM is ignored.
    pub fn from_bytes(content: &[u8]) -> Result<Self> {
        let content = content.strip_prefix("\u{feff}".as_bytes()).unwrap_or(content);
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(content);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let column = |name: &str| headers.iter().position(|h| h == name);
        let close_idx = column(CLOSE_COLUMN)
            .ok_or_else(|| StrengthError::Parse(format!("missing '{}' column", CLOSE_COLUMN)))?;
        let date_idx = column(DATE_COLUMN);
        let numeric_idx: Vec<Option<usize>> = NUMERIC_COLUMNS.iter().map(|name| column(name)).collect();

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i));

            let close_raw = record.get(close_idx).unwrap_or("");
            let close = parse_numeric(close_raw).map_err(|e| {
                StrengthError::Parse(format!("row {}: close: {}", row + 1, e))
            })?;

            let mut passthrough = BTreeMap::new();
            for (i, header) in headers.iter().enumerate() {
                if Some(i) == date_idx || NUMERIC_COLUMNS.contains(&header.as_str()) {
                    continue;
                }
                if let Some(value) = record.get(i) {
                    passthrough.insert(header.clone(), value.trim().to_string());
                }
            }

            records.push(SeriesRecord {
                date: cell(date_idx).unwrap_or("").trim().to_string(),
                open: parse_optional_numeric(cell(numeric_idx[0]))?,
                high: parse_optional_numeric(cell(numeric_idx[1]))?,
                low: parse_optional_numeric(cell(numeric_idx[2]))?,
                prev_close: parse_optional_numeric(cell(numeric_idx[3]))?,
                ltp: parse_optional_numeric(cell(numeric_idx[4]))?,
                close,
                vwap: parse_optional_numeric(cell(numeric_idx[6]))?,
                passthrough,
            });
        }

        Ok(Self { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}\"Date \",\"series \",\"OPEN \",\"HIGH \",\"LOW \",\"PREV. CLOSE \",\"ltp \",\"close \",\"vwap \",\"VOLUME \"\n\
\"13-Dec-2024\",\"EQ\",\"1,510.00\",\"1,530.50\",\"1,500.00\",\"1,505.25\",\"1,525.00\",\"1,524.80\",\"1,518.31\",\"2,345,678\"\n\
\"12-Dec-2024\",\"EQ\",\"1,490.00\",\"1,512.00\",\"1,485.10\",\"1,488.00\",\"1,506.00\",\"1,505.25\",\"1,499.02\",\"1,987,001\"\n";

    #[test]
    fn test_parse_numeric_strips_separators() {
        assert_eq!(parse_numeric("1,234.50").unwrap(), 1234.5);
        assert_eq!(parse_numeric(" 42 ").unwrap(), 42.0);
        assert!(parse_numeric("n/a").is_err());
    }

    #[test]
    fn test_parse_provider_csv() {
        let series = Series::from_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);

        let latest = &series.records[0];
        assert_eq!(latest.date, "13-Dec-2024");
        assert_eq!(latest.open, Some(1510.0));
        assert_eq!(latest.prev_close, Some(1505.25));
        assert_eq!(latest.close, 1524.8);
        assert_eq!(latest.passthrough.get("series").map(String::as_str), Some("EQ"));
        assert_eq!(latest.passthrough.get("VOLUME").map(String::as_str), Some("2,345,678"));

        assert_eq!(series.latest_close(), Some(1524.8));
        assert_eq!(series.chronological_closes(), vec![1505.25, 1524.8]);
    }

    #[test]
    fn test_missing_close_column() {
        let csv = "Date,OPEN\n01-01-2024,10\n";
        assert!(matches!(
            Series::from_bytes(csv.as_bytes()),
            Err(StrengthError::Parse(_))
        ));
    }

    #[test]
    fn test_malformed_close_is_an_error() {
        let csv = "Date,close\n01-01-2024,abc\n";
        assert!(matches!(
            Series::from_bytes(csv.as_bytes()),
            Err(StrengthError::Parse(_))
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let series = Series::from_bytes(b"Date ,close \n").unwrap();
        assert!(series.is_empty());
        assert_eq!(series.latest_close(), None);
    }
}
