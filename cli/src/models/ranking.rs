use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

use crate::error::Result;
use crate::models::IndicatorResult;

/// One line of an index constituent list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntry {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
}

/// Read a constituent list. Extra columns are ignored.
pub fn load_symbol_list(path: &Path) -> Result<Vec<SymbolEntry>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut entries = Vec::new();
    for result in reader.deserialize() {
        entries.push(result?);
    }
    Ok(entries)
}

/// One row of the ranking report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "SMA")]
    pub sma: Option<f64>,
    #[serde(rename = "EMA")]
    pub ema: Option<f64>,
    #[serde(rename = "Current Price")]
    pub current_price: f64,
    #[serde(rename = "SMARatio")]
    pub sma_ratio: Option<f64>,
    #[serde(rename = "EMARatio")]
    pub ema_ratio: Option<f64>,
}

impl RankingRow {
    pub fn new(entry: &SymbolEntry, result: &IndicatorResult) -> Self {
        Self {
            company_name: entry.company_name.clone(),
            industry: entry.industry.clone(),
            symbol: entry.symbol.clone(),
            sma: result.sma,
            ema: result.ema,
            current_price: result.current_price,
            sma_ratio: result.sma_ratio(),
            ema_ratio: result.ema_ratio(),
        }
    }
}

/// Descending by value, `None` after every present value
pub fn cmp_desc_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort rows by SMA ratio, highest first, rows without a ratio last
pub fn sort_ranking(rows: &mut [RankingRow]) {
    rows.sort_by(|a, b| cmp_desc_nulls_last(a.sma_ratio, b.sma_ratio));
}

/// Column order of the ranking report
pub const RANKING_HEADER: [&str; 8] = [
    "Company Name", "Industry", "Symbol", "SMA", "EMA", "Current Price", "SMARatio", "EMARatio",
];

/// Write the ranking report. The header is written even when there are no rows.
pub fn write_ranking_csv(path: &Path, rows: &[RankingRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(RANKING_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_ranking_csv(path: &Path) -> Result<Vec<RankingRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str, sma_ratio: Option<f64>) -> RankingRow {
        RankingRow {
            company_name: format!("{} Ltd.", symbol),
            industry: "Metals & Mining".to_string(),
            symbol: symbol.to_string(),
            sma: Some(100.0),
            ema: Some(100.0),
            current_price: 100.0,
            sma_ratio,
            ema_ratio: sma_ratio,
        }
    }

    #[test]
    fn test_sort_places_nulls_last() {
        let mut rows = vec![
            row("A", None),
            row("B", Some(0.95)),
            row("C", Some(1.10)),
            row("D", None),
            row("E", Some(1.02)),
        ];
        sort_ranking(&mut rows);

        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["C", "E", "B", "A", "D"]);
    }

    #[test]
    fn test_new_row_handles_absent_sma() {
        let entry = SymbolEntry {
            company_name: "Tata Steel Ltd.".to_string(),
            industry: "Metals & Mining".to_string(),
            symbol: "TATASTEEL".to_string(),
        };
        let result = IndicatorResult { sma: None, ema: Some(140.0), current_price: 147.0 };
        let row = RankingRow::new(&entry, &result);
        assert_eq!(row.sma_ratio, None);
        assert_eq!(row.ema_ratio, Some(1.05));
    }

    #[test]
    fn test_csv_header_and_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.csv");
        write_ranking_csv(&path, &[row("A", None)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Company Name,Industry,Symbol,SMA,EMA,Current Price,SMARatio,EMARatio")
        );
        assert_eq!(lines.next(), Some("A Ltd.,Metals & Mining,A,100.0,100.0,100.0,,"));

        let back = read_ranking_csv(&path).unwrap();
        assert_eq!(back[0].sma_ratio, None);
    }

    #[test]
    fn test_empty_ranking_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.csv");
        write_ranking_csv(&path, &[]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), RANKING_HEADER.join(","));
        assert!(read_ranking_csv(&path).unwrap().is_empty());
    }
}
