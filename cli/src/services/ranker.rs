use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::Result,
    models::{load_symbol_list, sort_ranking, write_ranking_csv, RankingRow, SymbolEntry},
    services::{IndicatorCalculator, SeriesSource},
    utils::{format_duration, today_exchange, trailing_window_strings, Logger, Timer, TRAILING_WINDOW_DAYS},
};

/// Progress of a ranking batch, emitted after every symbol
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankProgress {
    pub processed: usize,
    pub total: usize,
    pub symbol: String,
    pub ranked: usize,
}

/// Ranking report file name for a constituent list and period
/// Whether `period` needs more rows than the fetch window can hold
pub fn exceeds_window(period: usize) -> bool {
    i64::try_from(period).map_or(true, |p| p > TRAILING_WINDOW_DAYS)
}

pub fn ranking_file_name(symbol_list: &Path, period: usize) -> String {
    let stem = symbol_list
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ranking".to_string());
    format!("{}_{}period.csv", stem, period)
}

/// Drives every symbol of a list through the calculator, one at a time
pub struct SymbolRanker<S> {
    calculator: IndicatorCalculator<S>,
    logger: Logger,
}

impl<S: SeriesSource> SymbolRanker<S> {
    pub fn new(calculator: IndicatorCalculator<S>) -> Self {
        Self {
            calculator,
            logger: Logger::new("RANKER"),
        }
    }

    pub fn calculator(&self) -> &IndicatorCalculator<S> {
        &self.calculator
    }

    /// Rank a constituent list over the trailing window ending today and
    /// write `<list-stem>_<period>period.csv` into `output_dir`.
    pub async fn build_ranking(&self, symbol_list: &Path, output_dir: &Path, period: usize) -> Result<PathBuf> {
        self.build_ranking_with_progress(symbol_list, output_dir, period, |_| {})
            .await
    }

    pub async fn build_ranking_with_progress<F>(
        &self,
        symbol_list: &Path,
        output_dir: &Path,
        period: usize,
        on_progress: F,
    ) -> Result<PathBuf>
    where
        F: FnMut(RankProgress) + Send,
    {
        let entries = load_symbol_list(symbol_list)?;
        let (from_date, to_date) = trailing_window_strings(today_exchange());

        fs::create_dir_all(output_dir)?;
        let output_path = output_dir.join(ranking_file_name(symbol_list, period));

        let rows = self
            .rank_entries(&entries, &from_date, &to_date, period, on_progress)
            .await;

        write_ranking_csv(&output_path, &rows)?;
        self.logger.info(&format!(
            "CSV file '{}' created successfully ({} of {} symbols ranked)",
            output_path.display(),
            rows.len(),
            entries.len()
        ));
        Ok(output_path)
    }

    /// Compute and sort ranking rows. Symbols that fail or lack history are
    /// logged and left out.
    pub async fn rank_entries<F>(
        &self,
        entries: &[SymbolEntry],
        from_date: &str,
        to_date: &str,
        period: usize,
        mut on_progress: F,
    ) -> Vec<RankingRow>
    where
        F: FnMut(RankProgress) + Send,
    {
        if exceeds_window(period) {
            self.logger.warn(&format!(
                "Period {} exceeds the {}-day fetch window; every symbol will report insufficient data",
                period, TRAILING_WINDOW_DAYS
            ));
        }

        let timer = Timer::start("ranking batch");
        let mut rows = Vec::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            match self
                .calculator
                .compute_indicators(&entry.symbol, from_date, to_date, period)
                .await
            {
                Ok(Some(result)) => rows.push(RankingRow::new(entry, &result)),
                Ok(None) => self.logger.debug(&format!("Skipping {}: no result", entry.symbol)),
                Err(e) => self.logger.warn_with_error(&format!("Skipping {}", entry.symbol), &e),
            }

            on_progress(RankProgress {
                processed: idx + 1,
                total: entries.len(),
                symbol: entry.symbol.clone(),
                ranked: rows.len(),
            });
        }

        sort_ranking(&mut rows);
        self.logger.info(&format!(
            "Ranked {}/{} symbols in {}",
            rows.len(),
            entries.len(),
            format_duration(timer.elapsed_ms())
        ));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrengthError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Newest-first closes per symbol; unknown symbols have no data,
    /// `FAIL` raises a transport-like error
    struct MapSource {
        dir: PathBuf,
        closes: HashMap<&'static str, Vec<f64>>,
    }

    #[async_trait]
    impl SeriesSource for MapSource {
        async fn fetch_series(&self, symbol: &str, _: &str, _: &str) -> Result<Option<PathBuf>> {
            if symbol == "FAIL" {
                return Err(StrengthError::Parse("simulated failure".to_string()));
            }
            let Some(closes) = self.closes.get(symbol) else {
                return Ok(None);
            };
            let mut csv = String::from("Date,close\n");
            for close in closes {
                csv.push_str(&format!("x,{}\n", close));
            }
            let path = self.dir.join(format!("{}.csv", symbol));
            std::fs::write(&path, csv)?;
            Ok(Some(path))
        }
    }

    fn entry(symbol: &str, industry: &str) -> SymbolEntry {
        SymbolEntry {
            company_name: format!("{} Ltd.", symbol),
            industry: industry.to_string(),
            symbol: symbol.to_string(),
        }
    }

    #[tokio::test]
    async fn test_rank_entries_skips_failures_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let source = MapSource {
            dir: dir.path().to_path_buf(),
            closes: HashMap::from([
                ("UP", vec![12.0, 10.0, 10.0]),
                ("FLAT", vec![10.0, 10.0, 10.0]),
                ("SHORT", vec![10.0]),
            ]),
        };
        let ranker = SymbolRanker::new(IndicatorCalculator::new(source));
        let entries = vec![
            entry("FLAT", "IT"),
            entry("FAIL", "IT"),
            entry("MISSING", "Banks"),
            entry("UP", "Banks"),
            entry("SHORT", "Banks"),
        ];

        let mut events = Vec::new();
        let rows = ranker
            .rank_entries(&entries, "15-12-2023", "15-12-2024", 2, |p| events.push(p))
            .await;

        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["UP", "FLAT"]);
        assert_eq!(rows[0].sma_ratio, Some(12.0 / 11.0));
        assert_eq!(rows[1].sma_ratio, Some(1.0));

        assert_eq!(events.len(), 5);
        assert_eq!(events[4].processed, 5);
        assert_eq!(events[4].total, 5);
        assert_eq!(events[4].ranked, 2);
    }

    #[tokio::test]
    async fn test_build_ranking_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("nifty50.csv");
        std::fs::write(
            &list,
            "Company Name,Industry,Symbol,Series,ISIN Code\nUp Ltd.,Banks,UP,EQ,INE000000001\n",
        )
        .unwrap();

        let source = MapSource {
            dir: dir.path().to_path_buf(),
            closes: HashMap::from([("UP", vec![12.0, 10.0, 10.0])]),
        };
        let ranker = SymbolRanker::new(IndicatorCalculator::new(source));
        let out_dir = dir.path().join("out").join("RelativeStrength");

        let path = ranker.build_ranking(&list, &out_dir, 3).await.unwrap();
        assert_eq!(path, out_dir.join("nifty50_3period.csv"));

        let rows = crate::models::read_ranking_csv(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company_name, "Up Ltd.");
        assert_eq!(rows[0].current_price, 12.0);
    }

    #[test]
    fn test_exceeds_window() {
        assert!(!exceeds_window(14));
        assert!(!exceeds_window(366));
        assert!(exceeds_window(367));
        assert!(exceeds_window(usize::MAX));
    }

    #[test]
    fn test_ranking_file_name() {
        assert_eq!(ranking_file_name(Path::new("data/nifty100.csv"), 131), "nifty100_131period.csv");
    }
}
