//! High-level entry point tying the pipeline stages together

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::builder::AnalysisConfig;
use crate::error::{Result, StrengthError};
use crate::models::{IndexList, IndicatorResult};
use crate::services::{
    build_industry_report, industry_report_file_name, IndicatorCalculator, NseSession, RankProgress,
    ReportStatus, SeriesFetcher, SeriesSource, SymbolRanker,
};
use crate::utils::{Logger, Timer};

/// Result of a full ranking + industry report run
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthRun {
    pub ranking_path: PathBuf,
    pub report: ReportStatus,
}

impl StrengthRun {
    pub fn report_path(&self) -> Option<&Path> {
        match &self.report {
            ReportStatus::Written { path, .. } => Some(path),
            ReportStatus::Failed { .. } => None,
        }
    }
}

/// Owns the provider session and drives every pipeline stage
///
/// Stages run strictly one after another; a single session is reused for
/// every request of the analyzer's lifetime.
pub struct StrengthAnalyzer {
    config: AnalysisConfig,
    session: Arc<NseSession>,
    ranker: SymbolRanker<SeriesFetcher>,
    logger: Logger,
}

impl StrengthAnalyzer {
    pub fn new() -> Result<Self> {
        Self::from_config(AnalysisConfig::default())
    }

    pub fn from_config(config: AnalysisConfig) -> Result<Self> {
        let session = Arc::new(NseSession::with_base_url(&config.base_url)?);
        let fetcher = match &config.transient_dir {
            Some(dir) => SeriesFetcher::with_transient_dir(session.clone(), dir.clone()),
            None => SeriesFetcher::new(session.clone()),
        };

        Ok(Self {
            config,
            session,
            ranker: SymbolRanker::new(IndicatorCalculator::new(fetcher)),
            logger: Logger::new("ANALYZER"),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn session(&self) -> &NseSession {
        &self.session
    }

    /// Establish the provider session if needed
    pub async fn ensure_session(&self) -> Result<()> {
        self.session.ensure_session().await
    }

    /// Ad-hoc download of one symbol's series into the transient directory.
    ///
    /// Without [`AnalysisBuilder::with_transient_dir`](crate::api::AnalysisBuilder::with_transient_dir)
    /// the file sits in a temp directory that is deleted when the analyzer
    /// is dropped. Copy it out first if it must outlive the analyzer.
    pub async fn fetch_series(&self, symbol: &str, from_date: &str, to_date: &str) -> Result<Option<PathBuf>> {
        self.ranker
            .calculator()
            .source()
            .fetch_series(symbol, from_date, to_date)
            .await
    }

    pub async fn compute_indicators(
        &self,
        symbol: &str,
        from_date: &str,
        to_date: &str,
        period: usize,
    ) -> Result<Option<IndicatorResult>> {
        self.ranker
            .calculator()
            .compute_indicators(symbol, from_date, to_date, period)
            .await
    }

    /// Rank an arbitrary constituent list into `output_dir`
    pub async fn build_ranking(&self, symbol_list: &Path, output_dir: &Path, period: usize) -> Result<PathBuf> {
        validate_period(period)?;
        self.ranker.build_ranking(symbol_list, output_dir, period).await
    }

    pub fn build_industry_report(&self, ranking_path: &Path, output_path: &Path) -> ReportStatus {
        build_industry_report(ranking_path, output_path)
    }

    /// Rank an index list and summarise it by industry, writing both files
    /// into the configured output directory.
    pub async fn run_industry_strength<F>(&self, index: IndexList, period: usize, on_progress: F) -> Result<StrengthRun>
    where
        F: FnMut(RankProgress) + Send,
    {
        validate_period(period)?;

        let timer = Timer::start(&format!("{} {}-period run", index.as_str(), period));
        let symbol_list = self.config.data_dir.join(index.file_name());
        self.logger.info(&format!(
            "Starting industry strength run: list={}, period={}, output={}",
            symbol_list.display(),
            period,
            self.config.output_dir.display()
        ));

        let ranking_path = self
            .ranker
            .build_ranking_with_progress(&symbol_list, &self.config.output_dir, period, on_progress)
            .await?;

        let report_path = self
            .config
            .output_dir
            .join(industry_report_file_name(index.as_str(), period));
        let report = build_industry_report(&ranking_path, &report_path);

        timer.log_elapsed("ANALYZER");
        Ok(StrengthRun { ranking_path, report })
    }
}

fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        return Err(StrengthError::InvalidInput(
            "Period must be a positive integer.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_period_rejected_before_network() {
        let analyzer = StrengthAnalyzer::from_config(AnalysisConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..AnalysisConfig::default()
        })
        .unwrap();

        let result = analyzer.run_industry_strength(IndexList::Nifty50, 0, |_| {}).await;
        assert!(matches!(result, Err(StrengthError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_missing_symbol_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let analyzer = StrengthAnalyzer::from_config(AnalysisConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            data_dir: dir.path().join("nowhere"),
            output_dir: dir.path().join("out"),
            transient_dir: None,
        })
        .unwrap();

        let result = analyzer.run_industry_strength(IndexList::Nifty100, 14, |_| {}).await;
        assert!(result.is_err());
    }
}
