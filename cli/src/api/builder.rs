//! Builder pattern for configuring industry strength runs

use std::path::PathBuf;

use crate::api::analyzer::StrengthAnalyzer;
use crate::error::Result;
use crate::services::DEFAULT_BASE_URL;

/// Settings shared by every operation of a [`StrengthAnalyzer`]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Provider root, e.g. `https://www.nseindia.com`
    pub base_url: String,
    /// Directory holding the index constituent lists
    pub data_dir: PathBuf,
    /// Directory receiving the ranking and industry reports
    pub output_dir: PathBuf,
    /// Where transient series are written; a fresh temp dir when `None`
    pub transient_dir: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("RelativeStrength"),
            transient_dir: None,
        }
    }
}

/// Builder for configuring a [`StrengthAnalyzer`]
///
/// # Example
/// ```no_run
/// use industry_strength::api::AnalysisBuilder;
///
/// let analyzer = AnalysisBuilder::new()
///     .with_data_dir("data")
///     .with_output_dir("reports/RelativeStrength")
///     .build()
///     .expect("valid configuration");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisBuilder {
    config: AnalysisConfig,
}

impl AnalysisBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the session at another provider root (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = data_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    pub fn with_transient_dir(mut self, transient_dir: impl Into<PathBuf>) -> Self {
        self.config.transient_dir = Some(transient_dir.into());
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Build the analyzer, creating its provider session
    pub fn build(self) -> Result<StrengthAnalyzer> {
        StrengthAnalyzer::from_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = AnalysisBuilder::new();
        assert_eq!(builder.config().base_url, "https://www.nseindia.com");
        assert_eq!(builder.config().data_dir, PathBuf::from("data"));
        assert!(builder.config().transient_dir.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let analyzer = AnalysisBuilder::new()
            .with_base_url("http://127.0.0.1:9")
            .with_data_dir("lists")
            .with_output_dir("out")
            .with_transient_dir("tmp/series")
            .build()
            .unwrap();
        assert_eq!(analyzer.config().data_dir, PathBuf::from("lists"));
        assert_eq!(analyzer.config().output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(AnalysisBuilder::new().with_base_url("::").build().is_err());
    }
}
