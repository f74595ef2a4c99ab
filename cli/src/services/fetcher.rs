use async_trait::async_trait;
use reqwest::StatusCode;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    error::Result,
    services::NseSession,
    utils::{parse_provider_date, Logger, Timer},
};

const HISTORICAL_ENDPOINT: &str = "/api/historical/cm/equity";
const EQUITY_SERIES: &str = "[\"EQ\"]";

/// Source of historical daily series, persisted as transient CSV files
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Download the series for `symbol` between two `dd-mm-yyyy` dates.
    ///
    /// `Ok(None)` means the provider had no data for the symbol.
    async fn fetch_series(&self, symbol: &str, from_date: &str, to_date: &str) -> Result<Option<PathBuf>>;
}

/// Removes the wrapped file when dropped
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
}

impl TransientFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("FETCHER: Deleted transient file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("FETCHER: Failed to delete {}: {}", self.path.display(), e),
        }
    }
}

/// Historical series downloader for the provider's equity endpoint
pub struct SeriesFetcher {
    session: Arc<NseSession>,
    transient_dir: PathBuf,
    owns_dir: bool,
    logger: Logger,
}

impl SeriesFetcher {
    /// Fetcher writing into a fresh directory under the system temp dir
    pub fn new(session: Arc<NseSession>) -> Self {
        let transient_dir = std::env::temp_dir()
            .join("industry_strength")
            .join(uuid::Uuid::new_v4().to_string());
        Self {
            session,
            transient_dir,
            owns_dir: true,
            logger: Logger::new("FETCHER"),
        }
    }

    /// Fetcher writing into a caller-managed directory, left in place on drop
    pub fn with_transient_dir(session: Arc<NseSession>, transient_dir: PathBuf) -> Self {
        Self {
            session,
            transient_dir,
            owns_dir: false,
            logger: Logger::new("FETCHER"),
        }
    }

    pub fn transient_dir(&self) -> &Path {
        &self.transient_dir
    }

    /// Transient location for one symbol's series
    pub fn transient_path(&self, symbol: &str) -> PathBuf {
        let file_stem: String = symbol
            .trim()
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.transient_dir.join(format!("{}.csv", file_stem))
    }
}

#[async_trait]
impl SeriesSource for SeriesFetcher {
    async fn fetch_series(&self, symbol: &str, from_date: &str, to_date: &str) -> Result<Option<PathBuf>> {
        parse_provider_date(from_date)?;
        parse_provider_date(to_date)?;

        self.session.ensure_session().await?;

        let url = self.session.endpoint(HISTORICAL_ENDPOINT)?;
        let timer = Timer::start(&format!("{} fetch", symbol));
        let response = self
            .session
            .client()
            .get(url)
            .query(&[
                ("symbol", symbol),
                ("series", EQUITY_SERIES),
                ("from", from_date),
                ("to", to_date),
                ("csv", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            self.logger.warn(&format!(
                "Failed to download CSV for {}. HTTP Status Code: {}",
                symbol,
                status.as_u16()
            ));
            return Ok(None);
        }

        let body = response.bytes().await?;
        let save_path = self.transient_path(symbol);
        fs::create_dir_all(&self.transient_dir)?;
        fs::write(&save_path, &body)?;

        self.logger.info(&format!(
            "CSV for {} downloaded ({} bytes, {:.1}ms) and saved to {}",
            symbol,
            body.len(),
            timer.elapsed_ms(),
            save_path.display()
        ));
        Ok(Some(save_path))
    }
}

impl Drop for SeriesFetcher {
    fn drop(&mut self) {
        // The uuid directory belongs to this fetcher alone
        if self.owns_dir {
            match fs::remove_dir_all(&self.transient_dir) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => self.logger.warn_with_error(
                    &format!("Failed to remove {}", self.transient_dir.display()),
                    &e,
                ),
            }
        }
    }
}
