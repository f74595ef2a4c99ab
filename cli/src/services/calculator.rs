use crate::{
    error::{Result, StrengthError},
    models::{IndicatorResult, Series},
    services::{SeriesSource, TransientFile},
    utils::{latest_ema, latest_sma, Logger},
};

/// Computes the latest SMA/EMA of a symbol from a freshly fetched series
pub struct IndicatorCalculator<S> {
    source: S,
    logger: Logger,
}

impl<S: SeriesSource> IndicatorCalculator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            logger: Logger::new("CALCULATOR"),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, parse and reduce one symbol's series.
    ///
    /// `Ok(None)` when the provider has no data or the series holds fewer
    /// than `period` rows. The transient file is removed on every path.
    pub async fn compute_indicators(
        &self,
        symbol: &str,
        from_date: &str,
        to_date: &str,
        period: usize,
    ) -> Result<Option<IndicatorResult>> {
        if period == 0 {
            return Err(StrengthError::InvalidInput("period must be at least 1".to_string()));
        }

        let Some(path) = self.source.fetch_series(symbol, from_date, to_date).await? else {
            self.logger.info(&format!("No series available for {}", symbol));
            return Ok(None);
        };
        let transient = TransientFile::new(path);

        let series = Series::from_path(transient.path())?;

        let current_price = match series.latest_close() {
            Some(close) if series.len() >= period => close,
            _ => {
                self.logger.info(&format!(
                    "Not enough data to calculate {}-day SMA/EMA for {}. Only {} data points available.",
                    period,
                    symbol,
                    series.len()
                ));
                return Ok(None);
            }
        };

        let closes = series.chronological_closes();
        let result = IndicatorResult {
            sma: latest_sma(&closes, period),
            ema: latest_ema(&closes, period),
            current_price,
        };

        self.logger.debug(&format!(
            "{}: SMA={:?}, EMA={:?}, Recent Close Price={}",
            symbol, result.sma, result.ema, result.current_price
        ));
        Ok(Some(result))
    }
}
