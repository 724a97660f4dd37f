//! Entry point: interval label in, normalized price series out.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::gdax::{GdaxFetcher, HttpTransport, Transport};
use crate::interval::SupportedInterval;
use crate::normalize::{normalize, PriceSeries};

#[derive(Debug, Clone)]
pub struct HistoricalService<T> {
    fetcher: GdaxFetcher<T>,
}

impl HistoricalService<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(GdaxFetcher::from_config(config)?))
    }
}

impl<T: Transport> HistoricalService<T> {
    pub fn new(fetcher: GdaxFetcher<T>) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &GdaxFetcher<T> {
        &self.fetcher
    }

    /// Prices for the lookback named by `interval`, ending today.
    pub async fn get_historical_series(&self, interval: &str) -> Result<PriceSeries> {
        self.get_historical_series_at(interval, Utc::now()).await
    }

    /// Same as [`Self::get_historical_series`] with an explicit "now".
    ///
    /// An unknown label fails before any request is built.
    pub async fn get_historical_series_at(
        &self,
        interval: &str,
        now: DateTime<Utc>,
    ) -> Result<PriceSeries> {
        let interval = interval.parse::<SupportedInterval>().map_err(|e| {
            warn!("Rejected interval: {}", e);
            e
        })?;

        let candles = self.fetcher.fetch(interval, now).await?;
        info!("Found {} buckets from GDAX for {}", candles.len(), interval);

        Ok(normalize(&candles))
    }
}
