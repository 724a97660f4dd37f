//! Historical BTC-USD price retrieval from the GDAX candles endpoint.
//!
//! A lookback label such as `"YEAR"` is partitioned into sub-ranges that each
//! fit under the exchange's per-request candle cap, fetched one after another,
//! trimmed to their own boundaries and normalized into a single [`PriceSeries`].
//!
//! ```no_run
//! use shared::{Config, HistoricalService};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let service = HistoricalService::from_config(&Config::from_env()?)?;
//! let series = service.get_historical_series("week").await?;
//! println!("{} points", series.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gdax;
pub mod interval;
pub mod normalize;
pub mod partition;
pub mod service;

pub use config::Config;
pub use error::{HistoricalError, Result};
pub use gdax::{GdaxFetcher, HttpResponse, HttpTransport, RawCandle, Transport};
pub use interval::{granularity_for, Granularity, SupportedInterval};
pub use normalize::{normalize, PricePoint, PriceSeries};
pub use partition::{partition, TimeRange};
pub use service::HistoricalService;
pub use url::Url;
