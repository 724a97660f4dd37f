//! Sequential sub-range fetcher.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{HistoricalError, Result};
use crate::gdax::models::{ExchangeErrorBody, RawCandle};
use crate::gdax::request::build_request;
use crate::gdax::transport::{HttpResponse, HttpTransport, Transport};
use crate::interval::{granularity_for, Granularity, SupportedInterval};
use crate::partition::{partition, TimeRange};

/// Fetches raw candles for an interval, one request per partitioned range.
#[derive(Debug, Clone)]
pub struct GdaxFetcher<T> {
    transport: T,
    endpoint: String,
}

impl GdaxFetcher<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?, config.candles_endpoint()))
    }
}

impl<T: Transport> GdaxFetcher<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// All candles for `interval` relative to `now`, newest range first.
    ///
    /// Ranges are requested strictly one after another. The first failure
    /// aborts the whole fetch and discards rows gathered so far.
    pub async fn fetch(
        &self,
        interval: SupportedInterval,
        now: DateTime<Utc>,
    ) -> Result<Vec<RawCandle>> {
        let granularity = granularity_for(interval);
        let ranges = partition(interval, now);

        let mut candles = Vec::new();
        for range in &ranges {
            let rows = self.fetch_range(granularity, range).await?;
            candles.extend(rows);
        }

        Ok(candles)
    }

    /// Candles for one range, trimmed to its boundaries.
    pub async fn fetch_range(
        &self,
        granularity: Granularity,
        range: &TimeRange,
    ) -> Result<Vec<RawCandle>> {
        let url = build_request(&self.endpoint, granularity, range.start(), range.end())?;
        info!("Querying {}", url);

        let response = self.transport.get(&url).await.map_err(|e| {
            error!("Could not reach {}: {}", url, e);
            e
        })?;

        let rows = decode_response(response)?;
        Ok(filter_to_range(range, rows))
    }
}

fn decode_response(response: HttpResponse) -> Result<Vec<RawCandle>> {
    if response.is_success() {
        return serde_json::from_slice(&response.body).map_err(|e| {
            error!("Could not decode GDAX response: {}", e);
            HistoricalError::DecodeCandles(e)
        });
    }

    match serde_json::from_slice::<ExchangeErrorBody>(&response.body) {
        Ok(body) => {
            error!("GDAX returned {}: {}", response.status, body.message);
            Err(HistoricalError::Exchange {
                status: response.status,
                message: body.message,
            })
        }
        Err(source) => {
            error!(
                "Could not decode GDAX error response with code {}",
                response.status
            );
            Err(HistoricalError::DecodeExchangeError {
                status: response.status,
                source,
            })
        }
    }
}

/// Keep rows whose timestamp lies in `[start, end]`; the exchange may answer
/// with more than was asked for.
pub fn filter_to_range(range: &TimeRange, rows: Vec<RawCandle>) -> Vec<RawCandle> {
    let received = rows.len();
    let kept: Vec<RawCandle> = rows
        .into_iter()
        .filter(|row| range.contains_timestamp(row.epoch_seconds()))
        .collect();

    if kept.len() != received {
        debug!(
            "Dropped {} of {} rows outside {} .. {}",
            received - kept.len(),
            received,
            range.start(),
            range.end()
        );
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn range() -> TimeRange {
        TimeRange::new(
            Utc.with_ymd_and_hms(2024, 3, 13, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_filter_is_boundary_inclusive() {
        let range = range();
        let start = range.start().timestamp() as f64;
        let end = range.end().timestamp() as f64;

        let rows = vec![
            RawCandle::new(end + 1.0, 5.0),
            RawCandle::new(end, 4.0),
            RawCandle::new(start + 3_600.0, 3.0),
            RawCandle::new(start, 2.0),
            RawCandle::new(start - 1.0, 1.0),
        ];

        let kept = filter_to_range(&range, rows);
        let prices: Vec<f64> = kept.iter().map(|c| c.price).collect();
        assert_eq!(prices, vec![4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_filter_keeps_empty_input_empty() {
        assert!(filter_to_range(&range(), Vec::new()).is_empty());
    }

    #[test]
    fn test_decode_success() {
        let response = HttpResponse::new(200, "[[1710460800, 0.1, 1, 2, 3, 4]]");
        let rows = decode_response(response).unwrap();
        assert_eq!(rows, vec![RawCandle::new(1_710_460_800.0, 0.1)]);
    }

    #[test]
    fn test_decode_malformed_success() {
        let response = HttpResponse::new(200, "<html>oops</html>");
        let err = decode_response(response).unwrap_err();
        assert!(matches!(err, HistoricalError::DecodeCandles(_)));
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_decode_exchange_error() {
        let response = HttpResponse::new(400, r#"{"message":"granularity too small"}"#);
        let err = decode_response(response).unwrap_err();
        assert!(matches!(
            err,
            HistoricalError::Exchange { status: 400, ref message } if message == "granularity too small"
        ));
        assert_eq!(err.to_string(), "granularity too small");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_decode_malformed_exchange_error() {
        let response = HttpResponse::new(502, "Bad Gateway");
        let err = decode_response(response).unwrap_err();
        assert!(matches!(
            err,
            HistoricalError::DecodeExchangeError { status: 502, .. }
        ));
    }
}
