use chrono::{DateTime, Utc};
use url::Url;

use crate::error::Result;
use crate::interval::Granularity;

/// Day-resolution date format the exchange expects for `start` and `end`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Candles URL for one sub-range.
///
/// Ex: `https://api.gdax.com/products/BTC-USD/candles?end=2017-01-16&granularity=3600&start=2017-01-15`
pub fn build_request(
    endpoint: &str,
    granularity: Granularity,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Url> {
    let mut url = Url::parse(endpoint).map_err(|e| {
        tracing::error!("Could not build GDAX historical URL from {}: {}", endpoint, e);
        e
    })?;

    // Keys in lexical order.
    url.query_pairs_mut()
        .clear()
        .append_pair("end", &end.format(DATE_FORMAT).to_string())
        .append_pair("granularity", &granularity.seconds().to_string())
        .append_pair("start", &start.format(DATE_FORMAT).to_string());

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistoricalError;
    use chrono::TimeZone;

    const ENDPOINT: &str = "https://api.gdax.com/products/BTC-USD/candles";

    #[test]
    fn test_build_request() {
        let start = Utc.with_ymd_and_hms(2017, 1, 15, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2017, 1, 16, 0, 0, 0).unwrap();

        let url = build_request(ENDPOINT, Granularity::ONE_HOUR, start, end).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.gdax.com/products/BTC-USD/candles?end=2017-01-16&granularity=3600&start=2017-01-15"
        );
    }

    #[test]
    fn test_dates_drop_time_of_day() {
        let start = Utc.with_ymd_and_hms(2024, 3, 13, 23, 59, 59).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 16, 12, 30, 0).unwrap();

        let url = build_request(ENDPOINT, Granularity::ONE_DAY, start, end).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(
            pairs,
            vec![
                ("end".to_string(), "2024-03-16".to_string()),
                ("granularity".to_string(), "86400".to_string()),
                ("start".to_string(), "2024-03-13".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_endpoint() {
        let now = Utc::now();
        let err = build_request("not a url", Granularity::ONE_DAY, now, now).unwrap_err();
        assert!(matches!(err, HistoricalError::RequestBuild(_)));
    }
}
