//! The GET capability the fetcher depends on.

use std::future::Future;

use url::Url;

use crate::config::Config;
use crate::error::{HistoricalError, Result};

/// A fully read response. The body is owned, so nothing stays open once the
/// transport returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single GET. A failure to reach the endpoint is reported as
/// [`HistoricalError::Unreachable`] and carries no response at all.
pub trait Transport: Send + Sync {
    fn get(&self, url: &Url) -> impl Future<Output = Result<HttpResponse>> + Send;
}

/// `reqwest`-backed transport used in production.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(HistoricalError::HttpClient)?;

        Ok(Self { client })
    }

    fn unreachable(url: &Url, err: reqwest::Error) -> HistoricalError {
        HistoricalError::Unreachable {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Self::unreachable(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::unreachable(url, e))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "[]").is_success());
        assert!(HttpResponse::new(204, Vec::new()).is_success());
        assert!(!HttpResponse::new(400, "{}").is_success());
        assert!(!HttpResponse::new(503, "").is_success());
    }

    #[test]
    fn test_transport_builds_from_config() {
        let config = Config::default().with_http_timeout(Duration::from_secs(3));
        assert!(HttpTransport::new(&config).is_ok());
        assert!(HttpTransport::new(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let config = Config::default().with_http_timeout(Duration::from_secs(2));
        let transport = HttpTransport::new(&config).unwrap();
        // Port 9 (discard) on localhost is expected to refuse the connection.
        let url = Url::parse("http://127.0.0.1:9/products/BTC-USD/candles").unwrap();

        let err = transport.get(&url).await.unwrap_err();
        assert!(matches!(err, HistoricalError::Unreachable { .. }));
        assert_eq!(err.status_code(), Some(500));
    }
}
