use std::time::Duration;

use anyhow::Context;
use dotenv::dotenv;

/// Base URL of the GDAX REST API.
pub const DEFAULT_EXCHANGE_BASE_URL: &str = "https://api.gdax.com";

/// Address the HTTP front door listens on.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9999";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the exchange REST API; the candles path is appended to it.
    pub exchange_base_url: String,
    /// Per-request timeout. `None` keeps the HTTP client's own default.
    pub http_timeout: Option<Duration>,
    pub user_agent: String,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange_base_url: DEFAULT_EXCHANGE_BASE_URL.to_string(),
            http_timeout: None,
            user_agent: format!("historical-api/{}", env!("CARGO_PKG_VERSION")),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        let defaults = Config::default();

        let http_timeout = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS must be whole seconds, got {raw:?}"))?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Config {
            exchange_base_url: std::env::var("EXCHANGE_BASE_URL")
                .unwrap_or(defaults.exchange_base_url),
            http_timeout,
            user_agent: std::env::var("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
            bind_addr: std::env::var("API_BIND_ADDR").unwrap_or(defaults.bind_addr),
        })
    }

    pub fn with_exchange_base_url(mut self, url: impl Into<String>) -> Self {
        self.exchange_base_url = url.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Full URL of the fixed product's candles endpoint.
    pub fn candles_endpoint(&self) -> String {
        format!(
            "{}/products/{}/candles",
            self.exchange_base_url.trim_end_matches('/'),
            crate::gdax::PRODUCT_ID
        )
    }
}
