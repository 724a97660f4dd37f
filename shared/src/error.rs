//! Error type surfaced by every historical price operation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistoricalError>;

/// A failed historical lookup.
///
/// Each variant carries a human readable message (its `Display`) and maps to
/// an optional numeric status through [`HistoricalError::status_code`]; the
/// caller decides how to present it.
#[derive(Debug, Error)]
pub enum HistoricalError {
    /// The interval label is not one of the supported set. No request is made.
    #[error("Please provide a valid interval; {0} is invalid")]
    InvalidInterval(String),

    /// The exchange could not be reached; no response body exists.
    #[error("Failed to reach GDAX API at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// A successful response carried something other than a candle array.
    #[error("Could not decode GDAX candles: {0}")]
    DecodeCandles(#[source] serde_json::Error),

    /// A non-success response whose body was not the exchange error payload.
    #[error("Could not decode GDAX error response with status {status}: {source}")]
    DecodeExchangeError {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The exchange answered with its own error message.
    #[error("{message}")]
    Exchange { status: u16, message: String },

    #[error("Could not build GDAX request URL: {0}")]
    RequestBuild(#[from] url::ParseError),

    #[error("Could not initialise HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl HistoricalError {
    /// Status code attached to this failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HistoricalError::InvalidInterval(_) => Some(400),
            HistoricalError::Unreachable { .. } | HistoricalError::DecodeCandles(_) => Some(500),
            HistoricalError::DecodeExchangeError { .. }
            | HistoricalError::Exchange { .. }
            | HistoricalError::RequestBuild(_)
            | HistoricalError::HttpClient(_) => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, HistoricalError::InvalidInterval(_))
    }
}
