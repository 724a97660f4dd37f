//! GDAX candles endpoint: wire models, request construction, transport and
//! the sequential sub-range fetcher.

pub mod fetcher;
pub mod models;
pub mod request;
pub mod transport;

pub use fetcher::{filter_to_range, GdaxFetcher};
pub use models::{ExchangeErrorBody, RawCandle};
pub use request::build_request;
pub use transport::{HttpResponse, HttpTransport, Transport};

/// The only product this service serves.
pub const PRODUCT_ID: &str = "BTC-USD";
