use serde::Deserialize;

/// One row of the candles response.
///
/// On the wire a row is an array of numbers; index 0 is the epoch-seconds
/// timestamp and index 1 the price. Remaining columns are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct RawCandle {
    pub timestamp: f64,
    pub price: f64,
}

impl RawCandle {
    pub fn new(timestamp: f64, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Timestamp truncated to whole epoch seconds.
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp as i64
    }
}

impl TryFrom<Vec<f64>> for RawCandle {
    type Error = String;

    fn try_from(row: Vec<f64>) -> Result<Self, Self::Error> {
        match row.as_slice() {
            [timestamp, price, ..] => Ok(Self::new(*timestamp, *price)),
            _ => Err(format!(
                "candle row needs at least 2 columns, got {}",
                row.len()
            )),
        }
    }
}

/// Body the exchange sends with a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeErrorBody {
    pub message: String,
}
