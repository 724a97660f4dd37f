//! Exchange rows to generic price points.

use serde::{Deserialize, Serialize};

use crate::gdax::RawCandle;

/// A timestamp paired with a decimal price string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Shortest decimal text that reads back as the exchange's value.
    pub price: String,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: impl Into<String>) -> Self {
        Self {
            timestamp,
            price: price.into(),
        }
    }
}

impl From<&RawCandle> for PricePoint {
    fn from(candle: &RawCandle) -> Self {
        Self::new(candle.epoch_seconds(), format_price(candle.price))
    }
}

/// Ordered price points, in the order the underlying ranges were fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    pub fn into_inner(self) -> Vec<PricePoint> {
        self.points
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::from_vec(points)
    }
}

impl IntoIterator for PriceSeries {
    type Item = PricePoint;
    type IntoIter = std::vec::IntoIter<PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Plain decimal notation, shortest digits that round-trip, never an exponent.
pub fn format_price(value: f64) -> String {
    value.to_string()
}

/// Map rows to price points, keeping their order.
pub fn normalize(candles: &[RawCandle]) -> PriceSeries {
    candles.iter().map(PricePoint::from).collect::<Vec<_>>().into()
}
