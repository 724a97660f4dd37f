//! Splits a lookback interval into request-sized time ranges.
//!
//! The exchange caps how many candles one request returns, so long lookbacks
//! are cut into windows. Ranges are produced newest first: a caller that keeps
//! only a prefix of the fetched rows still holds the most recent data.

use chrono::{DateTime, Days, Duration, Months, NaiveTime, Utc};
use serde::Serialize;

use crate::interval::SupportedInterval;

/// Most candles the exchange returns for a single request.
pub const MAX_CANDLES_PER_REQUEST: i64 = 300;

/// A calendar distance, applied backwards from an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    months: u32,
    days: u32,
}

impl Span {
    pub const fn months(months: u32) -> Self {
        Self { months, days: 0 }
    }

    pub const fn days(days: u32) -> Self {
        Self { months: 0, days }
    }

    pub const fn plus(self, other: Span) -> Self {
        Self {
            months: self.months + other.months,
            days: self.days + other.days,
        }
    }

    /// `instant` moved back by this span. Month steps clamp to the last
    /// valid day of the target month.
    pub fn before(self, instant: DateTime<Utc>) -> DateTime<Utc> {
        instant
            .checked_sub_months(Months::new(self.months))
            .and_then(|t| t.checked_sub_days(Days::new(u64::from(self.days))))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// How a lookback is cut into request windows, newest first.
#[derive(Debug, Clone, Copy)]
pub enum Windows {
    /// A single request covers the whole lookback.
    Whole,
    /// Repeated windows of one size; the oldest may be shorter.
    Every(Span),
    /// Literal window sizes, newest first.
    Sequence(&'static [Span]),
}

impl Windows {
    /// Cut `[floor, anchor]` into ranges. Boundaries are measured from
    /// `anchor` so neighbouring ranges share their endpoints exactly.
    fn split(self, anchor: DateTime<Utc>, floor: DateTime<Utc>) -> Vec<TimeRange> {
        let steps: Box<dyn Iterator<Item = Span>> = match self {
            Windows::Whole => return vec![TimeRange::new(floor, anchor)],
            Windows::Every(step) => Box::new(std::iter::repeat(step)),
            Windows::Sequence(steps) => Box::new(steps.iter().copied()),
        };

        let mut ranges = Vec::new();
        let mut upper = anchor;
        let mut offset = Span::days(0);

        for step in steps {
            if upper <= floor {
                break;
            }
            offset = offset.plus(step);
            let lower = offset.before(anchor).max(floor);
            if lower >= upper {
                break;
            }
            ranges.push(TimeRange::new(lower, upper));
            upper = lower;
        }

        ranges
    }
}

/// One request window. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Inclusive on both boundaries.
    pub fn contains_timestamp(&self, epoch_seconds: i64) -> bool {
        self.start.timestamp() <= epoch_seconds && epoch_seconds <= self.end.timestamp()
    }
}

/// Start of the UTC day containing `now`, plus one day, so today's partial
/// candle falls inside the newest range.
pub fn rounded_anchor(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
}

/// Request windows for `interval`, newest first.
pub fn partition(interval: SupportedInterval, now: DateTime<Utc>) -> Vec<TimeRange> {
    let row = interval.row();
    let anchor = rounded_anchor(now);
    let floor = row.lookback.before(anchor);

    row.windows.split(anchor, floor)
}
