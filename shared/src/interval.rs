//! Supported lookback intervals and the candle granularity each one requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HistoricalError;
use crate::partition::{Span, Windows};

/// Seconds covered by one candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Granularity(u32);

impl Granularity {
    pub const ONE_MINUTE: Granularity = Granularity(60);
    pub const FIVE_MINUTES: Granularity = Granularity(300);
    pub const FIFTEEN_MINUTES: Granularity = Granularity(900);
    pub const ONE_HOUR: Granularity = Granularity(3_600);
    pub const SIX_HOURS: Granularity = Granularity(21_600);
    pub const ONE_DAY: Granularity = Granularity(86_400);

    /// The only granularities the exchange accepts.
    pub const ACCEPTED: [Granularity; 6] = [
        Self::ONE_MINUTE,
        Self::FIVE_MINUTES,
        Self::FIFTEEN_MINUTES,
        Self::ONE_HOUR,
        Self::SIX_HOURS,
        Self::ONE_DAY,
    ];

    pub fn seconds(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookback windows a caller may ask for.
///
/// Discriminants index [`INTERVAL_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedInterval {
    TwoYear = 0,
    Year = 1,
    SixMonth = 2,
    ThreeMonth = 3,
    Month = 4,
    Week = 5,
    Day = 6,
}

/// One row of the interval table.
#[derive(Debug)]
pub struct IntervalRow {
    pub interval: SupportedInterval,
    /// Canonical upper-case label.
    pub label: &'static str,
    /// Other accepted spellings, already normalized.
    pub aliases: &'static [&'static str],
    pub granularity: Granularity,
    /// How far back from the rounded anchor the interval reaches.
    pub lookback: Span,
    pub windows: Windows,
}

/// Fixed week split, newest window first.
const WEEK_WINDOWS: &[Span] = &[Span::days(3), Span::days(3), Span::days(2)];

/// Process-wide interval configuration. Adding an interval is a new row here.
pub static INTERVAL_TABLE: [IntervalRow; 7] = [
    IntervalRow {
        interval: SupportedInterval::TwoYear,
        label: "TWOYEAR",
        aliases: &[],
        granularity: Granularity::ONE_DAY,
        lookback: Span::months(24),
        windows: Windows::Every(Span::months(6)),
    },
    IntervalRow {
        interval: SupportedInterval::Year,
        label: "YEAR",
        aliases: &["ONEYEAR"],
        granularity: Granularity::ONE_DAY,
        lookback: Span::months(12),
        windows: Windows::Every(Span::months(6)),
    },
    IntervalRow {
        interval: SupportedInterval::SixMonth,
        label: "SIXMONTH",
        aliases: &[],
        granularity: Granularity::ONE_DAY,
        lookback: Span::months(6),
        windows: Windows::Whole,
    },
    IntervalRow {
        interval: SupportedInterval::ThreeMonth,
        label: "THREEMONTH",
        aliases: &[],
        granularity: Granularity::ONE_DAY,
        lookback: Span::months(3),
        windows: Windows::Whole,
    },
    IntervalRow {
        interval: SupportedInterval::Month,
        label: "MONTH",
        aliases: &["ONEMONTH"],
        granularity: Granularity::SIX_HOURS,
        lookback: Span::months(1),
        windows: Windows::Whole,
    },
    IntervalRow {
        interval: SupportedInterval::Week,
        label: "WEEK",
        aliases: &["ONEWEEK"],
        granularity: Granularity::ONE_HOUR,
        lookback: Span::days(8),
        windows: Windows::Sequence(WEEK_WINDOWS),
    },
    IntervalRow {
        interval: SupportedInterval::Day,
        label: "DAY",
        aliases: &["ONEDAY"],
        granularity: Granularity::FIFTEEN_MINUTES,
        lookback: Span::days(2),
        windows: Windows::Whole,
    },
];

impl SupportedInterval {
    pub const ALL: [SupportedInterval; 7] = [
        SupportedInterval::TwoYear,
        SupportedInterval::Year,
        SupportedInterval::SixMonth,
        SupportedInterval::ThreeMonth,
        SupportedInterval::Month,
        SupportedInterval::Week,
        SupportedInterval::Day,
    ];

    pub fn row(self) -> &'static IntervalRow {
        &INTERVAL_TABLE[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.row().label
    }

    /// Case-insensitive lookup; `-`, `_` and spaces are ignored.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_uppercase();

        INTERVAL_TABLE
            .iter()
            .find(|row| row.label == normalized || row.aliases.contains(&normalized.as_str()))
            .map(|row| row.interval)
    }
}

impl FromStr for SupportedInterval {
    type Err = HistoricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| HistoricalError::InvalidInterval(s.to_uppercase()))
    }
}

impl fmt::Display for SupportedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Granularity requested for `interval`.
pub fn granularity_for(interval: SupportedInterval) -> Granularity {
    interval.row().granularity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_match_discriminants() {
        for interval in SupportedInterval::ALL {
            assert_eq!(interval.row().interval, interval);
        }
    }

    #[test]
    fn test_granularities() {
        assert_eq!(granularity_for(SupportedInterval::TwoYear).seconds(), 86_400);
        assert_eq!(granularity_for(SupportedInterval::Year).seconds(), 86_400);
        assert_eq!(granularity_for(SupportedInterval::SixMonth).seconds(), 86_400);
        assert_eq!(granularity_for(SupportedInterval::ThreeMonth).seconds(), 86_400);
        assert_eq!(granularity_for(SupportedInterval::Month).seconds(), 21_600);
        assert_eq!(granularity_for(SupportedInterval::Week).seconds(), 3_600);
        assert_eq!(granularity_for(SupportedInterval::Day).seconds(), 900);

        for interval in SupportedInterval::ALL {
            assert!(Granularity::ACCEPTED.contains(&granularity_for(interval)));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(SupportedInterval::parse("year"), Some(SupportedInterval::Year));
        assert_eq!(SupportedInterval::parse("TwoYear"), Some(SupportedInterval::TwoYear));
        assert_eq!(SupportedInterval::parse("six-month"), Some(SupportedInterval::SixMonth));
        assert_eq!(SupportedInterval::parse("one_week"), Some(SupportedInterval::Week));
        assert_eq!(SupportedInterval::parse("DAY"), Some(SupportedInterval::Day));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(SupportedInterval::parse("bogus"), None);
        assert_eq!(SupportedInterval::parse(""), None);

        let err = "bogus".parse::<SupportedInterval>().unwrap_err();
        assert!(matches!(err, HistoricalError::InvalidInterval(ref label) if label == "BOGUS"));
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for interval in SupportedInterval::ALL {
            assert_eq!(interval.to_string().parse::<SupportedInterval>().unwrap(), interval);
        }
    }
}
