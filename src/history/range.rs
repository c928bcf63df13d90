use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::core::TfError;

/// Look-back window for a historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    /// Last hour.
    H1,
    /// Last 24 hours.
    #[default]
    H24,
    /// Last 7 days.
    D7,
    /// Last 30 days.
    D30,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [TimeRange::H1, TimeRange::H24, TimeRange::D7, TimeRange::D30];

    pub const fn as_str(self) -> &'static str {
        match self {
            TimeRange::H1 => "1h",
            TimeRange::H24 => "24h",
            TimeRange::D7 => "7d",
            TimeRange::D30 => "30d",
        }
    }

    /// Width of the window in hours.
    pub const fn hours(self) -> i64 {
        match self {
            TimeRange::H1 => 1,
            TimeRange::H24 => 24,
            TimeRange::D7 => 7 * 24,
            TimeRange::D30 => 30 * 24,
        }
    }

    /// The `(from, to)` pair ending at `now`.
    pub fn bounds(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::hours(self.hours()), now)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = TfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| TfError::InvalidParams(format!("unknown time range '{s}'")))
    }
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `(from, to)` strings for `range` ending now.
pub fn time_range_dates(range: TimeRange) -> (String, String) {
    let (from, to) = range.bounds(Utc::now());
    (format_timestamp(from), format_timestamp(to))
}
