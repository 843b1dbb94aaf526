//! Time-range selection and report-window arithmetic.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Dashboard time-range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "90days")]
    Last90Days,
}

impl TimeRange {
    /// Parse a selector tag from a query string.
    ///
    /// Total over all inputs: anything unrecognized (or absent) falls back
    /// to the 7-day default, the same mapping the overview route applies.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("30days") => Self::Last30Days,
            Some("90days") => Self::Last90Days,
            _ => Self::Last7Days,
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Last90Days => 90,
        }
    }

    /// The date `days()` before `today`, shifted forward by `offset` days.
    pub fn start_from(self, today: NaiveDate, offset: i64) -> NaiveDate {
        today - Duration::days(self.days() - offset)
    }

    /// Current reporting window: the last `days()` days, ending today.
    pub fn window(self, today: NaiveDate) -> ReportWindow {
        ReportWindow {
            start: self.start_from(today, 0),
            end: today,
        }
    }

    /// The equal-length period immediately before the current window.
    ///
    /// Ends on the current window's start date, so the two periods share a
    /// boundary but never overlap.
    pub fn comparison_window(self, today: NaiveDate) -> ReportWindow {
        let end = self.start_from(today, 0);
        ReportWindow {
            start: end - Duration::days(self.days()),
            end,
        }
    }
}

/// Calendar-date pair sent to the reporting backend, rendered as ISO
/// `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
