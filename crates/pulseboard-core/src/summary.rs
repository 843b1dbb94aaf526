//! Overview aggregation: raw report rows in, one summary out.

use serde::Serialize;

use crate::format::{format_compact_date, format_duration, format_percent, pct_change};
use crate::report::{MetricId, MetricSet, ReportRow, DAILY_METRICS, OVERVIEW_METRICS};

/// Raw (possibly partial) row sets for one overview fetch cycle.
///
/// A section whose upstream query failed arrives here as an empty vector;
/// the builder treats that the same as a genuinely empty report.
#[derive(Debug, Clone, Default)]
pub struct OverviewRows {
    pub current: Vec<ReportRow>,
    pub previous: Vec<ReportRow>,
    pub top_pages: Vec<ReportRow>,
    pub countries: Vec<ReportRow>,
    pub devices: Vec<ReportRow>,
    pub daily: Vec<ReportRow>,
}

/// A metric value rendered for a dashboard card: numeric for counts,
/// preformatted text for rates and durations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSnapshot {
    pub name: &'static str,
    pub value: MetricValue,
    pub previous_value: MetricValue,
    /// Signed period-over-period percentage.
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageCount {
    pub page: String,
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceCount {
    pub device: String,
    pub users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub page_views: i64,
    pub users: i64,
}

/// The one artifact handed to the presentation layer.
///
/// Rebuilt from scratch on every fetch cycle, never mutated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub page_views: MetricSnapshot,
    pub users: MetricSnapshot,
    pub new_users: MetricSnapshot,
    pub sessions: MetricSnapshot,
    pub bounce_rate: MetricSnapshot,
    pub avg_session_duration: MetricSnapshot,
    pub top_pages: Vec<PageCount>,
    pub users_by_country: Vec<CountryCount>,
    pub users_by_device: Vec<DeviceCount>,
    pub daily: Vec<DailyPoint>,
}

/// Active users in one country right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealtimeEntry {
    pub country: String,
    pub active_users: i64,
}

/// Build the overview summary from the six row sets.
///
/// Pure: same rows in, same summary out. Missing or malformed values
/// default to zero / empty string; list order follows backend row order.
pub fn build_summary(rows: &OverviewRows) -> AnalyticsSummary {
    let current = MetricSet::from_row(&OVERVIEW_METRICS, rows.current.first());
    let previous = MetricSet::from_row(&OVERVIEW_METRICS, rows.previous.first());

    let count_snapshot = |name: &'static str, id: MetricId| MetricSnapshot {
        name,
        value: MetricValue::Count(current.count(id)),
        previous_value: MetricValue::Count(previous.count(id)),
        change: pct_change(current.rate(id), previous.rate(id)),
    };

    AnalyticsSummary {
        page_views: count_snapshot("Page Views", MetricId::PageViews),
        users: count_snapshot("Users", MetricId::ActiveUsers),
        new_users: count_snapshot("New Users", MetricId::NewUsers),
        sessions: count_snapshot("Sessions", MetricId::Sessions),
        bounce_rate: MetricSnapshot {
            name: "Bounce Rate",
            value: MetricValue::Text(format_percent(current.rate(MetricId::BounceRate))),
            previous_value: MetricValue::Text(format_percent(
                previous.rate(MetricId::BounceRate),
            )),
            change: pct_change(
                current.rate(MetricId::BounceRate),
                previous.rate(MetricId::BounceRate),
            ),
        },
        avg_session_duration: MetricSnapshot {
            name: "Avg. Session Duration",
            value: MetricValue::Text(format_duration(
                current.rate(MetricId::AvgSessionDuration),
            )),
            previous_value: MetricValue::Text(format_duration(
                previous.rate(MetricId::AvgSessionDuration),
            )),
            change: pct_change(
                current.rate(MetricId::AvgSessionDuration),
                previous.rate(MetricId::AvgSessionDuration),
            ),
        },
        top_pages: rows
            .top_pages
            .iter()
            .map(|row| PageCount {
                page: row.first_dimension().to_string(),
                views: MetricSet::from_row(&[MetricId::PageViews], Some(row))
                    .count(MetricId::PageViews),
            })
            .collect(),
        users_by_country: rows
            .countries
            .iter()
            .map(|row| CountryCount {
                country: row.first_dimension().to_string(),
                users: MetricSet::from_row(&[MetricId::ActiveUsers], Some(row))
                    .count(MetricId::ActiveUsers),
            })
            .collect(),
        users_by_device: rows
            .devices
            .iter()
            .map(|row| DeviceCount {
                device: row.first_dimension().to_string(),
                users: MetricSet::from_row(&[MetricId::ActiveUsers], Some(row))
                    .count(MetricId::ActiveUsers),
            })
            .collect(),
        daily: rows
            .daily
            .iter()
            .map(|row| {
                let metrics = MetricSet::from_row(&DAILY_METRICS, Some(row));
                DailyPoint {
                    date: format_compact_date(row.first_dimension()),
                    page_views: metrics.count(MetricId::PageViews),
                    users: metrics.count(MetricId::ActiveUsers),
                }
            })
            .collect(),
    }
}

/// Map realtime report rows to `{country, active_users}` entries.
///
/// A row without a country dimension reads as `"Unknown"`; a missing or
/// non-numeric count reads as zero.
pub fn realtime_entries(rows: &[ReportRow]) -> Vec<RealtimeEntry> {
    rows.iter()
        .map(|row| RealtimeEntry {
            country: match row.first_dimension() {
                "" => "Unknown".to_string(),
                country => country.to_string(),
            },
            active_users: MetricSet::from_row(&[MetricId::ActiveUsers], Some(row))
                .count(MetricId::ActiveUsers),
        })
        .collect()
}
