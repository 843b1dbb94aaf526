//! Fetch orchestration: the overview fan-out and the realtime snapshot.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::warn;

use pulseboard_core::range::TimeRange;
use pulseboard_core::report::{
    DimensionId, MetricId, OrderBy, ReportQuery, ReportRow, ReportingBackend, DAILY_METRICS,
    OVERVIEW_METRICS,
};
use pulseboard_core::summary::{
    build_summary, realtime_entries, AnalyticsSummary, OverviewRows, RealtimeEntry,
};

const RANKED_LIST_LIMIT: u32 = 10;

/// The six immutable report queries of one overview fetch cycle.
#[derive(Debug, Clone)]
pub struct OverviewQueries {
    pub current: ReportQuery,
    pub previous: ReportQuery,
    pub top_pages: ReportQuery,
    pub countries: ReportQuery,
    pub devices: ReportQuery,
    pub daily: ReportQuery,
}

/// Construct the overview queries for `range`, with `today` as the implicit
/// end of the current period.
pub fn overview_queries(range: TimeRange, today: NaiveDate) -> OverviewQueries {
    let window = range.window(today);
    let comparison = range.comparison_window(today);

    let aggregate = |w| ReportQuery {
        window: Some(w),
        dimensions: vec![],
        metrics: OVERVIEW_METRICS.to_vec(),
        order_by: None,
        limit: None,
    };

    let ranked = |dimension, metric: MetricId, limit| ReportQuery {
        window: Some(window),
        dimensions: vec![dimension],
        metrics: vec![metric],
        order_by: Some(OrderBy::MetricDesc(metric)),
        limit,
    };

    OverviewQueries {
        current: aggregate(window),
        previous: aggregate(comparison),
        top_pages: ranked(
            DimensionId::PagePath,
            MetricId::PageViews,
            Some(RANKED_LIST_LIMIT),
        ),
        countries: ranked(
            DimensionId::Country,
            MetricId::ActiveUsers,
            Some(RANKED_LIST_LIMIT),
        ),
        devices: ranked(DimensionId::DeviceCategory, MetricId::ActiveUsers, None),
        daily: ReportQuery {
            window: Some(window),
            dimensions: vec![DimensionId::Date],
            metrics: DAILY_METRICS.to_vec(),
            order_by: Some(OrderBy::DimensionAsc(DimensionId::Date)),
            limit: None,
        },
    }
}

/// Run one overview fetch cycle.
///
/// All six queries are dispatched concurrently and every outcome is
/// collected independently: a failed query degrades its section to an
/// empty row set instead of failing the cycle. The `Err` path covers only
/// orchestration that cannot run at all.
pub async fn fetch_overview(
    backend: &dyn ReportingBackend,
    range: TimeRange,
    today: NaiveDate,
) -> Result<AnalyticsSummary> {
    let queries = overview_queries(range, today);

    let (current, previous, top_pages, countries, devices, daily) = tokio::join!(
        backend.run_report(&queries.current),
        backend.run_report(&queries.previous),
        backend.run_report(&queries.top_pages),
        backend.run_report(&queries.countries),
        backend.run_report(&queries.devices),
        backend.run_report(&queries.daily),
    );

    let rows = OverviewRows {
        current: rows_or_empty("current_metrics", current),
        previous: rows_or_empty("previous_metrics", previous),
        top_pages: rows_or_empty("top_pages", top_pages),
        countries: rows_or_empty("users_by_country", countries),
        devices: rows_or_empty("users_by_device", devices),
        daily: rows_or_empty("daily_series", daily),
    };

    Ok(build_summary(&rows))
}

/// One realtime snapshot: active users by country, no window, no limit.
///
/// Fail-soft: any backend failure degrades to an empty snapshot rather
/// than an error, so callers always have a displayable value.
pub async fn fetch_realtime(backend: &dyn ReportingBackend) -> Vec<RealtimeEntry> {
    let query = ReportQuery {
        window: None,
        dimensions: vec![DimensionId::Country],
        metrics: vec![MetricId::ActiveUsers],
        order_by: None,
        limit: None,
    };

    match backend.run_realtime_report(&query).await {
        Ok(rows) => realtime_entries(&rows),
        Err(e) => {
            warn!(error = %e, "Realtime report failed, serving empty snapshot");
            Vec::new()
        }
    }
}

fn rows_or_empty(section: &str, result: Result<Vec<ReportRow>>) -> Vec<ReportRow> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!(section, error = %e, "Report query failed, section degrades to empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn aggregate_queries_cover_both_periods() {
        let queries = overview_queries(TimeRange::Last7Days, today());

        let current = queries.current.window.unwrap();
        let previous = queries.previous.window.unwrap();
        assert_eq!(current.end, today());
        assert_eq!(previous.end, current.start);
        assert_eq!(current.span_days(), previous.span_days());

        assert_eq!(queries.current.metrics, OVERVIEW_METRICS.to_vec());
        assert!(queries.current.dimensions.is_empty());
        assert_eq!(queries.previous.metrics, OVERVIEW_METRICS.to_vec());
    }

    #[test]
    fn ranked_queries_sort_descending_with_limits() {
        let queries = overview_queries(TimeRange::Last30Days, today());

        assert_eq!(queries.top_pages.dimensions, vec![DimensionId::PagePath]);
        assert_eq!(
            queries.top_pages.order_by,
            Some(OrderBy::MetricDesc(MetricId::PageViews))
        );
        assert_eq!(queries.top_pages.limit, Some(10));

        assert_eq!(queries.countries.dimensions, vec![DimensionId::Country]);
        assert_eq!(queries.countries.limit, Some(10));

        // Device breakdown is small; no limit requested.
        assert_eq!(
            queries.devices.dimensions,
            vec![DimensionId::DeviceCategory]
        );
        assert_eq!(queries.devices.limit, None);
    }

    #[test]
    fn daily_query_orders_by_date_ascending() {
        let queries = overview_queries(TimeRange::Last90Days, today());

        assert_eq!(queries.daily.dimensions, vec![DimensionId::Date]);
        assert_eq!(queries.daily.metrics, DAILY_METRICS.to_vec());
        assert_eq!(
            queries.daily.order_by,
            Some(OrderBy::DimensionAsc(DimensionId::Date))
        );
    }
}
