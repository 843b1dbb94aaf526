//! Reporting backend abstraction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::range::ReportWindow;

/// Metrics the dashboard requests, keyed by Data API name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    PageViews,
    ActiveUsers,
    NewUsers,
    Sessions,
    BounceRate,
    AvgSessionDuration,
}

impl MetricId {
    pub fn api_name(self) -> &'static str {
        match self {
            Self::PageViews => "screenPageViews",
            Self::ActiveUsers => "activeUsers",
            Self::NewUsers => "newUsers",
            Self::Sessions => "sessions",
            Self::BounceRate => "bounceRate",
            Self::AvgSessionDuration => "averageSessionDuration",
        }
    }
}

/// Breakdown axes the dashboard queries by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionId {
    PagePath,
    Country,
    DeviceCategory,
    Date,
}

impl DimensionId {
    pub fn api_name(self) -> &'static str {
        match self {
            Self::PagePath => "pagePath",
            Self::Country => "country",
            Self::DeviceCategory => "deviceCategory",
            Self::Date => "date",
        }
    }
}

/// Sort key for a report query. The dashboard only ever sorts ranked lists
/// descending by a metric, or the daily series ascending by a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    MetricDesc(MetricId),
    DimensionAsc(DimensionId),
}

/// One immutable report request, constructed once per fetch cycle.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    /// Date window; realtime queries carry none.
    pub window: Option<ReportWindow>,
    pub dimensions: Vec<DimensionId>,
    pub metrics: Vec<MetricId>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<u32>,
}

/// The six aggregate metrics of the overview, in request order.
pub const OVERVIEW_METRICS: [MetricId; 6] = [
    MetricId::PageViews,
    MetricId::ActiveUsers,
    MetricId::NewUsers,
    MetricId::Sessions,
    MetricId::BounceRate,
    MetricId::AvgSessionDuration,
];

/// Metrics of the daily time-series query, in request order.
pub const DAILY_METRICS: [MetricId; 2] = [MetricId::PageViews, MetricId::ActiveUsers];

/// One result row: dimension values and metric values in request order,
/// raw strings exactly as the backend returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub dimension_values: Vec<String>,
    pub metric_values: Vec<String>,
}

impl ReportRow {
    /// First dimension value, or the empty string when the row carries none.
    pub fn first_dimension(&self) -> &str {
        self.dimension_values
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Named view over one row's metric values: the query's requested metrics
/// zipped with the row's values.
///
/// Consumers read by metric identifier, never by position, so a change in
/// query shape cannot silently shift which value a field reads.
#[derive(Debug, Default)]
pub struct MetricSet(HashMap<MetricId, String>);

impl MetricSet {
    pub fn from_row(requested: &[MetricId], row: Option<&ReportRow>) -> Self {
        let mut map = HashMap::new();
        if let Some(row) = row {
            for (id, value) in requested.iter().zip(row.metric_values.iter()) {
                map.insert(*id, value.clone());
            }
        }
        Self(map)
    }

    /// Integer metric value; absent or unparseable values read as zero.
    pub fn count(&self, id: MetricId) -> i64 {
        self.0.get(&id).and_then(|v| v.parse().ok()).unwrap_or(0)
    }

    /// Floating-point metric value; absent or unparseable values read as zero.
    pub fn rate(&self, id: MetricId) -> f64 {
        self.0.get(&id).and_then(|v| v.parse().ok()).unwrap_or(0.0)
    }
}

/// Reporting backend capability.
///
/// Implemented by the Data API client in production; tests substitute a
/// fake. Handed around explicitly rather than living in a process-wide
/// singleton.
#[async_trait::async_trait]
pub trait ReportingBackend: Send + Sync + 'static {
    async fn run_report(&self, query: &ReportQuery) -> anyhow::Result<Vec<ReportRow>>;

    async fn run_realtime_report(&self, query: &ReportQuery)
        -> anyhow::Result<Vec<ReportRow>>;
}
