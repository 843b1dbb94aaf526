//! Data API wire types: `runReport` / `runRealtimeReport` request and
//! response bodies, camelCase as Google serializes them.

use serde::{Deserialize, Serialize};

use pulseboard_core::report::{OrderBy, ReportQuery, ReportRow};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    /// Empty for realtime queries, which carry no date window.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub date_ranges: Vec<WireDateRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<WireDimension>,
    pub metrics: Vec<WireMetric>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_bys: Vec<WireOrderBy>,
    /// The API models `limit` as an int64-as-string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Serialize)]
pub struct WireDimension {
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct WireMetric {
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct WireOrderBy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<WireMetricOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<WireDimensionOrder>,
    pub desc: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMetricOrder {
    pub metric_name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDimensionOrder {
    pub dimension_name: &'static str,
}

impl RunReportRequest {
    pub fn from_query(query: &ReportQuery) -> Self {
        Self {
            date_ranges: query
                .window
                .iter()
                .map(|w| WireDateRange {
                    start_date: w.start.to_string(),
                    end_date: w.end.to_string(),
                })
                .collect(),
            dimensions: query
                .dimensions
                .iter()
                .map(|d| WireDimension { name: d.api_name() })
                .collect(),
            metrics: query
                .metrics
                .iter()
                .map(|m| WireMetric { name: m.api_name() })
                .collect(),
            order_bys: query
                .order_by
                .iter()
                .map(|order| match order {
                    OrderBy::MetricDesc(id) => WireOrderBy {
                        metric: Some(WireMetricOrder {
                            metric_name: id.api_name(),
                        }),
                        dimension: None,
                        desc: true,
                    },
                    OrderBy::DimensionAsc(id) => WireOrderBy {
                        metric: None,
                        dimension: Some(WireDimensionOrder {
                            dimension_name: id.api_name(),
                        }),
                        desc: false,
                    },
                })
                .collect(),
            limit: query.limit.map(|l| l.to_string()),
        }
    }
}

/// Response envelope. `rows` is omitted entirely when a report matches no
/// data, hence the default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)]
    pub rows: Vec<WireRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRow {
    #[serde(default)]
    pub dimension_values: Vec<WireValue>,
    #[serde(default)]
    pub metric_values: Vec<WireValue>,
}

#[derive(Debug, Deserialize)]
pub struct WireValue {
    #[serde(default)]
    pub value: String,
}

impl WireRow {
    pub fn into_row(self) -> ReportRow {
        ReportRow {
            dimension_values: self.dimension_values.into_iter().map(|v| v.value).collect(),
            metric_values: self.metric_values.into_iter().map(|v| v.value).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pulseboard_core::range::ReportWindow;
    use pulseboard_core::report::{DimensionId, MetricId};
    use serde_json::json;

    fn window() -> ReportWindow {
        ReportWindow {
            start: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn request_serializes_camel_case() {
        let query = ReportQuery {
            window: Some(window()),
            dimensions: vec![DimensionId::PagePath],
            metrics: vec![MetricId::PageViews],
            order_by: Some(OrderBy::MetricDesc(MetricId::PageViews)),
            limit: Some(10),
        };

        let body = serde_json::to_value(RunReportRequest::from_query(&query)).unwrap();
        assert_eq!(
            body,
            json!({
                "dateRanges": [{"startDate": "2024-01-08", "endDate": "2024-01-15"}],
                "dimensions": [{"name": "pagePath"}],
                "metrics": [{"name": "screenPageViews"}],
                "orderBys": [{"metric": {"metricName": "screenPageViews"}, "desc": true}],
                "limit": "10"
            })
        );
    }

    #[test]
    fn realtime_request_omits_date_ranges() {
        let query = ReportQuery {
            window: None,
            dimensions: vec![DimensionId::Country],
            metrics: vec![MetricId::ActiveUsers],
            order_by: None,
            limit: None,
        };

        let body = serde_json::to_value(RunReportRequest::from_query(&query)).unwrap();
        assert_eq!(
            body,
            json!({
                "dimensions": [{"name": "country"}],
                "metrics": [{"name": "activeUsers"}]
            })
        );
    }

    #[test]
    fn daily_request_orders_by_date_ascending() {
        let query = ReportQuery {
            window: Some(window()),
            dimensions: vec![DimensionId::Date],
            metrics: vec![MetricId::PageViews, MetricId::ActiveUsers],
            order_by: Some(OrderBy::DimensionAsc(DimensionId::Date)),
            limit: None,
        };

        let body = serde_json::to_value(RunReportRequest::from_query(&query)).unwrap();
        assert_eq!(
            body["orderBys"],
            json!([{"dimension": {"dimensionName": "date"}, "desc": false}])
        );
    }

    #[test]
    fn response_rows_map_to_report_rows() {
        let response: RunReportResponse = serde_json::from_value(json!({
            "dimensionHeaders": [{"name": "country"}],
            "metricHeaders": [{"name": "activeUsers", "type": "TYPE_INTEGER"}],
            "rows": [
                {
                    "dimensionValues": [{"value": "Brazil"}],
                    "metricValues": [{"value": "12"}]
                },
                {
                    "dimensionValues": [{}],
                    "metricValues": []
                }
            ],
            "rowCount": 2
        }))
        .unwrap();

        let rows: Vec<ReportRow> = response.rows.into_iter().map(WireRow::into_row).collect();
        assert_eq!(rows[0].dimension_values, ["Brazil"]);
        assert_eq!(rows[0].metric_values, ["12"]);
        assert_eq!(rows[1].dimension_values, [""]);
        assert!(rows[1].metric_values.is_empty());
    }

    #[test]
    fn empty_response_yields_no_rows() {
        let response: RunReportResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.rows.is_empty());
    }
}
