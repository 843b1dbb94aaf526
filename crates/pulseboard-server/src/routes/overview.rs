use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use pulseboard_core::range::TimeRange;

use crate::{error::AppError, fetch, state::AppState};

#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    /// `7days` | `30days` | `90days`; anything else falls back to `7days`.
    #[serde(rename = "timeRange")]
    pub time_range: Option<String>,
}

/// `GET /api/ga/overview` - aggregated dashboard summary for one time range.
///
/// Six report queries run concurrently upstream; a failed query leaves its
/// section zero-valued or empty rather than failing the response. Only an
/// orchestration failure surfaces as 500.
pub async fn get_overview(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OverviewParams>,
) -> Result<impl IntoResponse, AppError> {
    let range = TimeRange::parse(params.time_range.as_deref());
    let today = chrono::Utc::now().date_naive();

    let summary = fetch::fetch_overview(state.reporting.as_ref(), range, today)
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(json!({ "data": summary })))
}
