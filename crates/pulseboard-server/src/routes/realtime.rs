use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::{fetch, state::AppState};

/// `GET /api/ga/realtime` - active users by country, right now.
///
/// Always answers 200: a backend failure degrades to an empty list inside
/// the fetcher, and the client renders "no active users" for both cases.
pub async fn get_realtime(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entries = fetch::fetch_realtime(state.reporting.as_ref()).await;
    Json(json!({ "data": entries }))
}
