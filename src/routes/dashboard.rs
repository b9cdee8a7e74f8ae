//! Dashboard routes: lifecycle counters and the department chart

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::database::models::{DashboardCounts, DepartmentStat};
use crate::server::AppState;

/// Counters for the dashboard cards: total, closed, running, closure
/// delayed (running past the planned end date), and cancelled.
pub async fn dashboard(State(state): State<AppState>) -> Response {
    match DashboardCounts::fetch(state.db.pool()).await {
        Ok(counts) => Json(json!({ "success": true, "counts": counts })).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch dashboard counts: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "Internal server error" })),
            )
                .into_response()
        }
    }
}

/// Department-wise total vs closed counts with a success percentage
pub async fn chart(State(state): State<AppState>) -> Response {
    match DepartmentStat::fetch_all(state.db.pool()).await {
        Ok(departments) => {
            Json(json!({ "success": true, "departments": departments })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch chart data: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "Internal server error" })),
            )
                .into_response()
        }
    }
}
