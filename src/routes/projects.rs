//! Project routes: create, list, and status updates.
//!
//! All three sit behind the auth gate; handlers can assume an `AuthUser`
//! extension is present.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::database::models::{
    CreateProjectRequest, ListParams, Project, UpdateStatusRequest, is_valid_status,
};
use crate::server::AppState;

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> Response {
    if payload.has_empty_fields() {
        return fail(StatusCode::BAD_REQUEST, "All fields are required");
    }
    if payload.end_date < payload.start_date {
        return fail(
            StatusCode::BAD_REQUEST,
            "End Date should be greater than Start Date",
        );
    }

    match Project::insert(state.db.pool(), &payload).await {
        Ok(project) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "project": project })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to insert project: {e:#}");
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub async fn project_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    match Project::list(state.db.pool(), &params).await {
        Ok((projects, total)) => Json(json!({
            "success": true,
            "projects": projects,
            "total": total,
            "page": params.page.unwrap_or(1).max(1),
            "limit": params.limit.unwrap_or(10).clamp(1, 100),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to list projects: {e:#}");
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub async fn update_status(
    State(state): State<AppState>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Response {
    if !is_valid_status(&payload.status) {
        return fail(StatusCode::BAD_REQUEST, "Invalid status");
    }

    match Project::update_status(state.db.pool(), payload.project_id, &payload.status).await {
        Ok(0) => fail(StatusCode::NOT_FOUND, "Project not found"),
        Ok(_) => Json(json!({ "success": true })).into_response(),
        Err(e) => {
            tracing::error!("Failed to update project status: {e:#}");
            fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
