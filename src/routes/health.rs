use axum::response::Json;
use serde_json::json;

/// Health check endpoint handler.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/ping`
/// - **Response**: JSON object with status field
///
/// ```bash
/// curl http://localhost:3030/ping
/// # Response: {"status":"pong"}
/// ```
///
/// Used by load balancer health checks and liveness probes; no auth, no
/// database access, minimal overhead.
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "pong" }))
}
