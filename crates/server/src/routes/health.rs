use crate::error::ServerResult;
use crate::examples::example_tickets;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
///
/// Always 200 while the process runs; `classifier_ready` tells callers
/// whether classification is currently possible.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "triage-server",
        "classifier_ready": state.classifier.is_some(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> ServerResult<impl IntoResponse> {
    let classifier_status = if state.classifier.is_some() {
        "ready"
    } else {
        "unavailable"
    };

    Ok(Json(json!({
        "status": "ready",
        "service": "triage-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "components": {
            "api": "ready",
            "classifier": classifier_status,
            "vector_store": "ready",
        }
    })))
}

/// Example tickets for demoing the classifier (unclassified).
pub async fn examples() -> ServerResult<impl IntoResponse> {
    Ok(Json(example_tickets()))
}
