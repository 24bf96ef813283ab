//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Health checks and readiness
//! - `classify`: Ticket classification (sync, async, batch)
//! - `search`: Similarity search and collection stats

pub mod classify;
pub mod health;
pub mod search;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Root endpoint (GET /), no authentication required.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Ticket Triage Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/classify",
            "/api/v1/classify/async",
            "/api/v1/classify/batch",
            "/api/v1/search",
            "/api/v1/stats",
            "/classify-examples",
            "/examples",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
