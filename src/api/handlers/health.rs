//! Health check handler.

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
