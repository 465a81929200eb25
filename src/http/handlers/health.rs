//! Liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// `GET /api/health`.
#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
