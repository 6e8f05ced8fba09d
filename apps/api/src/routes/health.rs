use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// GET /status
/// Returns the portfolio status card polled by the frontend.
pub async fn status_handler() -> Json<Value> {
    Json(json!({
        "system": "operational",
        "hireable": true,
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
