//! Health check handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;

/// Basic health check
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.settings.tracing.service_name,
        "environment": state.settings.server.environment.to_string(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Liveness probe
pub async fn liveness() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}
