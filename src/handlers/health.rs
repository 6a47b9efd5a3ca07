//! Health check handlers

use axum::{extract::State, Json};
use serde_json::json;

use crate::AppState;
use crate::models::ApiResponse;

/// Root endpoint - service banner
pub async fn root() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(json!({
        "message": "AquaGuard API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
    })))
}

/// Health check endpoint for monitoring
pub async fn check(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let ml_model = if state.predictor.is_model_loaded() {
        "operational"
    } else {
        "fallback"
    };

    Json(ApiResponse::ok(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "api": "operational",
            "ml_model": ml_model,
        },
    })))
}
