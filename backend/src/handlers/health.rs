//! Health check handlers

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub upstream: String,
    pub low_stock_threshold: Decimal,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        upstream: state.inventory.upstream(),
        low_stock_threshold: state.inventory.settings().low_stock_threshold,
    })
}
