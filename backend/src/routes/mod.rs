//! Route definitions for the inventory gateway

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Bearer token required - forwarded to the billing API
        .nest("/companies/:company_id/inventory", inventory_routes())
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_inventory))
        .route("/categories", get(handlers::get_categories))
        .route("/low-stock", get(handlers::get_low_stock))
}
