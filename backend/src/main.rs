//! Billing Inventory Gateway - Backend Server
//!
//! Reconciles a company's product and purchase collections from the billing
//! API into one valued stock ledger, with an offline cache per company.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

pub use crate::config::Config;

use crate::config::CacheKind;
use external::BillingApiClient;
use services::{CacheRepository, FileCacheRepository, InMemoryCacheRepository, InventoryService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub inventory: InventoryService,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_server=debug,shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Billing Inventory Gateway");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Upstream billing API: {}", config.upstream.base_url);

    let source = BillingApiClient::new(
        config.upstream.base_url.clone(),
        Duration::from_secs(config.upstream.timeout_secs),
    )?;

    let cache: Arc<dyn CacheRepository> = match config.cache.kind {
        CacheKind::File => {
            let cache = FileCacheRepository::new(config.cache.directory.clone());
            tracing::info!("Inventory cache directory: {}", cache.directory().display());
            Arc::new(cache)
        }
        CacheKind::Memory => {
            tracing::info!("Inventory cache: in-memory");
            Arc::new(InMemoryCacheRepository::new())
        }
    };

    // Create application state
    let state = AppState {
        inventory: InventoryService::new(Arc::new(source), cache, config.inventory.clone()),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = config.socket_addr().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Billing Inventory Gateway API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
