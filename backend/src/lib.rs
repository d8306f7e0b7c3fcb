//! Retail Inventory Platform - Stock Alert & Replenishment Engine
//!
//! Background reconciliation of the stock alert ledger against the live
//! inventory snapshot, plus reorder-point / safety-stock / EOQ
//! recommendations from demand forecasts. The desktop UI, login, and
//! reporting layers are external collaborators talking to the HTTP surface
//! exposed here.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod services;

pub use config::Config;

/// Log filter applied when `RUST_LOG` is not set. The directive names the
/// lib crate target, which is where all service and engine events land; the
/// bin target emits nothing of its own.
pub const DEFAULT_LOG_FILTER: &str = "retail_inventory_backend=debug,tower_http=debug,sqlx=warn";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub reconciliation: Arc<services::ReconciliationService>,
    pub replenishment: Arc<services::ReplenishmentService>,
    pub scheduler: Arc<services::ReconciliationScheduler>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Retail Inventory Platform API v1.0"
}
