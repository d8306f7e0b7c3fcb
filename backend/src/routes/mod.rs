//! Route definitions for the Retail Inventory Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stock alert ledger
        .nest("/alerts", alert_routes())
        // Reconciliation control
        .nest("/reconcile", reconcile_routes())
        // Replenishment recommendations
        .nest("/replenishment", replenishment_routes())
}

/// Alert ledger routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_active_alerts))
        .route("/history", get(handlers::alert_history))
        .route("/unseen-count", get(handlers::unseen_count))
        .route("/:alert_id/seen", post(handlers::mark_alert_seen))
}

/// Reconciliation control routes
fn reconcile_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::trigger_reconcile))
        .route("/last", get(handlers::last_cycle))
}

/// Replenishment recommendation routes
fn replenishment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_recommendations))
        .route("/:product_id", get(handlers::get_recommendation))
}
