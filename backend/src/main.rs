//! Retail Inventory Platform - Backend Server
//!
//! Runs the stock alert reconciliation loop and serves the alert ledger
//! and replenishment recommendations to the UI collaborator.

use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retail_inventory_backend::{
    config::Config,
    create_app,
    external::HttpForecastClient,
    repositories::{PgAlertRepository, PgStockRepository},
    services::{ReconciliationScheduler, ReconciliationService, ReplenishmentService},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| retail_inventory_backend::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Retail Inventory Platform Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    // Wire up repositories and services
    let stock_repo = Arc::new(PgStockRepository::new(db_pool.clone()));
    let alert_repo = Arc::new(PgAlertRepository::new(db_pool.clone()));
    let forecast_client = Arc::new(HttpForecastClient::new(&config.forecast)?);

    let reconciliation = Arc::new(ReconciliationService::new(
        stock_repo.clone(),
        alert_repo,
        config.reconciliation.at_risk_multiplier,
    ));
    let replenishment = Arc::new(ReplenishmentService::new(
        stock_repo,
        forecast_client,
        config.replenishment.constants(),
        config.replenishment.horizon_days,
        config.reconciliation.at_risk_multiplier,
    )?);
    let scheduler = Arc::new(ReconciliationScheduler::new(
        reconciliation.clone(),
        Duration::from_secs(config.reconciliation.cooldown_seconds),
        Duration::from_secs(config.reconciliation.stop_timeout_seconds),
    ));

    // Start the background reconciliation loop
    scheduler
        .start(Duration::from_secs(config.reconciliation.interval_seconds))
        .await?;

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
        reconciliation,
        replenishment,
        scheduler: scheduler.clone(),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let the in-flight cycle finish before exiting
    tracing::info!("Shutting down, stopping reconciliation loop...");
    if let Err(e) = scheduler.stop().await {
        tracing::warn!(error = %e, "reconciliation loop did not stop cleanly");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown signal handler");
    }
}
