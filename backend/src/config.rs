//! Configuration management for the Retail Inventory Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with RIP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Reconciliation loop configuration
    pub reconciliation: ReconciliationConfig,

    /// Replenishment calculator constants
    pub replenishment: ReplenishmentConfig,

    /// Demand forecast provider configuration
    pub forecast: ForecastConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReconciliationConfig {
    /// Seconds between scheduled reconciliation cycles
    pub interval_seconds: u64,

    /// Seconds to wait after a failed cycle before the loop resumes
    pub cooldown_seconds: u64,

    /// Multiplier on the reorder threshold defining the at-risk band
    pub at_risk_multiplier: f64,

    /// Maximum seconds stop() waits for the loop to exit cleanly
    pub stop_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplenishmentConfig {
    /// Fixed cost per purchase order
    pub order_cost: f64,

    /// Fraction of unit cost held annually
    pub holding_cost_rate: f64,

    /// Days between placing and receiving an order
    pub lead_time_days: u32,

    /// Z-score for the desired service level
    pub service_factor: f64,

    /// Forecast horizon requested from the demand model, in days
    pub horizon_days: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Demand forecast API endpoint
    pub api_endpoint: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RIP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("reconciliation.interval_seconds", 300)?
            .set_default("reconciliation.cooldown_seconds", 60)?
            .set_default("reconciliation.at_risk_multiplier", 1.25)?
            .set_default("reconciliation.stop_timeout_seconds", 10)?
            .set_default("replenishment.order_cost", 50.0)?
            .set_default("replenishment.holding_cost_rate", 0.20)?
            .set_default("replenishment.lead_time_days", 7)?
            .set_default("replenishment.service_factor", 1.65)?
            .set_default("replenishment.horizon_days", 30)?
            .set_default("forecast.api_endpoint", "http://localhost:8100")?
            .set_default("forecast.timeout_seconds", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RIP_ prefix)
            .add_source(
                Environment::with_prefix("RIP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ReplenishmentConfig {
    /// Constants for the pure calculator.
    pub fn constants(&self) -> shared::ReplenishmentConstants {
        shared::ReplenishmentConstants {
            order_cost: self.order_cost,
            holding_cost_rate: self.holding_cost_rate,
            lead_time_days: self.lead_time_days,
            service_factor: self.service_factor,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
