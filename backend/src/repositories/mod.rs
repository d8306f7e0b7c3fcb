//! Repository interfaces over the stock snapshot and the alert ledger
//!
//! The engine only ever talks to these traits; the Postgres implementations
//! live in [`postgres`], and tests supply in-memory fakes.

pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppResult;
use shared::{Alert, StockItem};

pub use postgres::{PgAlertRepository, PgStockRepository};

/// Read-only access to the current stock snapshot.
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Products inside the at-risk band: quantity on hand at or below
    /// `multiplier` times the (normalized) reorder threshold.
    async fn list_at_risk(&self, multiplier: f64) -> AppResult<Vec<StockItem>>;

    /// Look up a single product.
    async fn get(&self, product_id: Uuid) -> AppResult<Option<StockItem>>;
}

/// Persisted alert ledger with lifecycle state.
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// All alerts currently in the active state.
    async fn list_active(&self) -> AppResult<Vec<Alert>>;

    /// Full ledger, newest first, including resolved alerts.
    async fn list_all(&self) -> AppResult<Vec<Alert>>;

    /// The active alert for a product, if one exists. The engine maintains
    /// the invariant that there is at most one.
    async fn active_for_product(&self, product_id: Uuid) -> AppResult<Option<Alert>>;

    /// Insert a freshly opened alert.
    async fn insert(&self, alert: &Alert) -> AppResult<()>;

    /// Rewrite the snapshot fields (description, stock, threshold, level,
    /// refreshed timestamp) of an active alert.
    async fn update_snapshot(&self, alert: &Alert) -> AppResult<()>;

    /// Mark an active alert resolved. Resolved alerts stay in the ledger
    /// forever and are never reactivated.
    async fn resolve(&self, alert_id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    /// Flag an alert as viewed. Returns false when the alert does not exist.
    async fn mark_seen(&self, alert_id: Uuid) -> AppResult<bool>;

    /// Number of active alerts not yet viewed, for the UI badge.
    async fn count_unseen(&self) -> AppResult<i64>;
}
