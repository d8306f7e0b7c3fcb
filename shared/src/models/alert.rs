//! Stock alert models
//!
//! The alert ledger keeps the domain's original terminology for severity
//! levels (bajo / critico / agotado), matching the `alertas_stock` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alert severity, classified from the stock snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Above the reorder threshold but inside the at-risk band.
    Bajo,
    /// At or below the reorder threshold, stock remaining.
    Critico,
    /// Out of stock.
    Agotado,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Bajo => "bajo",
            AlertLevel::Critico => "critico",
            AlertLevel::Agotado => "agotado",
        }
    }

    /// Classify a stock position, or `None` when the product is not at risk.
    ///
    /// Band edges are inclusive: a quantity exactly at the threshold is
    /// `Critico`, exactly at `multiplier * threshold` is `Bajo`.
    pub fn classify(quantity_on_hand: i32, reorder_threshold: i32, multiplier: f64) -> Option<Self> {
        if quantity_on_hand == 0 {
            Some(AlertLevel::Agotado)
        } else if quantity_on_hand <= reorder_threshold {
            Some(AlertLevel::Critico)
        } else if f64::from(quantity_on_hand) <= f64::from(reorder_threshold) * multiplier {
            Some(AlertLevel::Bajo)
        } else {
            None
        }
    }
}

/// Alert lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Resolved => "resolved",
        }
    }
}

/// A row in the alert ledger.
///
/// At most one `Active` alert exists per product at any time. Resolved
/// alerts are never reactivated or deleted; a new low-stock episode for the
/// same product creates a new row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Product description captured when the alert was created or last
    /// refreshed.
    pub description: String,
    /// Stock quantity snapshot at creation/last refresh.
    pub stock_actual: i32,
    /// Reorder threshold snapshot at creation/last refresh.
    pub stock_minimo: i32,
    pub level: AlertLevel,
    pub status: AlertStatus,
    /// Whether a user has viewed the alert. Independent of `status`.
    pub seen: bool,
    /// Creation time, refreshed when the snapshot is updated (acts as a
    /// last-seen-at-risk timestamp while the alert is active).
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Build a fresh active alert for a stock position.
    pub fn open(item_id: Uuid, description: String, stock_actual: i32, stock_minimo: i32, level: AlertLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: item_id,
            description,
            stock_actual,
            stock_minimo,
            level,
            status: AlertStatus::Active,
            seen: false,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    /// Whether the stored snapshot differs from the given stock position.
    /// Repeated reconciliation cycles with unchanged stock must not count
    /// as updates, so the engine only rewrites when this returns true.
    pub fn snapshot_changed(&self, stock_actual: i32, stock_minimo: i32, level: AlertLevel) -> bool {
        self.stock_actual != stock_actual || self.stock_minimo != stock_minimo || self.level != level
    }
}
