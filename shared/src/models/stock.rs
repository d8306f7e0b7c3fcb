//! Stock item models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reorder threshold applied when a product has none configured (or a
/// malformed one stored).
pub const DEFAULT_REORDER_THRESHOLD: i32 = 5;

/// Multiplier on the reorder threshold that defines the "at risk" band.
/// A product with `quantity_on_hand <= multiplier * reorder_threshold`
/// is eligible for an alert.
pub const AT_RISK_MULTIPLIER: f64 = 1.25;

/// A product's current stock position. Owned by the inventory workflows;
/// read-only from the alert/replenishment engine's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub quantity_on_hand: i32,
    pub reorder_threshold: i32,
    pub unit_cost: Decimal,
}

impl StockItem {
    /// Whether this item falls in the at-risk band for the given multiplier.
    pub fn is_at_risk(&self, multiplier: f64) -> bool {
        f64::from(self.quantity_on_hand) <= f64::from(self.reorder_threshold) * multiplier
    }
}
