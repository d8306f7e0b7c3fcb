//! Replenishment recommendation models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inventory-policy constants feeding the reorder formulas. Defaults match
/// the standard configuration (95% service level, weekly lead time).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReplenishmentConstants {
    /// Fixed cost per purchase order.
    pub order_cost: f64,
    /// Fraction of unit cost spent holding a unit for a year.
    pub holding_cost_rate: f64,
    /// Days between placing and receiving a purchase order.
    pub lead_time_days: u32,
    /// Service-level z-score sizing the safety stock.
    pub service_factor: f64,
}

impl Default for ReplenishmentConstants {
    fn default() -> Self {
        Self {
            order_cost: 50.0,
            holding_cost_rate: 0.20,
            lead_time_days: 7,
            service_factor: 1.65,
        }
    }
}

/// Suggested action for a product, in strict priority order: the first
/// matching condition wins when several apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplenishmentAction {
    /// Forecast demand exceeds current stock within the horizon.
    StockoutRisk,
    /// Stock is at or below the reorder point.
    Reorder,
    /// Stock exceeds three times the forecast demand.
    Excess,
    Healthy,
}

impl ReplenishmentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplenishmentAction::StockoutRisk => "stockout_risk",
            ReplenishmentAction::Reorder => "reorder",
            ReplenishmentAction::Excess => "excess",
            ReplenishmentAction::Healthy => "healthy",
        }
    }
}

/// Derived reorder recommendation for a product. Never persisted; computed
/// on demand from a stock snapshot and a forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplenishmentRecommendation {
    pub product_id: Uuid,
    /// Average units per day over the forecast horizon.
    pub daily_demand: f64,
    /// Buffer covering demand variability during lead time.
    pub safety_stock: f64,
    /// Stock level at which a new order should be placed.
    pub reorder_point: i64,
    /// Stock remaining at the end of the horizon if no order is placed.
    /// Negative means a projected stockout.
    pub projected_inventory: i64,
    /// Forecast demand as a percentage of current stock, capped at 100.
    pub sell_through_rate: f64,
    pub action: ReplenishmentAction,
    /// Units to order now; zero unless the action calls for an order.
    pub suggested_order_quantity: i64,
}
