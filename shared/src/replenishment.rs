//! Replenishment calculator
//!
//! Pure reorder-point / safety-stock / EOQ math. Given a stock snapshot and
//! a demand forecast, produces a [`ReplenishmentRecommendation`]. No I/O and
//! no clock access, so the output is fully determined by the inputs.

use rust_decimal::prelude::ToPrimitive;

use crate::models::{
    DemandForecast, ReplenishmentAction, ReplenishmentConstants, ReplenishmentRecommendation,
    StockItem,
};

/// Guard divisor for the sell-through rate when stock is zero.
const SELL_THROUGH_EPSILON: f64 = 0.001;

/// Additive guard on annual holding cost so the EOQ formula never divides
/// by zero for free or cost-less items.
const HOLDING_COST_EPSILON: f64 = 0.0001;

/// Unrounded economic order quantity: the order size minimizing combined
/// ordering and holding cost. `holding_cost_annual` must be positive; the
/// caller guards degenerate unit costs.
pub fn economic_order_quantity(annual_demand: f64, order_cost: f64, holding_cost_annual: f64) -> f64 {
    (2.0 * annual_demand * order_cost / holding_cost_annual).sqrt()
}

/// Compute the reorder recommendation for one product.
///
/// Action classification applies in strict priority order: stockout risk,
/// then reorder, then excess, then healthy. A zero-quantity forecast always
/// classifies as healthy with no suggested order; with no expected demand
/// the stockout/reorder/excess comparisons carry no signal, and pure
/// out-of-stock conditions are the alert ledger's concern, not this
/// calculator's.
pub fn compute_recommendation(
    stock: &StockItem,
    forecast: &DemandForecast,
    constants: &ReplenishmentConstants,
) -> ReplenishmentRecommendation {
    let horizon_days = forecast.horizon_days.max(1) as f64;
    let predicted = forecast.predicted_quantity.max(0.0);
    let on_hand = f64::from(stock.quantity_on_hand);
    let lead_time = constants.lead_time_days as f64;

    let daily_demand = predicted / horizon_days;
    let safety_stock = daily_demand * lead_time.sqrt() * constants.service_factor;
    let reorder_point_raw = daily_demand * lead_time + safety_stock;
    let reorder_point = reorder_point_raw.round() as i64;

    // Kept unrounded for the stockout test: a forecast a fraction of a unit
    // above stock is still a projected stockout.
    let projected_raw = on_hand - predicted;
    let projected_inventory = projected_raw.round() as i64;

    let sell_through_rate = (predicted / on_hand.max(SELL_THROUGH_EPSILON)).min(1.0) * 100.0;

    let annual_demand = predicted * 12.0;
    let unit_cost = stock.unit_cost.to_f64().unwrap_or(0.0);
    let holding_cost_annual = unit_cost * constants.holding_cost_rate + HOLDING_COST_EPSILON;
    let eoq = economic_order_quantity(annual_demand, constants.order_cost, holding_cost_annual)
        .round()
        .max(0.0) as i64;

    let action = if predicted == 0.0 {
        ReplenishmentAction::Healthy
    } else if projected_raw < 0.0 {
        ReplenishmentAction::StockoutRisk
    } else if i64::from(stock.quantity_on_hand) <= reorder_point {
        ReplenishmentAction::Reorder
    } else if on_hand > predicted * 3.0 {
        ReplenishmentAction::Excess
    } else {
        ReplenishmentAction::Healthy
    };

    let suggested_order_quantity = match action {
        ReplenishmentAction::StockoutRisk | ReplenishmentAction::Reorder => {
            let shortfall = reorder_point - i64::from(stock.quantity_on_hand);
            eoq.max(shortfall).max(0)
        }
        ReplenishmentAction::Excess | ReplenishmentAction::Healthy => 0,
    };

    ReplenishmentRecommendation {
        product_id: stock.id,
        daily_demand,
        safety_stock,
        reorder_point,
        projected_inventory,
        sell_through_rate,
        action,
        suggested_order_quantity,
    }
}
