//! Validation utilities for stock and replenishment data

use rust_decimal::Decimal;

use crate::models::{ReplenishmentConstants, DEFAULT_REORDER_THRESHOLD};

/// Normalize a stored reorder threshold. Missing or malformed values (NULL,
/// negative) fall back to the default rather than failing the row.
pub fn normalize_reorder_threshold(stored: Option<i32>) -> i32 {
    match stored {
        Some(t) if t >= 0 => t,
        _ => DEFAULT_REORDER_THRESHOLD,
    }
}

/// Validate a stock quantity read from the store.
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("Stock quantity cannot be negative");
    }
    Ok(())
}

/// Validate a unit cost read from the store.
pub fn validate_unit_cost(cost: Decimal) -> Result<(), &'static str> {
    if cost < Decimal::ZERO {
        return Err("Unit cost cannot be negative");
    }
    Ok(())
}

/// Validate replenishment constants before handing them to the calculator.
pub fn validate_constants(constants: &ReplenishmentConstants) -> Result<(), &'static str> {
    if constants.order_cost <= 0.0 {
        return Err("Order cost must be positive");
    }
    if constants.holding_cost_rate <= 0.0 {
        return Err("Holding cost rate must be positive");
    }
    if constants.lead_time_days == 0 {
        return Err("Lead time must be at least one day");
    }
    if constants.service_factor <= 0.0 {
        return Err("Service factor must be positive");
    }
    Ok(())
}
