//! Demand forecast input

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Predicted demand for a product over a horizon, produced by an external
/// forecasting model. Read-only input to the replenishment calculator; a
/// zero-quantity forecast is valid and means "no expected demand".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandForecast {
    pub product_id: Uuid,
    /// Forecast horizon in days (typically 30).
    pub horizon_days: u32,
    /// Predicted demand over the horizon; non-integer values allowed.
    pub predicted_quantity: f64,
}

impl DemandForecast {
    /// A forecast that predicts no demand, used when the model has no
    /// output for a product.
    pub fn zero(product_id: Uuid, horizon_days: u32) -> Self {
        Self {
            product_id,
            horizon_days,
            predicted_quantity: 0.0,
        }
    }
}
