//! Replenishment recommendation service
//!
//! Resolves a product's stock snapshot and demand forecast, then delegates
//! to the pure calculator in the `shared` crate. The ledger and this
//! service are deliberately independent: a recommendation never touches
//! alert state, and alert state never changes a computed action.

use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::external::ForecastProvider;
use crate::repositories::StockRepository;
use shared::{
    compute_recommendation, validate_constants, DemandForecast, ReplenishmentConstants,
    ReplenishmentRecommendation, StockItem,
};

pub struct ReplenishmentService {
    stock: Arc<dyn StockRepository>,
    forecasts: Arc<dyn ForecastProvider>,
    constants: ReplenishmentConstants,
    horizon_days: u32,
    at_risk_multiplier: f64,
}

impl ReplenishmentService {
    pub fn new(
        stock: Arc<dyn StockRepository>,
        forecasts: Arc<dyn ForecastProvider>,
        constants: ReplenishmentConstants,
        horizon_days: u32,
        at_risk_multiplier: f64,
    ) -> AppResult<Self> {
        validate_constants(&constants)
            .map_err(|msg| AppError::Configuration(msg.to_string()))?;

        Ok(Self {
            stock,
            forecasts,
            constants,
            horizon_days,
            at_risk_multiplier,
        })
    }

    /// Recommendation for one product, fetching its forecast from the
    /// provider.
    pub async fn recommend(&self, product_id: Uuid) -> AppResult<ReplenishmentRecommendation> {
        let item = self
            .stock
            .get(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let forecast = self
            .forecasts
            .get_forecast(product_id, self.horizon_days)
            .await?;

        Ok(self.recommend_with(&item, &forecast, None))
    }

    /// Recommendation from an explicit forecast, optionally overriding the
    /// configured constants. Pure apart from the inputs.
    pub fn recommend_with(
        &self,
        stock: &StockItem,
        forecast: &DemandForecast,
        constants: Option<&ReplenishmentConstants>,
    ) -> ReplenishmentRecommendation {
        compute_recommendation(stock, forecast, constants.unwrap_or(&self.constants))
    }

    /// Recommendations for every product currently in the at-risk band,
    /// for the reorder report. A forecast failure for one product skips
    /// that product rather than losing the whole report.
    pub async fn at_risk_report(&self) -> AppResult<Vec<ReplenishmentRecommendation>> {
        let items = self.stock.list_at_risk(self.at_risk_multiplier).await?;

        let mut recommendations = Vec::with_capacity(items.len());
        for item in items {
            match self.forecasts.get_forecast(item.id, self.horizon_days).await {
                Ok(forecast) => {
                    recommendations.push(self.recommend_with(&item, &forecast, None));
                }
                Err(e) => {
                    tracing::warn!(
                        product_id = %item.id,
                        error = %e,
                        "skipping product in replenishment report, forecast unavailable"
                    );
                }
            }
        }

        Ok(recommendations)
    }
}
