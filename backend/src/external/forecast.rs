//! Demand forecast provider client
//!
//! The forecasting model is an external black box that predicts demand per
//! product per horizon. Products the model has no output for are not an
//! error: they degrade to a zero-quantity forecast and the calculator
//! classifies them as healthy.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use crate::config::ForecastConfig;
use crate::error::{AppError, AppResult};
use shared::DemandForecast;

/// Source of demand predictions for the replenishment calculator.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Predicted demand for a product over the next `horizon_days` days.
    /// Implementations must return a zero-quantity forecast, not an error,
    /// when no model output exists for the product.
    async fn get_forecast(&self, product_id: Uuid, horizon_days: u32) -> AppResult<DemandForecast>;
}

/// HTTP client for the demand forecast service.
#[derive(Clone)]
pub struct HttpForecastClient {
    client: Client,
    base_url: String,
}

/// Forecast API response
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    product_id: Uuid,
    horizon_days: u32,
    predicted_quantity: f64,
}

impl HttpForecastClient {
    /// Create a new forecast client from configuration
    pub fn new(config: &ForecastConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::ForecastService(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ForecastProvider for HttpForecastClient {
    async fn get_forecast(&self, product_id: Uuid, horizon_days: u32) -> AppResult<DemandForecast> {
        let url = format!(
            "{}/forecasts/{}?horizon_days={}",
            self.base_url, product_id, horizon_days
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ForecastService(e.to_string()))?;

        // No model output for this product: degrade to zero demand.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(DemandForecast::zero(product_id, horizon_days));
        }

        if !response.status().is_success() {
            return Err(AppError::ForecastService(format!(
                "forecast service returned {}",
                response.status()
            )));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::ForecastService(e.to_string()))?;

        let predicted_quantity = if body.predicted_quantity < 0.0 {
            tracing::warn!(
                product_id = %body.product_id,
                predicted = body.predicted_quantity,
                "negative forecast from model, clamping to zero"
            );
            0.0
        } else {
            body.predicted_quantity
        };

        Ok(DemandForecast {
            product_id: body.product_id,
            horizon_days: body.horizon_days,
            predicted_quantity,
        })
    }
}
