//! HTTP handlers for replenishment recommendation endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::AppState;
use shared::ReplenishmentRecommendation;

/// Reorder recommendation for a single product
pub async fn get_recommendation(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ReplenishmentRecommendation>> {
    let recommendation = state.replenishment.recommend(product_id).await?;
    Ok(Json(recommendation))
}

/// Recommendations for every product currently at risk
pub async fn list_recommendations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReplenishmentRecommendation>>> {
    let recommendations = state.replenishment.at_risk_report().await?;
    Ok(Json(recommendations))
}
