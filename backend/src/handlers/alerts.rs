//! HTTP handlers for stock alert endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::{CycleUpdate, ReconcileStats};
use crate::AppState;
use shared::Alert;

#[derive(Serialize)]
pub struct UnseenCountResponse {
    pub unseen: i64,
}

#[derive(Serialize)]
pub struct MarkSeenResponse {
    pub seen: bool,
}

/// List all currently active alerts
pub async fn list_active_alerts(State(state): State<AppState>) -> AppResult<Json<Vec<Alert>>> {
    let alerts = state.reconciliation.active_alerts().await?;
    Ok(Json(alerts))
}

/// Full alert ledger, including resolved alerts
pub async fn alert_history(State(state): State<AppState>) -> AppResult<Json<Vec<Alert>>> {
    let alerts = state.reconciliation.alert_history().await?;
    Ok(Json(alerts))
}

/// Count of active alerts not yet viewed (UI badge)
pub async fn unseen_count(State(state): State<AppState>) -> AppResult<Json<UnseenCountResponse>> {
    let unseen = state.reconciliation.unseen_count().await?;
    Ok(Json(UnseenCountResponse { unseen }))
}

/// Mark an alert as viewed
pub async fn mark_alert_seen(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
) -> AppResult<Json<MarkSeenResponse>> {
    let updated = state.reconciliation.mark_alert_seen(alert_id).await?;
    if !updated {
        return Err(AppError::NotFound("Alert".to_string()));
    }
    Ok(Json(MarkSeenResponse { seen: true }))
}

/// Manually trigger a reconciliation cycle. Returns 409 when a scheduled
/// cycle is already in flight.
pub async fn trigger_reconcile(State(state): State<AppState>) -> AppResult<Json<ReconcileStats>> {
    let stats = state.reconciliation.try_reconcile().await?;
    Ok(Json(stats))
}

/// Stats from the most recent completed cycle
pub async fn last_cycle(State(state): State<AppState>) -> Json<Option<CycleUpdate>> {
    Json(state.reconciliation.last_cycle())
}
