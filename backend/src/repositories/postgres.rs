//! Postgres implementations of the stock and alert repositories
//!
//! Schema lives in `backend/migrations/`. The `stock` table is owned by the
//! sales/receiving workflows and read-only here; `alertas_stock` is this
//! engine's ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::repositories::{AlertRepository, StockRepository};
use shared::{normalize_reorder_threshold, Alert, AlertLevel, AlertStatus, StockItem};

/// Stock snapshot reader backed by the `stock` table.
#[derive(Clone)]
pub struct PgStockRepository {
    db: PgPool,
}

impl PgStockRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Row for stock queries. The threshold is nullable in the schema; malformed
/// values fall back to the default instead of failing the row.
#[derive(Debug, FromRow)]
struct StockRow {
    id: Uuid,
    description: String,
    category: String,
    quantity_on_hand: i32,
    reorder_threshold: Option<i32>,
    unit_cost: Decimal,
}

impl StockRow {
    fn into_item(self) -> StockItem {
        if !matches!(self.reorder_threshold, Some(t) if t >= 0) {
            tracing::warn!(
                product_id = %self.id,
                stored = ?self.reorder_threshold,
                "invalid reorder threshold, using default"
            );
        }
        StockItem {
            id: self.id,
            description: self.description,
            category: self.category,
            quantity_on_hand: self.quantity_on_hand,
            reorder_threshold: normalize_reorder_threshold(self.reorder_threshold),
            unit_cost: self.unit_cost,
        }
    }
}

#[async_trait]
impl StockRepository for PgStockRepository {
    async fn list_at_risk(&self, multiplier: f64) -> AppResult<Vec<StockItem>> {
        let rows = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT id, description, category, quantity_on_hand, reorder_threshold, unit_cost
            FROM stock
            WHERE quantity_on_hand::double precision <=
                  (CASE WHEN reorder_threshold IS NULL OR reorder_threshold < 0
                        THEN 5 ELSE reorder_threshold END)::double precision * $1
            ORDER BY quantity_on_hand ASC
            "#,
        )
        .bind(multiplier)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StockRow::into_item).collect())
    }

    async fn get(&self, product_id: Uuid) -> AppResult<Option<StockItem>> {
        let row = sqlx::query_as::<_, StockRow>(
            r#"
            SELECT id, description, category, quantity_on_hand, reorder_threshold, unit_cost
            FROM stock
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(StockRow::into_item))
    }
}

/// Alert ledger backed by the `alertas_stock` table.
#[derive(Clone)]
pub struct PgAlertRepository {
    db: PgPool,
}

impl PgAlertRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct AlertRow {
    id: Uuid,
    product_id: Uuid,
    description: String,
    stock_actual: i32,
    stock_minimo: i32,
    level: String,
    status: String,
    seen: bool,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl AlertRow {
    fn into_alert(self) -> AppResult<Alert> {
        let level = match self.level.as_str() {
            "bajo" => AlertLevel::Bajo,
            "critico" => AlertLevel::Critico,
            "agotado" => AlertLevel::Agotado,
            other => {
                return Err(AppError::Internal(format!(
                    "unknown alert level in ledger: {}",
                    other
                )))
            }
        };
        let status = match self.status.as_str() {
            "active" => AlertStatus::Active,
            "resolved" => AlertStatus::Resolved,
            other => {
                return Err(AppError::Internal(format!(
                    "unknown alert status in ledger: {}",
                    other
                )))
            }
        };
        Ok(Alert {
            id: self.id,
            product_id: self.product_id,
            description: self.description,
            stock_actual: self.stock_actual,
            stock_minimo: self.stock_minimo,
            level,
            status,
            seen: self.seen,
            created_at: self.created_at,
            resolved_at: self.resolved_at,
        })
    }
}

const ALERT_COLUMNS: &str =
    "id, product_id, description, stock_actual, stock_minimo, level, status, seen, created_at, resolved_at";

#[async_trait]
impl AlertRepository for PgAlertRepository {
    async fn list_active(&self) -> AppResult<Vec<Alert>> {
        let rows = sqlx::query_as::<_, AlertRow>(&format!(
            "SELECT {} FROM alertas_stock WHERE status = 'active' ORDER BY created_at DESC",
            ALERT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(AlertRow::into_alert).collect()
    }

    async fn list_all(&self) -> AppResult<Vec<Alert>> {
        let rows = sqlx::query_as::<_, AlertRow>(&format!(
            "SELECT {} FROM alertas_stock ORDER BY created_at DESC",
            ALERT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(AlertRow::into_alert).collect()
    }

    async fn active_for_product(&self, product_id: Uuid) -> AppResult<Option<Alert>> {
        let row = sqlx::query_as::<_, AlertRow>(&format!(
            "SELECT {} FROM alertas_stock WHERE product_id = $1 AND status = 'active'",
            ALERT_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;

        row.map(AlertRow::into_alert).transpose()
    }

    async fn insert(&self, alert: &Alert) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO alertas_stock (
                id, product_id, description, stock_actual, stock_minimo,
                level, status, seen, created_at, resolved_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(alert.id)
        .bind(alert.product_id)
        .bind(&alert.description)
        .bind(alert.stock_actual)
        .bind(alert.stock_minimo)
        .bind(alert.level.as_str())
        .bind(alert.status.as_str())
        .bind(alert.seen)
        .bind(alert.created_at)
        .bind(alert.resolved_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn update_snapshot(&self, alert: &Alert) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE alertas_stock
            SET description = $2, stock_actual = $3, stock_minimo = $4,
                level = $5, created_at = $6
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(alert.id)
        .bind(&alert.description)
        .bind(alert.stock_actual)
        .bind(alert.stock_minimo)
        .bind(alert.level.as_str())
        .bind(alert.created_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn resolve(&self, alert_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE alertas_stock
            SET status = 'resolved', resolved_at = $2
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(alert_id)
        .bind(at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn mark_seen(&self, alert_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("UPDATE alertas_stock SET seen = true WHERE id = $1")
            .bind(alert_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_unseen(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM alertas_stock WHERE status = 'active' AND seen = false",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }
}
