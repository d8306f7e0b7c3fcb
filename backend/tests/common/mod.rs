//! In-memory fakes for the repository and forecast seams, so the engine
//! tests run without a database.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use retail_inventory_backend::error::{AppError, AppResult};
use retail_inventory_backend::external::ForecastProvider;
use retail_inventory_backend::repositories::{AlertRepository, StockRepository};
use shared::{Alert, AlertStatus, DemandForecast, StockItem};

/// Build a stock item with the given position.
pub fn stock_item(quantity_on_hand: i32, reorder_threshold: i32) -> StockItem {
    StockItem {
        id: Uuid::new_v4(),
        description: "Widget".to_string(),
        category: "general".to_string(),
        quantity_on_hand,
        reorder_threshold,
        unit_cost: Decimal::new(1000, 2),
    }
}

#[derive(Default)]
pub struct FakeStockRepository {
    items: Mutex<HashMap<Uuid, StockItem>>,
}

impl FakeStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, item: StockItem) {
        self.items.lock().unwrap().insert(item.id, item);
    }

    pub fn set_quantity(&self, product_id: Uuid, quantity_on_hand: i32) {
        if let Some(item) = self.items.lock().unwrap().get_mut(&product_id) {
            item.quantity_on_hand = quantity_on_hand;
        }
    }

    pub fn remove(&self, product_id: Uuid) {
        self.items.lock().unwrap().remove(&product_id);
    }
}

#[async_trait]
impl StockRepository for FakeStockRepository {
    async fn list_at_risk(&self, multiplier: f64) -> AppResult<Vec<StockItem>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .values()
            .filter(|item| item.is_at_risk(multiplier))
            .cloned()
            .collect())
    }

    async fn get(&self, product_id: Uuid) -> AppResult<Option<StockItem>> {
        Ok(self.items.lock().unwrap().get(&product_id).cloned())
    }
}

#[derive(Default)]
pub struct FakeAlertRepository {
    alerts: Mutex<Vec<Alert>>,
    fail: AtomicBool,
    delay_ms: AtomicU64,
    pub list_active_calls: AtomicUsize,
}

impl FakeAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every repository call fail, simulating a transient store error.
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    /// Stall `list_active` so a cycle stays in flight for the duration.
    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn active_count_for(&self, product_id: Uuid) -> usize {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.product_id == product_id && a.status == AlertStatus::Active)
            .count()
    }

    fn check_fail(&self) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal("injected store failure".to_string()));
        }
        Ok(())
    }

    async fn maybe_stall(&self) {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
    }
}

#[async_trait]
impl AlertRepository for FakeAlertRepository {
    async fn list_active(&self) -> AppResult<Vec<Alert>> {
        self.list_active_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_stall().await;
        self.check_fail()?;
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.status == AlertStatus::Active)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Alert>> {
        self.check_fail()?;
        Ok(self.snapshot())
    }

    async fn active_for_product(&self, product_id: Uuid) -> AppResult<Option<Alert>> {
        self.check_fail()?;
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.product_id == product_id && a.status == AlertStatus::Active)
            .cloned())
    }

    async fn insert(&self, alert: &Alert) -> AppResult<()> {
        self.check_fail()?;
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }

    async fn update_snapshot(&self, alert: &Alert) -> AppResult<()> {
        self.check_fail()?;
        let mut alerts = self.alerts.lock().unwrap();
        if let Some(stored) = alerts
            .iter_mut()
            .find(|a| a.id == alert.id && a.status == AlertStatus::Active)
        {
            stored.description = alert.description.clone();
            stored.stock_actual = alert.stock_actual;
            stored.stock_minimo = alert.stock_minimo;
            stored.level = alert.level;
            stored.created_at = alert.created_at;
        }
        Ok(())
    }

    async fn resolve(&self, alert_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        self.check_fail()?;
        let mut alerts = self.alerts.lock().unwrap();
        if let Some(stored) = alerts
            .iter_mut()
            .find(|a| a.id == alert_id && a.status == AlertStatus::Active)
        {
            stored.status = AlertStatus::Resolved;
            stored.resolved_at = Some(at);
        }
        Ok(())
    }

    async fn mark_seen(&self, alert_id: Uuid) -> AppResult<bool> {
        self.check_fail()?;
        let mut alerts = self.alerts.lock().unwrap();
        match alerts.iter_mut().find(|a| a.id == alert_id) {
            Some(stored) => {
                stored.seen = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_unseen(&self) -> AppResult<i64> {
        self.check_fail()?;
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.status == AlertStatus::Active && !a.seen)
            .count() as i64)
    }
}

#[derive(Default)]
pub struct FakeForecastProvider {
    forecasts: Mutex<HashMap<Uuid, f64>>,
    failing: Mutex<HashSet<Uuid>>,
}

impl FakeForecastProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_forecast(&self, product_id: Uuid, predicted_quantity: f64) {
        self.forecasts
            .lock()
            .unwrap()
            .insert(product_id, predicted_quantity);
    }

    pub fn fail_for(&self, product_id: Uuid) {
        self.failing.lock().unwrap().insert(product_id);
    }
}

#[async_trait]
impl ForecastProvider for FakeForecastProvider {
    async fn get_forecast(&self, product_id: Uuid, horizon_days: u32) -> AppResult<DemandForecast> {
        if self.failing.lock().unwrap().contains(&product_id) {
            return Err(AppError::ForecastService(
                "injected forecast failure".to_string(),
            ));
        }
        // Products without model output degrade to zero demand.
        let predicted = self
            .forecasts
            .lock()
            .unwrap()
            .get(&product_id)
            .copied()
            .unwrap_or(0.0);
        Ok(DemandForecast {
            product_id,
            horizon_days,
            predicted_quantity: predicted,
        })
    }
}
