//! Stock alert reconciliation engine
//!
//! Each cycle compares the live stock snapshot against the alert ledger and
//! brings the ledger up to date: recovered products get their alert
//! resolved, newly at-risk products get a fresh alert, and still-at-risk
//! products get their snapshot refreshed when it changed. The engine
//! maintains the one-active-alert-per-product invariant and is idempotent:
//! a second cycle with unchanged stock creates and updates nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::repositories::{AlertRepository, StockRepository};
use shared::{Alert, AlertLevel};

/// Counters for one reconciliation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub created: u32,
    pub updated: u32,
    pub resolved: u32,
}

/// Published after every completed cycle so the UI layer can refresh.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CycleUpdate {
    pub stats: ReconcileStats,
    pub completed_at: DateTime<Utc>,
    /// Total completed cycles since the service was constructed.
    pub cycle: u64,
}

/// The reconciliation engine. Holds injected repositories so tests can
/// supply fakes; there is no global instance.
pub struct ReconciliationService {
    stock: Arc<dyn StockRepository>,
    alerts: Arc<dyn AlertRepository>,
    at_risk_multiplier: f64,
    /// Serializes reconciliation cycles. Scheduled ticks wait on it; the
    /// manual trigger uses try_lock and reports busy instead.
    cycle_lock: Mutex<()>,
    cycle_count: AtomicU64,
    cycle_tx: watch::Sender<Option<CycleUpdate>>,
}

impl ReconciliationService {
    pub fn new(
        stock: Arc<dyn StockRepository>,
        alerts: Arc<dyn AlertRepository>,
        at_risk_multiplier: f64,
    ) -> Self {
        let (cycle_tx, _) = watch::channel(None);
        Self {
            stock,
            alerts,
            at_risk_multiplier,
            cycle_lock: Mutex::new(()),
            cycle_count: AtomicU64::new(0),
            cycle_tx,
        }
    }

    /// Run one reconciliation cycle, waiting for any in-flight cycle to
    /// finish first. This is what the scheduler calls.
    pub async fn reconcile(&self) -> AppResult<ReconcileStats> {
        let guard = self.cycle_lock.lock().await;
        self.run_cycle(guard).await
    }

    /// Run one cycle only if none is in flight. The manual (UI) trigger
    /// uses this; a concurrent scheduled cycle yields `ReconciliationBusy`.
    pub async fn try_reconcile(&self) -> AppResult<ReconcileStats> {
        let guard = self
            .cycle_lock
            .try_lock()
            .map_err(|_| AppError::ReconciliationBusy)?;
        self.run_cycle(guard).await
    }

    async fn run_cycle(&self, _guard: MutexGuard<'_, ()>) -> AppResult<ReconcileStats> {
        let mut stats = ReconcileStats::default();

        // Step 1: resolve alerts for products that recovered, meaning they
        // left the at-risk band entirely. Resolving at the bare threshold
        // instead would resolve and re-create bajo-level alerts on every
        // cycle. Must run before detection so a product cannot be resolved
        // and re-alerted in contradictory states within the same cycle.
        for alert in self.alerts.list_active().await? {
            match self.stock.get(alert.product_id).await? {
                Some(item) if !item.is_at_risk(self.at_risk_multiplier) => {
                    self.alerts.resolve(alert.id, Utc::now()).await?;
                    stats.resolved += 1;
                }
                Some(_) => {}
                None => {
                    // Product removed from the catalog while its alert was
                    // active. Leave the alert for manual review.
                    tracing::warn!(
                        alert_id = %alert.id,
                        product_id = %alert.product_id,
                        "active alert references a missing product"
                    );
                }
            }
        }

        // Step 2: detect the at-risk set.
        let at_risk = self.stock.list_at_risk(self.at_risk_multiplier).await?;

        // Steps 3 and 4: classify each at-risk product and reconcile it
        // against its active alert.
        for item in at_risk {
            let Some(level) = AlertLevel::classify(
                item.quantity_on_hand,
                item.reorder_threshold,
                self.at_risk_multiplier,
            ) else {
                continue;
            };

            match self.alerts.active_for_product(item.id).await? {
                None => {
                    let alert = Alert::open(
                        item.id,
                        item.description.clone(),
                        item.quantity_on_hand,
                        item.reorder_threshold,
                        level,
                    );
                    self.alerts.insert(&alert).await?;
                    stats.created += 1;
                }
                Some(existing)
                    if existing.snapshot_changed(
                        item.quantity_on_hand,
                        item.reorder_threshold,
                        level,
                    ) =>
                {
                    let refreshed = Alert {
                        description: item.description.clone(),
                        stock_actual: item.quantity_on_hand,
                        stock_minimo: item.reorder_threshold,
                        level,
                        created_at: Utc::now(),
                        ..existing
                    };
                    self.alerts.update_snapshot(&refreshed).await?;
                    stats.updated += 1;
                }
                // Unchanged snapshot: repeated cycles are a no-op.
                Some(_) => {}
            }
        }

        let cycle = self.cycle_count.fetch_add(1, Ordering::SeqCst) + 1;
        let update = CycleUpdate {
            stats,
            completed_at: Utc::now(),
            cycle,
        };
        // Receivers are optional; the send only fails when nobody listens.
        let _ = self.cycle_tx.send(Some(update));

        tracing::info!(
            created = stats.created,
            updated = stats.updated,
            resolved = stats.resolved,
            cycle,
            "reconciliation cycle completed"
        );

        Ok(stats)
    }

    /// All currently active alerts, newest first.
    pub async fn active_alerts(&self) -> AppResult<Vec<Alert>> {
        self.alerts.list_active().await
    }

    /// The full ledger including resolved alerts.
    pub async fn alert_history(&self) -> AppResult<Vec<Alert>> {
        self.alerts.list_all().await
    }

    /// Mark an alert as viewed. Returns false when no such alert exists.
    pub async fn mark_alert_seen(&self, alert_id: Uuid) -> AppResult<bool> {
        self.alerts.mark_seen(alert_id).await
    }

    /// Active alerts not yet viewed.
    pub async fn unseen_count(&self) -> AppResult<i64> {
        self.alerts.count_unseen().await
    }

    /// Subscribe to cycle completions (the UI refresh callback).
    pub fn subscribe_cycles(&self) -> watch::Receiver<Option<CycleUpdate>> {
        self.cycle_tx.subscribe()
    }

    /// Stats from the most recent completed cycle, if any.
    pub fn last_cycle(&self) -> Option<CycleUpdate> {
        *self.cycle_tx.borrow()
    }
}
