//! Periodic reconciliation scheduler
//!
//! One background tokio task drives the reconciliation loop. The task is
//! cancellable: a stop flag is checked between, never during, cycles, so an
//! in-flight cycle always finishes. No cycle failure is fatal; after an
//! error the loop cools down and keeps retrying indefinitely.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::{AppError, AppResult};
use crate::services::reconciliation::ReconciliationService;

struct RunningLoop {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Drives [`ReconciliationService::reconcile`] on a fixed interval.
/// States: stopped (inner is None) and running.
pub struct ReconciliationScheduler {
    service: Arc<ReconciliationService>,
    cooldown: Duration,
    stop_timeout: Duration,
    inner: Mutex<Option<RunningLoop>>,
}

impl ReconciliationScheduler {
    pub fn new(
        service: Arc<ReconciliationService>,
        cooldown: Duration,
        stop_timeout: Duration,
    ) -> Self {
        Self {
            service,
            cooldown,
            stop_timeout,
            inner: Mutex::new(None),
        }
    }

    /// Start the loop. The first cycle runs immediately, then once per
    /// `interval`. Fails when already running.
    pub async fn start(&self, interval: Duration) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.is_some() {
            return Err(AppError::SchedulerState(
                "scheduler is already running".to_string(),
            ));
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let service = self.service.clone();
        let cooldown = self.cooldown;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = service.reconcile().await {
                            tracing::error!(error = %e, "reconciliation cycle failed, cooling down");
                            // Stay responsive to stop() during the cool-down.
                            tokio::select! {
                                _ = stop_rx.changed() => {
                                    if *stop_rx.borrow() {
                                        break;
                                    }
                                }
                                _ = tokio::time::sleep(cooldown) => {}
                            }
                        }
                    }
                }
            }

            tracing::info!("reconciliation loop stopped");
        });

        tracing::info!(interval_seconds = interval.as_secs(), "reconciliation loop started");
        *inner = Some(RunningLoop { stop_tx, handle });
        Ok(())
    }

    /// Stop the loop, letting an in-flight cycle finish. Blocks up to the
    /// configured timeout waiting for a clean exit; on timeout the task is
    /// detached and an error returned. Fails when not running.
    pub async fn stop(&self) -> AppResult<()> {
        let running = {
            let mut inner = self.inner.lock().await;
            inner.take().ok_or_else(|| {
                AppError::SchedulerState("scheduler is not running".to_string())
            })?
        };

        let _ = running.stop_tx.send(true);

        match tokio::time::timeout(self.stop_timeout, running.handle).await {
            Ok(_) => Ok(()),
            Err(_) => Err(AppError::SchedulerState(
                "timed out waiting for the reconciliation loop to stop".to_string(),
            )),
        }
    }

    pub async fn is_running(&self) -> bool {
        self.inner.lock().await.is_some()
    }
}
