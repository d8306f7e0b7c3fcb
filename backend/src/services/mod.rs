//! Business logic services for the Retail Inventory Platform

pub mod reconciliation;
pub mod replenishment;
pub mod scheduler;

pub use reconciliation::{CycleUpdate, ReconcileStats, ReconciliationService};
pub use replenishment::ReplenishmentService;
pub use scheduler::ReconciliationScheduler;
