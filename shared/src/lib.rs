//! Shared types and domain logic for the Retail Inventory Platform
//!
//! This crate contains the data model and the pure replenishment calculator
//! shared between the backend service and its tests. Nothing here performs
//! I/O; every function is deterministic and testable without a database.

pub mod models;
pub mod replenishment;
pub mod validation;

pub use models::*;
pub use replenishment::{compute_recommendation, economic_order_quantity};
pub use validation::*;
