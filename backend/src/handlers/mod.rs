//! HTTP handlers for the Retail Inventory Platform

pub mod alerts;
pub mod health;
pub mod replenishment;

pub use alerts::*;
pub use health::*;
pub use replenishment::*;
