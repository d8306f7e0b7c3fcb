//! Domain models for the Retail Inventory Platform

mod alert;
mod forecast;
mod replenishment;
mod stock;

pub use alert::*;
pub use forecast::*;
pub use replenishment::*;
pub use stock::*;
