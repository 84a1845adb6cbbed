//! Core data models for order-desk
//!
//! This module contains the data structures of the delivery domain: orders,
//! their statuses, and the executors orders are assigned to.

pub mod executor;
pub mod ids;
pub mod order;
pub mod status;

pub use executor::Executor;
pub use ids::{ExecutorId, OrderId};
pub use order::{Order, OrderDetails, OrderValidationError};
pub use status::{FieldEditability, OrderStatus};
