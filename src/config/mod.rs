//! Configuration module for order-desk
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence (order store backend, service URL, log retention)

pub mod paths;
pub mod settings;

pub use paths::OrderPaths;
pub use settings::{Settings, StoreBackend};
