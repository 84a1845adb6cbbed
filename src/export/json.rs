//! JSON Export functionality
//!
//! Exports all orders and executors to JSON with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};
use crate::models::{Executor, Order, OrderStatus};
use crate::storage::OrderStore;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full order export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub orders: Vec<Order>,

    pub executors: Vec<Executor>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub order_count: usize,

    pub executor_count: usize,

    /// Orders that are neither completed nor cancelled
    pub open_order_count: usize,

    /// Creation date of the oldest order
    pub earliest_order: Option<String>,

    /// Creation date of the newest order
    pub latest_order: Option<String>,
}

impl OrderExport {
    /// Collect everything the store holds
    pub fn from_store(store: &dyn OrderStore) -> OrderResult<Self> {
        let mut orders = store.list_orders()?;
        orders.sort_by_key(|o| o.id);
        let executors = store.list_executors()?;

        let earliest_order = orders
            .iter()
            .map(|o| o.created_at().date())
            .min()
            .map(|d| d.to_string());

        let latest_order = orders
            .iter()
            .map(|o| o.created_at().date())
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            order_count: orders.len(),
            executor_count: executors.len(),
            open_order_count: orders
                .iter()
                .filter(|o| !o.status().is_terminal())
                .count(),
            earliest_order,
            latest_order,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            orders,
            executors,
            metadata,
        })
    }

    /// Count of exported orders in a given status
    pub fn count_in(&self, status: OrderStatus) -> usize {
        self.orders.iter().filter(|o| o.status() == status).count()
    }
}

/// Export all orders to JSON
pub fn export_orders_json<W: Write>(
    store: &dyn OrderStore,
    writer: &mut W,
    pretty: bool,
) -> OrderResult<()> {
    let export = OrderExport::from_store(store)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| OrderError::Export(e.to_string()))?;

    Ok(())
}
