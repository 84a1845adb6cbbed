//! CSV Export functionality
//!
//! Writes one row per order, spreadsheet-compatible.

use std::io::Write;

use crate::error::{OrderError, OrderResult};
use crate::storage::OrderStore;

const HEADER: [&str; 13] = [
    "ID",
    "Status",
    "Created",
    "Updated",
    "Description",
    "Pickup Address",
    "Delivery Address",
    "Executor",
    "Width",
    "Height",
    "Depth",
    "Weight",
    "Comment",
];

/// Export all orders to CSV
pub fn export_orders_csv<W: Write>(store: &dyn OrderStore, writer: W) -> OrderResult<()> {
    let mut orders = store.list_orders()?;
    orders.sort_by_key(|o| o.id);

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADER)
        .map_err(|e| OrderError::Export(e.to_string()))?;

    for order in &orders {
        csv_writer
            .write_record([
                order.id.to_string(),
                order.status().to_string(),
                order.created_at().format("%Y-%m-%d %H:%M:%S").to_string(),
                order.updated_at().format("%Y-%m-%d %H:%M:%S").to_string(),
                order.description.clone(),
                order.pickup_address.clone(),
                order.delivery_address.clone(),
                order.executor.clone().unwrap_or_default(),
                order.width.to_string(),
                order.height.to_string(),
                order.depth.to_string(),
                order.weight.to_string(),
                order.comment.clone(),
            ])
            .map_err(|e| OrderError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| OrderError::Export(e.to_string()))?;

    tracing::debug!(rows = orders.len(), "Exported orders to CSV");
    Ok(())
}
