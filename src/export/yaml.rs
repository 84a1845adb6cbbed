//! YAML Export functionality
//!
//! Exports all orders to YAML for human-readable review.

use std::io::Write;

use crate::error::{OrderError, OrderResult};
use crate::export::json::OrderExport;
use crate::storage::OrderStore;

/// Export all orders to YAML
pub fn export_orders_yaml<W: Write>(store: &dyn OrderStore, writer: &mut W) -> OrderResult<()> {
    let export = OrderExport::from_store(store)?;

    let export_err = |e: std::io::Error| OrderError::Export(e.to_string());
    writeln!(writer, "# order-desk export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| OrderError::Export(e.to_string()))?;

    Ok(())
}
