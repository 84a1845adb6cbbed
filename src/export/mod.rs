//! Export module for order-desk
//!
//! Provides order export in multiple formats:
//! - CSV: one row per order (spreadsheet-compatible)
//! - JSON: machine-readable export with metadata
//! - YAML: human-readable export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_orders_csv;
pub use json::{export_orders_json, ExportMetadata, OrderExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_orders_yaml;
