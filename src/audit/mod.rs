//! Audit logging system for order-desk
//!
//! Records every order status change in an append-only, hourly-rotated log.
//!
//! # Architecture
//!
//! - `StatusLogger`: the capability an order notifies on each status change.
//!   Orders hold a list of these and call them from `Order::set_status`.
//! - `StatusChangeLogger`: the file-backed implementation. Writes
//!   `<base>/<day>/status_change_<day>_<hour>.log`, keeps a bounded number of
//!   files per day, and swallows its own I/O failures.
//! - `AuditLogEntry`: one parsed log line.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use order_desk::audit::StatusChangeLogger;
//!
//! let logger = Arc::new(StatusChangeLogger::new(paths.log_dir()));
//! order.attach_logger(logger);
//! order.set_status(OrderStatus::Dispatched); // appends one line
//! ```

mod entry;
mod logger;

pub use entry::{AuditLogEntry, TIMESTAMP_FORMAT};
pub use logger::{StatusChangeLogger, StatusLogger, DEFAULT_MAX_FILES_PER_DAY};
