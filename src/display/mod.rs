//! Display formatting for terminal output
//!
//! Provides utilities for formatting orders, executors, and status-change log
//! entries for terminal display.

pub mod order;

pub use order::{
    format_executor_list, format_log_entries, format_order_details, format_order_list,
    format_order_row, format_status_summary,
};
