//! Order display formatting
//!
//! Renders order tables, order details, executors, and status-change log
//! entries for terminal output.

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::audit::AuditLogEntry;
use crate::models::{Executor, Order, OrderStatus};

/// Used when the configured date format cannot be rendered
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a single order as a table row
pub fn format_order_row(order: &Order, date_format: &str) -> String {
    format!(
        "{:>5} {:10} {:10} {:24} {:20} {:20}",
        order.id.to_string(),
        order.status().label(),
        format_date(order.created_at(), date_format),
        truncate(&order.description, 24),
        truncate(order.executor.as_deref().unwrap_or("(none)"), 20),
        truncate(&order.delivery_address, 20),
    )
}

/// Format a list of orders as a table
pub fn format_order_list(orders: &[Order], date_format: &str) -> String {
    if orders.is_empty() {
        return "No orders found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5} {:10} {:10} {:24} {:20} {:20}\n",
        "ID", "Status", "Created", "Description", "Executor", "Deliver to"
    ));
    output.push_str(&"-".repeat(94));
    output.push('\n');

    for order in orders {
        output.push_str(&format_order_row(order, date_format));
        output.push('\n');
    }

    output.push_str(&format!("\n{} order(s)\n", orders.len()));
    output
}

/// Format per-status order counts on one line
pub fn format_status_summary(counts: &[(OrderStatus, usize)]) -> String {
    let parts: Vec<String> = counts
        .iter()
        .map(|(status, count)| format!("{}: {}", status, count))
        .collect();
    format!("{}\n", parts.join("  "))
}

/// Format order details for display
pub fn format_order_details(order: &Order, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Order:       #{}\n", order.id));
    output.push_str(&format!("Status:      {}\n", order.status()));
    output.push_str(&format!("Description: {}\n", order.description));
    output.push_str(&format!("Pickup:      {}\n", order.pickup_address));
    output.push_str(&format!("Delivery:    {}\n", order.delivery_address));
    output.push_str(&format!(
        "Executor:    {}\n",
        order.executor.as_deref().unwrap_or("(none)")
    ));
    output.push_str(&format!(
        "Size:        {} x {} x {}\n",
        order.width, order.height, order.depth
    ));
    output.push_str(&format!("Weight:      {}\n", order.weight));

    if !order.comment.is_empty() {
        output.push_str(&format!("Comment:     {}\n", order.comment));
    }

    output.push_str(&format!(
        "Created:     {}\n",
        format_date(order.created_at(), date_format)
    ));
    output.push_str(&format!(
        "Updated:     {}\n",
        format_date(order.updated_at(), date_format)
    ));

    if order.status() != OrderStatus::New {
        output.push_str("\nOnly the comment can be edited.\n");
    }

    output
}

/// Format the executor list
pub fn format_executor_list(executors: &[Executor]) -> String {
    if executors.is_empty() {
        return "No executors found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:>5} {}\n", "ID", "Name"));
    output.push_str(&"-".repeat(30));
    output.push('\n');

    for executor in executors {
        output.push_str(&format!("{:>5} {}\n", executor.id.to_string(), executor.name));
    }

    output
}

/// Format status-change log entries, one per line
pub fn format_log_entries(entries: &[AuditLogEntry]) -> String {
    if entries.is_empty() {
        return "No status changes recorded.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_line());
        output.push('\n');
    }
    output
}

/// Render a timestamp, falling back to `yyyy-mm-dd` for a malformed format
fn format_date(at: NaiveDateTime, date_format: &str) -> String {
    let mut output = String::new();
    if write!(output, "{}", at.format(date_format)).is_err() {
        tracing::warn!(format = %date_format, "Invalid date format, using default");
        output = at.format(FALLBACK_DATE_FORMAT).to_string();
    }
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
