//! Order CLI commands
//!
//! Implements CLI commands for listing, creating, editing, deleting, and
//! changing the status of orders.

use std::io::{BufRead, Write};
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::audit::{StatusChangeLogger, StatusLogger};
use crate::config::{OrderPaths, Settings};
use crate::display::{
    format_executor_list, format_order_details, format_order_list, format_status_summary,
};
use crate::error::OrderResult;
use crate::models::{OrderDetails, OrderId};
use crate::services::{
    CommentEdit, CommentPrompt, FixedComment, OrderEdit, OrderFilter, OrderService,
};
use crate::storage::OrderStore;

/// Order subcommands
#[derive(Subcommand)]
pub enum OrderCommands {
    /// List orders
    List {
        /// Case-insensitive text to search for
        #[arg(short, long)]
        search: Option<String>,
        /// Only orders created on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Only orders created on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Show order details
    Show {
        /// Order ID
        id: OrderId,
    },

    /// Create a new order
    Create {
        #[arg(short, long)]
        description: String,
        /// Pickup address
        #[arg(long)]
        pickup: String,
        /// Delivery address
        #[arg(long)]
        delivery: String,
        /// Executor name
        #[arg(short, long)]
        executor: String,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        depth: f64,
        #[arg(long)]
        weight: f64,
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Edit an order (only the comment once it has left New)
    Edit {
        /// Order ID
        id: OrderId,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        pickup: Option<String>,
        #[arg(long)]
        delivery: Option<String>,
        #[arg(short, long)]
        executor: Option<String>,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        depth: Option<f64>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Change the status of an order
    Status {
        /// Order ID
        id: OrderId,
        /// New status (New, Dispatched, Completed, Cancelled)
        status: String,
        /// Cancellation reason (prompted for when omitted)
        #[arg(short, long)]
        reason: Option<String>,
        /// Replace the comment along with the status change
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Delete an order
    Delete {
        /// Order ID
        id: OrderId,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Reads the cancellation reason from standard input
pub struct StdinCommentPrompt;

impl CommentPrompt for StdinCommentPrompt {
    fn prompt_for_comment(&mut self) -> Option<String> {
        print!("Cancellation reason: ");
        if std::io::stdout().flush().is_err() {
            return None;
        }

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

/// Handle an order command
pub fn handle_order_command(
    store: &dyn OrderStore,
    settings: &Settings,
    paths: &OrderPaths,
    cmd: OrderCommands,
) -> OrderResult<()> {
    let service = OrderService::new(store);

    match cmd {
        OrderCommands::List { search, from, to } => {
            let filter = OrderFilter {
                search,
                start_date: from,
                end_date: to,
            };
            let orders = service.list(&filter)?;
            print!("{}", format_order_list(&orders, &settings.date_format));

            let counts = service.status_counts()?;
            print!("{}", format_status_summary(&counts));
        }

        OrderCommands::Show { id } => {
            let order = service.get_required(id)?;
            print!("{}", format_order_details(&order, &settings.date_format));
        }

        OrderCommands::Create {
            description,
            pickup,
            delivery,
            executor,
            width,
            height,
            depth,
            weight,
            comment,
        } => {
            let order = service.create(OrderDetails {
                description,
                pickup_address: pickup,
                delivery_address: delivery,
                comment: comment.unwrap_or_default(),
                executor: Some(executor),
                width,
                height,
                depth,
                weight,
            })?;

            println!("Created order #{}", order.id);
            println!("  Executor: {}", order.executor.as_deref().unwrap_or(""));
            println!("  Status:   {}", order.status());
        }

        OrderCommands::Edit {
            id,
            description,
            pickup,
            delivery,
            executor,
            width,
            height,
            depth,
            weight,
            comment,
        } => {
            let edit = OrderEdit {
                description,
                pickup_address: pickup,
                delivery_address: delivery,
                executor,
                width,
                height,
                depth,
                weight,
                comment,
            };

            if edit.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let order = service.update(id, edit)?;
            println!("Updated order #{}", order.id);
        }

        OrderCommands::Status {
            id,
            status,
            reason,
            comment,
        } => {
            let logger = StatusChangeLogger::new(settings.log_dir(paths))
                .with_max_files(settings.log_retention);
            let loggers: Vec<Arc<dyn StatusLogger>> = vec![Arc::new(logger)];

            let comment_edit = match comment {
                Some(text) => CommentEdit::Replace(text),
                None => CommentEdit::Keep,
            };

            let mut fixed;
            let mut interactive = StdinCommentPrompt;
            let prompt: &mut dyn CommentPrompt = match reason {
                Some(text) => {
                    fixed = FixedComment::new(Some(text));
                    &mut fixed
                }
                None => &mut interactive,
            };

            let (order, outcome) =
                service.change_status(id, &status, comment_edit, prompt, &loggers)?;

            if outcome.changed {
                println!(
                    "Order #{} status changed: {} -> {}",
                    order.id, outcome.from, outcome.to
                );
                if outcome.editability.details_locked() {
                    println!("Only the comment can be edited from now on.");
                }
            } else {
                println!("Order #{} is already {}", order.id, outcome.to);
            }
        }

        OrderCommands::Delete { id, force } => {
            let order = service.get_required(id)?;

            if !force {
                print!("Delete order {}? (yes/no): ", order);
                std::io::stdout().flush()?;

                let mut confirm = String::new();
                std::io::stdin().read_line(&mut confirm)?;

                if confirm.trim().to_lowercase() != "yes" {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            service.delete(order.id)?;
            println!("Deleted order #{}", order.id);
        }
    }

    Ok(())
}

/// List executors available for assignment
pub fn handle_executors_command(store: &dyn OrderStore) -> OrderResult<()> {
    let executors = OrderService::new(store).executors()?;
    print!("{}", format_executor_list(&executors));
    Ok(())
}
