//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod log;
pub mod order;

pub use export::{handle_export_command, ExportFormat};
pub use log::handle_log_command;
pub use order::{handle_executors_command, handle_order_command, OrderCommands, StdinCommentPrompt};
