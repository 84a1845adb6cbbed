//! order-desk - command-line client for delivery orders
//!
//! This library provides the core of the order-desk client: the order model,
//! the status workflow that governs how orders move from `New` to their
//! terminal state, and the rotating audit log every status change is written
//! to. Orders are kept in a remote order service or in local JSON files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Orders, executors, statuses, and field editability
//! - `audit`: Hourly-rotated status-change log
//! - `storage`: Order store trait with HTTP and JSON file backends
//! - `services`: Status workflow and order business logic
//! - `display`: Terminal formatting
//! - `export`: JSON, CSV, and YAML export
//! - `cli`: Command handlers for the `orders` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use order_desk::audit::StatusChangeLogger;
//! use order_desk::services::{CommentEdit, FixedComment, OrderStatusWorkflow};
//!
//! order.attach_logger(Arc::new(StatusChangeLogger::new(log_dir)));
//! OrderStatusWorkflow::new().request_transition(
//!     &mut order,
//!     "Dispatched",
//!     CommentEdit::Keep,
//!     &mut FixedComment::declined(),
//! )?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{OrderError, OrderResult};
