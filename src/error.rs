//! Custom error types for order-desk
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::OrderStatus;

/// The main error type for order-desk operations
#[derive(Error, Debug)]
pub enum OrderError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for order input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Requested status change violates the allowed progression
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Requested status label is not one of the known statuses
    ///
    /// Kept apart from `InvalidTransition` because there is no target status
    /// to report. Both leave the order untouched; match either with
    /// [`OrderError::is_transition_rejected`].
    #[error("Unknown order status: '{0}'")]
    UnknownStatus(String),

    /// Cancellation requested without a usable comment
    #[error("A comment is required to cancel an order")]
    CommentRequired,

    /// The order store rejected or failed to complete a request
    #[error("{}", format_persistence(.status, .message))]
    Persistence {
        status: Option<u16>,
        message: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

fn format_persistence(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Order store error (status {}): {}", code, message),
        None => format!("Order store error: {}", message),
    }
}

impl OrderError {
    /// Create a "not found" error for orders
    pub fn order_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Order",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for executors
    pub fn executor_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Executor",
            identifier: identifier.into(),
        }
    }

    /// Create a persistence error carrying the store's status code
    pub fn persistence(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Persistence {
            status,
            message: message.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error rejected a status transition without mutating the order
    pub fn is_transition_rejected(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransition { .. } | Self::UnknownStatus(_) | Self::CommentRequired
        )
    }
}

impl From<std::io::Error> for OrderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for OrderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for order-desk operations
pub type OrderResult<T> = Result<T, OrderError>;
