//! Order model
//!
//! An order is one shipment request. Its status may only be written through
//! [`Order::set_status`], which notifies every attached [`StatusLogger`] when
//! the value actually changes.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

use super::ids::OrderId;
use super::status::{FieldEditability, OrderStatus};
use crate::audit::StatusLogger;

/// The user-editable part of an order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDetails {
    pub description: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub comment: String,
    pub executor: Option<String>,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub weight: f64,
}

/// A shipment request
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Assigned by the order service, zero until first save
    #[serde(default)]
    pub id: OrderId,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub pickup_address: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub delivery_address: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub comment: String,

    /// Executor name
    #[serde(default)]
    pub executor: Option<String>,

    #[serde(default)]
    pub width: f64,

    #[serde(default)]
    pub height: f64,

    #[serde(default)]
    pub depth: f64,

    #[serde(default)]
    pub weight: f64,

    #[serde(rename = "createdDate", default = "now_local")]
    created_at: NaiveDateTime,

    #[serde(rename = "updatedDate", default = "now_local")]
    updated_at: NaiveDateTime,

    #[serde(default)]
    status: OrderStatus,

    #[serde(skip)]
    loggers: Vec<Arc<dyn StatusLogger>>,
}

fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// The order service sends `null` for empty text fields
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Order {
    /// Create a new, unsaved order in status `New`
    pub fn new(details: OrderDetails) -> Self {
        let now = now_local();
        let mut order = Self {
            id: OrderId::default(),
            description: String::new(),
            pickup_address: String::new(),
            delivery_address: String::new(),
            comment: String::new(),
            executor: None,
            width: 0.0,
            height: 0.0,
            depth: 0.0,
            weight: 0.0,
            created_at: now,
            updated_at: now,
            status: OrderStatus::New,
            loggers: Vec::new(),
        };
        order.apply_details(details);
        order
    }

    /// Create a new order with an explicit creation timestamp
    pub fn with_created_at(details: OrderDetails, created_at: NaiveDateTime) -> Self {
        let mut order = Self::new(details);
        order.created_at = created_at;
        order
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Editability flags for the current status
    pub fn editability(&self) -> FieldEditability {
        FieldEditability::for_status(self.status)
    }

    /// Set the status, notifying attached loggers if it changed
    ///
    /// Returns true when the status actually changed.
    pub fn set_status(&mut self, status: OrderStatus) -> bool {
        if self.status == status {
            return false;
        }

        self.status = status;
        self.touch();

        let message = format!("Order {} status changed to {}", self.id, self.status);
        for logger in &self.loggers {
            logger.log(&message);
        }
        true
    }

    /// Replace the comment
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
        self.touch();
    }

    /// Overwrite every editable field
    pub fn apply_details(&mut self, details: OrderDetails) {
        self.description = details.description;
        self.pickup_address = details.pickup_address;
        self.delivery_address = details.delivery_address;
        self.comment = details.comment;
        self.executor = details.executor;
        self.width = details.width;
        self.height = details.height;
        self.depth = details.depth;
        self.weight = details.weight;
        self.touch();
    }

    /// Snapshot of the editable fields
    pub fn details(&self) -> OrderDetails {
        OrderDetails {
            description: self.description.clone(),
            pickup_address: self.pickup_address.clone(),
            delivery_address: self.delivery_address.clone(),
            comment: self.comment.clone(),
            executor: self.executor.clone(),
            width: self.width,
            height: self.height,
            depth: self.depth,
            weight: self.weight,
        }
    }

    /// Mark the order as modified now
    pub fn touch(&mut self) {
        self.updated_at = now_local();
    }

    /// Register a logger for status changes
    pub fn attach_logger(&mut self, logger: Arc<dyn StatusLogger>) {
        self.loggers.push(logger);
    }

    /// Remove a previously attached logger
    ///
    /// Returns true if the logger was attached.
    pub fn detach_logger(&mut self, logger: &Arc<dyn StatusLogger>) -> bool {
        match self.loggers.iter().position(|l| Arc::ptr_eq(l, logger)) {
            Some(index) => {
                self.loggers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of attached loggers
    pub fn logger_count(&self) -> usize {
        self.loggers.len()
    }

    /// Validate the order before it is sent to the store
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        let required = [
            ("description", &self.description),
            ("pickup address", &self.pickup_address),
            ("delivery address", &self.delivery_address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(OrderValidationError::MissingField(field));
            }
        }

        if self
            .executor
            .as_deref()
            .map_or(true, |name| name.trim().is_empty())
        {
            return Err(OrderValidationError::MissingExecutor);
        }

        let dimensions = [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("weight", self.weight),
        ];
        for (field, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                return Err(OrderValidationError::NonPositive { field, value });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("description", &self.description)
            .field("pickup_address", &self.pickup_address)
            .field("delivery_address", &self.delivery_address)
            .field("executor", &self.executor)
            .field("comment", &self.comment)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("loggers", &self.loggers.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}] {}", self.id, self.status, self.description)
    }
}

/// Validation errors for orders
#[derive(Debug, Clone, PartialEq)]
pub enum OrderValidationError {
    MissingField(&'static str),
    MissingExecutor,
    NonPositive { field: &'static str, value: f64 },
}

impl fmt::Display for OrderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "The {} must be filled in", field),
            Self::MissingExecutor => write!(f, "An executor must be selected"),
            Self::NonPositive { field, value } => {
                write!(f, "The {} must be a positive number (got {})", field, value)
            }
        }
    }
}

impl std::error::Error for OrderValidationError {}
