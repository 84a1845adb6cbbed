//! Order service
//!
//! Provides business logic for orders on top of an [`OrderStore`]: validation
//! before create, the New-only rule for editing details, filtering, and status
//! changes through the [`OrderStatusWorkflow`].

use std::sync::Arc;

use chrono::NaiveDate;

use super::workflow::{CommentEdit, CommentPrompt, OrderStatusWorkflow, TransitionOutcome};
use crate::audit::StatusLogger;
use crate::error::{OrderError, OrderResult};
use crate::models::{Executor, Order, OrderDetails, OrderId, OrderStatus};
use crate::storage::OrderStore;

/// Date format used when matching search text against order dates
const SEARCH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Options for filtering orders
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Case-insensitive text matched against most order fields
    pub search: Option<String>,
    /// Earliest creation date (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Latest creation date (inclusive)
    pub end_date: Option<NaiveDate>,
}

impl OrderFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by search text
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Only orders created on or after `date`
    pub fn from(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Only orders created on or before `date`
    pub fn to(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Check whether an order passes the filter
    pub fn matches(&self, order: &Order) -> bool {
        let created = order.created_at().date();
        if self.start_date.is_some_and(|start| created < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| created > end) {
            return false;
        }

        let needle = match self.search.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_lowercase(),
            _ => return true,
        };

        let haystack = [
            order.id.to_string(),
            order.status().to_string(),
            order.description.clone(),
            order.pickup_address.clone(),
            order.delivery_address.clone(),
            order.executor.clone().unwrap_or_default(),
            order.comment.clone(),
            order.created_at().format(SEARCH_DATE_FORMAT).to_string(),
            order.updated_at().format(SEARCH_DATE_FORMAT).to_string(),
            order.weight.to_string(),
        ];

        haystack
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Field changes for an existing order; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct OrderEdit {
    pub description: Option<String>,
    pub pickup_address: Option<String>,
    pub delivery_address: Option<String>,
    pub executor: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub weight: Option<f64>,
    pub comment: Option<String>,
}

impl OrderEdit {
    /// Whether anything other than the comment is being changed
    pub fn touches_details(&self) -> bool {
        self.description.is_some()
            || self.pickup_address.is_some()
            || self.delivery_address.is_some()
            || self.executor.is_some()
            || self.width.is_some()
            || self.height.is_some()
            || self.depth.is_some()
            || self.weight.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.touches_details() && self.comment.is_none()
    }

    fn apply_to(self, details: &mut OrderDetails) {
        if let Some(description) = self.description {
            details.description = description;
        }
        if let Some(pickup) = self.pickup_address {
            details.pickup_address = pickup;
        }
        if let Some(delivery) = self.delivery_address {
            details.delivery_address = delivery;
        }
        if let Some(executor) = self.executor {
            details.executor = Some(executor);
        }
        if let Some(width) = self.width {
            details.width = width;
        }
        if let Some(height) = self.height {
            details.height = height;
        }
        if let Some(depth) = self.depth {
            details.depth = depth;
        }
        if let Some(weight) = self.weight {
            details.weight = weight;
        }
        if let Some(comment) = self.comment {
            details.comment = comment;
        }
    }
}

/// Service for order management
pub struct OrderService<'a> {
    store: &'a dyn OrderStore,
    workflow: OrderStatusWorkflow,
}

impl<'a> OrderService<'a> {
    /// Create a new order service
    pub fn new(store: &'a dyn OrderStore) -> Self {
        Self {
            store,
            workflow: OrderStatusWorkflow::new(),
        }
    }

    /// List orders matching a filter, ordered by id
    pub fn list(&self, filter: &OrderFilter) -> OrderResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .store
            .list_orders()?
            .into_iter()
            .filter(|o| filter.matches(o))
            .collect();
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }

    /// Get an order by ID
    pub fn get(&self, id: OrderId) -> OrderResult<Option<Order>> {
        self.store.get_order(id)
    }

    /// Get an order by ID, failing if it does not exist
    pub fn get_required(&self, id: OrderId) -> OrderResult<Order> {
        self.get(id)?
            .ok_or_else(|| OrderError::order_not_found(id.to_string()))
    }

    /// Executors available for assignment
    pub fn executors(&self) -> OrderResult<Vec<Executor>> {
        self.store.list_executors()
    }

    /// Resolve an executor name to its canonical spelling
    fn resolve_executor(&self, name: &str) -> OrderResult<String> {
        self.store
            .list_executors()?
            .into_iter()
            .find(|e| e.matches_name(name))
            .map(|e| e.name)
            .ok_or_else(|| OrderError::executor_not_found(name.trim()))
    }

    /// Create a new order
    pub fn create(&self, details: OrderDetails) -> OrderResult<Order> {
        let mut order = Order::new(details);

        order
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        if let Some(name) = order.executor.take() {
            order.executor = Some(self.resolve_executor(&name)?);
        }

        let created = self.store.create_order(&order)?;
        tracing::info!(order_id = %created.id, "Created order");
        Ok(created)
    }

    /// Edit an order
    ///
    /// Only the comment may change once an order has left `New`.
    pub fn update(&self, id: OrderId, edit: OrderEdit) -> OrderResult<Order> {
        let mut order = self.get_required(id)?;

        if edit.is_empty() {
            return Ok(order);
        }

        if edit.touches_details() && !order.editability().details_editable() {
            return Err(OrderError::Validation(format!(
                "Order #{} is {}; only the comment can be edited",
                order.id,
                order.status()
            )));
        }

        let executor = match edit.executor.as_deref() {
            Some(name) => Some(self.resolve_executor(name)?),
            None => None,
        };

        let mut details = order.details();
        edit.apply_to(&mut details);
        if executor.is_some() {
            details.executor = executor;
        }
        order.apply_details(details);

        order
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        self.store.save_order(&order)?;
        tracing::info!(order_id = %order.id, "Updated order");
        Ok(order)
    }

    /// Delete an order
    pub fn delete(&self, id: OrderId) -> OrderResult<()> {
        self.store.delete_order(id)?;
        tracing::info!(order_id = %id, "Deleted order");
        Ok(())
    }

    /// Run a status request on an order and persist it when it changed
    ///
    /// A store failure is returned as is. The in-memory order keeps its new
    /// status and attached loggers have already been notified.
    pub fn transition(
        &self,
        order: &mut Order,
        target_label: &str,
        comment_edit: CommentEdit,
        prompt: &mut dyn CommentPrompt,
    ) -> OrderResult<TransitionOutcome> {
        let outcome = self
            .workflow
            .request_transition(order, target_label, comment_edit, prompt)?;

        if outcome.changed {
            self.store.save_order(order).map_err(|e| {
                tracing::warn!(order_id = %order.id, error = %e, "Failed to save status change");
                e
            })?;
        }

        Ok(outcome)
    }

    /// Load an order, attach loggers, and change its status
    pub fn change_status(
        &self,
        id: OrderId,
        target_label: &str,
        comment_edit: CommentEdit,
        prompt: &mut dyn CommentPrompt,
        loggers: &[Arc<dyn StatusLogger>],
    ) -> OrderResult<(Order, TransitionOutcome)> {
        let mut order = self.get_required(id)?;
        for logger in loggers {
            order.attach_logger(Arc::clone(logger));
        }

        let outcome = self.transition(&mut order, target_label, comment_edit, prompt)?;
        Ok((order, outcome))
    }

    /// Count orders per status, in progression order
    pub fn status_counts(&self) -> OrderResult<Vec<(OrderStatus, usize)>> {
        let orders = self.store.list_orders()?;
        Ok(OrderStatus::ALL
            .into_iter()
            .map(|status| {
                let count = orders.iter().filter(|o| o.status() == status).count();
                (status, count)
            })
            .collect())
    }
}
