//! HTTP client for the remote order service
//!
//! Endpoints (JSON, camelCase bodies):
//!
//! - `GET    /api/orders`
//! - `POST   /api/orders`
//! - `PUT    /api/orders/{id}`
//! - `DELETE /api/orders/{id}`
//! - `GET    /api/orders/executors`
//!
//! Non-success responses become [`OrderError::Persistence`] carrying the HTTP
//! status; transport failures carry no status. Nothing is retried.

use std::time::Duration;

use ureq::Agent;

use super::OrderStore;
use crate::error::{OrderError, OrderResult};
use crate::models::{Executor, Order, OrderId};

/// Order store backed by the remote REST service
pub struct HttpOrderStore {
    agent: Agent,
    base_url: String,
}

impl HttpOrderStore {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn orders_url(&self) -> String {
        format!("{}/api/orders", self.base_url)
    }

    fn order_url(&self, id: OrderId) -> String {
        format!("{}/api/orders/{}", self.base_url, id)
    }

    fn executors_url(&self) -> String {
        format!("{}/api/orders/executors", self.base_url)
    }
}

/// Map a client error onto the store error, keeping the HTTP status when there is one
fn map_http_error(action: &str, err: ureq::Error) -> OrderError {
    match err {
        ureq::Error::StatusCode(code) => {
            OrderError::persistence(Some(code), format!("Failed to {}", action))
        }
        other => OrderError::persistence(None, format!("Failed to {}: {}", action, other)),
    }
}

impl OrderStore for HttpOrderStore {
    fn list_orders(&self) -> OrderResult<Vec<Order>> {
        let url = self.orders_url();
        tracing::debug!(%url, "GET orders");

        let mut response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| map_http_error("load orders", e))?;

        response
            .body_mut()
            .read_json::<Vec<Order>>()
            .map_err(|e| map_http_error("read orders", e))
    }

    fn create_order(&self, order: &Order) -> OrderResult<Order> {
        let url = self.orders_url();
        tracing::debug!(%url, "POST order");

        let mut response = self
            .agent
            .post(&url)
            .send_json(order)
            .map_err(|e| map_http_error("create order", e))?;

        response
            .body_mut()
            .read_json::<Order>()
            .map_err(|e| map_http_error("read created order", e))
    }

    fn save_order(&self, order: &Order) -> OrderResult<()> {
        let url = self.order_url(order.id);
        tracing::debug!(%url, "PUT order");

        self.agent
            .put(&url)
            .send_json(order)
            .map_err(|e| map_http_error(&format!("update order {}", order.id), e))?;
        Ok(())
    }

    fn delete_order(&self, id: OrderId) -> OrderResult<()> {
        let url = self.order_url(id);
        tracing::debug!(%url, "DELETE order");

        match self.agent.delete(&url).call() {
            Ok(_) => Ok(()),
            Err(ureq::Error::StatusCode(404)) => Err(OrderError::order_not_found(id.to_string())),
            Err(e) => Err(map_http_error(&format!("delete order {}", id), e)),
        }
    }

    fn list_executors(&self) -> OrderResult<Vec<Executor>> {
        let url = self.executors_url();
        tracing::debug!(%url, "GET executors");

        let mut response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| map_http_error("load executors", e))?;

        response
            .body_mut()
            .read_json::<Vec<Executor>>()
            .map_err(|e| map_http_error("read executors", e))
    }
}
