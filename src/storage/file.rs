//! Local JSON order store
//!
//! Keeps orders in `orders.json` and executors in `executors.json` inside the
//! data directory. Identifiers are assigned the way the order service does:
//! one past the largest identifier in use.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::paths::OrderPaths;
use crate::error::{OrderError, OrderResult};
use crate::models::{Executor, ExecutorId, Order, OrderId};

use super::file_io::{read_json, write_json_atomic};
use super::OrderStore;

/// Serializable order data structure
#[derive(Debug, Default, Serialize, Deserialize)]
struct OrderData {
    orders: Vec<Order>,
}

/// Serializable executor data structure
#[derive(Debug, Default, Serialize, Deserialize)]
struct ExecutorData {
    executors: Vec<Executor>,
}

/// Order store backed by local JSON files
pub struct FileOrderStore {
    orders_path: PathBuf,
    executors_path: PathBuf,
}

impl FileOrderStore {
    pub fn new(orders_path: PathBuf, executors_path: PathBuf) -> Self {
        Self {
            orders_path,
            executors_path,
        }
    }

    /// Store using the standard data directory layout
    pub fn from_paths(paths: &OrderPaths) -> Self {
        Self::new(paths.orders_file(), paths.executors_file())
    }

    fn load_orders(&self) -> OrderResult<Vec<Order>> {
        let data: OrderData = read_json(&self.orders_path)?;
        Ok(data.orders)
    }

    fn write_orders(&self, mut orders: Vec<Order>) -> OrderResult<()> {
        orders.sort_by_key(|o| o.id);
        write_json_atomic(&self.orders_path, &OrderData { orders })
    }

    fn load_executors(&self) -> OrderResult<Vec<Executor>> {
        let data: ExecutorData = read_json(&self.executors_path)?;
        Ok(data.executors)
    }

    /// Register an executor, returning the existing one if the name is taken
    pub fn add_executor(&self, name: &str) -> OrderResult<Executor> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OrderError::Validation(
                "Executor name cannot be empty".into(),
            ));
        }

        let mut executors = self.load_executors()?;
        if let Some(existing) = executors.iter().find(|e| e.matches_name(name)) {
            return Ok(existing.clone());
        }

        let next_id = executors.iter().map(|e| e.id.value()).max().unwrap_or(0) + 1;
        let executor = Executor::new(ExecutorId::new(next_id), name);
        executors.push(executor.clone());
        write_json_atomic(&self.executors_path, &ExecutorData { executors })?;

        tracing::info!(executor = %executor.name, "Added executor");
        Ok(executor)
    }
}

impl OrderStore for FileOrderStore {
    fn list_orders(&self) -> OrderResult<Vec<Order>> {
        self.load_orders()
    }

    fn create_order(&self, order: &Order) -> OrderResult<Order> {
        let mut orders = self.load_orders()?;

        let next_id = orders.iter().map(|o| o.id.value()).max().unwrap_or(0) + 1;
        let mut created = order.clone();
        created.id = OrderId::new(next_id);

        orders.push(created.clone());
        self.write_orders(orders)?;

        tracing::debug!(order_id = %created.id, "Stored new order");
        Ok(created)
    }

    fn save_order(&self, order: &Order) -> OrderResult<()> {
        let mut orders = self.load_orders()?;

        let slot = orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or_else(|| OrderError::order_not_found(order.id.to_string()))?;
        *slot = order.clone();

        self.write_orders(orders)
    }

    fn delete_order(&self, id: OrderId) -> OrderResult<()> {
        let mut orders = self.load_orders()?;
        let before = orders.len();
        orders.retain(|o| o.id != id);

        if orders.len() == before {
            return Err(OrderError::order_not_found(id.to_string()));
        }

        self.write_orders(orders)
    }

    fn list_executors(&self) -> OrderResult<Vec<Executor>> {
        self.load_executors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderDetails, OrderStatus};
    use tempfile::TempDir;

    fn create_test_store() -> (FileOrderStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = OrderPaths::with_base_dir(temp_dir.path().to_path_buf());
        (FileOrderStore::from_paths(&paths), temp_dir)
    }

    fn test_order(description: &str) -> Order {
        Order::new(OrderDetails {
            description: description.into(),
            pickup_address: "A".into(),
            delivery_address: "B".into(),
            executor: Some("Ivan".into()),
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            weight: 1.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_store() {
        let (store, _temp) = create_test_store();
        assert!(store.list_orders().unwrap().is_empty());
        assert!(store.list_executors().unwrap().is_empty());
    }

    #[test]
    fn test_create_assigns_ids() {
        let (store, _temp) = create_test_store();

        let first = store.create_order(&test_order("first")).unwrap();
        let second = store.create_order(&test_order("second")).unwrap();

        assert_eq!(first.id, OrderId::new(1));
        assert_eq!(second.id, OrderId::new(2));
        assert_eq!(store.list_orders().unwrap().len(), 2);
    }

    #[test]
    fn test_save_updates_in_place() {
        let (store, _temp) = create_test_store();
        let mut order = store.create_order(&test_order("boxes")).unwrap();

        order.set_status(OrderStatus::Dispatched);
        store.save_order(&order).unwrap();

        let loaded = store.get_order(order.id).unwrap().unwrap();
        assert_eq!(loaded.status(), OrderStatus::Dispatched);
        assert_eq!(loaded.created_at(), order.created_at());
    }

    #[test]
    fn test_save_unknown_order() {
        let (store, _temp) = create_test_store();
        let mut order = test_order("ghost");
        order.id = OrderId::new(99);

        assert!(store.save_order(&order).unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete() {
        let (store, _temp) = create_test_store();
        let order = store.create_order(&test_order("boxes")).unwrap();

        store.delete_order(order.id).unwrap();
        assert!(store.list_orders().unwrap().is_empty());
        assert!(store.delete_order(order.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_executor_is_idempotent() {
        let (store, _temp) = create_test_store();

        let first = store.add_executor("Ivan Petrov").unwrap();
        let again = store.add_executor("ivan petrov").unwrap();
        let other = store.add_executor("Anna Smirnova").unwrap();

        assert_eq!(first, again);
        assert_eq!(other.id, ExecutorId::new(2));
        assert_eq!(store.list_executors().unwrap().len(), 2);
        assert!(store.add_executor("  ").is_err());
    }
}
