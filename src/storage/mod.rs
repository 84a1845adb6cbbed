//! Storage layer for order-desk
//!
//! Orders live behind the [`OrderStore`] trait. Two implementations ship with
//! the crate: [`HttpOrderStore`] talks to the remote order service and
//! [`FileOrderStore`] keeps JSON files with atomic writes for offline use.

pub mod file;
pub mod file_io;
pub mod http;

pub use file::FileOrderStore;
pub use file_io::{read_json, write_json_atomic};
pub use http::HttpOrderStore;

use crate::config::{OrderPaths, Settings, StoreBackend};
use crate::error::OrderResult;
use crate::models::{Executor, Order, OrderId};

/// Persistence collaborator for orders and executors
pub trait OrderStore {
    /// All orders known to the store
    fn list_orders(&self) -> OrderResult<Vec<Order>>;

    /// Look up a single order
    fn get_order(&self, id: OrderId) -> OrderResult<Option<Order>> {
        Ok(self.list_orders()?.into_iter().find(|o| o.id == id))
    }

    /// Store a new order and return it with its assigned id
    fn create_order(&self, order: &Order) -> OrderResult<Order>;

    /// Overwrite an existing order
    fn save_order(&self, order: &Order) -> OrderResult<()>;

    fn delete_order(&self, id: OrderId) -> OrderResult<()>;

    /// Executors orders can be assigned to
    fn list_executors(&self) -> OrderResult<Vec<Executor>>;
}

/// Build the store selected in the settings
pub fn open_store(settings: &Settings, paths: &OrderPaths) -> OrderResult<Box<dyn OrderStore>> {
    match settings.backend {
        StoreBackend::Http => {
            tracing::debug!(url = %settings.api_base_url, "Using HTTP order store");
            Ok(Box::new(HttpOrderStore::new(
                &settings.api_base_url,
                settings.request_timeout(),
            )))
        }
        StoreBackend::File => {
            paths.ensure_directories()?;
            tracing::debug!(dir = %paths.data_dir().display(), "Using file order store");
            Ok(Box::new(FileOrderStore::from_paths(paths)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_file_store_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OrderPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            backend: StoreBackend::File,
            ..Settings::default()
        };

        let store = open_store(&settings, &paths).unwrap();
        assert!(paths.data_dir().exists());
        assert!(store.list_orders().unwrap().is_empty());
    }

    #[test]
    fn test_get_order_default_impl() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OrderPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = FileOrderStore::from_paths(&paths);

        assert!(store.get_order(OrderId::new(1)).unwrap().is_none());
    }
}
