//! Path management for order-desk
//!
//! Provides XDG-compliant path resolution for configuration, local data, and
//! status-change logs.
//!
//! ## Path Resolution Order
//!
//! 1. `ORDER_DESK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/order-desk` or `~/.config/order-desk`
//! 3. Windows: `%APPDATA%\order-desk`

use std::path::PathBuf;

use crate::error::OrderError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ORDER_DESK_DATA_DIR";

/// Manages all paths used by order-desk
#[derive(Debug, Clone)]
pub struct OrderPaths {
    /// Base directory for all order-desk data
    base_dir: PathBuf,
}

impl OrderPaths {
    /// Create a new OrderPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, OrderError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create OrderPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/order-desk/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory used by the local file store
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the default status-change log directory
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to orders.json
    pub fn orders_file(&self) -> PathBuf {
        self.data_dir().join("orders.json")
    }

    /// Get the path to executors.json
    pub fn executors_file(&self) -> PathBuf {
        self.data_dir().join("executors.json")
    }

    /// Ensure the base and data directories exist
    ///
    /// The log directory is created lazily by the status logger.
    pub fn ensure_directories(&self) -> Result<(), OrderError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| OrderError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| OrderError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default base directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, OrderError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                OrderError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("order-desk"))
}

/// Resolve the default base directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, OrderError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| OrderError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("order-desk"))
}
