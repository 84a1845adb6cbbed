//! User settings for order-desk
//!
//! Manages which order store to talk to, how to reach the order service, and
//! where and how long status-change logs are kept.

use std::path::PathBuf;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::OrderPaths;
use crate::audit::DEFAULT_MAX_FILES_PER_DAY;
use crate::error::OrderError;

/// Which order store backs the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Remote order service over HTTP (default)
    #[default]
    Http,
    /// Local JSON files in the data directory
    File,
}

/// User settings for order-desk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Order store backend
    #[serde(default)]
    pub backend: StoreBackend,

    /// Base URL of the order service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout for the order service
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Status-change log directory (defaults to `<base>/logs`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Hourly log files kept per day
    #[serde(default = "default_log_retention")]
    pub log_retention: usize,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "https://localhost:5001".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_retention() -> usize {
    DEFAULT_MAX_FILES_PER_DAY
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backend: StoreBackend::default(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            log_dir: None,
            log_retention: default_log_retention(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Resolved status-change log directory
    pub fn log_dir(&self, paths: &OrderPaths) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| paths.log_dir())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &OrderPaths) -> Result<Self, OrderError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| OrderError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                OrderError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject values that would break display or status logging
    pub fn validate(&self) -> Result<(), OrderError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(OrderError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }

        if self.log_retention == 0 {
            return Err(OrderError::Config(
                "log_retention must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &OrderPaths) -> Result<(), OrderError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| OrderError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| OrderError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
