//! Executor model
//!
//! Executors are reference data fetched from the order service. Orders refer
//! to them by name only.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExecutorId;

/// An assignable fulfillment agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    pub id: ExecutorId,
    pub name: String,
}

impl Executor {
    pub fn new(id: impl Into<ExecutorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive name match, ignoring surrounding whitespace
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

impl fmt::Display for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"id": 3, "name": "Ivan Petrov"}"#;
        let executor: Executor = serde_json::from_str(json).unwrap();
        assert_eq!(executor.id, ExecutorId::new(3));
        assert_eq!(executor.name, "Ivan Petrov");
    }

    #[test]
    fn test_matches_name() {
        let executor = Executor::new(1, "Ivan Petrov");
        assert!(executor.matches_name(" ivan petrov"));
        assert!(!executor.matches_name("Petr Ivanov"));
    }
}
