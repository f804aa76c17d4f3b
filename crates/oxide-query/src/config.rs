//! Connection configuration as seen by the compiler.
//!
//! Only the driver name and the table prefix matter here; host, credentials
//! and pooling belong to whatever executes the compiled statements.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dialect::{dialect_for, Dialect};
use crate::error::Result;

/// Driver name and optional table prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Dialect name, e.g. `mysql`, `pgsql`, `sqlite`.
    #[serde(default = "default_driver")]
    pub driver: String,
    /// Prefix added to table names and to qualified column references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

fn default_driver() -> String {
    String::from("mysql")
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            prefix: None,
        }
    }
}

impl ConnectionConfig {
    /// Creates a configuration for the given driver without prefix.
    #[must_use]
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            prefix: None,
        }
    }

    /// Sets the table prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Resolves the statement adapter for the configured driver.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnsupportedDialect`](crate::QueryError::UnsupportedDialect)
    /// for an unknown driver.
    pub fn dialect(&self) -> Result<Arc<dyn Dialect>> {
        dialect_for(&self.driver)
    }
}
