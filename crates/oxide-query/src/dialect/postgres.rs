//! PostgreSQL dialect implementation.

use super::Dialect;
use crate::error::{QueryError, Result};
use crate::statement::InsertKind;

/// PostgreSQL dialect.
///
/// Placeholders stay `?`; rewriting them to `$n` is left to the driver.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "pgsql"
    }

    fn insert_keyword(&self, kind: InsertKind) -> Result<&'static str> {
        match kind {
            InsertKind::Insert => Ok("INSERT"),
            InsertKind::Ignore => Err(self.unsupported("INSERT IGNORE")),
            InsertKind::Replace => Err(self.unsupported("REPLACE")),
        }
    }

    fn supports_on_duplicate_key(&self) -> bool {
        false
    }
}

impl PostgresDialect {
    fn unsupported(self, feature: &'static str) -> QueryError {
        QueryError::UnsupportedFeature {
            feature,
            dialect: self.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.name(), "pgsql");
        assert_eq!(dialect.quote_identifier("users.id"), r#""users"."id""#);
        assert_eq!(dialect.insert_keyword(InsertKind::Insert).unwrap(), "INSERT");
        assert!(!dialect.supports_on_duplicate_key());
    }

    #[test]
    fn test_rejects_mysql_inserts() {
        let dialect = PostgresDialect::new();
        assert_eq!(
            dialect.insert_keyword(InsertKind::Replace).unwrap_err(),
            QueryError::UnsupportedFeature {
                feature: "REPLACE",
                dialect: "pgsql"
            }
        );
        assert!(dialect.insert_keyword(InsertKind::Ignore).is_err());
    }
}
