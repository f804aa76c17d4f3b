//! SQLite dialect implementation.

use super::Dialect;
use crate::error::Result;
use crate::statement::InsertKind;

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identifier_quote(&self) -> char {
        '"' // SQLite also accepts backticks, but double quotes are standard
    }

    fn insert_keyword(&self, kind: InsertKind) -> Result<&'static str> {
        Ok(match kind {
            InsertKind::Insert => "INSERT",
            InsertKind::Ignore => "INSERT OR IGNORE",
            InsertKind::Replace => "REPLACE",
        })
    }

    fn supports_on_duplicate_key(&self) -> bool {
        false // ON CONFLICT instead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::statement::{Row, Statements};

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert_eq!(dialect.identifier_quote(), '"');
        assert!(!dialect.supports_on_duplicate_key());
    }

    #[test]
    fn test_insert_or_ignore() {
        let statements = Statements {
            tables: vec!["tags".into()],
            ..Statements::default()
        };
        let row = Row::new().set("name", "rust");
        let query = SqliteDialect::new()
            .insert(&statements, &row, InsertKind::Ignore)
            .unwrap();
        assert_eq!(query.sql(), r#"INSERT OR IGNORE INTO "tags" ("name") VALUES (?)"#);
    }

    #[test]
    fn test_rejects_on_duplicate_key() {
        let statements = Statements {
            tables: vec!["tags".into()],
            on_duplicate: Some(Row::new().set("hits", 1)),
            ..Statements::default()
        };
        let row = Row::new().set("name", "rust");
        let err = SqliteDialect::new()
            .insert(&statements, &row, InsertKind::Insert)
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::UnsupportedFeature {
                feature: "ON DUPLICATE KEY UPDATE",
                dialect: "sqlite"
            }
        );
    }
}
