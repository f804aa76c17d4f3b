//! SQL dialect support.
//!
//! A [`Dialect`] is the statement adapter for one database engine. The trait
//! carries the shared compilation as default methods; a dialect overrides
//! only what diverges, such as the identifier quote character or MySQL's
//! `DELETE ... LIMIT`.

mod generic;
mod mysql;
mod postgres;
mod sqlite;

use std::fmt;
use std::sync::Arc;

pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::compiler;
use crate::criteria::Criterion;
use crate::error::{QueryError, Result};
use crate::query::QueryObject;
use crate::statement::{InsertKind, Row, Statements};

/// Names accepted by [`dialect_for`], one per adapter.
pub const DIALECT_NAMES: [&str; 4] = ["mysql", "pgsql", "sqlite", "generic"];

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes an identifier.
    ///
    /// A qualified name is split on its first `.` and each part quoted
    /// separately. `*` is left bare. Embedded quote characters are doubled.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let quote_part = |part: &str| {
            if part == "*" {
                String::from(part)
            } else {
                let escaped = part.replace(quote, &format!("{quote}{quote}"));
                format!("{quote}{escaped}{quote}")
            }
        };
        match name.split_once('.') {
            Some((table, column)) => format!("{}.{}", quote_part(table), quote_part(column)),
            None => quote_part(name),
        }
    }

    /// Returns the statement keyword for an insert flavour.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnsupportedFeature`] when the dialect has no
    /// equivalent.
    fn insert_keyword(&self, kind: InsertKind) -> Result<&'static str> {
        Ok(match kind {
            InsertKind::Insert => "INSERT",
            InsertKind::Ignore => "INSERT IGNORE",
            InsertKind::Replace => "REPLACE",
        })
    }

    /// Returns whether the dialect supports `ON DUPLICATE KEY UPDATE`.
    fn supports_on_duplicate_key(&self) -> bool {
        true
    }

    /// Compiles a SELECT.
    ///
    /// # Errors
    ///
    /// See [`compiler::compile_select`].
    fn select(&self, statements: &Statements) -> Result<QueryObject> {
        compiler::compile_select(self, statements)
    }

    /// Compiles a single-row insert.
    ///
    /// # Errors
    ///
    /// See [`compiler::compile_insert`].
    fn insert(&self, statements: &Statements, row: &Row, kind: InsertKind) -> Result<QueryObject> {
        compiler::compile_insert(self, statements, row, kind)
    }

    /// Compiles an UPDATE.
    ///
    /// # Errors
    ///
    /// See [`compiler::compile_update`].
    fn update(&self, statements: &Statements, row: &Row) -> Result<QueryObject> {
        compiler::compile_update(self, statements, row)
    }

    /// Compiles a DELETE. The base form ignores LIMIT.
    ///
    /// # Errors
    ///
    /// See [`compiler::compile_delete`].
    fn delete(&self, statements: &Statements) -> Result<QueryObject> {
        compiler::compile_delete(self, statements, false)
    }

    /// Compiles criteria to a bare expression. Nested groups recurse through
    /// here so they are quoted by the same dialect as their parent.
    ///
    /// # Errors
    ///
    /// See [`compiler::compile_criteria_only`].
    fn criteria_only(&self, criteria: &[Criterion], bind_values: bool) -> Result<QueryObject> {
        compiler::compile_criteria_only(self, criteria, bind_values)
    }
}

/// Returns the statement adapter for a dialect name (case-insensitive).
///
/// # Errors
///
/// Returns [`QueryError::UnsupportedDialect`] for unknown names.
pub fn dialect_for(name: &str) -> Result<Arc<dyn Dialect>> {
    match name.to_ascii_lowercase().as_str() {
        "mysql" => Ok(Arc::new(MySqlDialect::new())),
        "pgsql" | "postgres" | "postgresql" => Ok(Arc::new(PostgresDialect::new())),
        "sqlite" => Ok(Arc::new(SqliteDialect::new())),
        "generic" => Ok(Arc::new(GenericDialect::new())),
        _ => Err(QueryError::UnsupportedDialect(name.to_string())),
    }
}
