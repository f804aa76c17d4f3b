//! MySQL dialect implementation.

use super::Dialect;
use crate::compiler;
use crate::error::Result;
use crate::query::QueryObject;
use crate::statement::Statements;

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn delete(&self, statements: &Statements) -> Result<QueryObject> {
        compiler::compile_delete(self, statements, true)
    }
}
