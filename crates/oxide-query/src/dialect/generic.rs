//! Generic SQL dialect.

use super::Dialect;

/// The base statement adapter: ANSI double-quoted identifiers and no
/// dialect-specific clauses.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{InsertKind, Statements};

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.identifier_quote(), '"');
        assert!(dialect.supports_on_duplicate_key());
        assert_eq!(dialect.insert_keyword(InsertKind::Ignore).unwrap(), "INSERT IGNORE");
    }

    #[test]
    fn test_delete_ignores_limit() {
        let statements = Statements {
            tables: vec!["t".into()],
            limit: Some(1),
            ..Statements::default()
        };
        let query = GenericDialect::new().delete(&statements).unwrap();
        assert_eq!(query.sql(), r#"DELETE FROM "t""#);
    }
}
