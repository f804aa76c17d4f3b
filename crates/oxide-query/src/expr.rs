//! Building blocks shared by every clause: raw fragments, fields and
//! comparison operands.

use super::value::{SqlValue, ToSqlValue};

/// Caller-supplied SQL embedded verbatim.
///
/// The compiler never quotes or escapes a raw fragment. Its bindings are
/// spliced into the statement's binding list at the position the fragment
/// takes in the SQL text, so the fragment must carry exactly one binding per
/// `?` it contains.
///
/// **Warning**: Only use this for SQL that doesn't contain user input.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    sql: String,
    bindings: Vec<SqlValue>,
}

impl Raw {
    /// Creates a raw fragment without bindings.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: vec![],
        }
    }

    /// Creates a raw fragment with bindings for its placeholders.
    #[must_use]
    pub fn with_bindings<I, V>(sql: impl Into<String>, bindings: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        Self {
            sql: sql.into(),
            bindings: bindings.into_iter().map(ToSqlValue::to_sql_value).collect(),
        }
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the bindings.
    #[must_use]
    pub fn bindings(&self) -> &[SqlValue] {
        &self.bindings
    }
}

impl std::fmt::Display for Raw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Anything that can stand where a column or table name goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// An identifier, optionally qualified as `table.column`. Quoted by the
    /// dialect when compiled.
    Column(String),
    /// A raw fragment, emitted as is.
    Raw(Raw),
}

impl Field {
    /// Human-readable form used in error messages.
    #[must_use]
    pub fn describe(&self) -> &str {
        match self {
            Self::Column(name) => name,
            Self::Raw(raw) => raw.sql(),
        }
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::Column(String::from(name))
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Self::Column(name)
    }
}

impl From<&String> for Field {
    fn from(name: &String) -> Self {
        Self::Column(name.clone())
    }
}

impl From<Raw> for Field {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}

/// One entry of the SELECT projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The selected field.
    pub field: Field,
    /// Optional alias, rendered as `AS <alias>`.
    pub alias: Option<String>,
}

impl From<Field> for Selection {
    fn from(field: Field) -> Self {
        Self { field, alias: None }
    }
}

impl From<&str> for Selection {
    fn from(name: &str) -> Self {
        Field::from(name).into()
    }
}

impl From<String> for Selection {
    fn from(name: String) -> Self {
        Field::from(name).into()
    }
}

impl From<Raw> for Selection {
    fn from(raw: Raw) -> Self {
        Field::from(raw).into()
    }
}

/// The right-hand side of a filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A scalar. Bound to a placeholder in WHERE/HAVING; in a join's ON
    /// clause text is read as a column reference and other scalars are
    /// inlined as literals.
    Value(SqlValue),
    /// A scalar that is always bound, even inside an ON clause.
    Bound(SqlValue),
    /// A list for `IN` / `NOT IN`, one placeholder per element.
    List(Vec<SqlValue>),
    /// A `(from, to)` pair for `BETWEEN`.
    Range(SqlValue, SqlValue),
    /// A raw fragment, emitted as is.
    Raw(Raw),
}

impl<T: ToSqlValue> From<T> for Operand {
    fn from(value: T) -> Self {
        Self::Value(value.to_sql_value())
    }
}

impl From<Raw> for Operand {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}

/// A value assigned to a column by INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// Bound to a placeholder.
    Bind(SqlValue),
    /// Emitted as is, e.g. `NOW()`.
    Raw(Raw),
}

impl<T: ToSqlValue> From<T> for ColumnValue {
    fn from(value: T) -> Self {
        Self::Bind(value.to_sql_value())
    }
}

impl From<Raw> for ColumnValue {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}
