//! The statement model: everything a builder has accumulated so far.

use std::fmt;
use std::str::FromStr;

use crate::criteria::Criterion;
use crate::error::QueryError;
use crate::expr::{ColumnValue, Field, Selection};
use crate::query::Action;

/// Accumulated clause fragments of one statement.
///
/// Each field is a separate namespace. Appending keeps insertion order and
/// never deduplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statements {
    /// FROM tables.
    pub tables: Vec<Field>,
    /// Projection.
    pub selects: Vec<Selection>,
    /// Whether the projection is `SELECT DISTINCT`.
    pub distinct: bool,
    /// WHERE criteria.
    pub wheres: Vec<Criterion>,
    /// HAVING criteria.
    pub havings: Vec<Criterion>,
    /// Joins, compiled in insertion order.
    pub joins: Vec<Join>,
    /// GROUP BY fields.
    pub group_bys: Vec<Field>,
    /// ORDER BY entries.
    pub order_bys: Vec<OrderBy>,
    /// LIMIT.
    pub limit: Option<u64>,
    /// OFFSET.
    pub offset: Option<u64>,
    /// `ON DUPLICATE KEY UPDATE` assignments for the next insert.
    pub on_duplicate: Option<Row>,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// `INNER JOIN`
    #[default]
    Inner,
    /// `OUTER JOIN`
    Outer,
    /// `LEFT JOIN`
    Left,
    /// `RIGHT JOIN`
    Right,
}

impl JoinType {
    /// Returns the SQL keyword for this join type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Outer => "OUTER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inner" => Ok(Self::Inner),
            "outer" => Ok(Self::Outer),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(QueryError::UnknownKeyword {
                kind: "join type",
                value: s.to_string(),
            }),
        }
    }
}

/// A join and its ON criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Join type.
    pub kind: JoinType,
    /// Joined table.
    pub table: Field,
    /// ON criteria.
    pub criteria: Vec<Criterion>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(QueryError::UnknownKeyword {
                kind: "sort direction",
                value: s.to_string(),
            }),
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// Sorted field.
    pub field: Field,
    /// Direction.
    pub direction: Direction,
}

/// Ordered column assignments for INSERT and UPDATE.
///
/// Columns keep the order they were first set in. Setting a column again
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, ColumnValue)>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self { columns: vec![] }
    }

    /// Sets a column, returning the row for chaining.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Sets a column in place.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<ColumnValue>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.columns.push((column, value)),
        }
    }

    /// Returns the column/value pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnValue)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<ColumnValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// Payload of an insert: one row, or a batch compiled to one statement per
/// row.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertData {
    /// A single row.
    Single(Row),
    /// Several rows.
    Batch(Vec<Row>),
}

impl InsertData {
    /// Returns the rows to insert.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        match self {
            Self::Single(row) => std::slice::from_ref(row),
            Self::Batch(rows) => rows,
        }
    }

    /// Returns true if there is nothing to insert.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(row) => row.is_empty(),
            Self::Batch(rows) => rows.first().map_or(true, Row::is_empty),
        }
    }
}

impl From<Row> for InsertData {
    fn from(row: Row) -> Self {
        Self::Single(row)
    }
}

impl From<Vec<Row>> for InsertData {
    fn from(rows: Vec<Row>) -> Self {
        Self::Batch(rows)
    }
}

/// Flavour of insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertKind {
    /// Plain insert.
    #[default]
    Insert,
    /// Insert that skips conflicting rows.
    Ignore,
    /// Insert that replaces conflicting rows.
    Replace,
}

impl InsertKind {
    /// Returns the matching action.
    #[must_use]
    pub const fn action(self) -> Action {
        match self {
            Self::Insert => Action::Insert,
            Self::Ignore => Action::InsertIgnore,
            Self::Replace => Action::Replace,
        }
    }
}
