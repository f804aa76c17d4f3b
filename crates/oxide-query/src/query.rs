//! Compiled statements.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::QueryError;
use crate::value::{ParamType, SqlValue};

/// The statement kinds a builder can compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// `SELECT`
    Select,
    /// `INSERT`
    Insert,
    /// `INSERT IGNORE` (or the dialect's equivalent)
    InsertIgnore,
    /// `REPLACE`
    Replace,
    /// `DELETE`
    Delete,
    /// `UPDATE`
    Update,
    /// The WHERE expression alone, without keyword.
    CriteriaOnly,
}

impl Action {
    /// Every action, in the order they are listed to users.
    pub const ALL: [Self; 7] = [
        Self::Select,
        Self::Insert,
        Self::InsertIgnore,
        Self::Replace,
        Self::Delete,
        Self::Update,
        Self::CriteriaOnly,
    ];

    /// Returns the action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::InsertIgnore => "insertignore",
            Self::Replace => "replace",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::CriteriaOnly => "criteriaonly",
        }
    }

    /// Returns true for actions that need a data payload.
    #[must_use]
    pub const fn needs_data(self) -> bool {
        matches!(
            self,
            Self::Insert | Self::InsertIgnore | Self::Replace | Self::Update
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == lowered)
            .ok_or_else(|| QueryError::UnknownAction(s.to_string()))
    }
}

/// A compiled statement: SQL text and its bindings in placeholder order.
///
/// Immutable once built. Compiling the same builder again produces a new,
/// equal object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryObject {
    sql: String,
    bindings: Vec<SqlValue>,
}

impl QueryObject {
    /// Creates a query object.
    #[must_use]
    pub const fn new(sql: String, bindings: Vec<SqlValue>) -> Self {
        Self { sql, bindings }
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

    /// Returns how each binding should be typed by the driver.
    #[must_use]
    pub fn param_types(&self) -> Vec<ParamType> {
        self.bindings.iter().map(SqlValue::param_type).collect()
    }

    /// Returns the SQL with each placeholder replaced, left to right, by its
    /// binding rendered as a literal.
    ///
    /// For logging only. A `?` inside a raw fragment's string literal is
    /// replaced too.
    #[must_use]
    pub fn raw_sql(&self) -> String {
        let mut out = String::with_capacity(self.sql.len());
        let mut bindings = self.bindings.iter();
        for c in self.sql.chars() {
            if c == '?' {
                match bindings.next() {
                    Some(value) => out.push_str(&value.to_sql_inline()),
                    None => out.push(c),
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Splits the object into its SQL and bindings.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.bindings)
    }
}

impl fmt::Display for QueryObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
