//! Clause assemblers.
//!
//! Each function renders one clause of a statement from the relevant slice
//! of [`Statements`] and returns it as a [`Fragment`]: SQL text plus the
//! bindings for the placeholders in that text, in order. An empty fragment
//! means the clause is absent and its keyword must not be emitted.

use crate::criteria::{compile_criteria, render_field, Criterion};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::statement::Statements;
use crate::value::SqlValue;

/// A piece of SQL and the bindings for its placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    sql: String,
    bindings: Vec<SqlValue>,
}

impl Fragment {
    /// Creates a fragment.
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

    /// Returns true if the fragment has no SQL.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Splits the fragment into its SQL and bindings.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.bindings)
    }

    /// Prefixes a non-empty fragment with a clause keyword.
    #[must_use]
    pub fn with_keyword(self, keyword: &str) -> Self {
        if self.is_empty() {
            self
        } else {
            Self {
                sql: format!("{keyword} {}", self.sql),
                bindings: self.bindings,
            }
        }
    }
}

/// Joins statement pieces with single spaces, skipping empty ones.
#[must_use]
pub fn concatenate(pieces: &[&str]) -> String {
    pieces
        .iter()
        .map(|piece| piece.trim())
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The SELECT projection, `*` when nothing was selected.
#[must_use]
pub fn projection<D: Dialect + ?Sized>(dialect: &D, statements: &Statements) -> Fragment {
    if statements.selects.is_empty() {
        return Fragment::new(String::from("*"), vec![]);
    }

    let mut bindings = vec![];
    let columns: Vec<String> = statements
        .selects
        .iter()
        .map(|selection| {
            let field = render_field(dialect, &selection.field, &mut bindings);
            match &selection.alias {
                Some(alias) => format!("{field} AS {}", dialect.quote_identifier(alias)),
                None => field,
            }
        })
        .collect();

    Fragment::new(columns.join(", "), bindings)
}

/// The comma-separated table list of a FROM clause.
#[must_use]
pub fn tables<D: Dialect + ?Sized>(dialect: &D, statements: &Statements) -> Fragment {
    let mut bindings = vec![];
    let tables: Vec<String> = statements
        .tables
        .iter()
        .map(|table| render_field(dialect, table, &mut bindings))
        .collect();
    Fragment::new(tables.join(", "), bindings)
}

/// All JOIN clauses in insertion order.
///
/// ON criteria are compiled without binding plain values, so
/// `users.id = orders.user_id` compares two columns. A join whose criteria
/// compile to nothing is dropped.
///
/// # Errors
///
/// Propagates malformed join criteria.
pub fn joins<D: Dialect + ?Sized>(dialect: &D, statements: &Statements) -> Result<Fragment> {
    let mut pieces = vec![];
    let mut bindings = vec![];

    for join in &statements.joins {
        let criteria = dialect.criteria_only(&join.criteria, false)?;
        if criteria.sql().is_empty() {
            continue;
        }
        let table = render_field(dialect, &join.table, &mut bindings);
        bindings.extend_from_slice(criteria.bindings());
        pieces.push(format!(
            "{} JOIN {table} ON {}",
            join.kind.as_str(),
            criteria.sql()
        ));
    }

    Ok(Fragment::new(pieces.join(" "), bindings))
}

/// A criteria clause (`WHERE`, `HAVING`) with bound values.
///
/// # Errors
///
/// Propagates malformed criteria.
pub fn criteria_with_keyword<D: Dialect + ?Sized>(
    dialect: &D,
    criteria: &[Criterion],
    keyword: &str,
) -> Result<Fragment> {
    Ok(compile_criteria(dialect, criteria, true)?.with_keyword(keyword))
}

/// The GROUP BY clause.
#[must_use]
pub fn group_by<D: Dialect + ?Sized>(dialect: &D, statements: &Statements) -> Fragment {
    let mut bindings = vec![];
    let fields: Vec<String> = statements
        .group_bys
        .iter()
        .map(|field| render_field(dialect, field, &mut bindings))
        .collect();
    Fragment::new(fields.join(", "), bindings).with_keyword("GROUP BY")
}

/// The ORDER BY clause.
#[must_use]
pub fn order_by<D: Dialect + ?Sized>(dialect: &D, statements: &Statements) -> Fragment {
    let mut bindings = vec![];
    let fields: Vec<String> = statements
        .order_bys
        .iter()
        .map(|order| {
            let field = render_field(dialect, &order.field, &mut bindings);
            format!("{field} {}", order.direction)
        })
        .collect();
    Fragment::new(fields.join(","), bindings).with_keyword("ORDER BY")
}

/// The LIMIT clause. Counts are structural and inlined.
#[must_use]
pub fn limit(statements: &Statements) -> String {
    statements
        .limit
        .map_or_else(String::new, |n| format!("LIMIT {n}"))
}

/// The OFFSET clause.
#[must_use]
pub fn offset(statements: &Statements) -> String {
    statements
        .offset
        .map_or_else(String::new, |n| format!("OFFSET {n}"))
}
