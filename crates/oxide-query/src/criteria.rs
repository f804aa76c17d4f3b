//! Filter conditions and their compilation.
//!
//! WHERE, HAVING and join ON clauses all share the same shape: an ordered
//! list of [`Criterion`] values, each prefixed with its [`Joiner`]. A
//! criterion's key may itself be a list of criteria, which compiles to a
//! parenthesized sub-expression through the dialect's
//! [`criteria_only`](crate::dialect::Dialect::criteria_only).

use std::fmt;

use crate::clause::Fragment;
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::expr::{Field, Operand, Raw};
use crate::value::SqlValue;

/// How a criterion attaches to the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Joiner {
    /// `AND`
    #[default]
    And,
    /// `OR`
    Or,
    /// `AND NOT`
    AndNot,
    /// `OR NOT`
    OrNot,
}

impl Joiner {
    /// Returns the SQL keyword(s).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::AndNot => "AND NOT",
            Self::OrNot => "OR NOT",
        }
    }

    /// Keyword kept when the criterion opens the expression: the leading
    /// `AND`/`OR` is dropped but a negation survives.
    #[must_use]
    pub const fn leading(self) -> Option<&'static str> {
        match self {
            Self::And | Self::Or => None,
            Self::AndNot | Self::OrNot => Some("NOT"),
        }
    }
}

impl fmt::Display for Joiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Left-hand side of a criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionKey {
    /// A column reference or raw fragment.
    Field(Field),
    /// A parenthesized group built by a nested closure.
    Nested(Vec<Criterion>),
}

/// A single filter condition.
///
/// `operator` and `value` are required for column keys. A raw key may stand
/// alone (`where_raw`), and a nested key never uses them.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    /// Left-hand side.
    pub key: CriterionKey,
    /// Comparison operator, e.g. `=`, `IN`, `BETWEEN`.
    pub operator: Option<String>,
    /// Right-hand side.
    pub value: Option<Operand>,
    /// Connection to the previous criterion.
    pub joiner: Joiner,
}

impl Criterion {
    /// Creates a `key operator value` criterion.
    #[must_use]
    pub fn new(
        key: impl Into<Field>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
        joiner: Joiner,
    ) -> Self {
        Self {
            key: CriterionKey::Field(key.into()),
            operator: Some(operator.into()),
            value: Some(value.into()),
            joiner,
        }
    }

    /// Creates a standalone raw criterion.
    #[must_use]
    pub const fn raw(raw: Raw, joiner: Joiner) -> Self {
        Self {
            key: CriterionKey::Field(Field::Raw(raw)),
            operator: None,
            value: None,
            joiner,
        }
    }

    /// Creates a nested group.
    #[must_use]
    pub const fn nested(criteria: Vec<Self>, joiner: Joiner) -> Self {
        Self {
            key: CriterionKey::Nested(criteria),
            operator: None,
            value: None,
            joiner,
        }
    }
}

/// Compiles `criteria` into a boolean expression and its bindings.
///
/// With `bind_values` off (join ON clauses) a text [`Operand::Value`] is a
/// column reference and is quoted as an identifier, other scalars are
/// inlined as literals. Lists, ranges and [`Operand::Bound`] are bound in
/// both modes.
///
/// An empty list compiles to an empty fragment; callers omit the clause
/// keyword in that case.
///
/// # Errors
///
/// Returns [`QueryError::MalformedCriterion`] when a column criterion lacks
/// its operator or value.
pub fn compile_criteria<D: Dialect + ?Sized>(
    dialect: &D,
    criteria: &[Criterion],
    bind_values: bool,
) -> Result<Fragment> {
    let mut pieces: Vec<String> = Vec::with_capacity(criteria.len());
    let mut bindings = vec![];

    for criterion in criteria {
        let Some(body) = compile_one(dialect, criterion, bind_values, &mut bindings)? else {
            continue;
        };
        let piece = if pieces.is_empty() {
            match criterion.joiner.leading() {
                Some(keyword) => format!("{keyword} {body}"),
                None => body,
            }
        } else {
            format!("{} {body}", criterion.joiner)
        };
        pieces.push(piece);
    }

    Ok(Fragment::new(pieces.join(" "), bindings))
}

fn compile_one<D: Dialect + ?Sized>(
    dialect: &D,
    criterion: &Criterion,
    bind_values: bool,
    bindings: &mut Vec<SqlValue>,
) -> Result<Option<String>> {
    let field = match &criterion.key {
        CriterionKey::Nested(children) => {
            let nested = dialect.criteria_only(children, bind_values)?;
            if nested.sql().is_empty() {
                return Ok(None);
            }
            bindings.extend_from_slice(nested.bindings());
            return Ok(Some(format!("({})", nested.sql())));
        }
        CriterionKey::Field(field) => field,
    };

    if let (Field::Raw(raw), None, None) = (field, &criterion.operator, &criterion.value) {
        bindings.extend_from_slice(raw.bindings());
        return Ok(Some(raw.sql().to_string()));
    }

    let operator = criterion
        .operator
        .as_deref()
        .ok_or_else(|| malformed(field, "operator"))?;
    let value = criterion
        .value
        .as_ref()
        .ok_or_else(|| malformed(field, "value"))?;

    let key = render_field(dialect, field, bindings);

    let body = match value {
        Operand::List(values) if values.is_empty() => {
            // Nothing is IN an empty set; everything is NOT IN it.
            if operator.to_ascii_uppercase().contains("NOT") {
                String::from("1 = 1")
            } else {
                String::from("1 = 0")
            }
        }
        Operand::List(values) => {
            let placeholders = vec![SqlValue::placeholder(); values.len()].join(", ");
            bindings.extend_from_slice(values);
            format!("{key} {operator} ({placeholders})")
        }
        Operand::Range(from, to) => {
            bindings.push(from.clone());
            bindings.push(to.clone());
            format!("{key} {operator} ? AND ?")
        }
        Operand::Raw(raw) => {
            bindings.extend_from_slice(raw.bindings());
            format!("{key} {operator} {}", raw.sql())
        }
        Operand::Bound(value) => {
            bindings.push(value.clone());
            format!("{key} {operator} ?")
        }
        Operand::Value(value) if bind_values => {
            bindings.push(value.clone());
            format!("{key} {operator} ?")
        }
        Operand::Value(SqlValue::Text(column)) => {
            format!("{key} {operator} {}", dialect.quote_identifier(column))
        }
        Operand::Value(literal) => format!("{key} {operator} {}", literal.to_sql_inline()),
    };

    Ok(Some(body))
}

/// Renders a field, collecting the bindings of raw fragments.
pub(crate) fn render_field<D: Dialect + ?Sized>(
    dialect: &D,
    field: &Field,
    bindings: &mut Vec<SqlValue>,
) -> String {
    match field {
        Field::Column(name) => dialect.quote_identifier(name),
        Field::Raw(raw) => {
            bindings.extend_from_slice(raw.bindings());
            raw.sql().to_string()
        }
    }
}

fn malformed(field: &Field, missing: &'static str) -> QueryError {
    QueryError::MalformedCriterion {
        key: field.describe().to_string(),
        missing,
    }
}
