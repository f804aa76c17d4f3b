//! JSON statement descriptions and how they drive a [`QueryBuilder`].
//!
//! A description file holds one statement object or an array of them:
//!
//! ```json
//! {
//!   "action": "select",
//!   "table": "users",
//!   "select": ["id", {"field": "name", "alias": "n"}, {"raw": "count(*)"}],
//!   "where": [
//!     {"field": "age", "op": ">", "value": 18},
//!     {"joiner": "or", "nested": [{"field": "role", "op": "in", "value": ["a", "b"]}]}
//!   ],
//!   "joins": [{"type": "left", "table": "orders",
//!              "on": [{"field": "users.id", "column": "orders.user_id"}]}],
//!   "order_by": ["name", {"field": "id", "direction": "desc"}],
//!   "limit": 10
//! }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

use oxide_query::{
    Direction, Field, InsertData, JoinType, Operand, QueryBuilder, QueryObject, Raw, Row, Selection,
    SqlValue,
};

use crate::error::{LoadError, Result};

/// One statement to compile.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatementDescription {
    /// Action name, as accepted by [`QueryBuilder::get_query`].
    #[serde(default = "default_action")]
    pub action: String,
    /// Table or tables.
    #[serde(default)]
    pub table: Option<OneOrMany>,
    /// Projection.
    #[serde(default)]
    pub select: Vec<SelectDescription>,
    /// Whether the projection is distinct.
    #[serde(default)]
    pub distinct: bool,
    /// WHERE criteria.
    #[serde(default, rename = "where")]
    pub wheres: Vec<CriterionDescription>,
    /// Joins.
    #[serde(default)]
    pub joins: Vec<JoinDescription>,
    /// GROUP BY fields.
    #[serde(default)]
    pub group_by: Vec<String>,
    /// HAVING criteria.
    #[serde(default)]
    pub having: Vec<CriterionDescription>,
    /// ORDER BY entries.
    #[serde(default)]
    pub order_by: Vec<OrderDescription>,
    /// LIMIT.
    #[serde(default)]
    pub limit: Option<u64>,
    /// OFFSET.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Mutation payload: an object, or an array of objects for a batch.
    #[serde(default)]
    pub data: Option<Value>,
    /// `ON DUPLICATE KEY UPDATE` assignments.
    #[serde(default)]
    pub on_duplicate: Option<Map<String, Value>>,
}

fn default_action() -> String {
    String::from("select")
}

/// A string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single name.
    One(String),
    /// Several names.
    Many(Vec<String>),
}

/// A projection entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SelectDescription {
    /// A column name.
    Column(String),
    /// A raw expression.
    Raw {
        /// SQL text.
        raw: String,
    },
    /// A column with an alias.
    Aliased {
        /// Column name.
        field: String,
        /// Alias.
        alias: String,
    },
}

/// An ORDER BY entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderDescription {
    /// Ascending by column.
    Column(String),
    /// Column with direction.
    Directed {
        /// Column name.
        field: String,
        /// `asc` or `desc`.
        #[serde(default)]
        direction: Option<String>,
    },
}

/// How a criterion connects to the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum JoinerDescription {
    /// `AND`
    #[default]
    #[serde(alias = "AND", rename = "and")]
    And,
    /// `OR`
    #[serde(alias = "OR", rename = "or")]
    Or,
    /// `AND NOT`
    #[serde(alias = "AND NOT", rename = "and not")]
    AndNot,
    /// `OR NOT`
    #[serde(alias = "OR NOT", rename = "or not")]
    OrNot,
}

/// A WHERE or HAVING criterion.
///
/// Exactly one of `field`, `raw` or `nested` is expected.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CriterionDescription {
    /// Column compared.
    #[serde(default)]
    pub field: Option<String>,
    /// Operator, `=` by default. `in`, `not in`, `between`, `is null` and
    /// `is not null` are recognised.
    #[serde(default = "default_operator")]
    pub op: String,
    /// Compared value. Arrays feed `in` and `between`.
    #[serde(default)]
    pub value: Option<Value>,
    /// Raw SQL condition.
    #[serde(default)]
    pub raw: Option<String>,
    /// Bindings of `raw`.
    #[serde(default)]
    pub bindings: Vec<Value>,
    /// Nested group.
    #[serde(default)]
    pub nested: Option<Vec<CriterionDescription>>,
    /// Connection to the previous criterion.
    #[serde(default)]
    pub joiner: JoinerDescription,
}

fn default_operator() -> String {
    String::from("=")
}

/// A join.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JoinDescription {
    /// `inner`, `left`, `right` or `outer`.
    #[serde(default = "default_join_type", rename = "type")]
    pub kind: String,
    /// Joined table.
    pub table: String,
    /// ON criteria.
    pub on: Vec<OnDescription>,
}

fn default_join_type() -> String {
    String::from("inner")
}

/// A join ON criterion: compares `field` to another `column`, or to a bound
/// `value`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OnDescription {
    /// Left-hand column.
    pub field: String,
    /// Operator, `=` by default.
    #[serde(default = "default_operator")]
    pub op: String,
    /// Right-hand column.
    #[serde(default)]
    pub column: Option<String>,
    /// Right-hand bound value.
    #[serde(default)]
    pub value: Option<Value>,
    /// `and` or `or`.
    #[serde(default)]
    pub joiner: JoinerDescription,
}

/// Parses a description file's content: one statement or an array.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed input.
pub fn parse_descriptions(content: &str) -> Result<Vec<StatementDescription>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum File {
        One(Box<StatementDescription>),
        Many(Vec<StatementDescription>),
    }

    Ok(match serde_json::from_str(content)? {
        File::One(statement) => vec![*statement],
        File::Many(statements) => statements,
    })
}

impl StatementDescription {
    /// Builds the statement on a fresh builder derived from `base` and
    /// compiles it.
    ///
    /// # Errors
    ///
    /// Fails on values that cannot be used where they were given, and on
    /// compilation errors.
    pub fn compile(&self, base: &QueryBuilder) -> Result<Vec<QueryObject>> {
        let mut query = match &self.table {
            Some(OneOrMany::One(table)) => base.table(table),
            Some(OneOrMany::Many(tables)) => base.tables(tables),
            None => base.new_query(),
        };

        for selection in &self.select {
            let selection = match selection {
                SelectDescription::Column(name) => Selection::from(name.as_str()),
                SelectDescription::Raw { raw } => Selection::from(Raw::new(raw)),
                SelectDescription::Aliased { field, alias } => Selection {
                    field: field.into(),
                    alias: Some(alias.clone()),
                },
            };
            if self.distinct {
                query.select_distinct([selection]);
            } else {
                query.select([selection]);
            }
        }

        for join in &self.joins {
            apply_join(&mut query, join)?;
        }
        apply_wheres(&mut query, &self.wheres)?;
        query.group_by(&self.group_by);
        apply_havings(&mut query, &self.having)?;

        for order in &self.order_by {
            match order {
                OrderDescription::Column(field) => {
                    query.order_by([field]);
                }
                OrderDescription::Directed { field, direction } => {
                    let direction = match direction {
                        Some(direction) => direction.parse::<Direction>()?,
                        None => Direction::Asc,
                    };
                    query.order_by_direction(field, direction);
                }
            }
        }

        if let Some(limit) = self.limit {
            query.limit(limit);
        }
        if let Some(offset) = self.offset {
            query.offset(offset);
        }
        if let Some(updates) = &self.on_duplicate {
            query.on_duplicate_key_update(to_row(updates, "on_duplicate")?);
        }

        let data = self.data.as_ref().map(to_insert_data).transpose()?;
        Ok(query.get_query(&self.action, data.as_ref())?)
    }
}

fn apply_join(query: &mut QueryBuilder, join: &JoinDescription) -> Result<()> {
    let kind: JoinType = join.kind.parse()?;
    let mut on = Vec::with_capacity(join.on.len());
    for criterion in &join.on {
        if matches!(
            criterion.joiner,
            JoinerDescription::AndNot | JoinerDescription::OrNot
        ) {
            return Err(invalid(&criterion.field, "join criteria cannot be negated"));
        }
        let value = match (&criterion.column, &criterion.value) {
            (Some(column), None) => Operand::from(column.as_str()),
            (None, Some(value)) => Operand::Bound(to_sql_value(value, &criterion.field)?),
            _ => {
                return Err(invalid(
                    &criterion.field,
                    "join criteria need exactly one of column or value",
                ))
            }
        };
        on.push((criterion, value));
    }

    query.join_with(join.table.as_str(), kind, |j| {
        for (criterion, value) in on {
            let field = criterion.field.as_str();
            let op = criterion.op.as_str();
            match (value, criterion.joiner) {
                (Operand::Bound(value), JoinerDescription::Or) => {
                    j.or_on_value(field, op, value);
                }
                (Operand::Bound(value), _) => {
                    j.on_value(field, op, value);
                }
                (column, JoinerDescription::Or) => {
                    j.or_on(field, op, column);
                }
                (column, _) => {
                    j.on(field, op, column);
                }
            }
        }
    });
    Ok(())
}

fn apply_wheres(query: &mut QueryBuilder, criteria: &[CriterionDescription]) -> Result<()> {
    for criterion in criteria {
        if let Some(children) = &criterion.nested {
            let mut result = Ok(());
            let build = |nested: &mut QueryBuilder| result = apply_wheres(nested, children);
            match criterion.joiner {
                JoinerDescription::And => query.where_nested(build),
                JoinerDescription::Or => query.or_where_nested(build),
                JoinerDescription::AndNot => query.where_not_nested(build),
                JoinerDescription::OrNot => query.or_where_not_nested(build),
            };
            result?;
            continue;
        }

        if let Some(raw) = &criterion.raw {
            let raw = to_raw(raw, &criterion.bindings, criterion.joiner)?;
            match criterion.joiner {
                JoinerDescription::And | JoinerDescription::AndNot => query.where_raw(raw),
                JoinerDescription::Or | JoinerDescription::OrNot => query.or_where_raw(raw),
            };
            continue;
        }

        let field = criterion
            .field
            .as_deref()
            .ok_or_else(|| invalid("where", "criteria need a field, raw or nested"))?;
        let op = criterion.op.to_ascii_uppercase();

        match (op.as_str(), criterion.joiner) {
            ("IS NULL", JoinerDescription::And) => query.where_null(field),
            ("IS NULL", JoinerDescription::Or) => query.or_where_null(field),
            ("IS NOT NULL", JoinerDescription::And) => query.where_not_null(field),
            ("IS NOT NULL", JoinerDescription::Or) => query.or_where_not_null(field),
            ("IS NULL" | "IS NOT NULL", _) => {
                return Err(invalid(field, "null checks cannot be negated, use the other form"))
            }
            (_, joiner) => {
                let value = to_operand(&op, criterion.value.as_ref(), field)?;
                match joiner {
                    JoinerDescription::And => query.where_(field, &op, value),
                    JoinerDescription::Or => query.or_where(field, &op, value),
                    JoinerDescription::AndNot => query.where_not(field, &op, value),
                    JoinerDescription::OrNot => query.or_where_not(field, &op, value),
                }
            }
        };
    }
    Ok(())
}

fn apply_havings(query: &mut QueryBuilder, criteria: &[CriterionDescription]) -> Result<()> {
    for criterion in criteria {
        if let Some(children) = &criterion.nested {
            let mut result = Ok(());
            let build = |nested: &mut QueryBuilder| result = apply_havings(nested, children);
            match criterion.joiner {
                JoinerDescription::And => query.having_nested(build),
                JoinerDescription::Or => query.or_having_nested(build),
                JoinerDescription::AndNot | JoinerDescription::OrNot => {
                    return Err(invalid("having", "HAVING groups cannot be negated"))
                }
            };
            result?;
            continue;
        }

        let op = criterion.op.to_ascii_uppercase();
        let (key, name): (Field, &str) = match (&criterion.field, &criterion.raw) {
            (Some(field), None) => (field.into(), field.as_str()),
            (None, Some(raw)) => (Raw::new(raw).into(), raw.as_str()),
            _ => return Err(invalid("having", "criteria need exactly one of field or raw")),
        };
        let value = to_operand(&op, criterion.value.as_ref(), name)?;
        match criterion.joiner {
            JoinerDescription::And => query.having(key, &op, value),
            JoinerDescription::Or => query.or_having(key, &op, value),
            JoinerDescription::AndNot | JoinerDescription::OrNot => {
                return Err(invalid(name, "HAVING criteria cannot be negated"))
            }
        };
    }
    Ok(())
}

fn to_operand(op: &str, value: Option<&Value>, field: &str) -> Result<Operand> {
    let value = value.ok_or_else(|| invalid(field, "missing value"))?;
    match (op, value) {
        ("IN" | "NOT IN", Value::Array(items)) => Ok(Operand::List(
            items
                .iter()
                .map(|item| to_sql_value(item, field))
                .collect::<Result<_>>()?,
        )),
        ("IN" | "NOT IN", _) => Err(invalid(field, "IN expects an array")),
        ("BETWEEN", Value::Array(items)) if items.len() == 2 => Ok(Operand::Range(
            to_sql_value(&items[0], field)?,
            to_sql_value(&items[1], field)?,
        )),
        ("BETWEEN", _) => Err(invalid(field, "BETWEEN expects [from, to]")),
        (_, Value::Object(object)) => match object.get("raw") {
            Some(Value::String(sql)) => Ok(Operand::Raw(Raw::new(sql.as_str()))),
            _ => Err(invalid(field, "objects must be {\"raw\": \"...\"}")),
        },
        (_, value) => Ok(Operand::Value(to_sql_value(value, field)?)),
    }
}

fn to_raw(sql: &str, bindings: &[Value], joiner: JoinerDescription) -> Result<Raw> {
    let values = bindings
        .iter()
        .map(|value| to_sql_value(value, sql))
        .collect::<Result<Vec<_>>>()?;
    let sql = match joiner {
        JoinerDescription::AndNot | JoinerDescription::OrNot => format!("NOT ({sql})"),
        JoinerDescription::And | JoinerDescription::Or => sql.to_string(),
    };
    Ok(Raw::with_bindings(sql, values))
}

fn to_sql_value(value: &Value, field: &str) -> Result<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Bool(*b)),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(SqlValue::Int(i)),
            (None, Some(f)) => Ok(SqlValue::Float(f)),
            (None, None) => Err(invalid(field, "number out of range")),
        },
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(invalid(field, "expected a scalar")),
    }
}

fn to_row(object: &Map<String, Value>, field: &str) -> Result<Row> {
    let mut row = Row::new();
    for (column, value) in object {
        match value {
            Value::Object(raw) => match raw.get("raw") {
                Some(Value::String(sql)) => row.insert(column.as_str(), Raw::new(sql.as_str())),
                _ => return Err(invalid(field, "objects must be {\"raw\": \"...\"}")),
            },
            value => row.insert(column.as_str(), to_sql_value(value, column)?),
        }
    }
    Ok(row)
}

fn to_insert_data(value: &Value) -> Result<InsertData> {
    match value {
        Value::Object(object) => Ok(InsertData::Single(to_row(object, "data")?)),
        Value::Array(rows) => rows
            .iter()
            .map(|row| match row {
                Value::Object(object) => to_row(object, "data"),
                _ => Err(invalid("data", "batch entries must be objects")),
            })
            .collect::<Result<Vec<_>>>()
            .map(InsertData::Batch),
        _ => Err(invalid("data", "expected an object or an array of objects")),
    }
}

fn invalid(field: &str, message: &str) -> LoadError {
    LoadError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
