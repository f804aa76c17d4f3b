//! The fluent statement builder.
//!
//! [`QueryBuilder`] accumulates a [`Statements`] model through chainable
//! `&mut self` calls and hands it to its dialect on one of the `*_query`
//! terminal calls. Terminal calls take `&self` and leave the model as it
//! was, so the same builder can be compiled again, or compiled as a
//! different action.
//!
//! # Example
//!
//! ```rust
//! use oxide_query::{QueryBuilder, Direction};
//!
//! let mut query = QueryBuilder::for_dialect("mysql").unwrap().table("users");
//! query
//!     .select(["id", "name"])
//!     .where_("status", "=", "active")
//!     .or_where_nested(|q| {
//!         q.where_("age", ">", 18).where_eq("verified", true);
//!     })
//!     .order_by_direction("created_at", Direction::Desc)
//!     .limit(10);
//!
//! let compiled = query.select_query().unwrap();
//! assert_eq!(
//!     compiled.sql(),
//!     "SELECT `id`, `name` FROM `users` WHERE `status` = ? OR (`age` > ? AND `verified` = ?) \
//!      ORDER BY `created_at` DESC LIMIT 10"
//! );
//! assert_eq!(compiled.bindings().len(), 3);
//! ```

use std::sync::Arc;

use crate::config::ConnectionConfig;
use crate::criteria::{Criterion, Joiner};
use crate::dialect::{dialect_for, Dialect};
use crate::error::{QueryError, Result};
use crate::expr::{Field, Operand, Raw, Selection};
use crate::query::{Action, QueryObject};
use crate::statement::{Direction, InsertData, InsertKind, Join, JoinType, OrderBy, Row, Statements};
use crate::value::{SqlValue, ToSqlValue};

/// Alias of the aggregate projected by [`QueryBuilder::count_query`].
pub const COUNT_ALIAS: &str = "__count__";

/// Applies the table prefix to table names and qualified columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Prefixer(Option<String>);

impl Prefixer {
    fn table(&self, field: Field) -> Field {
        match (&self.0, field) {
            (Some(prefix), Field::Column(name)) => Field::Column(format!("{prefix}{name}")),
            (_, field) => field,
        }
    }

    fn column(&self, field: Field) -> Field {
        match (&self.0, field) {
            (Some(prefix), Field::Column(name)) if name.contains('.') => {
                Field::Column(format!("{prefix}{name}"))
            }
            (_, field) => field,
        }
    }

    /// Text operands in unbound join criteria are column references.
    fn column_operand(&self, operand: Operand) -> Operand {
        match operand {
            Operand::Value(SqlValue::Text(name)) => match self.column(Field::Column(name)) {
                Field::Column(name) => Operand::Value(SqlValue::Text(name)),
                Field::Raw(raw) => Operand::Raw(raw),
            },
            other => other,
        }
    }
}

/// Builder for the ON criteria of one join.
#[derive(Debug, Clone, Default)]
pub struct JoinBuilder {
    prefix: Prefixer,
    criteria: Vec<Criterion>,
}

impl JoinBuilder {
    /// Adds `key operator value`, joined with AND. A text value is a column.
    pub fn on(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.push(key.into(), operator, value.into(), Joiner::And)
    }

    /// Adds `key operator value`, joined with OR. A text value is a column.
    pub fn or_on(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.push(key.into(), operator, value.into(), Joiner::Or)
    }

    /// Adds a comparison against a bound literal, joined with AND.
    pub fn on_value(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl ToSqlValue,
    ) -> &mut Self {
        let field = self.prefix.column(key.into());
        self.criteria.push(Criterion::new(
            field,
            operator,
            Operand::Bound(int_bool(value.to_sql_value())),
            Joiner::And,
        ));
        self
    }

    /// Adds a comparison against a bound literal, joined with OR.
    pub fn or_on_value(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl ToSqlValue,
    ) -> &mut Self {
        let field = self.prefix.column(key.into());
        self.criteria.push(Criterion::new(
            field,
            operator,
            Operand::Bound(int_bool(value.to_sql_value())),
            Joiner::Or,
        ));
        self
    }

    fn push(&mut self, key: Field, operator: &str, value: Operand, joiner: Joiner) -> &mut Self {
        let key = self.prefix.column(key);
        let value = self.prefix.column_operand(int_bool_operand(value));
        self.criteria.push(Criterion::new(key, operator, value, joiner));
        self
    }
}

/// A fluent SQL statement builder bound to one dialect.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    dialect: Arc<dyn Dialect>,
    prefix: Prefixer,
    statements: Statements,
}

impl QueryBuilder {
    /// Creates a builder from a connection configuration.
    ///
    /// # Errors
    ///
    /// Fails when the configured driver has no dialect adapter.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let mut builder = Self::with_dialect(config.dialect()?);
        builder.prefix = Prefixer(config.prefix.clone());
        Ok(builder)
    }

    /// Creates a builder for a dialect name, without table prefix.
    ///
    /// # Errors
    ///
    /// Fails when the name has no dialect adapter.
    pub fn for_dialect(name: &str) -> Result<Self> {
        Ok(Self::with_dialect(dialect_for(name)?))
    }

    /// Creates a builder around an existing dialect.
    #[must_use]
    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        Self {
            dialect,
            prefix: Prefixer::default(),
            statements: Statements::default(),
        }
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the table prefix, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.0.as_deref()
    }

    /// Returns the accumulated statement model.
    #[must_use]
    pub const fn statements(&self) -> &Statements {
        &self.statements
    }

    /// Returns an empty builder sharing this one's dialect and prefix.
    #[must_use]
    pub fn new_query(&self) -> Self {
        Self {
            dialect: Arc::clone(&self.dialect),
            prefix: self.prefix.clone(),
            statements: Statements::default(),
        }
    }

    /// Returns a new builder reading from `table`.
    #[must_use]
    pub fn table(&self, table: impl Into<Field>) -> Self {
        self.tables([table])
    }

    /// Returns a new builder reading from several tables.
    #[must_use]
    pub fn tables<I, T>(&self, tables: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Field>,
    {
        let mut builder = self.new_query();
        builder.from(tables);
        builder
    }

    /// Adds tables to the FROM clause.
    pub fn from<I, T>(&mut self, tables: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Field>,
    {
        let prefixed = tables.into_iter().map(|t| self.prefix.table(t.into()));
        self.statements.tables.extend(prefixed.collect::<Vec<_>>());
        self
    }

    /// Adds fields to the projection.
    pub fn select<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selection>,
    {
        for selection in fields {
            let mut selection = selection.into();
            selection.field = self.prefix.column(selection.field);
            self.statements.selects.push(selection);
        }
        self
    }

    /// Adds `field AS alias` to the projection.
    pub fn select_as(&mut self, field: impl Into<Field>, alias: &str) -> &mut Self {
        self.select([Selection {
            field: field.into(),
            alias: Some(alias.to_string()),
        }])
    }

    /// Adds fields to the projection and makes it `SELECT DISTINCT`.
    pub fn select_distinct<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selection>,
    {
        self.statements.distinct = true;
        self.select(fields)
    }

    /// Adds a join with a single ON comparison.
    ///
    /// A text `value` is read as a column (`users.id = orders.user_id`).
    /// Use [`join_with`](Self::join_with) and
    /// [`JoinBuilder::on_value`] to compare against a bound literal.
    pub fn join(
        &mut self,
        table: impl Into<Field>,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
        kind: JoinType,
    ) -> &mut Self {
        let key = key.into();
        let value = value.into();
        self.join_with(table, kind, |j| {
            j.on(key, operator, value);
        })
    }

    /// Adds an INNER JOIN.
    pub fn inner_join(
        &mut self,
        table: impl Into<Field>,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.join(table, key, operator, value, JoinType::Inner)
    }

    /// Adds a LEFT JOIN.
    pub fn left_join(
        &mut self,
        table: impl Into<Field>,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.join(table, key, operator, value, JoinType::Left)
    }

    /// Adds a RIGHT JOIN.
    pub fn right_join(
        &mut self,
        table: impl Into<Field>,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.join(table, key, operator, value, JoinType::Right)
    }

    /// Adds an OUTER JOIN.
    pub fn outer_join(
        &mut self,
        table: impl Into<Field>,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.join(table, key, operator, value, JoinType::Outer)
    }

    /// Adds a join whose ON criteria are built by `build`.
    pub fn join_with<F>(&mut self, table: impl Into<Field>, kind: JoinType, build: F) -> &mut Self
    where
        F: FnOnce(&mut JoinBuilder),
    {
        let mut join = JoinBuilder {
            prefix: self.prefix.clone(),
            criteria: vec![],
        };
        build(&mut join);
        self.statements.joins.push(Join {
            kind,
            table: self.prefix.table(table.into()),
            criteria: join.criteria,
        });
        self
    }

    /// Adds `key operator value` to WHERE, joined with AND.
    pub fn where_(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.push_where(key.into(), operator, value.into(), Joiner::And)
    }

    /// Adds `key = value` to WHERE, joined with AND.
    pub fn where_eq(&mut self, key: impl Into<Field>, value: impl Into<Operand>) -> &mut Self {
        self.where_(key, "=", value)
    }

    /// Adds `key operator value` to WHERE, joined with OR.
    pub fn or_where(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.push_where(key.into(), operator, value.into(), Joiner::Or)
    }

    /// Adds `NOT key operator value` to WHERE, joined with AND.
    pub fn where_not(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.push_where(key.into(), operator, value.into(), Joiner::AndNot)
    }

    /// Adds `NOT key operator value` to WHERE, joined with OR.
    pub fn or_where_not(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.push_where(key.into(), operator, value.into(), Joiner::OrNot)
    }

    /// Adds `key IN (...)`, joined with AND.
    pub fn where_in<I, V>(&mut self, key: impl Into<Field>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        self.push_where(key.into(), "IN", list(values), Joiner::And)
    }

    /// Adds `key NOT IN (...)`, joined with AND.
    pub fn where_not_in<I, V>(&mut self, key: impl Into<Field>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        self.push_where(key.into(), "NOT IN", list(values), Joiner::And)
    }

    /// Adds `key IN (...)`, joined with OR.
    pub fn or_where_in<I, V>(&mut self, key: impl Into<Field>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        self.push_where(key.into(), "IN", list(values), Joiner::Or)
    }

    /// Adds `key NOT IN (...)`, joined with OR.
    pub fn or_where_not_in<I, V>(&mut self, key: impl Into<Field>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: ToSqlValue,
    {
        self.push_where(key.into(), "NOT IN", list(values), Joiner::Or)
    }

    /// Adds `key BETWEEN from AND to`, joined with AND.
    pub fn where_between(
        &mut self,
        key: impl Into<Field>,
        from: impl ToSqlValue,
        to: impl ToSqlValue,
    ) -> &mut Self {
        let range = Operand::Range(from.to_sql_value(), to.to_sql_value());
        self.push_where(key.into(), "BETWEEN", range, Joiner::And)
    }

    /// Adds `key BETWEEN from AND to`, joined with OR.
    pub fn or_where_between(
        &mut self,
        key: impl Into<Field>,
        from: impl ToSqlValue,
        to: impl ToSqlValue,
    ) -> &mut Self {
        let range = Operand::Range(from.to_sql_value(), to.to_sql_value());
        self.push_where(key.into(), "BETWEEN", range, Joiner::Or)
    }

    /// Adds `key IS NULL`, joined with AND.
    pub fn where_null(&mut self, key: impl Into<Field>) -> &mut Self {
        self.push_null(key.into(), false, Joiner::And)
    }

    /// Adds `key IS NOT NULL`, joined with AND.
    pub fn where_not_null(&mut self, key: impl Into<Field>) -> &mut Self {
        self.push_null(key.into(), true, Joiner::And)
    }

    /// Adds `key IS NULL`, joined with OR.
    pub fn or_where_null(&mut self, key: impl Into<Field>) -> &mut Self {
        self.push_null(key.into(), false, Joiner::Or)
    }

    /// Adds `key IS NOT NULL`, joined with OR.
    pub fn or_where_not_null(&mut self, key: impl Into<Field>) -> &mut Self {
        self.push_null(key.into(), true, Joiner::Or)
    }

    /// Adds a raw condition, joined with AND.
    pub fn where_raw(&mut self, raw: Raw) -> &mut Self {
        self.statements.wheres.push(Criterion::raw(raw, Joiner::And));
        self
    }

    /// Adds a raw condition, joined with OR.
    pub fn or_where_raw(&mut self, raw: Raw) -> &mut Self {
        self.statements.wheres.push(Criterion::raw(raw, Joiner::Or));
        self
    }

    /// Adds a parenthesized group built on a fresh builder, joined with AND.
    pub fn where_nested<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_nested(build, Joiner::And)
    }

    /// Adds a parenthesized group, joined with OR.
    pub fn or_where_nested<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_nested(build, Joiner::Or)
    }

    /// Adds a negated parenthesized group, joined with AND.
    pub fn where_not_nested<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_nested(build, Joiner::AndNot)
    }

    /// Adds a negated parenthesized group, joined with OR.
    pub fn or_where_not_nested<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_nested(build, Joiner::OrNot)
    }

    /// Adds fields to GROUP BY.
    pub fn group_by<I, T>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Field>,
    {
        for field in fields {
            let field = self.prefix.column(field.into());
            self.statements.group_bys.push(field);
        }
        self
    }

    /// Adds `key operator value` to HAVING, joined with AND.
    pub fn having(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.push_having(key.into(), operator, value.into(), Joiner::And)
    }

    /// Adds `key operator value` to HAVING, joined with OR.
    pub fn or_having(
        &mut self,
        key: impl Into<Field>,
        operator: &str,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.push_having(key.into(), operator, value.into(), Joiner::Or)
    }

    /// Adds a parenthesized HAVING group built on a fresh builder, joined
    /// with AND.
    pub fn having_nested<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let group = self.nested_group(build, |s| s.havings, Joiner::And);
        self.statements.havings.push(group);
        self
    }

    /// Adds a parenthesized HAVING group, joined with OR.
    pub fn or_having_nested<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let group = self.nested_group(build, |s| s.havings, Joiner::Or);
        self.statements.havings.push(group);
        self
    }

    /// Adds fields to ORDER BY, ascending.
    pub fn order_by<I, T>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Field>,
    {
        for field in fields {
            self.order_by_direction(field, Direction::Asc);
        }
        self
    }

    /// Adds a field to ORDER BY with an explicit direction.
    pub fn order_by_direction(
        &mut self,
        field: impl Into<Field>,
        direction: Direction,
    ) -> &mut Self {
        let field = self.prefix.column(field.into());
        self.statements.order_bys.push(OrderBy { field, direction });
        self
    }

    /// Sets LIMIT.
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.statements.limit = Some(limit);
        self
    }

    /// Sets OFFSET.
    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.statements.offset = Some(offset);
        self
    }

    /// Adds `ON DUPLICATE KEY UPDATE` assignments to later inserts.
    pub fn on_duplicate_key_update(&mut self, row: Row) -> &mut Self {
        let pending = self.statements.on_duplicate.get_or_insert_with(Row::new);
        for (column, value) in row.iter() {
            pending.insert(column, value.clone());
        }
        self
    }

    /// Creates a raw fragment.
    #[must_use]
    pub fn raw(&self, sql: impl Into<String>) -> Raw {
        Raw::new(sql)
    }

    /// Wraps another builder's SELECT as `(subquery)` or
    /// `(subquery) AS alias`, keeping its bindings.
    ///
    /// # Errors
    ///
    /// Fails when the subquery cannot be compiled.
    pub fn sub_query(&self, query: &Self, alias: Option<&str>) -> Result<Raw> {
        let (sql, bindings) = query.select_query()?.into_parts();
        let sql = match alias {
            Some(alias) => format!("({sql}) AS {}", self.dialect.quote_identifier(alias)),
            None => format!("({sql})"),
        };
        Ok(Raw::with_bindings(sql, bindings))
    }

    /// Compiles a SELECT.
    ///
    /// # Errors
    ///
    /// Fails when no table was given or a criterion is malformed.
    pub fn select_query(&self) -> Result<QueryObject> {
        self.dialect.select(&self.statements)
    }

    /// Compiles an INSERT, one statement per row.
    ///
    /// # Errors
    ///
    /// Fails when no table or no data was given.
    pub fn insert_query(&self, data: impl Into<InsertData>) -> Result<Vec<QueryObject>> {
        self.compile_insert(&data.into(), InsertKind::Insert)
    }

    /// Compiles an INSERT IGNORE (or the dialect's equivalent).
    ///
    /// # Errors
    ///
    /// Fails when no table or no data was given, or the dialect has no
    /// equivalent.
    pub fn insert_ignore_query(&self, data: impl Into<InsertData>) -> Result<Vec<QueryObject>> {
        self.compile_insert(&data.into(), InsertKind::Ignore)
    }

    /// Compiles a REPLACE.
    ///
    /// # Errors
    ///
    /// Fails when no table or no data was given, or the dialect has no
    /// equivalent.
    pub fn replace_query(&self, data: impl Into<InsertData>) -> Result<Vec<QueryObject>> {
        self.compile_insert(&data.into(), InsertKind::Replace)
    }

    /// Compiles an UPDATE.
    ///
    /// # Errors
    ///
    /// Fails when no table or no data was given.
    pub fn update_query(&self, row: &Row) -> Result<QueryObject> {
        self.dialect.update(&self.statements, row)
    }

    /// Compiles a DELETE.
    ///
    /// # Errors
    ///
    /// Fails when no table was given.
    pub fn delete_query(&self) -> Result<QueryObject> {
        self.dialect.delete(&self.statements)
    }

    /// Compiles the WHERE criteria alone, without keyword.
    ///
    /// # Errors
    ///
    /// Fails when a criterion is malformed.
    pub fn criteria_query(&self) -> Result<QueryObject> {
        self.dialect.criteria_only(&self.statements.wheres, true)
    }

    /// Compiles `SELECT count(*) as __count__` over the current filters.
    /// ORDER BY, LIMIT and OFFSET are left out.
    ///
    /// # Errors
    ///
    /// Fails like [`select_query`](Self::select_query).
    pub fn count_query(&self) -> Result<QueryObject> {
        let statements = Statements {
            selects: vec![Selection::from(Raw::new(format!("count(*) as {COUNT_ALIAS}")))],
            order_bys: vec![],
            limit: None,
            offset: None,
            ..self.statements.clone()
        };
        self.dialect.select(&statements)
    }

    /// Compiles the SELECT with `LIMIT 1`.
    ///
    /// # Errors
    ///
    /// Fails like [`select_query`](Self::select_query).
    pub fn first_query(&self) -> Result<QueryObject> {
        let statements = Statements {
            limit: Some(1),
            ..self.statements.clone()
        };
        self.dialect.select(&statements)
    }

    /// Compiles the first row where `field = value`.
    ///
    /// # Errors
    ///
    /// Fails like [`select_query`](Self::select_query).
    pub fn find_query(
        &self,
        field: impl Into<Field>,
        value: impl Into<Operand>,
    ) -> Result<QueryObject> {
        let mut query = self.clone();
        query.where_eq(field, value);
        query.first_query()
    }

    /// Compiles all rows where `field = value`.
    ///
    /// # Errors
    ///
    /// Fails like [`select_query`](Self::select_query).
    pub fn find_all_query(
        &self,
        field: impl Into<Field>,
        value: impl Into<Operand>,
    ) -> Result<QueryObject> {
        let mut query = self.clone();
        query.where_eq(field, value);
        query.select_query()
    }

    /// Compiles the statement named by `action` (case-insensitive).
    ///
    /// Insert-like actions and `update` compile one statement per row of
    /// `data`; the others ignore it.
    ///
    /// # Errors
    ///
    /// Fails with [`QueryError::UnknownAction`] for an unrecognised name, with
    /// [`QueryError::NoData`] when a mutation has no data, or like the
    /// matching `*_query` call.
    pub fn get_query(&self, action: &str, data: Option<&InsertData>) -> Result<Vec<QueryObject>> {
        let action: Action = action.parse()?;
        let data = match data {
            Some(data) if !data.is_empty() => Some(data),
            _ if action.needs_data() => return Err(QueryError::NoData { action }),
            _ => None,
        };

        match (action, data) {
            (Action::Select, _) => Ok(vec![self.select_query()?]),
            (Action::Delete, _) => Ok(vec![self.delete_query()?]),
            (Action::CriteriaOnly, _) => Ok(vec![self.criteria_query()?]),
            (Action::Insert, Some(data)) => self.compile_insert(data, InsertKind::Insert),
            (Action::InsertIgnore, Some(data)) => self.compile_insert(data, InsertKind::Ignore),
            (Action::Replace, Some(data)) => self.compile_insert(data, InsertKind::Replace),
            (Action::Update, Some(data)) => data
                .rows()
                .iter()
                .map(|row| self.update_query(row))
                .collect(),
            (action, None) => Err(QueryError::NoData { action }),
        }
    }

    fn compile_insert(&self, data: &InsertData, kind: InsertKind) -> Result<Vec<QueryObject>> {
        if data.is_empty() {
            return Err(QueryError::NoData {
                action: kind.action(),
            });
        }
        data.rows()
            .iter()
            .map(|row| self.dialect.insert(&self.statements, row, kind))
            .collect()
    }

    fn push_where(
        &mut self,
        key: Field,
        operator: &str,
        value: Operand,
        joiner: Joiner,
    ) -> &mut Self {
        let key = self.prefix.column(key);
        let value = int_bool_operand(value);
        self.statements
            .wheres
            .push(Criterion::new(key, operator, value, joiner));
        self
    }

    fn push_having(
        &mut self,
        key: Field,
        operator: &str,
        value: Operand,
        joiner: Joiner,
    ) -> &mut Self {
        let key = self.prefix.column(key);
        let value = int_bool_operand(value);
        self.statements
            .havings
            .push(Criterion::new(key, operator, value, joiner));
        self
    }

    fn push_null(&mut self, key: Field, negated: bool, joiner: Joiner) -> &mut Self {
        let test = if negated { "IS NOT NULL" } else { "IS NULL" };
        let raw = match self.prefix.column(key) {
            Field::Column(name) => {
                Raw::new(format!("{} {test}", self.dialect.quote_identifier(&name)))
            }
            Field::Raw(raw) => {
                Raw::with_bindings(format!("{} {test}", raw.sql()), raw.bindings().to_vec())
            }
        };
        self.statements.wheres.push(Criterion::raw(raw, joiner));
        self
    }

    fn push_nested<F>(&mut self, build: F, joiner: Joiner) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let group = self.nested_group(build, |s| s.wheres, joiner);
        self.statements.wheres.push(group);
        self
    }

    fn nested_group<F, P>(&self, build: F, part: P, joiner: Joiner) -> Criterion
    where
        F: FnOnce(&mut Self),
        P: FnOnce(Statements) -> Vec<Criterion>,
    {
        let mut nested = self.new_query();
        build(&mut nested);
        Criterion::nested(part(nested.statements), joiner)
    }
}

/// Booleans compare as 0/1.
fn int_bool(value: SqlValue) -> SqlValue {
    match value {
        SqlValue::Bool(b) => SqlValue::Int(i64::from(b)),
        other => other,
    }
}

fn int_bool_operand(operand: Operand) -> Operand {
    match operand {
        Operand::Value(value) => Operand::Value(int_bool(value)),
        Operand::Bound(value) => Operand::Bound(int_bool(value)),
        Operand::List(values) => Operand::List(values.into_iter().map(int_bool).collect()),
        Operand::Range(from, to) => Operand::Range(int_bool(from), int_bool(to)),
        raw @ Operand::Raw(_) => raw,
    }
}

fn list<I, V>(values: I) -> Operand
where
    I: IntoIterator<Item = V>,
    V: ToSqlValue,
{
    Operand::List(values.into_iter().map(ToSqlValue::to_sql_value).collect())
}
