//! Full-statement compilation shared by every dialect.
//!
//! These functions are the default bodies of the [`Dialect`] statement
//! methods. A dialect that diverges overrides the trait method and may still
//! call back into the function here for the parts it keeps.

use tracing::debug;

use crate::clause::{self, concatenate, Fragment};
use crate::criteria::{compile_criteria, render_field, Criterion};
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::expr::ColumnValue;
use crate::query::{Action, QueryObject};
use crate::statement::{InsertKind, Row, Statements};
use crate::value::SqlValue;

/// Compiles a SELECT statement.
///
/// # Errors
///
/// Fails with [`QueryError::NoTable`] when no table was given, or with a
/// malformed criterion.
pub fn compile_select<D: Dialect + ?Sized>(
    dialect: &D,
    statements: &Statements,
) -> Result<QueryObject> {
    if statements.tables.is_empty() {
        return Err(QueryError::NoTable);
    }

    let projection = clause::projection(dialect, statements);
    let tables = clause::tables(dialect, statements);
    let joins = clause::joins(dialect, statements)?;
    let wheres = clause::criteria_with_keyword(dialect, &statements.wheres, "WHERE")?;
    let group_by = clause::group_by(dialect, statements);
    let havings = clause::criteria_with_keyword(dialect, &statements.havings, "HAVING")?;
    let order_by = clause::order_by(dialect, statements);
    let limit = clause::limit(statements);
    let offset = clause::offset(statements);

    let keyword = if statements.distinct {
        "SELECT DISTINCT"
    } else {
        "SELECT"
    };

    let sql = concatenate(&[
        keyword,
        projection.sql(),
        "FROM",
        tables.sql(),
        joins.sql(),
        wheres.sql(),
        group_by.sql(),
        havings.sql(),
        order_by.sql(),
        limit.as_str(),
        offset.as_str(),
    ]);
    let bindings = collect_bindings([
        projection, tables, joins, wheres, group_by, havings, order_by,
    ]);

    Ok(finish(dialect, Action::Select, sql, bindings))
}

/// Compiles a single-row INSERT, INSERT IGNORE or REPLACE.
///
/// The target is the last table given. When `ON DUPLICATE KEY UPDATE`
/// assignments are pending, their bindings follow the VALUES bindings.
///
/// # Errors
///
/// Fails when no table or no data was given, or when the dialect cannot
/// express the requested kind.
pub fn compile_insert<D: Dialect + ?Sized>(
    dialect: &D,
    statements: &Statements,
    row: &Row,
    kind: InsertKind,
) -> Result<QueryObject> {
    let table = statements.tables.last().ok_or(QueryError::NoTable)?;
    if row.is_empty() {
        return Err(QueryError::NoData {
            action: kind.action(),
        });
    }
    let keyword = dialect.insert_keyword(kind)?;

    let mut bindings = vec![];
    let table = render_field(dialect, table, &mut bindings);

    let mut columns = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());
    for (column, value) in row.iter() {
        columns.push(dialect.quote_identifier(column));
        values.push(render_value(value, &mut bindings));
    }

    let mut sql = format!(
        "{keyword} INTO {table} ({}) VALUES ({})",
        columns.join(","),
        values.join(",")
    );

    if let Some(updates) = statements.on_duplicate.as_ref().filter(|r| !r.is_empty()) {
        if !dialect.supports_on_duplicate_key() {
            return Err(QueryError::UnsupportedFeature {
                feature: "ON DUPLICATE KEY UPDATE",
                dialect: dialect.name(),
            });
        }
        sql.push_str(" ON DUPLICATE KEY UPDATE ");
        sql.push_str(&assignments(dialect, updates, &mut bindings));
    }

    Ok(finish(dialect, kind.action(), sql, bindings))
}

/// Compiles an UPDATE. SET bindings come before WHERE bindings.
///
/// # Errors
///
/// Fails when no table or no data was given, or with a malformed criterion.
pub fn compile_update<D: Dialect + ?Sized>(
    dialect: &D,
    statements: &Statements,
    row: &Row,
) -> Result<QueryObject> {
    let table = statements.tables.last().ok_or(QueryError::NoTable)?;
    if row.is_empty() {
        return Err(QueryError::NoData {
            action: Action::Update,
        });
    }

    let mut bindings = vec![];
    let table = render_field(dialect, table, &mut bindings);
    let set = assignments(dialect, row, &mut bindings);

    let wheres = clause::criteria_with_keyword(dialect, &statements.wheres, "WHERE")?;
    bindings.extend_from_slice(wheres.bindings());

    let sql = concatenate(&["UPDATE", table.as_str(), "SET", set.as_str(), wheres.sql()]);
    Ok(finish(dialect, Action::Update, sql, bindings))
}

/// Compiles a DELETE.
///
/// With `with_limit` unset a pending LIMIT is dropped from the statement.
///
/// # Errors
///
/// Fails when no table was given, or with a malformed criterion.
pub fn compile_delete<D: Dialect + ?Sized>(
    dialect: &D,
    statements: &Statements,
    with_limit: bool,
) -> Result<QueryObject> {
    let table = statements.tables.last().ok_or(QueryError::NoTable)?;

    let mut bindings = vec![];
    let table = render_field(dialect, table, &mut bindings);

    let wheres = clause::criteria_with_keyword(dialect, &statements.wheres, "WHERE")?;
    bindings.extend_from_slice(wheres.bindings());

    let limit = if with_limit {
        clause::limit(statements)
    } else {
        if let Some(limit) = statements.limit {
            debug!(dialect = dialect.name(), limit, "DELETE ignores LIMIT");
        }
        String::new()
    };

    let sql = concatenate(&["DELETE FROM", table.as_str(), wheres.sql(), limit.as_str()]);
    Ok(finish(dialect, Action::Delete, sql, bindings))
}

/// Compiles a criteria list to a bare expression, without keyword.
///
/// # Errors
///
/// Fails with a malformed criterion.
pub fn compile_criteria_only<D: Dialect + ?Sized>(
    dialect: &D,
    criteria: &[Criterion],
    bind_values: bool,
) -> Result<QueryObject> {
    let (sql, bindings) = compile_criteria(dialect, criteria, bind_values)?.into_parts();
    Ok(QueryObject::new(sql, bindings))
}

fn render_value(value: &ColumnValue, bindings: &mut Vec<SqlValue>) -> String {
    match value {
        ColumnValue::Bind(value) => {
            bindings.push(value.clone());
            String::from(SqlValue::placeholder())
        }
        ColumnValue::Raw(raw) => {
            bindings.extend_from_slice(raw.bindings());
            raw.sql().to_string()
        }
    }
}

fn assignments<D: Dialect + ?Sized>(
    dialect: &D,
    row: &Row,
    bindings: &mut Vec<SqlValue>,
) -> String {
    row.iter()
        .map(|(column, value)| {
            format!(
                "{}={}",
                dialect.quote_identifier(column),
                render_value(value, bindings)
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn collect_bindings<const N: usize>(fragments: [Fragment; N]) -> Vec<SqlValue> {
    fragments
        .into_iter()
        .flat_map(|fragment| fragment.into_parts().1)
        .collect()
}

fn finish<D: Dialect + ?Sized>(
    dialect: &D,
    action: Action,
    sql: String,
    bindings: Vec<SqlValue>,
) -> QueryObject {
    debug!(
        dialect = dialect.name(),
        %action,
        bindings = bindings.len(),
        sql = %sql,
        "compiled statement"
    );
    QueryObject::new(sql, bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Joiner;
    use crate::dialect::{GenericDialect, MySqlDialect};
    use crate::expr::Raw;

    fn users() -> Statements {
        Statements {
            tables: vec!["users".into()],
            ..Statements::default()
        }
    }

    #[test]
    fn test_select_requires_table() {
        let err = compile_select(&GenericDialect::new(), &Statements::default()).unwrap_err();
        assert_eq!(err, QueryError::NoTable);
    }

    #[test]
    fn test_select_without_where() {
        let query = compile_select(&GenericDialect::new(), &users()).unwrap();
        assert_eq!(query.sql(), r#"SELECT * FROM "users""#);
        assert!(query.bindings().is_empty());
    }

    #[test]
    fn test_insert_uses_last_table() {
        let statements = Statements {
            tables: vec!["a".into(), "b".into()],
            ..Statements::default()
        };
        let row = Row::new().set("x", 1).set("at", Raw::new("NOW()"));
        let query =
            compile_insert(&MySqlDialect::new(), &statements, &row, InsertKind::Insert).unwrap();
        assert_eq!(query.sql(), "INSERT INTO `b` (`x`,`at`) VALUES (?,NOW())");
        assert_eq!(query.bindings(), &[SqlValue::Int(1)]);
    }

    #[test]
    fn test_insert_requires_data() {
        let err = compile_insert(
            &MySqlDialect::new(),
            &users(),
            &Row::new(),
            InsertKind::Replace,
        )
        .unwrap_err();
        assert_eq!(
            err,
            QueryError::NoData {
                action: Action::Replace
            }
        );
    }

    #[test]
    fn test_update_binds_set_before_where() {
        let mut statements = users();
        statements
            .wheres
            .push(Criterion::new("id", "=", 5, Joiner::And));
        let row = Row::new().set("name", "x").set("age", 2);
        let query = compile_update(&MySqlDialect::new(), &statements, &row).unwrap();
        assert_eq!(
            query.sql(),
            "UPDATE `users` SET `name`=?,`age`=? WHERE `id` = ?"
        );
        assert_eq!(
            query.bindings(),
            &[SqlValue::Text("x".into()), SqlValue::Int(2), SqlValue::Int(5)]
        );
    }

    #[test]
    fn test_delete_limit_flag() {
        let mut statements = users();
        statements.limit = Some(3);
        let dialect = GenericDialect::new();
        assert_eq!(
            compile_delete(&dialect, &statements, false).unwrap().sql(),
            r#"DELETE FROM "users""#
        );
        assert_eq!(
            compile_delete(&dialect, &statements, true).unwrap().sql(),
            r#"DELETE FROM "users" LIMIT 3"#
        );
    }
}
