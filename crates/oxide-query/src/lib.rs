//! # oxide-query
//!
//! A dialect-aware SQL statement compiler.
//!
//! Statements are described with a fluent [`QueryBuilder`] and compiled by a
//! [`Dialect`] into a [`QueryObject`]: parameterized SQL text plus the
//! bindings for its `?` placeholders, in order. Nothing here talks to a
//! database.
//!
//! This crate provides:
//! - A criteria compiler for WHERE, HAVING and join ON clauses, with
//!   arbitrarily nested groups, `IN` lists, `BETWEEN` and raw fragments
//! - Statement adapters for generic SQL, MySQL, PostgreSQL and SQLite
//! - Optional table prefixing
//!
//! ## Example
//!
//! ```rust
//! use oxide_query::{QueryBuilder, Row, SqlValue};
//!
//! let query = QueryBuilder::for_dialect("mysql").unwrap();
//!
//! let mut update = query.table("users");
//! update.where_eq("id", 5);
//! let compiled = update
//!     .update_query(&Row::new().set("name", "x").set("age", 2))
//!     .unwrap();
//!
//! assert_eq!(compiled.sql(), "UPDATE `users` SET `name`=?,`age`=? WHERE `id` = ?");
//! assert_eq!(
//!     compiled.bindings(),
//!     &[SqlValue::Text("x".into()), SqlValue::Int(2), SqlValue::Int(5)]
//! );
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values never reach the SQL text; identifiers are quoted by the dialect:
//!
//! ```rust
//! use oxide_query::QueryBuilder;
//!
//! let user_input = "'; DROP TABLE users; --";
//! let mut query = QueryBuilder::for_dialect("sqlite").unwrap().table("users");
//! query.where_eq("name", user_input);
//!
//! let (sql, params) = query.select_query().unwrap().into_parts();
//! assert_eq!(sql, r#"SELECT * FROM "users" WHERE "name" = ?"#);
//! assert_eq!(params.len(), 1);
//! ```

pub mod builder;
pub mod clause;
pub mod compiler;
pub mod config;
pub mod criteria;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod query;
pub mod statement;
pub mod value;

pub use builder::{JoinBuilder, QueryBuilder, COUNT_ALIAS};
pub use config::ConnectionConfig;
pub use criteria::{Criterion, CriterionKey, Joiner};
pub use dialect::{
    dialect_for, Dialect, GenericDialect, MySqlDialect, PostgresDialect, SqliteDialect,
    DIALECT_NAMES,
};
pub use error::{ErrorKind, QueryError, Result};
pub use expr::{ColumnValue, Field, Operand, Raw, Selection};
pub use query::{Action, QueryObject};
pub use statement::{Direction, InsertData, InsertKind, Join, JoinType, OrderBy, Row, Statements};
pub use value::{ParamType, SqlValue, ToSqlValue};
