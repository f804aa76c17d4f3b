#![allow(dead_code)]

use oxide_query::{QueryBuilder, QueryObject};

pub fn mysql(table: &str) -> QueryBuilder {
    builder("mysql", table)
}

pub fn builder(dialect: &str, table: &str) -> QueryBuilder {
    QueryBuilder::for_dialect(dialect)
        .unwrap_or_else(|e| panic!("Failed to build {dialect} builder: {e}"))
        .table(table)
}

/// Asserts that every placeholder has exactly one binding.
pub fn assert_balanced(query: &QueryObject) {
    let placeholders = query.sql().matches('?').count();
    assert_eq!(
        placeholders,
        query.bindings().len(),
        "Placeholder/binding mismatch in: {}",
        query.sql()
    );
}

pub fn compile_select(query: &QueryBuilder) -> QueryObject {
    let compiled = query
        .select_query()
        .unwrap_or_else(|e| panic!("Failed to compile SELECT: {e}"));
    assert_balanced(&compiled);
    compiled
}
