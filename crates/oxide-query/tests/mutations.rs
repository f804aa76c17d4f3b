//! Tests for INSERT, UPDATE and DELETE compilation.

mod common;
use common::*;

use oxide_query::{
    Action, ConnectionConfig, InsertData, QueryBuilder, QueryError, Raw, Row, SqlValue,
};

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_single_row() {
    let queries = mysql("users")
        .insert_query(Row::new().set("name", "Alice").set("age", 30))
        .unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0].sql(),
        "INSERT INTO `users` (`name`,`age`) VALUES (?,?)"
    );
    assert_eq!(
        queries[0].bindings(),
        &[SqlValue::Text("Alice".into()), SqlValue::Int(30)]
    );
}

#[test]
fn batch_insert_yields_one_statement_per_row() {
    let rows = vec![Row::new().set("a", 1), Row::new().set("a", 2)];
    let queries = mysql("t").insert_query(rows).unwrap();
    assert_eq!(queries.len(), 2);
    for (query, expected) in queries.iter().zip([1, 2]) {
        assert_eq!(query.sql(), "INSERT INTO `t` (`a`) VALUES (?)");
        assert_eq!(query.bindings(), &[SqlValue::Int(expected)]);
    }
}

#[test]
fn insert_ignore_and_replace() {
    let row = Row::new().set("id", 1);
    let query = mysql("t");
    assert_eq!(
        query.insert_ignore_query(row.clone()).unwrap()[0].sql(),
        "INSERT IGNORE INTO `t` (`id`) VALUES (?)"
    );
    assert_eq!(
        query.replace_query(row).unwrap()[0].sql(),
        "REPLACE INTO `t` (`id`) VALUES (?)"
    );
}

#[test]
fn insert_on_duplicate_key_update() {
    let mut query = mysql("counters");
    query.on_duplicate_key_update(Row::new().set("hits", Raw::new("hits + 1")).set("seen", "now"));
    let queries = query
        .insert_query(Row::new().set("page", "/").set("hits", 1))
        .unwrap();
    assert_eq!(
        queries[0].sql(),
        "INSERT INTO `counters` (`page`,`hits`) VALUES (?,?) \
         ON DUPLICATE KEY UPDATE `hits`=hits + 1,`seen`=?"
    );
    assert_eq!(
        queries[0].bindings(),
        &[
            SqlValue::Text("/".into()),
            SqlValue::Int(1),
            SqlValue::Text("now".into())
        ]
    );
}

#[test]
fn insert_requires_data_and_table() {
    assert_eq!(
        mysql("t").insert_query(Row::new()).unwrap_err(),
        QueryError::NoData {
            action: Action::Insert
        }
    );
    assert_eq!(
        mysql("t").insert_query(Vec::<Row>::new()).unwrap_err(),
        QueryError::NoData {
            action: Action::Insert
        }
    );
    let no_table = QueryBuilder::for_dialect("mysql").unwrap();
    assert_eq!(
        no_table.insert_query(Row::new().set("a", 1)).unwrap_err(),
        QueryError::NoTable
    );
}

// ===================================================================
// UPDATE
// ===================================================================

#[test]
fn update_binds_set_before_where() {
    let mut query = mysql("t");
    query.where_eq("id", 5);
    let q = query
        .update_query(&Row::new().set("name", "x").set("age", 2))
        .unwrap();
    assert_balanced(&q);
    assert_eq!(q.sql(), "UPDATE `t` SET `name`=?,`age`=? WHERE `id` = ?");
    assert_eq!(
        q.bindings(),
        &[SqlValue::Text("x".into()), SqlValue::Int(2), SqlValue::Int(5)]
    );
}

#[test]
fn update_with_raw_value() {
    let mut query = mysql("t");
    query.where_in("id", [1, 2]);
    let q = query
        .update_query(&Row::new().set("touched_at", Raw::new("NOW()")))
        .unwrap();
    assert_eq!(q.sql(), "UPDATE `t` SET `touched_at`=NOW() WHERE `id` IN (?, ?)");
    assert_eq!(q.bindings(), &[SqlValue::Int(1), SqlValue::Int(2)]);
}

#[test]
fn update_requires_data() {
    assert_eq!(
        mysql("t").update_query(&Row::new()).unwrap_err(),
        QueryError::NoData {
            action: Action::Update
        }
    );
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn mysql_delete_with_limit() {
    let mut query = mysql("t");
    query.limit(1);
    let q = query.delete_query().unwrap();
    assert_eq!(q.sql(), "DELETE FROM `t` LIMIT 1");
    assert!(q.bindings().is_empty());
}

#[test]
fn base_delete_ignores_limit() {
    let mut query = builder("generic", "t");
    query.where_eq("id", 3).limit(1);
    let q = query.delete_query().unwrap();
    assert_eq!(q.sql(), r#"DELETE FROM "t" WHERE "id" = ?"#);
    assert_eq!(q.bindings(), &[SqlValue::Int(3)]);
}

// ===================================================================
// Action dispatch
// ===================================================================

#[test]
fn get_query_dispatches_by_name() {
    let mut query = mysql("t");
    query.where_eq("id", 1);
    let data = InsertData::from(Row::new().set("name", "x"));

    let select = query.get_query("SELECT", None).unwrap();
    assert_eq!(select[0].sql(), "SELECT * FROM `t` WHERE `id` = ?");

    let update = query.get_query("update", Some(&data)).unwrap();
    assert_eq!(update[0].sql(), "UPDATE `t` SET `name`=? WHERE `id` = ?");

    let replace = query.get_query("Replace", Some(&data)).unwrap();
    assert_eq!(replace[0].sql(), "REPLACE INTO `t` (`name`) VALUES (?)");

    let criteria = query.get_query("criteriaonly", None).unwrap();
    assert_eq!(criteria[0].sql(), "`id` = ?");

    let delete = query.get_query("delete", Some(&data)).unwrap();
    assert_eq!(delete[0].sql(), "DELETE FROM `t` WHERE `id` = ?");
}

#[test]
fn get_query_rejects_unknown_action() {
    let err = mysql("t").get_query("truncate", None).unwrap_err();
    assert_eq!(err.to_string(), "truncate is not a known type");
}

#[test]
fn get_query_requires_data_for_mutations() {
    let err = mysql("t").get_query("insertignore", None).unwrap_err();
    assert_eq!(
        err,
        QueryError::NoData {
            action: Action::InsertIgnore
        }
    );
}

// ===================================================================
// Table prefix
// ===================================================================

#[test]
fn prefix_applies_to_mutation_tables() {
    let config = ConnectionConfig::new("mysql").with_prefix("cb_");
    let base = QueryBuilder::new(&config).unwrap();
    let mut query = base.table("users");
    query.where_eq("id", 1);

    assert_eq!(
        query.delete_query().unwrap().sql(),
        "DELETE FROM `cb_users` WHERE `id` = ?"
    );
    assert_eq!(
        query.insert_query(Row::new().set("id", 2)).unwrap()[0].sql(),
        "INSERT INTO `cb_users` (`id`) VALUES (?)"
    );
}
