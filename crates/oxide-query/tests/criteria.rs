//! Tests for WHERE/HAVING criteria compiled through the builder.

mod common;
use common::*;

use oxide_query::{JoinType, Raw, SqlValue};

#[test]
fn where_variants_and_joiners() {
    let mut query = mysql("users");
    query
        .where_("a", "=", 1)
        .or_where("b", "<", 2)
        .where_not("c", "=", 3)
        .or_where_not("d", "LIKE", "x%");
    let q = query.criteria_query().unwrap();
    assert_eq!(
        q.sql(),
        "`a` = ? OR `b` < ? AND NOT `c` = ? OR NOT `d` LIKE ?"
    );
    assert_balanced(&q);
}

#[test]
fn leading_or_is_trimmed_but_not_is_kept() {
    let mut query = mysql("users");
    query.or_where("a", "=", 1);
    assert_eq!(query.criteria_query().unwrap().sql(), "`a` = ?");

    let mut query = mysql("users");
    query.where_not("a", "=", 1);
    assert_eq!(query.criteria_query().unwrap().sql(), "NOT `a` = ?");
}

#[test]
fn in_lists_preserve_order() {
    let mut query = mysql("users");
    query
        .where_in("id", [9, 3, 7])
        .or_where_not_in("role", ["guest", "bot"]);
    let q = compile_select(&query);
    assert_eq!(
        q.sql(),
        "SELECT * FROM `users` WHERE `id` IN (?, ?, ?) OR `role` NOT IN (?, ?)"
    );
    assert_eq!(
        q.bindings(),
        &[
            SqlValue::Int(9),
            SqlValue::Int(3),
            SqlValue::Int(7),
            SqlValue::Text("guest".into()),
            SqlValue::Text("bot".into())
        ]
    );
}

#[test]
fn empty_in_lists() {
    let mut query = mysql("users");
    query
        .where_in("id", Vec::<i64>::new())
        .or_where_in("id", [1])
        .where_not_in("id", Vec::<i64>::new());
    let q = compile_select(&query);
    assert_eq!(
        q.sql(),
        "SELECT * FROM `users` WHERE 1 = 0 OR `id` IN (?) AND 1 = 1"
    );
    assert_eq!(q.bindings(), &[SqlValue::Int(1)]);
}

#[test]
fn between_binds_from_then_to() {
    let mut query = mysql("users");
    query
        .where_between("age", 18, 30)
        .or_where_between("score", 1.5, 2.5);
    let q = compile_select(&query);
    assert_eq!(
        q.sql(),
        "SELECT * FROM `users` WHERE `age` BETWEEN ? AND ? OR `score` BETWEEN ? AND ?"
    );
    assert_eq!(
        q.bindings(),
        &[
            SqlValue::Int(18),
            SqlValue::Int(30),
            SqlValue::Float(1.5),
            SqlValue::Float(2.5)
        ]
    );
}

#[test]
fn deeply_nested_groups_are_parenthesized_once_per_level() {
    let mut query = mysql("users");
    query.where_eq("a", 1).or_where_nested(|q| {
        q.where_eq("b", 2).where_nested(|q| {
            q.where_eq("c", 3).or_where_not_nested(|q| {
                q.where_eq("d", 4);
            });
        });
    });
    let q = compile_select(&query);
    assert_eq!(
        q.sql(),
        "SELECT * FROM `users` WHERE `a` = ? OR (`b` = ? AND (`c` = ? OR NOT (`d` = ?)))"
    );
    assert_eq!(
        q.bindings(),
        &[
            SqlValue::Int(1),
            SqlValue::Int(2),
            SqlValue::Int(3),
            SqlValue::Int(4)
        ]
    );
}

#[test]
fn leading_negated_group() {
    let mut query = mysql("users");
    query.where_not_nested(|q| {
        q.where_eq("a", 1).or_where_null("b");
    });
    assert_eq!(
        query.criteria_query().unwrap().sql(),
        "NOT (`a` = ? OR `b` IS NULL)"
    );
}

#[test]
fn empty_nested_group_is_skipped() {
    let mut query = mysql("users");
    query.where_nested(|_| {}).where_eq("a", 1);
    assert_eq!(
        compile_select(&query).sql(),
        "SELECT * FROM `users` WHERE `a` = ?"
    );
}

#[test]
fn raw_criteria_carry_bindings() {
    let mut query = mysql("users");
    query
        .where_raw(Raw::with_bindings("MATCH(bio) AGAINST(?)", ["rust"]))
        .or_where_raw(Raw::new("vip = 1"))
        .where_("created_at", ">", Raw::new("NOW() - INTERVAL 1 DAY"));
    let q = compile_select(&query);
    assert_eq!(
        q.sql(),
        "SELECT * FROM `users` WHERE MATCH(bio) AGAINST(?) OR vip = 1 \
         AND `created_at` > NOW() - INTERVAL 1 DAY"
    );
    assert_eq!(q.bindings(), &[SqlValue::Text("rust".into())]);
}

#[test]
fn having_uses_bound_values() {
    let mut query = mysql("orders");
    query
        .select(["customer_id"])
        .group_by(["customer_id"])
        .having(Raw::new("SUM(total)"), ">", 1000)
        .or_having("customer_id", "=", 1);
    let q = compile_select(&query);
    assert_eq!(
        q.sql(),
        "SELECT `customer_id` FROM `orders` GROUP BY `customer_id` \
         HAVING SUM(total) > ? OR `customer_id` = ?"
    );
    assert_eq!(q.bindings(), &[SqlValue::Int(1000), SqlValue::Int(1)]);
}

#[test]
fn having_nested_group() {
    let mut query = mysql("orders");
    query
        .select(["customer_id"])
        .group_by(["customer_id"])
        .having(Raw::new("COUNT(*)"), ">", 1)
        .or_having_nested(|h| {
            h.having(Raw::new("SUM(total)"), ">", 10)
                .or_having(Raw::new("COUNT(*)"), "<", 3);
        });
    let q = compile_select(&query);
    assert_eq!(
        q.sql(),
        "SELECT `customer_id` FROM `orders` GROUP BY `customer_id` \
         HAVING COUNT(*) > ? OR (SUM(total) > ? OR COUNT(*) < ?)"
    );
    assert_eq!(
        q.bindings(),
        &[SqlValue::Int(1), SqlValue::Int(10), SqlValue::Int(3)]
    );
}

#[test]
fn null_checks_on_raw_keep_bindings() {
    let mut query = mysql("users");
    query
        .where_null(Raw::with_bindings("NULLIF(nick, ?)", ["anon"]))
        .or_where_not_null(Raw::with_bindings("COALESCE(score, ?)", [0]))
        .where_eq("id", 3);
    let q = compile_select(&query);
    assert_eq!(
        q.sql(),
        "SELECT * FROM `users` WHERE NULLIF(nick, ?) IS NULL \
         OR COALESCE(score, ?) IS NOT NULL AND `id` = ?"
    );
    assert_eq!(
        q.bindings(),
        &[
            SqlValue::Text("anon".into()),
            SqlValue::Int(0),
            SqlValue::Int(3)
        ]
    );
}

#[test]
fn join_on_sub_query_keeps_binding_order() {
    let mut recent = mysql("orders");
    recent.where_("total", ">", 10);

    let mut query = mysql("users");
    let table = query.sub_query(&recent, Some("o")).unwrap();
    query
        .join_with(table, JoinType::Inner, |j| {
            j.on("o.user_id", "=", "users.id")
                .on_value("o.state", "=", "paid");
        })
        .where_eq("users.id", 5);
    let q = compile_select(&query);
    assert_eq!(
        q.sql(),
        "SELECT * FROM `users` INNER JOIN (SELECT * FROM `orders` WHERE `total` > ?) AS `o` \
         ON `o`.`user_id` = `users`.`id` AND `o`.`state` = ? WHERE `users`.`id` = ?"
    );
    assert_eq!(
        q.bindings(),
        &[
            SqlValue::Int(10),
            SqlValue::Text("paid".into()),
            SqlValue::Int(5)
        ]
    );
}
