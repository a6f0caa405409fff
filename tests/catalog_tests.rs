#![cfg(test)]

use easy_parallel::Parallel;
use sqlc_core::ast::{AlterTableCmd, AlterTableStmt, AlterTableType, Node, Statement, TableName};
use sqlc_core::validate;
use sqlc_core::{Catalog, Engine, Error};

#[macro_use]
mod support;
use support::*;

fn column_names(catalog: &Catalog, table: &str) -> Vec<String> {
    catalog.get_table(&TableName::new("", table)).unwrap().columns.iter().map(|c| c.name.clone()).collect()
}

fn alter(table: &str, cmd: AlterTableCmd) -> Statement {
    Statement::new(Node::from(AlterTableStmt { table: TableName::new("", table), cmds: vec![Node::from(cmd)], missing_ok: false }), 40, 0)
}

#[test]
fn it_rejects_a_second_create_without_side_effects() {
    let mut catalog = Catalog::new(Engine::PostgreSQL, "public");
    let first = create_table("", "venues", &[("id", "serial"), ("name", "text")]);
    catalog.build(&[first]).unwrap();
    let before = catalog.clone();

    let second = Statement::new(create_table("", "venues", &[("slug", "text")]).raw.stmt, 64, 0);
    let err = catalog.build(&[second]).unwrap_err();
    let sql = err.sql().expect("catalog errors are sql errors");
    assert!(sql.is_exists());
    assert_eq!(sql.to_string(), "relation \"venues\" already exists");
    assert_eq!(sql.location, Some(64));
    assert_eq!(catalog, before);
}

#[test]
fn it_restores_columns_after_add_then_drop() {
    let mut catalog = cart_catalog();
    let original = column_names(&catalog, "cart_items");

    let add = AlterTableCmd { subtype: AlterTableType::AddColumn, def: Some(column("note", "text")), ..Default::default() };
    let drop = AlterTableCmd { subtype: AlterTableType::DropColumn, name: Some("note".into()), ..Default::default() };
    catalog.build(&[alter("cart_items", add)]).unwrap();
    assert_eq!(column_names(&catalog, "cart_items").last().map(String::as_str), Some("note"));

    catalog.build(&[alter("cart_items", drop)]).unwrap();
    assert_eq!(column_names(&catalog, "cart_items"), original);
}

#[test]
fn it_stops_at_the_first_failing_statement() {
    let mut catalog = Catalog::new(Engine::PostgreSQL, "public");
    let drop = AlterTableCmd { subtype: AlterTableType::DropColumn, name: Some("missing".into()), ..Default::default() };
    let stmts = [create_table("", "a", &[("id", "int")]), alter("a", drop), create_table("", "b", &[("id", "int")])];

    let err = catalog.build(&stmts).unwrap_err();
    assert!(matches!(&err, Error::Sql(e) if e.is_not_found()));
    assert!(catalog.get_table(&TableName::new("", "a")).is_ok());
    assert!(catalog.get_table(&TableName::new("", "b")).unwrap_err().is_not_found());
}

#[test]
fn it_folds_identifiers_for_case_insensitive_engines() {
    let mut catalog = Catalog::new(Engine::MySQL, "public");
    catalog.build(&[create_table("", "Users", &[("ID", "int")])]).unwrap();
    let table = catalog.get_table(&TableName::new("", "users")).unwrap();
    assert!(table.column("id", catalog.identifier_case()).is_some());

    let err = catalog.build(&[create_table("", "USERS", &[])]).unwrap_err();
    assert!(err.sql().unwrap().is_exists());
}

#[test]
fn it_dumps_json() {
    let json = cart_catalog().to_json().unwrap();
    assert!(json.contains("\"price_currency\""));
    assert!(json.contains("\"pg_catalog\""));
}

#[test]
fn it_validates_concurrently_against_a_shared_catalog() {
    let catalog = cart_catalog();
    let results = Parallel::new()
        .each(0..8, |i| {
            let col = if i % 2 == 0 { "price_amount" } else { "bogus_col" };
            let mut stmt = insert_values("cart_items", &["owner_id"], vec![Node::param_ref(1, 50)]);
            stmt.on_conflict_clause = Some(Node::from(sqlc_core::ast::OnConflictClause {
                action: sqlc_core::ast::OnConflictAction::Update,
                target_list: vec![Node::from(sqlc_core::ast::ResTarget {
                    name: Some(col.into()),
                    val: Some(Node::column_ref(&["excluded", "price_amount"], 90)),
                    location: 80,
                    ..Default::default()
                })],
                ..Default::default()
            }));
            validate::on_conflict_clause(&catalog, &stmt).is_ok()
        })
        .run();
    assert_eq!(results, vec![true, false, true, false, true, false, true, false]);
}
