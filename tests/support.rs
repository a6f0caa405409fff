#![allow(unused_macros, dead_code)]

use std::fmt;

use sqlc_core::ast::{ColumnDef, CreateTableStmt, FuncCall, FuncName, InsertStmt, Node, RawStmt, ResTarget, SelectStmt, Statement, TableName, TypeName};
use sqlc_core::{Catalog, Engine};

#[derive(PartialEq, Eq)]
pub struct MultiLineString<'a>(pub &'a str);

impl<'a> fmt::Debug for MultiLineString<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

// Modified from https://github.com/colin-kiegel/rust-pretty-assertions/issues/24#issuecomment-520613247
// to optionally turn off the pretty printing so you can copy the actual string.
macro_rules! assert_debug_eq {
    ($left:expr, $right:expr) => {
        if let Ok(_diff) = std::env::var("DIFF") {
            pretty_assertions::assert_eq!(MultiLineString(&format!("{:#?}", $left)), MultiLineString($right));
        } else {
            std::assert_eq!(MultiLineString(&format!("{:#?}", $left)), MultiLineString($right));
        }
    };
}

macro_rules! assert_eq {
    ($left:expr, $right:expr) => {
        if let Ok(_diff) = std::env::var("DIFF") {
            pretty_assertions::assert_eq!($left, $right);
        } else {
            std::assert_eq!($left, $right);
        }
    };
}

macro_rules! cast {
    ($target: expr, $pat: path) => {{
        if let $pat(a) = $target {
            a
        } else {
            panic!("mismatch variant when cast to {}", stringify!($pat));
        }
    }};
}

/// `sqlc.<name>(<arg>)` with the argument one byte past the parenthesis.
pub fn sqlc_call(name: &str, arg: Node, location: i32) -> Node {
    Node::from(FuncCall { func: FuncName::new("sqlc", name), args: vec![arg], location, ..Default::default() })
}

pub fn call(name: &str, args: Vec<Node>, location: i32) -> Node {
    Node::from(FuncCall { func: FuncName::new("", name), args, location, ..Default::default() })
}

pub fn target(val: Node) -> Node {
    let location = val.location().unwrap_or_default();
    Node::from(ResTarget { val: Some(val), location, ..Default::default() })
}

pub fn select(targets: Vec<Node>) -> Node {
    Node::from(SelectStmt { target_list: targets.into_iter().map(target).collect(), ..Default::default() })
}

pub fn raw(stmt: Node, location: i32, len: i32) -> RawStmt {
    RawStmt { stmt, stmt_location: location, stmt_len: len }
}

/// `INSERT INTO <table> (<cols>) VALUES (<row>)`
pub fn insert_values(table: &str, cols: &[&str], row: Vec<Node>) -> InsertStmt {
    InsertStmt {
        relation: Some(Node::range_var("", table, 12)),
        cols: cols.iter().map(|c| Node::from(ResTarget { name: Some(c.to_string()), ..Default::default() })).collect(),
        select_stmt: Some(Node::from(SelectStmt { values_lists: vec![Node::list(row)], ..Default::default() })),
        ..Default::default()
    }
}

pub fn column(name: &str, type_name: &str) -> Node {
    Node::from(ColumnDef { colname: name.to_string(), type_name: Some(Node::from(TypeName::new("", type_name))), ..Default::default() })
}

pub fn create_table(schema: &str, name: &str, cols: &[(&str, &str)]) -> Statement {
    let create = CreateTableStmt {
        name: TableName::new(schema, name),
        cols: cols.iter().map(|(n, t)| column(n, t)).collect(),
        ..Default::default()
    };
    Statement::new(Node::from(create), 0, 0)
}

/// A PostgreSQL catalog holding `cart_items`.
pub fn cart_catalog() -> Catalog {
    let mut catalog = Catalog::new(Engine::PostgreSQL, "public");
    let cols = [("owner_id", "uuid"), ("product_id", "uuid"), ("price_amount", "numeric"), ("price_currency", "text")];
    catalog.build(&[create_table("", "cart_items", &cols)]).unwrap();
    catalog
}
