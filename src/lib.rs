//! Semantic core of a SQL-to-code compiler.
//!
//! Dialect adapters hand this crate statements in a dialect-neutral syntax
//! tree ([`ast::Node`]). From there the crate keeps a model of the database
//! schema by replaying DDL ([`Catalog`]), rewrites query parameters into the
//! dialect's positional form ([`rewrite`]) and validates queries against the
//! catalog ([`validate`]) before type inference and code generation run.
//!
//! # Example
//!
//! ```rust
//! use sqlc_core::ast::{ColumnDef, CreateTableStmt, Node, Statement, TableName, TypeName};
//! use sqlc_core::{Catalog, Engine};
//!
//! let create = CreateTableStmt {
//!     name: TableName::new("", "authors"),
//!     cols: vec![Node::from(ColumnDef {
//!         colname: "id".into(),
//!         type_name: Some(Node::from(TypeName::new("", "bigserial"))),
//!         primary_key: true,
//!         ..Default::default()
//!     })],
//!     ..Default::default()
//! };
//!
//! let mut catalog = Catalog::new(Engine::PostgreSQL, "public");
//! catalog.build(&[Statement::new(Node::from(create), 0, 0)]).unwrap();
//!
//! let authors = catalog.get_table(&TableName::new("", "authors")).unwrap();
//! assert!(authors.columns[0].is_not_null);
//! ```

pub mod ast;
pub mod catalog;
mod compiler;
mod config;
mod engine;
mod error;
pub mod metadata;
pub mod named;
pub mod rewrite;
pub mod source;
pub mod validate;

pub use catalog::Catalog;
pub use compiler::{Compiler, PreparedQuery};
pub use config::Config;
pub use engine::{CommentSyntax, Engine, IdentifierCase, Parser};
pub use error::*;
