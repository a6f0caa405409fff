//! Dialect-neutral syntax tree and its traversal engines.
//!
//! Dialect adapters translate their own parse trees into [`Node`]. Every
//! other part of the crate reads or rewrites trees through [`walk`],
//! [`search`] and [`apply`].
//!
//! # Example
//!
//! ```rust
//! use sqlc_core::ast::{search, Node, SelectStmt};
//!
//! let select = Node::from(SelectStmt {
//!     from_clause: vec![Node::range_var("", "users", 14)],
//!     ..Default::default()
//! });
//! for table in search(&select, |n| matches!(n, Node::RangeVar(_))) {
//!     if let Node::RangeVar(rv) = table {
//!         println!("Table: {}", rv.relname);
//!     }
//! }
//! ```

mod apply;
mod children;
mod convert;
mod nodes;
mod walk;

pub use apply::{apply, Cursor};
pub use convert::to_json;
pub use nodes::*;
pub use walk::{search, walk, Visitor, VisitorFn};
