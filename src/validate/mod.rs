//! Checks run on a statement before type inference.
//!
//! Each validator stops at its first violation and returns it as a
//! [`SqlError`](crate::SqlError) carrying the offending node's location when
//! one is known. Validators are independent of one another; the query
//! pipeline in [`Compiler`](crate::Compiler) decides their order.

mod cmd;
mod func_call;
mod in_list;
mod insert_stmt;
mod on_conflict;
mod param_ref;
mod param_style;
mod sqlc_functions;

pub use cmd::cmd;
pub use func_call::func_call;
pub use in_list::in_list;
pub use insert_stmt::insert_stmt;
pub use on_conflict::on_conflict_clause;
pub use param_ref::param_ref;
pub use param_style::param_style;
pub use sqlc_functions::sqlc_functions;

/// Code used for misuse of the query annotation language itself.
pub(crate) const USAGE: &str = "42601";
