//! Tree rewrites run before validation and type inference.
//!
//! Both passes are built on [`apply`](crate::ast::apply) and leave a tree
//! without any markers untouched.

mod embeds;
mod parameters;

pub use embeds::{embeds, Embed, EmbedSet};
pub use parameters::named_parameters;

use crate::ast::{walk, Node, VisitorFn};

/// Concatenates the string parts under `nodes`, and tells whether a
/// constant was among them.
pub(crate) fn flatten(nodes: &[Node]) -> (String, bool) {
    let mut name = String::new();
    let mut is_const = false;
    for node in nodes {
        walk(
            &mut VisitorFn(|n: &Node| {
                match n {
                    Node::AConst(c) => {
                        is_const = true;
                        name.push_str(c.as_str().unwrap_or_default());
                    }
                    Node::String(s) => name.push_str(&s.sval),
                    _ => {}
                }
                true
            }),
            node,
        );
    }
    (name, is_const)
}
