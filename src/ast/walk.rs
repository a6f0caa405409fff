//! Read-only depth-first traversal.

use crate::ast::children::each_child;
use crate::ast::nodes::Node;

/// Stack headroom kept free before a recursion step grows the stack.
pub(crate) const RED_ZONE: usize = 32 * 1024;
/// Size of each newly allocated stack segment.
pub(crate) const STACK_SIZE: usize = 1024 * 1024;

/// Receives every node of a [`walk`].
pub trait Visitor<'ast> {
    /// Called before the children of `node`. Returning `false` skips the
    /// children, and [`Visitor::leave`] is not called for `node`.
    fn visit(&mut self, node: &'ast Node) -> bool;

    /// Called once all children of `node` have been walked.
    fn leave(&mut self, _node: &'ast Node) {}
}

/// Adapts a closure into a [`Visitor`] with no `leave` step.
pub struct VisitorFn<F>(pub F);

impl<'ast, F> Visitor<'ast> for VisitorFn<F>
where
    F: FnMut(&'ast Node) -> bool,
{
    fn visit(&mut self, node: &'ast Node) -> bool {
        (self.0)(node)
    }
}

/// Walks `node` and its descendants depth-first, in child-table order.
///
/// Absent children and [`Node::Null`] placeholders are not visited.
///
/// ```rust
/// use sqlc_core::ast::{walk, Node, VisitorFn};
///
/// let tree = Node::list(vec![Node::integer(1), Node::string("a")]);
/// let mut count = 0;
/// walk(&mut VisitorFn(|_: &Node| {
///     count += 1;
///     true
/// }), &tree);
/// assert_eq!(count, 3);
/// ```
pub fn walk<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, node: &'ast Node) {
    if matches!(node, Node::Null) {
        return;
    }
    stacker::maybe_grow(RED_ZONE, STACK_SIZE, || {
        if !visitor.visit(node) {
            return;
        }
        each_child(node, &mut |child| walk(visitor, child));
        visitor.leave(node);
    })
}

/// Returns every node below (and including) `root` that satisfies
/// `predicate`, in visitation order.
pub fn search<'ast, P>(root: &'ast Node, mut predicate: P) -> Vec<&'ast Node>
where
    P: FnMut(&Node) -> bool,
{
    let mut found = Vec::new();
    walk(
        &mut VisitorFn(|node: &'ast Node| {
            if predicate(node) {
                found.push(node);
            }
            true
        }),
        root,
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::nodes::*;

    fn select_where_eq() -> Node {
        // SELECT a FROM t WHERE a = 1
        Node::from(SelectStmt {
            target_list: vec![Node::from(ResTarget { val: Some(Node::column_ref(&["a"], 7)), location: 7, ..Default::default() })],
            from_clause: vec![Node::range_var("", "t", 14)],
            where_clause: Some(Node::from(AExpr {
                kind: AExprKind::Op,
                name: vec![Node::string("=")],
                lexpr: Some(Node::column_ref(&["a"], 22)),
                rexpr: Some(Node::integer_const(1, 26)),
                location: 24,
            })),
            ..Default::default()
        })
    }

    struct Recorder {
        events: Vec<String>,
    }

    impl<'ast> Visitor<'ast> for Recorder {
        fn visit(&mut self, node: &'ast Node) -> bool {
            self.events.push(format!("visit {}", node.kind()));
            true
        }

        fn leave(&mut self, node: &'ast Node) {
            self.events.push(format!("leave {}", node.kind()));
        }
    }

    #[test]
    fn visits_each_node_once_with_one_leave() {
        let tree = select_where_eq();
        let mut recorder = Recorder { events: vec![] };
        walk(&mut recorder, &tree);

        let visits = recorder.events.iter().filter(|e| e.starts_with("visit")).count();
        let leaves = recorder.events.iter().filter(|e| e.starts_with("leave")).count();
        // SelectStmt ResTarget ColumnRef String RangeVar AExpr String ColumnRef String AConst
        assert_eq!(visits, 10);
        assert_eq!(leaves, visits);
        assert_eq!(recorder.events.first().map(String::as_str), Some("visit SelectStmt"));
        assert_eq!(recorder.events.last().map(String::as_str), Some("leave SelectStmt"));
    }

    #[test]
    fn binary_operator_children_in_order() {
        let tree = select_where_eq();
        let Node::SelectStmt(select) = &tree else { unreachable!() };
        let expr = select.where_clause.as_ref().unwrap();
        let kinds: Vec<_> = search(expr, |_| true).into_iter().map(Node::kind).collect();
        assert_eq!(kinds, vec!["AExpr", "String", "ColumnRef", "String", "AConst"]);
    }

    #[test]
    fn stopping_skips_children_and_leave() {
        let tree = select_where_eq();
        let mut recorder = Recorder { events: vec![] };
        struct Shallow<'r>(&'r mut Recorder);
        impl<'ast, 'r> Visitor<'ast> for Shallow<'r> {
            fn visit(&mut self, node: &'ast Node) -> bool {
                self.0.visit(node);
                !matches!(node, Node::AExpr(_))
            }
            fn leave(&mut self, node: &'ast Node) {
                self.0.leave(node);
            }
        }
        walk(&mut Shallow(&mut recorder), &tree);
        assert!(recorder.events.contains(&"visit AExpr".to_string()));
        assert!(!recorder.events.contains(&"leave AExpr".to_string()));
        assert!(!recorder.events.contains(&"visit AConst".to_string()));
    }

    #[test]
    fn absent_children_are_tolerated() {
        let tree = Node::from(InsertStmt::default());
        assert_eq!(search(&tree, |_| true).len(), 1);
        assert!(search(&Node::Null, |_| true).is_empty());
    }

    #[test]
    fn deep_trees_do_not_overflow() {
        let mut node = Node::integer(0);
        for _ in 0..100_000 {
            node = Node::list(vec![node]);
        }
        assert_eq!(search(&node, |n| matches!(n, Node::Integer(_))).len(), 1);
        // Dropping a deeply nested tree recurses as well.
        std::mem::forget(node);
    }
}
