use itertools::Itertools;

use crate::ast::{walk, Node, Visitor};
use crate::error::{SqlError, SqlResult};
use crate::validate::USAGE;

struct InVisitor {
    err: Option<SqlError>,
}

impl<'ast> Visitor<'ast> for InVisitor {
    fn visit(&mut self, node: &'ast Node) -> bool {
        if self.err.is_some() {
            return false;
        }
        let Node::In(expr) = node else {
            return true;
        };
        // A slice stands for the whole list: `id IN (sqlc.slice(ids))`.
        if expr.list.len() <= 1 {
            return true;
        }
        for item in &expr.list {
            let Node::FuncCall(call) = item else { continue };
            if call.func.schema != "sqlc" || call.func.name != "slice" {
                continue;
            }
            let in_expr = match &expr.expr {
                Some(Node::ColumnRef(c)) => c.names().join("."),
                _ => "...".to_string(),
            };
            let slice_arg = match call.args.as_slice() {
                [Node::AConst(c)] => c.as_str().map_or("?".to_string(), |s| format!("\"{s}\"")),
                [Node::ColumnRef(c)] => c.names().iter().join("."),
                [_] => "...".to_string(),
                _ => String::new(),
            };
            self.err = Some(
                SqlError::invalid(USAGE, format!("expected '{in_expr} IN' expr to consist only of sqlc.slice({slice_arg}); eg ")).at(call.location),
            );
            return false;
        }
        true
    }
}

/// Rejects `IN` lists that combine `sqlc.slice(...)` with other elements.
pub fn in_list(stmt: &Node) -> SqlResult<()> {
    let mut visitor = InVisitor { err: None };
    walk(&mut visitor, stmt);
    visitor.err.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FuncCall, FuncName, In, SelectStmt};

    fn slice(arg: Node) -> Node {
        Node::from(FuncCall { func: FuncName::new("sqlc", "slice"), args: vec![arg], location: 33, ..Default::default() })
    }

    fn select_in(list: Vec<Node>) -> Node {
        let expr = In { expr: Some(Node::column_ref(&["id"], 20)), list, ..Default::default() };
        Node::from(SelectStmt { where_clause: Some(Node::from(expr)), ..Default::default() })
    }

    #[test]
    fn slice_alone_is_fine() {
        in_list(&select_in(vec![slice(Node::string_const("ids", 0))])).unwrap();
        in_list(&select_in(vec![Node::integer_const(1, 0), Node::integer_const(2, 0)])).unwrap();
    }

    #[test]
    fn slice_among_values() {
        let err = in_list(&select_in(vec![Node::integer_const(0, 0), slice(Node::string_const("ids", 0))])).unwrap_err();
        assert_eq!(err.message, "expected 'id IN' expr to consist only of sqlc.slice(\"ids\"); eg ");
        assert_eq!(err.location, Some(33));

        let err = in_list(&select_in(vec![slice(Node::column_ref(&["ids"], 0)), Node::integer_const(0, 0)])).unwrap_err();
        assert_eq!(err.message, "expected 'id IN' expr to consist only of sqlc.slice(ids); eg ");
    }
}
