use crate::ast::{search, Node};
use crate::error::{SqlError, SqlResult};
use crate::named::{is_param_func, is_param_sign};
use crate::validate::USAGE;

/// Rejects statements that mix parameter notations: positional (`$1`, `?`)
/// with named ones, or `sqlc.arg(...)` with `@name`.
///
/// Also checks that every `sqlc.arg`-style call names its parameter with a
/// string or a bare reference.
pub fn param_style(stmt: &Node) -> SqlResult<()> {
    let funcs = search(stmt, is_param_func);
    for func in &funcs {
        let Node::FuncCall(call) = func else { continue };
        let Some(arg) = call.args.first() else { continue };
        match arg {
            Node::AConst(_) | Node::ColumnRef(_) => {}
            Node::FuncCall(_) | Node::ParamRef(_) => {
                let location = arg.location().unwrap_or(call.location);
                return Err(SqlError::invalid(USAGE, format!("Invalid argument to sqlc.{}()", call.func.name)).at(location));
            }
            _ => {
                return Err(SqlError::invalid(USAGE, format!("Invalid argument to sqlc.{}(); expected a string or column reference", call.func.name))
                    .at(call.location))
            }
        }
    }

    let signs = search(stmt, is_param_sign);
    let positional = search(stmt, |n| matches!(n, Node::ParamRef(_)));
    if let Some(first) = positional.first() {
        if !funcs.is_empty() || !signs.is_empty() {
            let location = first.location().unwrap_or_default();
            return Err(SqlError::invalid(USAGE, "query mixes positional parameters ($1) and named parameters (sqlc.arg or @arg)").at(location));
        }
    }
    if let (Some(_), Some(sign)) = (funcs.first(), signs.first()) {
        let location = sign.location().unwrap_or_default();
        return Err(SqlError::invalid(USAGE, "query mixes @arg and sqlc.arg() named parameters").at(location));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AExpr, BoolExpr, FuncCall, FuncName, SelectStmt};

    fn eq(column: &str, rhs: Node) -> Node {
        Node::from(AExpr { name: vec![Node::string("=")], lexpr: Some(Node::column_ref(&[column], 0)), rexpr: Some(rhs), ..Default::default() })
    }

    fn sign(name: &str) -> Node {
        Node::from(AExpr { name: vec![Node::string("@")], rexpr: Some(Node::column_ref(&[name], 0)), location: 40, ..Default::default() })
    }

    fn arg(inner: Node) -> Node {
        Node::from(FuncCall { func: FuncName::new("sqlc", "arg"), args: vec![inner], location: 30, ..Default::default() })
    }

    fn select_where(conds: Vec<Node>) -> Node {
        Node::from(SelectStmt {
            where_clause: Some(Node::from(BoolExpr { args: conds, ..Default::default() })),
            ..Default::default()
        })
    }

    #[test]
    fn positional_and_named_do_not_mix() {
        let err = param_style(&select_where(vec![eq("a", Node::param_ref(1, 20)), eq("b", sign("name"))])).unwrap_err();
        assert!(err.message.starts_with("query mixes positional parameters"));
        assert_eq!(err.location, Some(20));
    }

    #[test]
    fn named_styles_do_not_mix() {
        let err = param_style(&select_where(vec![eq("a", arg(Node::column_ref(&["a"], 0))), eq("b", sign("b"))])).unwrap_err();
        assert_eq!(err.location, Some(40));
    }

    #[test]
    fn single_notations_pass() {
        param_style(&select_where(vec![eq("a", Node::param_ref(1, 0)), eq("b", Node::param_ref(2, 0))])).unwrap();
        param_style(&select_where(vec![eq("a", sign("a")), eq("b", sign("b"))])).unwrap();
        param_style(&select_where(vec![eq("a", arg(Node::string_const("a", 0)))])).unwrap();
    }

    #[test]
    fn arg_must_be_a_name() {
        let err = param_style(&select_where(vec![eq("a", arg(Node::param_ref(1, 39)))])).unwrap_err();
        assert_eq!(err.message, "Invalid argument to sqlc.arg()");
        assert_eq!(err.location, Some(39));
    }
}
