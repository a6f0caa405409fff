use crate::ast::{walk, FuncCall, Node, Visitor};
use crate::error::{SqlError, SqlResult};
use crate::validate::USAGE;

struct SqlcFuncVisitor {
    err: Option<SqlError>,
}

impl SqlcFuncVisitor {
    fn check(call: &FuncCall) -> SqlResult<()> {
        let name = call.func.name.as_str();
        if !matches!(name, "arg" | "narg" | "slice" | "embed" | "sort") {
            return Err(SqlError::function_not_found(&format!("sqlc.{name}")).at(call.location));
        }

        let max = if name == "sort" { 4 } else { 1 };
        let got = call.args.len();
        if got < 1 || got > max {
            let expected = match max {
                1 => "1 parameter".to_string(),
                max => format!("1-{max} parameters"),
            };
            return Err(SqlError::invalid(USAGE, format!("expected {expected} to sqlc.{name}; got {got}")).at(call.location));
        }

        match &call.args[0] {
            Node::AConst(_) | Node::ColumnRef(_) => Ok(()),
            other => Err(SqlError::invalid(USAGE, format!("expected parameter to sqlc.{name} to be string or reference; got {}", other.kind()))
                .at(call.location)),
        }
    }
}

impl<'ast> Visitor<'ast> for SqlcFuncVisitor {
    fn visit(&mut self, node: &'ast Node) -> bool {
        if self.err.is_some() {
            return false;
        }
        match node {
            Node::FuncCall(call) if call.func.schema == "sqlc" => {
                self.err = Self::check(call).err();
                // Markers are not real functions; their arguments are names.
                false
            }
            _ => true,
        }
    }
}

/// Checks every `sqlc.*` call: the function must be one the compiler knows,
/// with the right number of arguments, each a string or a reference.
pub fn sqlc_functions(stmt: &Node) -> SqlResult<()> {
    let mut visitor = SqlcFuncVisitor { err: None };
    walk(&mut visitor, stmt);
    visitor.err.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FuncName, SelectStmt};

    fn sqlc(name: &str, args: Vec<Node>) -> Node {
        let call = Node::from(FuncCall { func: FuncName::new("sqlc", name), args, location: 7, ..Default::default() });
        Node::from(SelectStmt { target_list: vec![call], ..Default::default() })
    }

    #[test]
    fn unknown_marker() {
        let err = sqlc_functions(&sqlc("argh", vec![Node::column_ref(&["a"], 0)])).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "function \"sqlc.argh\" does not exist");
    }

    #[test]
    fn argument_counts() {
        let name = || Node::column_ref(&["a"], 0);
        assert_eq!(sqlc_functions(&sqlc("arg", vec![name(), name()])).unwrap_err().message, "expected 1 parameter to sqlc.arg; got 2");
        assert_eq!(sqlc_functions(&sqlc("narg", vec![])).unwrap_err().message, "expected 1 parameter to sqlc.narg; got 0");
        sqlc_functions(&sqlc("sort", vec![name(), name(), name()])).unwrap();
        assert_eq!(sqlc_functions(&sqlc("sort", vec![name(); 5])).unwrap_err().message, "expected 1-4 parameters to sqlc.sort; got 5");
    }

    #[test]
    fn argument_kinds() {
        sqlc_functions(&sqlc("slice", vec![Node::string_const("ids", 0)])).unwrap();
        let err = sqlc_functions(&sqlc("embed", vec![Node::integer(1)])).unwrap_err();
        assert_eq!(err.message, "expected parameter to sqlc.embed to be string or reference; got Integer");
    }
}
