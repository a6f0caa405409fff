use crate::ast::{walk, Node, Visitor};
use crate::catalog::Catalog;
use crate::error::{SqlError, SqlResult};

struct FuncCallVisitor<'c> {
    catalog: &'c Catalog,
    err: Option<SqlError>,
}

impl<'ast, 'c> Visitor<'ast> for FuncCallVisitor<'c> {
    fn visit(&mut self, node: &'ast Node) -> bool {
        if self.err.is_some() {
            return false;
        }
        let Node::FuncCall(call) = node else {
            return true;
        };
        if call.func.schema == "sqlc" {
            return false;
        }
        match self.catalog.resolve_func_call(call) {
            Ok(_) => true,
            // Functions the catalog does not model are not checked.
            Err(err) if err.is_not_found() => true,
            Err(err) => {
                self.err = Some(err);
                false
            }
        }
    }
}

/// Checks that every call to a known function matches one of its
/// signatures.
pub fn func_call(catalog: &Catalog, stmt: &Node) -> SqlResult<()> {
    let mut visitor = FuncCallVisitor { catalog, err: None };
    walk(&mut visitor, stmt);
    visitor.err.map_or(Ok(()), Err)
}
