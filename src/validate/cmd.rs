use crate::ast::{walk, InsertStmt, Node, VisitorFn};
use crate::error::{SqlError, SqlResult};
use crate::metadata::Cmd;
use crate::named::is_named_param;
use crate::validate::USAGE;

/// Checks that a statement can produce what its annotation promises.
pub fn cmd(stmt: &Node, name: &str, cmd: Cmd) -> SqlResult<()> {
    if cmd == Cmd::CopyFrom {
        return copy_from(stmt);
    }
    if cmd.is_batch() && !has_params(stmt) {
        return Err(SqlError::invalid(USAGE, ":batch* commands require parameters"));
    }
    if !cmd.returns_rows() {
        return Ok(());
    }

    let returns = match stmt {
        Node::SelectStmt(_) => true,
        Node::InsertStmt(n) => !n.returning_list.is_empty(),
        Node::UpdateStmt(n) => !n.returning_list.is_empty(),
        Node::DeleteStmt(n) => !n.returning_list.is_empty(),
        _ => false,
    };
    if !returns {
        return Err(SqlError::invalid(USAGE, format!("query {name:?} specifies parameter {:?} without containing a RETURNING clause", cmd.as_str())));
    }
    Ok(())
}

fn copy_from(stmt: &Node) -> SqlResult<()> {
    let Node::InsertStmt(insert) = stmt else {
        return Err(usage(":copyfrom requires an INSERT INTO statement"));
    };
    let InsertStmt { on_conflict_clause, with_clause, returning_list, select_stmt, .. } = &**insert;
    if on_conflict_clause.is_some() {
        return Err(usage(":copyfrom is not compatible with ON CONFLICT"));
    }
    if with_clause.is_some() {
        return Err(usage(":copyfrom is not compatible with WITH clauses"));
    }
    if !returning_list.is_empty() {
        return Err(usage(":copyfrom is not compatible with RETURNING"));
    }

    let rows = match select_stmt {
        Some(Node::SelectStmt(select)) if !select.values_lists.is_empty() => &select.values_lists,
        _ => return Err(usage(":copyfrom is not compatible with INSERT INTO ... SELECT")),
    };
    let [Node::List(row)] = rows.as_slice() else {
        return Err(usage(":copyfrom requires exactly one example row to be inserted"));
    };
    if row.items.iter().any(|v| !matches!(v, Node::ParamRef(_)) && !is_named_param(v)) {
        return Err(usage(":copyfrom doesn't support non-parameter values"));
    }
    Ok(())
}

fn usage(message: &str) -> SqlError {
    SqlError::invalid(USAGE, message)
}

fn has_params(stmt: &Node) -> bool {
    let mut found = false;
    walk(
        &mut VisitorFn(|node: &Node| {
            found |= matches!(node, Node::ParamRef(_)) || is_named_param(node);
            !found
        }),
        stmt,
    );
    found
}
