use crate::ast::{InsertStmt, Node};
use crate::error::{SqlError, SqlResult};
use crate::validate::USAGE;

/// Checks that a single-row `INSERT ... VALUES` supplies one value per
/// target column.
///
/// Multi-row inserts, `INSERT ... SELECT` and inserts without a column list
/// are not checked.
pub fn insert_stmt(stmt: &InsertStmt) -> SqlResult<()> {
    let Some(Node::SelectStmt(select)) = &stmt.select_stmt else {
        return Ok(());
    };
    let [Node::List(row)] = select.values_lists.as_slice() else {
        return Ok(());
    };
    if stmt.cols.is_empty() {
        return Ok(());
    }

    let (cols, values) = (stmt.cols.len(), row.items.len());
    if cols > values {
        return Err(SqlError::invalid(USAGE, "INSERT has more target columns than expressions"));
    }
    if values > cols {
        return Err(SqlError::invalid(USAGE, "INSERT has more expressions than target columns"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ResTarget, SelectStmt};

    fn insert(cols: &[&str], rows: Vec<Vec<Node>>) -> InsertStmt {
        let values_lists = rows.into_iter().map(Node::list).collect();
        InsertStmt {
            relation: Some(Node::range_var("", "t", 12)),
            cols: cols.iter().map(|c| Node::from(ResTarget { name: Some(c.to_string()), ..Default::default() })).collect(),
            select_stmt: Some(Node::from(SelectStmt { values_lists, ..Default::default() })),
            ..Default::default()
        }
    }

    #[test]
    fn arity_mismatch() {
        let one = || Node::integer_const(1, 0);
        assert_eq!(insert_stmt(&insert(&["a"], vec![vec![one(), one()]])).unwrap_err().message, "INSERT has more expressions than target columns");
        assert_eq!(insert_stmt(&insert(&["a", "b"], vec![vec![one()]])).unwrap_err().message, "INSERT has more target columns than expressions");
        insert_stmt(&insert(&["a", "b"], vec![vec![one(), one()]])).unwrap();
    }

    #[test]
    fn only_single_rows_are_checked() {
        let one = || Node::integer_const(1, 0);
        insert_stmt(&insert(&["a"], vec![vec![one(), one()], vec![one()]])).unwrap();
        insert_stmt(&insert(&[], vec![vec![one(), one()]])).unwrap();
    }
}
