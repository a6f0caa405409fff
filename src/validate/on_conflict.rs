use crate::ast::{search, InsertStmt, Node, OnConflictAction, TableName};
use crate::catalog::Catalog;
use crate::error::{SqlError, SqlResult};

const UNDEFINED_COLUMN: &str = "42703";

/// Checks the assignments of `INSERT ... ON CONFLICT DO UPDATE` against the
/// target table: every assigned column and every `EXCLUDED.column` must
/// exist.
pub fn on_conflict_clause(catalog: &Catalog, stmt: &InsertStmt) -> SqlResult<()> {
    let Some(Node::OnConflictClause(clause)) = &stmt.on_conflict_clause else {
        return Ok(());
    };
    if clause.action != OnConflictAction::Update {
        return Ok(());
    }
    let Some(Node::RangeVar(relation)) = &stmt.relation else {
        return Ok(());
    };

    let table = catalog.get_table(&TableName::from(&**relation))?;
    let idents = catalog.identifier_case();
    let rel = &table.rel.name;

    for target in &clause.target_list {
        let Node::ResTarget(res) = target else { continue };

        if let Some(name) = &res.name {
            if table.column(name, idents).is_none() {
                return Err(SqlError::column_not_found(rel, name).at(res.location));
            }
        }

        let Some(val) = &res.val else { continue };
        for node in search(val, |n| matches!(n, Node::ColumnRef(_))) {
            let Node::ColumnRef(column) = node else { continue };
            let names = column.names();
            let [pseudo, name] = names.as_slice() else { continue };
            if !pseudo.eq_ignore_ascii_case("excluded") {
                continue;
            }
            if table.column(name, idents).is_none() {
                return Err(SqlError::invalid(UNDEFINED_COLUMN, format!("column \"{name}\" does not exist in relation \"{rel}\" (via EXCLUDED)"))
                    .at(column.location));
            }
        }
    }
    Ok(())
}
