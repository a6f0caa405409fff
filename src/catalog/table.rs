use serde::Serialize;
use tracing::trace;

use crate::ast::{
    AlterTableCmd, AlterTableSetSchemaStmt, AlterTableStmt, ColumnDef, CommentOnColumnStmt, CommentOnTableStmt, CommentOnViewStmt,
    ConstrType, CreateTableAsStmt, CreateTableStmt, DropTableStmt, Node, RenameColumnStmt, RenameTableStmt, TableName, TypeName, ViewStmt,
};
use crate::catalog::{string_items, Catalog, OutputColumns};
use crate::engine::IdentifierCase;
use crate::error::{SqlError, SqlResult};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub rel: TableName,
    pub columns: Vec<Column>,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub type_name: TypeName,
    pub is_not_null: bool,
    pub is_unsigned: bool,
    pub is_array: bool,
    pub array_dims: i32,
    pub comment: String,
    pub length: Option<i32>,
    pub has_default: bool,
}

impl Column {
    pub fn from_def(def: &ColumnDef) -> Self {
        let type_name = match &def.type_name {
            Some(Node::TypeName(tn)) => (**tn).clone(),
            _ => TypeName::default(),
        };
        let constrained = |kind: ConstrType| def.constraints.iter().any(|c| matches!(c, Node::Constraint(c) if c.contype == kind));
        let bounds = type_name.array_bounds.len() as i32;
        Column {
            name: def.colname.clone(),
            is_not_null: def.is_not_null || def.primary_key || constrained(ConstrType::NotNull) || constrained(ConstrType::Primary),
            is_unsigned: def.is_unsigned,
            is_array: def.is_array || bounds > 0,
            array_dims: def.array_dims.max(bounds),
            comment: def.comment.clone(),
            length: def.length,
            has_default: def.raw_default.is_some() || constrained(ConstrType::Default) || constrained(ConstrType::Identity),
            type_name,
        }
    }
}

impl Table {
    pub fn column(&self, name: &str, idents: IdentifierCase) -> Option<&Column> {
        self.column_index(name, idents).map(|i| &self.columns[i])
    }

    fn column_index(&self, name: &str, idents: IdentifierCase) -> Option<usize> {
        self.columns.iter().position(|c| idents.eq(&c.name, name))
    }

    fn alter(&mut self, cmd: &AlterTableCmd, idents: IdentifierCase) -> SqlResult<()> {
        use crate::ast::AlterTableType::*;

        match cmd.subtype {
            AddColumn => {
                let Some(Node::ColumnDef(def)) = &cmd.def else {
                    return Err(SqlError::invalid("42601", "alter table add column: missing column definition"));
                };
                if self.column_index(&def.colname, idents).is_some() {
                    if cmd.missing_ok {
                        return Ok(());
                    }
                    return Err(SqlError::column_exists(&self.rel.name, &def.colname));
                }
                self.columns.push(Column::from_def(def));
            }
            AlterColumnType | ColumnDefault | DropColumn | DropNotNull | SetNotNull => {
                let name = cmd.name.as_deref().unwrap_or_default();
                let Some(idx) = self.column_index(name, idents) else {
                    if cmd.missing_ok {
                        return Ok(());
                    }
                    return Err(SqlError::column_not_found(&self.rel.name, name));
                };
                let column = &mut self.columns[idx];
                match cmd.subtype {
                    AlterColumnType => {
                        if let Some(Node::ColumnDef(def)) = &cmd.def {
                            let altered = Column::from_def(def);
                            column.type_name = altered.type_name;
                            column.is_array = altered.is_array;
                            column.array_dims = altered.array_dims;
                            column.is_unsigned = altered.is_unsigned;
                            column.length = altered.length;
                        }
                    }
                    ColumnDefault => column.has_default = cmd.def.is_some(),
                    DropNotNull => column.is_not_null = false,
                    SetNotNull => column.is_not_null = true,
                    _ => {
                        self.columns.remove(idx);
                    }
                }
            }
            other => trace!(table = %self.rel, subtype = ?other, "alter table sub-command is not modeled"),
        }
        Ok(())
    }
}

impl Catalog {
    /// Locates a table that DDL is about to modify.
    fn table_for_write(&self, name: &TableName) -> SqlResult<(usize, usize)> {
        let (sidx, tidx) = self.locate_table(name)?;
        if self.schemas[sidx].builtin {
            return Err(SqlError::permission_denied(&self.schemas[sidx].name));
        }
        Ok((sidx, tidx))
    }

    pub(crate) fn create_table(&mut self, stmt: &CreateTableStmt) -> SqlResult<()> {
        let sidx = self.schema_for_write(&stmt.name.schema)?;
        let idents = self.idents;
        if self.schemas[sidx].table_index(&stmt.name.name, idents).is_some() {
            if stmt.if_not_exists {
                return Ok(());
            }
            return Err(SqlError::relation_exists(&stmt.name.name));
        }
        self.check_type_name_free(sidx, &stmt.name.name)?;

        let mut table = Table {
            rel: TableName { schema: self.schemas[sidx].name.clone(), ..stmt.name.clone() },
            columns: vec![],
            comment: stmt.comment.clone(),
        };
        for parent in &stmt.inherits {
            let parent = TableName { schema: self.schema_name(&parent.schema).to_string(), ..parent.clone() };
            for column in &self.get_table(&parent)?.columns {
                match table.column_index(&column.name, idents) {
                    Some(idx) => table.columns[idx] = column.clone(),
                    None => table.columns.push(column.clone()),
                }
            }
        }
        let inherited = table.columns.len();

        if stmt.refer_table.is_some() && !stmt.cols.is_empty() {
            return Err(SqlError::invalid("42601", "create table node cannot have both a ReferTable and Cols"));
        }

        let mut enums = vec![];
        if let Some(refer) = &stmt.refer_table {
            table.columns.extend(self.get_table(refer)?.columns.iter().cloned());
        } else {
            for def in stmt.cols.iter().filter_map(|n| match n {
                Node::ColumnDef(def) => Some(def),
                _ => None,
            }) {
                let existing = table.column_index(&def.colname, idents);
                if existing.is_some_and(|idx| idx >= inherited) {
                    return Err(SqlError::column_exists(&stmt.name.name, &def.colname));
                }
                let mut column = Column::from_def(def);
                if !def.vals.is_empty() {
                    let enum_name = TypeName::new("", &format!("{}_{}", stmt.name.name, def.colname));
                    self.check_type_name_free(sidx, &enum_name.name)?;
                    enums.push((enum_name.clone(), def.vals.clone()));
                    column.type_name = enum_name;
                }
                match existing {
                    // A declared column merges with the inherited one of the same name.
                    Some(idx) => {
                        column.is_not_null |= table.columns[idx].is_not_null;
                        table.columns[idx] = column;
                    }
                    None => table.columns.push(column),
                }
            }
        }

        for constraint in &stmt.constraints {
            if let Node::Constraint(c) = constraint {
                if matches!(c.contype, ConstrType::Primary) {
                    for key in string_items(&c.keys) {
                        if let Some(idx) = table.column_index(&key, idents) {
                            table.columns[idx].is_not_null = true;
                        }
                    }
                }
            }
        }

        // The enum names were checked above, so this cannot fail half-way.
        for (enum_name, vals) in enums {
            let enum_name = TypeName { schema: self.schemas[sidx].name.clone(), ..enum_name };
            self.create_enum(&enum_name, &vals)?;
        }
        self.schemas[sidx].tables.push(table);
        Ok(())
    }

    pub(crate) fn alter_table(&mut self, stmt: &AlterTableStmt) -> SqlResult<()> {
        let (sidx, tidx) = match self.table_for_write(&stmt.table) {
            Err(err) if err.is_not_found() && stmt.missing_ok => return Ok(()),
            located => located?,
        };
        let idents = self.idents;
        let mut table = self.schemas[sidx].tables[tidx].clone();
        for cmd in &stmt.cmds {
            if let Node::AlterTableCmd(cmd) = cmd {
                table.alter(cmd, idents)?;
            }
        }
        self.schemas[sidx].tables[tidx] = table;
        Ok(())
    }

    pub(crate) fn alter_table_set_schema(&mut self, stmt: &AlterTableSetSchemaStmt) -> SqlResult<()> {
        let (sidx, tidx) = match self.table_for_write(&stmt.table) {
            Err(err) if err.is_not_found() && stmt.missing_ok => return Ok(()),
            located => located?,
        };
        let new_idx = self.schema_for_write(&stmt.new_schema)?;
        if self.schemas[new_idx].table_index(&stmt.table.name, self.idents).is_some() {
            return Err(SqlError::relation_exists(&stmt.table.name));
        }
        let mut table = self.schemas[sidx].tables.remove(tidx);
        table.rel.schema = self.schemas[new_idx].name.clone();
        self.schemas[new_idx].tables.push(table);
        Ok(())
    }

    pub(crate) fn drop_table(&mut self, stmt: &DropTableStmt) -> SqlResult<()> {
        let mut doomed = Vec::with_capacity(stmt.tables.len());
        for name in &stmt.tables {
            match self.table_for_write(name) {
                Ok((sidx, tidx)) => doomed.push((sidx, self.schemas[sidx].tables[tidx].rel.name.clone())),
                Err(err) if err.is_not_found() && stmt.if_exists => continue,
                Err(err) => return Err(err),
            }
        }
        let idents = self.idents;
        for (sidx, name) in doomed {
            self.schemas[sidx].tables.retain(|t| !idents.eq(&t.rel.name, &name));
        }
        Ok(())
    }

    pub(crate) fn rename_table(&mut self, stmt: &RenameTableStmt) -> SqlResult<()> {
        let (sidx, tidx) = match self.table_for_write(&stmt.table) {
            Err(err) if err.is_not_found() && stmt.missing_ok => return Ok(()),
            located => located?,
        };
        if self.schemas[sidx].table_index(&stmt.new_name, self.idents).is_some() {
            return Err(SqlError::relation_exists(&stmt.new_name));
        }
        self.schemas[sidx].tables[tidx].rel.name = stmt.new_name.clone();
        Ok(())
    }

    pub(crate) fn rename_column(&mut self, stmt: &RenameColumnStmt) -> SqlResult<()> {
        let (sidx, tidx) = match self.table_for_write(&stmt.table) {
            Err(err) if err.is_not_found() && stmt.missing_ok => return Ok(()),
            located => located?,
        };
        let idents = self.idents;
        let table = &mut self.schemas[sidx].tables[tidx];
        if table.column_index(&stmt.new_name, idents).is_some() {
            return Err(SqlError::column_exists(&table.rel.name, &stmt.new_name));
        }
        let Some(idx) = table.column_index(&stmt.col, idents) else {
            return Err(SqlError::column_not_found(&table.rel.name, &stmt.col));
        };
        table.columns[idx].name = stmt.new_name.clone();
        Ok(())
    }

    pub(crate) fn comment_on_table(&mut self, stmt: &CommentOnTableStmt) -> SqlResult<()> {
        let (sidx, tidx) = self.table_for_write(&stmt.table)?;
        self.schemas[sidx].tables[tidx].comment = stmt.comment.clone().unwrap_or_default();
        Ok(())
    }

    pub(crate) fn comment_on_view(&mut self, stmt: &CommentOnViewStmt) -> SqlResult<()> {
        let (sidx, tidx) = self.table_for_write(&stmt.view)?;
        self.schemas[sidx].tables[tidx].comment = stmt.comment.clone().unwrap_or_default();
        Ok(())
    }

    pub(crate) fn comment_on_column(&mut self, stmt: &CommentOnColumnStmt) -> SqlResult<()> {
        let (sidx, tidx) = self.table_for_write(&stmt.table)?;
        let idents = self.idents;
        let table = &mut self.schemas[sidx].tables[tidx];
        let Some(idx) = table.column_index(&stmt.col, idents) else {
            return Err(SqlError::column_not_found(&table.rel.name, &stmt.col));
        };
        table.columns[idx].comment = stmt.comment.clone().unwrap_or_default();
        Ok(())
    }

    pub(crate) fn create_table_as(&mut self, stmt: &CreateTableAsStmt, generator: &dyn OutputColumns) -> Result<()> {
        let Some(Node::IntoClause(into)) = &stmt.into else {
            return Err(SqlError::invalid("42601", "create table as: missing target relation").into());
        };
        let Some(Node::RangeVar(rel)) = &into.rel else {
            return Err(SqlError::invalid("42601", "create table as: missing target relation").into());
        };
        let Some(query) = &stmt.query else {
            return Err(SqlError::invalid("42601", "create table as: missing query").into());
        };
        self.register_query_table(TableName::from(rel.as_ref()), query, stmt.if_not_exists, false, generator)
    }

    pub(crate) fn create_view(&mut self, stmt: &ViewStmt, generator: &dyn OutputColumns) -> Result<()> {
        let (Some(Node::RangeVar(rel)), Some(query)) = (&stmt.view, &stmt.query) else {
            return Err(SqlError::invalid("42601", "create view: missing name or query").into());
        };
        self.register_query_table(TableName::from(rel.as_ref()), query, false, stmt.replace, generator)
    }

    fn register_query_table(&mut self, rel: TableName, query: &Node, if_not_exists: bool, replace: bool, generator: &dyn OutputColumns) -> Result<()> {
        let sidx = self.schema_for_write(&rel.schema)?;
        let existing = self.schemas[sidx].table_index(&rel.name, self.idents);
        if existing.is_some() && !replace {
            if if_not_exists {
                return Ok(());
            }
            return Err(SqlError::relation_exists(&rel.name).into());
        }
        let columns = generator.output_columns(self, query)?;
        let table = Table { rel: TableName { schema: self.schemas[sidx].name.clone(), ..rel }, columns, comment: String::new() };
        match existing {
            Some(tidx) => self.schemas[sidx].tables[tidx] = table,
            None => self.schemas[sidx].tables.push(table),
        }
        Ok(())
    }
}
