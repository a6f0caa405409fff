use serde::Serialize;

use crate::ast::{
    AlterTypeAddValueStmt, AlterTypeRenameValueStmt, AlterTypeSetSchemaStmt, CommentOnTypeStmt, CompositeTypeStmt, DropTypeStmt, Node, RenameTypeStmt,
    TypeName,
};
use crate::catalog::table::Column;
use crate::catalog::{string_items, Catalog};
use crate::error::{SqlError, SqlResult};

/// A user-defined type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Type {
    Enum(Enum),
    Composite(CompositeType),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Enum {
    pub name: String,
    pub vals: Vec<String>,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositeType {
    pub name: String,
    pub columns: Vec<Column>,
    pub comment: String,
}

impl Type {
    pub fn name(&self) -> &str {
        match self {
            Type::Enum(e) => &e.name,
            Type::Composite(c) => &c.name,
        }
    }

    fn set_name(&mut self, name: &str) {
        match self {
            Type::Enum(e) => e.name = name.to_string(),
            Type::Composite(c) => c.name = name.to_string(),
        }
    }

    fn set_comment(&mut self, comment: String) {
        match self {
            Type::Enum(e) => e.comment = comment,
            Type::Composite(c) => c.comment = comment,
        }
    }
}

impl Catalog {
    /// Types share a namespace with tables: a new type may not take the
    /// name of either.
    pub(crate) fn check_type_name_free(&self, sidx: usize, name: &str) -> SqlResult<()> {
        let schema = &self.schemas[sidx];
        if schema.table_index(name, self.idents).is_some() {
            return Err(SqlError::relation_exists(name));
        }
        if schema.type_index(name, self.idents).is_some() {
            return Err(SqlError::type_exists(name));
        }
        Ok(())
    }

    fn locate_type(&self, name: &TypeName) -> SqlResult<(usize, usize)> {
        let (schema, type_name) = name.schema_and_name();
        let sidx = self.schema_for_write(&schema)?;
        let tidx = self.schemas[sidx].type_index(&type_name, self.idents).ok_or_else(|| SqlError::type_not_found(&type_name))?;
        Ok((sidx, tidx))
    }

    fn enum_mut(&mut self, name: &TypeName) -> SqlResult<&mut Enum> {
        let (sidx, tidx) = self.locate_type(name)?;
        match &mut self.schemas[sidx].types[tidx] {
            Type::Enum(e) => Ok(e),
            Type::Composite(c) => Err(SqlError::invalid("42809", format!("type \"{}\" is not an enum", c.name))),
        }
    }

    pub(crate) fn create_enum(&mut self, type_name: &TypeName, vals: &[Node]) -> SqlResult<()> {
        let (schema, name) = type_name.schema_and_name();
        let sidx = self.schema_for_write(&schema)?;
        self.check_type_name_free(sidx, &name)?;
        self.schemas[sidx].types.push(Type::Enum(Enum { name, vals: string_items(vals), comment: String::new() }));
        Ok(())
    }

    pub(crate) fn create_composite_type(&mut self, stmt: &CompositeTypeStmt) -> SqlResult<()> {
        let (schema, name) = stmt.type_name.schema_and_name();
        let sidx = self.schema_for_write(&schema)?;
        self.check_type_name_free(sidx, &name)?;
        let columns = stmt
            .cols
            .iter()
            .filter_map(|n| match n {
                Node::ColumnDef(def) => Some(Column::from_def(def)),
                _ => None,
            })
            .collect();
        self.schemas[sidx].types.push(Type::Composite(CompositeType { name, columns, comment: String::new() }));
        Ok(())
    }

    pub(crate) fn alter_type_add_value(&mut self, stmt: &AlterTypeAddValueStmt) -> SqlResult<()> {
        let e = self.enum_mut(&stmt.type_name)?;
        if e.vals.contains(&stmt.new_value) {
            if stmt.skip_if_new_val_exists {
                return Ok(());
            }
            return Err(SqlError::invalid("42710", format!("enum label \"{}\" already exists", stmt.new_value)));
        }
        match &stmt.new_val_neighbor {
            None => e.vals.push(stmt.new_value.clone()),
            Some(neighbor) => {
                let Some(idx) = e.vals.iter().position(|v| v == neighbor) else {
                    return Err(SqlError::invalid("22023", format!("\"{neighbor}\" is not an existing enum label")));
                };
                let at = if stmt.new_val_is_after { idx + 1 } else { idx };
                e.vals.insert(at, stmt.new_value.clone());
            }
        }
        Ok(())
    }

    pub(crate) fn alter_type_rename_value(&mut self, stmt: &AlterTypeRenameValueStmt) -> SqlResult<()> {
        let e = self.enum_mut(&stmt.type_name)?;
        if e.vals.contains(&stmt.new_value) {
            return Err(SqlError::invalid("42710", format!("enum label \"{}\" already exists", stmt.new_value)));
        }
        let Some(idx) = e.vals.iter().position(|v| *v == stmt.old_value) else {
            return Err(SqlError::invalid("22023", format!("\"{}\" is not an existing enum label", stmt.old_value)));
        };
        e.vals[idx] = stmt.new_value.clone();
        Ok(())
    }

    pub(crate) fn alter_type_set_schema(&mut self, stmt: &AlterTypeSetSchemaStmt) -> SqlResult<()> {
        let (sidx, tidx) = self.locate_type(&stmt.type_name)?;
        let new_idx = self.schema_for_write(&stmt.new_schema)?;
        let name = self.schemas[sidx].types[tidx].name().to_string();
        self.check_type_name_free(new_idx, &name)?;
        let moved = self.schemas[sidx].types.remove(tidx);
        self.schemas[new_idx].types.push(moved);
        Ok(())
    }

    pub(crate) fn rename_type(&mut self, stmt: &RenameTypeStmt) -> SqlResult<()> {
        let (sidx, tidx) = self.locate_type(&stmt.type_name)?;
        self.check_type_name_free(sidx, &stmt.new_name)?;
        let idents = self.idents;
        let schema = &mut self.schemas[sidx];
        let old = schema.types[tidx].name().to_string();
        schema.types[tidx].set_name(&stmt.new_name);

        // Columns refer to types by name.
        let schema_name = schema.name.clone();
        for column in schema.tables.iter_mut().flat_map(|t| t.columns.iter_mut()) {
            let (col_schema, col_type) = column.type_name.schema_and_name();
            let same_schema = col_schema.is_empty() || idents.eq(&col_schema, &schema_name);
            if same_schema && idents.eq(&col_type, &old) {
                column.type_name.name = stmt.new_name.clone();
                column.type_name.names.clear();
            }
        }
        Ok(())
    }

    pub(crate) fn drop_type(&mut self, stmt: &DropTypeStmt) -> SqlResult<()> {
        let mut doomed = Vec::with_capacity(stmt.types.len());
        for name in &stmt.types {
            match self.locate_type(name) {
                Ok((sidx, tidx)) => doomed.push((sidx, self.schemas[sidx].types[tidx].name().to_string())),
                Err(err) if err.is_not_found() && stmt.if_exists => continue,
                Err(err) => return Err(err),
            }
        }
        let idents = self.idents;
        for (sidx, name) in doomed {
            self.schemas[sidx].types.retain(|t| !idents.eq(t.name(), &name));
        }
        Ok(())
    }

    pub(crate) fn comment_on_type(&mut self, stmt: &CommentOnTypeStmt) -> SqlResult<()> {
        let (sidx, tidx) = self.locate_type(&stmt.type_name)?;
        self.schemas[sidx].types[tidx].set_comment(stmt.comment.clone().unwrap_or_default());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CreateTableStmt, ColumnDef, TableName};
    use crate::engine::Engine;

    fn mood() -> TypeName {
        TypeName::new("", "mood")
    }

    fn catalog() -> Catalog {
        let mut c = Catalog::new(Engine::PostgreSQL, "public");
        c.create_enum(&mood(), &[Node::string("sad"), Node::string("ok")]).unwrap();
        c
    }

    fn vals(c: &Catalog) -> Vec<String> {
        match c.schema("").unwrap().get_type(&mood(), c.identifier_case()).unwrap() {
            Type::Enum(e) => e.vals.clone(),
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_enum_is_type_exists() {
        let mut c = catalog();
        let err = c.create_enum(&mood(), &[]).unwrap_err();
        assert_eq!(err.code, "42710");
        assert!(err.is_exists());
    }

    #[test]
    fn enum_named_like_table_is_relation_exists() {
        let mut c = catalog();
        c.create_table(&CreateTableStmt { name: TableName::new("", "users"), ..Default::default() }).unwrap();
        assert_eq!(c.create_enum(&TypeName::new("", "users"), &[]).unwrap_err().code, "42P07");
    }

    #[test]
    fn add_and_rename_values() {
        let mut c = catalog();
        c.alter_type_add_value(&AlterTypeAddValueStmt { type_name: mood(), new_value: "happy".into(), ..Default::default() }).unwrap();
        c.alter_type_add_value(&AlterTypeAddValueStmt {
            type_name: mood(),
            new_value: "meh".into(),
            new_val_neighbor: Some("ok".into()),
            new_val_is_after: false,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(vals(&c), vec!["sad", "meh", "ok", "happy"]);

        assert!(c.alter_type_add_value(&AlterTypeAddValueStmt { type_name: mood(), new_value: "ok".into(), ..Default::default() }).is_err());
        c.alter_type_add_value(&AlterTypeAddValueStmt { type_name: mood(), new_value: "ok".into(), skip_if_new_val_exists: true, ..Default::default() })
            .unwrap();

        c.alter_type_rename_value(&AlterTypeRenameValueStmt { type_name: mood(), old_value: "meh".into(), new_value: "fine".into() }).unwrap();
        assert_eq!(vals(&c), vec!["sad", "fine", "ok", "happy"]);
    }

    #[test]
    fn rename_type_updates_columns() {
        let mut c = catalog();
        let def = ColumnDef { colname: "m".into(), type_name: Some(Node::from(mood())), ..Default::default() };
        c.create_table(&CreateTableStmt { name: TableName::new("", "t"), cols: vec![Node::from(def)], ..Default::default() }).unwrap();
        c.rename_type(&RenameTypeStmt { type_name: mood(), new_name: "feeling".into() }).unwrap();
        let table = c.get_table(&TableName::new("", "t")).unwrap();
        assert_eq!(table.columns[0].type_name.name, "feeling");
    }

    #[test]
    fn drop_type_if_exists() {
        let mut c = catalog();
        let drop = |names: &[&str], if_exists| DropTypeStmt { if_exists, types: names.iter().map(|n| TypeName::new("", n)).collect() };
        assert!(c.drop_type(&drop(&["mood", "nope"], false)).unwrap_err().is_not_found());
        assert_eq!(c.schema("").unwrap().types.len(), 1);
        c.drop_type(&drop(&["mood", "nope"], true)).unwrap();
        assert!(c.schema("").unwrap().types.is_empty());
    }
}
