use serde::Serialize;

use crate::ast::{CommentOnSchemaStmt, CreateExtensionStmt, CreateSchemaStmt, DropSchemaStmt, TypeName};
use crate::catalog::func::Function;
use crate::catalog::table::Table;
use crate::catalog::types::Type;
use crate::catalog::Catalog;
use crate::engine::IdentifierCase;
use crate::error::{SqlError, SqlResult};

/// A namespace of tables, types and functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub name: String,
    pub tables: Vec<Table>,
    pub types: Vec<Type>,
    pub funcs: Vec<Function>,
    pub comment: String,
    /// Built-in schemas are never modified by DDL.
    pub builtin: bool,
}

impl Schema {
    pub fn new(name: &str) -> Self {
        Schema { name: name.to_string(), ..Default::default() }
    }

    pub(crate) fn table_index(&self, name: &str, idents: IdentifierCase) -> Option<usize> {
        self.tables.iter().position(|t| idents.eq(&t.rel.name, name))
    }

    pub(crate) fn type_index(&self, name: &str, idents: IdentifierCase) -> Option<usize> {
        self.types.iter().position(|t| idents.eq(t.name(), name))
    }

    pub fn table(&self, name: &str, idents: IdentifierCase) -> Option<&Table> {
        self.table_index(name, idents).map(|i| &self.tables[i])
    }

    pub fn get_type(&self, name: &TypeName, idents: IdentifierCase) -> SqlResult<&Type> {
        let (_, type_name) = name.schema_and_name();
        self.type_index(&type_name, idents).map(|i| &self.types[i]).ok_or_else(|| SqlError::type_not_found(&type_name))
    }

    /// Functions whose name matches `name`, ignoring case.
    pub fn funcs_named(&self, name: &str) -> impl Iterator<Item = &Function> + '_ {
        let name = name.to_owned();
        self.funcs.iter().filter(move |f| f.name.eq_ignore_ascii_case(&name))
    }
}

impl Catalog {
    pub(crate) fn create_schema(&mut self, stmt: &CreateSchemaStmt) -> SqlResult<()> {
        if stmt.name.is_empty() {
            return Err(SqlError::invalid("42601", "create schema: empty name"));
        }
        if self.schema_index(&stmt.name).is_ok() {
            // Creating the default schema again is a no-op.
            if self.idents.eq(&stmt.name, &self.default_schema) || stmt.if_not_exists {
                return Ok(());
            }
            return Err(SqlError::schema_exists(&stmt.name));
        }
        self.schemas.push(Schema::new(&stmt.name));
        Ok(())
    }

    pub(crate) fn drop_schema(&mut self, stmt: &DropSchemaStmt) -> SqlResult<()> {
        let mut doomed = Vec::with_capacity(stmt.schemas.len());
        for name in &stmt.schemas {
            match self.schema_index(name) {
                Ok(idx) if self.schemas[idx].builtin => return Err(SqlError::permission_denied(name)),
                Ok(idx) => doomed.push(self.schemas[idx].name.clone()),
                Err(_) if stmt.missing_ok => continue,
                Err(err) => return Err(err),
            }
        }
        let idents = self.idents;
        self.schemas.retain(|s| !doomed.iter().any(|d| idents.eq(d, &s.name)));
        Ok(())
    }

    pub(crate) fn comment_on_schema(&mut self, stmt: &CommentOnSchemaStmt) -> SqlResult<()> {
        let idx = self.schema_for_write(&stmt.schema)?;
        self.schemas[idx].comment = stmt.comment.clone().unwrap_or_default();
        Ok(())
    }

    pub(crate) fn create_extension(&mut self, stmt: &CreateExtensionStmt) {
        self.extensions.insert(stmt.extname.clone());
    }
}
