//! In-memory schema model and DDL replay.
//!
//! A [`Catalog`] starts out with an empty default schema plus a read-only
//! schema of the dialect's built-in functions. [`Catalog::build`] then replays
//! DDL statements in order. Each statement either applies completely or not
//! at all; the first failing statement ends the build.

mod builtins;
mod func;
mod schema;
mod table;
mod types;

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::ast::{AlterTableType, Node, Statement, TableName};
use crate::config::Config;
use crate::engine::{Engine, IdentifierCase};
use crate::error::{SqlError, SqlResult};
use crate::Result;

pub use func::{Argument, Function};
pub use schema::Schema;
pub use table::{Column, Table};
pub use types::{CompositeType, Enum, Type};

/// Computes the result columns of a query, for `CREATE VIEW` and
/// `CREATE TABLE ... AS`. Type inference lives outside this crate.
pub trait OutputColumns {
    fn output_columns(&self, catalog: &Catalog, query: &Node) -> Result<Vec<Column>>;
}

/// The schema state of one compilation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub name: String,
    pub comment: String,
    pub default_schema: String,
    pub schemas: Vec<Schema>,
    /// Schemas searched, in order, for unqualified function names
    pub search_path: Vec<String>,
    pub extensions: BTreeSet<String>,
    pub engine: Engine,
    #[serde(skip)]
    idents: IdentifierCase,
}

impl Catalog {
    /// A catalog holding an empty `default_schema` and the engine's
    /// built-in functions.
    pub fn new(engine: Engine, default_schema: &str) -> Self {
        let builtin = builtins::schema(engine);
        let search_path = vec![builtin.name.clone()];
        Catalog {
            name: String::new(),
            comment: String::new(),
            default_schema: default_schema.to_string(),
            schemas: vec![Schema::new(default_schema), builtin],
            search_path,
            extensions: BTreeSet::new(),
            engine,
            idents: engine.identifier_case(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut catalog = Catalog::new(config.engine, config.default_schema());
        catalog.idents = config.identifier_case();
        catalog.search_path.extend(config.search_path.iter().cloned());
        catalog
    }

    pub fn identifier_case(&self) -> IdentifierCase {
        self.idents
    }

    /// Replays DDL statements in order, stopping at the first error.
    pub fn build(&mut self, stmts: &[Statement]) -> Result<()> {
        self.build_with(stmts, None)
    }

    /// Like [`Catalog::build`], registering views and `CREATE TABLE ... AS`
    /// results through `columns`.
    pub fn build_with(&mut self, stmts: &[Statement], columns: Option<&dyn OutputColumns>) -> Result<()> {
        for stmt in stmts {
            let location = stmt.raw.stmt_location;
            match self.apply_statement(&stmt.raw.stmt, columns) {
                Ok(()) => {}
                Err(crate::Error::Sql(err)) => return Err(err.or_at(location).into()),
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn apply_statement(&mut self, stmt: &Node, columns: Option<&dyn OutputColumns>) -> Result<()> {
        match stmt {
            Node::AlterTableStmt(n) => {
                if !n.cmds.iter().any(is_modeled_alter_cmd) {
                    warn!(table = %n.table, "alter table has no supported sub-commands, skipping");
                    return Ok(());
                }
                self.alter_table(n)?
            }
            Node::AlterTableSetSchemaStmt(n) => self.alter_table_set_schema(n)?,
            Node::AlterTypeAddValueStmt(n) => self.alter_type_add_value(n)?,
            Node::AlterTypeRenameValueStmt(n) => self.alter_type_rename_value(n)?,
            Node::AlterTypeSetSchemaStmt(n) => self.alter_type_set_schema(n)?,
            Node::CommentOnColumnStmt(n) => self.comment_on_column(n)?,
            Node::CommentOnSchemaStmt(n) => self.comment_on_schema(n)?,
            Node::CommentOnTableStmt(n) => self.comment_on_table(n)?,
            Node::CommentOnTypeStmt(n) => self.comment_on_type(n)?,
            Node::CommentOnViewStmt(n) => self.comment_on_view(n)?,
            Node::CompositeTypeStmt(n) => self.create_composite_type(n)?,
            Node::CreateEnumStmt(n) => self.create_enum(&n.type_name, &n.vals)?,
            Node::CreateExtensionStmt(n) => self.create_extension(n),
            Node::CreateFunctionStmt(n) => self.create_function(n)?,
            Node::CreateSchemaStmt(n) => self.create_schema(n)?,
            Node::CreateTableStmt(n) => self.create_table(n)?,
            Node::CreateTableAsStmt(n) => match columns {
                Some(columns) => self.create_table_as(n, columns)?,
                None => {
                    trace!("no output column generator, skipping create table as");
                    return Ok(());
                }
            },
            Node::ViewStmt(n) => match columns {
                Some(columns) => self.create_view(n, columns)?,
                None => {
                    trace!("no output column generator, skipping create view");
                    return Ok(());
                }
            },
            Node::DropFunctionStmt(n) => self.drop_function(n)?,
            Node::DropSchemaStmt(n) => self.drop_schema(n)?,
            Node::DropTableStmt(n) => self.drop_table(n)?,
            Node::DropTypeStmt(n) => self.drop_type(n)?,
            Node::RenameColumnStmt(n) => self.rename_column(n)?,
            Node::RenameTableStmt(n) => self.rename_table(n)?,
            Node::RenameTypeStmt(n) => self.rename_type(n)?,
            Node::IndexStmt(_)
            | Node::CreateSeqStmt(_)
            | Node::AlterSeqStmt(_)
            | Node::CreateTrigStmt(_)
            | Node::RuleStmt(_)
            | Node::CreateDomainStmt(_)
            | Node::RefreshMatViewStmt(_)
            | Node::DropStmt(_) => {
                warn!(kind = stmt.kind(), "schema statement is not modeled by the catalog, skipping");
                return Ok(());
            }
            other => {
                trace!(kind = other.kind(), "statement has no catalog effect");
                return Ok(());
            }
        }
        debug!(kind = stmt.kind(), "applied schema statement");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Schema resolution
    // ------------------------------------------------------------------------

    /// `name`, or the default schema when `name` is empty.
    pub(crate) fn schema_name<'a>(&'a self, name: &'a str) -> &'a str {
        if name.is_empty() {
            &self.default_schema
        } else {
            name
        }
    }

    fn schema_index(&self, name: &str) -> SqlResult<usize> {
        self.schemas
            .iter()
            .position(|s| self.idents.eq(&s.name, name))
            .ok_or_else(|| SqlError::schema_not_found(name))
    }

    pub fn schema(&self, name: &str) -> SqlResult<&Schema> {
        let idx = self.schema_index(self.schema_name(name))?;
        Ok(&self.schemas[idx])
    }

    /// The schema a DDL statement may modify. Built-in schemas are read-only.
    fn schema_for_write(&self, name: &str) -> SqlResult<usize> {
        let name = self.schema_name(name);
        let idx = self.schema_index(name)?;
        if self.schemas[idx].builtin {
            return Err(SqlError::permission_denied(name));
        }
        Ok(idx)
    }

    fn locate_table(&self, name: &TableName) -> SqlResult<(usize, usize)> {
        let sidx = self.schema_index(self.schema_name(&name.schema))?;
        let tidx = self.schemas[sidx].table_index(&name.name, self.idents).ok_or_else(|| SqlError::relation_not_found(&name.name))?;
        Ok((sidx, tidx))
    }

    /// Looks up a table, resolving an unqualified name against the default
    /// schema.
    pub fn get_table(&self, name: &TableName) -> SqlResult<&Table> {
        let (sidx, tidx) = self.locate_table(name)?;
        Ok(&self.schemas[sidx].tables[tidx])
    }

    /// Dumps the catalog as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        crate::ast::to_json(self)
    }
}

fn is_modeled_alter_cmd(cmd: &Node) -> bool {
    matches!(
        cmd,
        Node::AlterTableCmd(c) if matches!(
            c.subtype,
            AlterTableType::AddColumn
                | AlterTableType::AlterColumnType
                | AlterTableType::ColumnDefault
                | AlterTableType::DropColumn
                | AlterTableType::DropNotNull
                | AlterTableType::SetNotNull
        )
    )
}

/// String items of a list of nodes, ignoring anything else.
pub(crate) fn string_items(nodes: &[Node]) -> Vec<String> {
    nodes.iter().filter_map(|n| n.as_str().map(str::to_string)).collect()
}
