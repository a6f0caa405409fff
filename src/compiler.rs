use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace};

use crate::ast::{Node, RawStmt, Statement};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::engine::Parser;
use crate::error::SqlError;
use crate::metadata::{parse_query_name_and_type, Cmd};
use crate::named::ParamSet;
use crate::rewrite::{embeds, named_parameters, EmbedSet};
use crate::source::{mutate, pluck};
use crate::{validate, Error, Result};

/// A validated query, rewritten to the dialect's positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedQuery {
    pub name: String,
    pub cmd: Cmd,
    pub stmt: RawStmt,
    pub params: ParamSet,
    pub embeds: EmbedSet,
    /// The query text with every marker replaced
    pub sql: String,
}

/// Ties the catalog, the rewrite passes and the validators together.
#[derive(Debug, Clone)]
pub struct Compiler {
    pub config: Config,
    pub catalog: Catalog,
}

impl Compiler {
    pub fn new(config: Config) -> Self {
        let catalog = Catalog::from_config(&config);
        Compiler { config, catalog }
    }

    /// Parses `schema_sql` and replays it into the catalog.
    pub fn parse_catalog(&mut self, parser: &dyn Parser, schema_sql: &str) -> Result<()> {
        let stmts = parser.parse(schema_sql).map_err(|e| positioned(e, schema_sql))?;
        debug!(statements = stmts.len(), "building catalog");
        self.catalog.build(&stmts).map_err(|e| positioned(e, schema_sql))
    }

    /// Parses every query in `source` and prepares the annotated ones.
    pub fn parse_queries(&self, parser: &dyn Parser, source: &str) -> Result<Vec<PreparedQuery>> {
        let stmts = parser.parse(source).map_err(|e| positioned(e, source))?;
        let mut names = HashSet::new();
        let mut queries = vec![];
        for stmt in &stmts {
            let Some(query) = self.prepare_query(stmt, source)? else {
                continue;
            };
            if !names.insert(query.name.clone()) {
                return Err(Error::Metadata(format!("duplicate query name: {}", query.name)));
            }
            queries.push(query);
        }
        Ok(queries)
    }

    /// Runs one statement through validation and parameter rewriting.
    ///
    /// Returns `None` for statements without a `name:` annotation.
    pub fn prepare_query(&self, stmt: &Statement, source: &str) -> Result<Option<PreparedQuery>> {
        self.prepare(stmt, source).map_err(|e| positioned(e, source))
    }

    fn prepare(&self, stmt: &Statement, source: &str) -> Result<Option<PreparedQuery>> {
        let raw = &stmt.raw;
        validate::sqlc_functions(&raw.stmt)?;

        let raw_sql = pluck(source, raw.stmt_location, raw.stmt_len)?;
        if raw_sql.trim().is_empty() {
            return Err(Error::Statement("missing semicolon at end of file".into()));
        }
        let syntax = self.config.engine.comment_syntax();
        let Some((name, cmd)) = parse_query_name_and_type(raw_sql, syntax)? else {
            trace!(location = raw.stmt_location, "statement has no query annotation, skipping");
            return Ok(None);
        };

        validate::cmd(&raw.stmt, &name, cmd)?;
        validate::param_style(&raw.stmt)?;
        validate::in_list(&raw.stmt)?;

        let (used, dollar) = validate::param_ref(&raw.stmt)?;
        let (raw, params, edits) = named_parameters(self.config.engine, raw.clone(), &used, dollar);
        let (raw, embeds) = embeds(raw);

        validate::func_call(&self.catalog, &raw.stmt)?;
        match &raw.stmt {
            Node::InsertStmt(insert) => {
                validate::insert_stmt(insert)?;
                validate::on_conflict_clause(&self.catalog, insert)?;
            }
            Node::CallStmt(_)
            | Node::SelectStmt(_)
            | Node::DeleteStmt(_)
            | Node::DoStmt(_)
            | Node::ListenStmt(_)
            | Node::NotifyStmt(_)
            | Node::TruncateStmt(_)
            | Node::UpdateStmt(_)
            | Node::RefreshMatViewStmt(_) => {}
            other => return Err(Error::Statement(format!("unsupported statement type: {}", other.kind()))),
        }

        let sql = mutate(raw_sql, &edits)?;
        debug!(query = %name, cmd = %cmd, params = edits.len(), "prepared query");
        Ok(Some(PreparedQuery { name, cmd, stmt: raw, params, embeds, sql }))
    }
}

fn positioned(err: Error, source: &str) -> Error {
    match err {
        Error::Sql(err) => Error::Sql(SqlError::with_position(err, source)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AExpr, AStar, ColumnDef, ColumnRef, CreateTableStmt, FuncCall, FuncName, ResTarget, SelectStmt, TableName, TypeName};
    use crate::Engine;

    struct Prebuilt(Vec<Statement>);

    impl Parser for Prebuilt {
        fn parse(&self, _sql: &str) -> Result<Vec<Statement>> {
            Ok(self.0.clone())
        }
    }

    const QUERY: &str = "-- name: GetAuthor :one\nSELECT * FROM authors WHERE id = sqlc.arg(id);";

    fn get_author(arg: &str) -> Statement {
        let star = ColumnRef { fields: vec![Node::AStar(AStar)], location: 31 };
        let marker = FuncCall { func: FuncName::new("sqlc", arg), args: vec![Node::column_ref(&["id"], 66)], location: 57, ..Default::default() };
        let select = SelectStmt {
            target_list: vec![Node::from(ResTarget { val: Some(Node::from(star)), location: 31, ..Default::default() })],
            from_clause: vec![Node::range_var("", "authors", 38)],
            where_clause: Some(Node::from(AExpr {
                name: vec![Node::string("=")],
                lexpr: Some(Node::column_ref(&["id"], 52)),
                rexpr: Some(Node::from(marker)),
                location: 55,
                ..Default::default()
            })),
            ..Default::default()
        };
        Statement::new(Node::from(select), 0, 69)
    }

    fn authors() -> Statement {
        let id = ColumnDef { colname: "id".into(), type_name: Some(Node::from(TypeName::new("", "bigint"))), primary_key: true, ..Default::default() };
        let create = CreateTableStmt { name: TableName::new("", "authors"), cols: vec![Node::from(id)], ..Default::default() };
        Statement::new(Node::from(create), 0, 0)
    }

    #[test]
    fn prepares_annotated_query() {
        let mut compiler = Compiler::new(Config::new(Engine::PostgreSQL));
        compiler.parse_catalog(&Prebuilt(vec![authors()]), "CREATE TABLE authors (id bigint primary key);").unwrap();

        let query = compiler.prepare_query(&get_author("arg"), QUERY).unwrap().unwrap();
        assert_eq!(query.name, "GetAuthor");
        assert_eq!(query.cmd, Cmd::One);
        assert_eq!(query.sql, "-- name: GetAuthor :one\nSELECT * FROM authors WHERE id = $1");
        assert_eq!(query.params.name_for(1), Some("id"));
    }

    #[test]
    fn unknown_marker_is_positioned() {
        let compiler = Compiler::new(Config::new(Engine::PostgreSQL));
        let err = compiler.prepare_query(&get_author("args"), QUERY).unwrap_err();
        let sql = err.sql().unwrap();
        assert!(sql.is_not_found());
        assert_eq!((sql.line, sql.column), (2, 34));
    }

    #[test]
    fn unannotated_statements_are_skipped() {
        let compiler = Compiler::new(Config::new(Engine::PostgreSQL));
        let source = "SELECT * FROM authors WHERE id = sqlc.arg(id);";
        let stmt = Statement::new(Node::from(SelectStmt::default()), 0, 45);
        assert!(compiler.prepare_query(&stmt, source).unwrap().is_none());
    }

    #[test]
    fn duplicate_query_names() {
        let compiler = Compiler::new(Config::new(Engine::PostgreSQL));
        let err = compiler.parse_queries(&Prebuilt(vec![get_author("arg"), get_author("arg")]), QUERY).unwrap_err();
        assert_eq!(err, Error::Metadata("duplicate query name: GetAuthor".into()));
    }

    #[test]
    fn schema_statements_are_not_queries() {
        let compiler = Compiler::new(Config::new(Engine::PostgreSQL));
        let source = "-- name: Create :exec\nCREATE TABLE t (id int);";
        let stmt = Statement { raw: RawStmt { stmt: authors().raw.stmt, stmt_location: 0, stmt_len: 45 } };
        let err = compiler.prepare_query(&stmt, source).unwrap_err();
        assert_eq!(err, Error::Statement("unsupported statement type: CreateTableStmt".into()));
    }
}
