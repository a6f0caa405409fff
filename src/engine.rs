//! Dialect selection and the boundary with dialect adapters.

use serde::{Deserialize, Serialize};

use crate::ast::Statement;
use crate::Result;

/// The SQL dialect a compilation run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    #[serde(alias = "postgres")]
    PostgreSQL,
    MySQL,
    SQLite,
}

impl Engine {
    pub fn default_schema(self) -> &'static str {
        match self {
            Engine::PostgreSQL | Engine::MySQL => "public",
            Engine::SQLite => "main",
        }
    }

    /// Schema holding the dialect's built-in functions.
    pub fn builtin_schema(self) -> &'static str {
        match self {
            Engine::PostgreSQL => "pg_catalog",
            Engine::MySQL => "mysql",
            Engine::SQLite => "sqlite_builtin",
        }
    }

    pub fn identifier_case(self) -> IdentifierCase {
        match self {
            Engine::PostgreSQL => IdentifierCase::Sensitive,
            Engine::MySQL | Engine::SQLite => IdentifierCase::Insensitive,
        }
    }

    /// Whether a repeated named parameter can share one positional slot.
    pub fn supports_named_reuse(self) -> bool {
        !matches!(self, Engine::MySQL)
    }

    pub fn comment_syntax(self) -> CommentSyntax {
        match self {
            Engine::PostgreSQL => CommentSyntax { dash: true, slash_star: false, hash: false },
            Engine::MySQL => CommentSyntax { dash: true, slash_star: true, hash: true },
            Engine::SQLite => CommentSyntax { dash: true, slash_star: true, hash: false },
        }
    }
}

/// How identifiers are compared when resolving catalog names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierCase {
    #[default]
    Sensitive,
    Insensitive,
}

impl IdentifierCase {
    pub fn eq(self, a: &str, b: &str) -> bool {
        match self {
            IdentifierCase::Sensitive => a == b,
            IdentifierCase::Insensitive => a.eq_ignore_ascii_case(b),
        }
    }

    /// Canonical form used as a lookup key.
    pub fn fold(self, name: &str) -> String {
        match self {
            IdentifierCase::Sensitive => name.to_string(),
            IdentifierCase::Insensitive => name.to_ascii_lowercase(),
        }
    }
}

/// Comment styles that may carry a query annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommentSyntax {
    pub dash: bool,
    pub slash_star: bool,
    pub hash: bool,
}

impl Default for CommentSyntax {
    fn default() -> Self {
        CommentSyntax { dash: true, slash_star: false, hash: false }
    }
}

/// A dialect adapter turning SQL text into dialect-neutral statements.
pub trait Parser {
    fn parse(&self, sql: &str) -> Result<Vec<Statement>>;

    fn comment_syntax(&self) -> CommentSyntax {
        CommentSyntax::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_defaults() {
        assert_eq!(Engine::PostgreSQL.default_schema(), "public");
        assert_eq!(Engine::SQLite.default_schema(), "main");
        assert!(Engine::MySQL.identifier_case().eq("Users", "users"));
        assert!(!Engine::PostgreSQL.identifier_case().eq("Users", "users"));
        assert!(!Engine::MySQL.supports_named_reuse());
    }

    #[test]
    fn fold_lowercases_only_when_insensitive() {
        assert_eq!(IdentifierCase::Insensitive.fold("Foo"), "foo");
        assert_eq!(IdentifierCase::Sensitive.fold("Foo"), "Foo");
    }
}
