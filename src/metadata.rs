//! Query annotations such as `-- name: GetAuthor :one`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::engine::CommentSyntax;
use crate::{Error, Result};

/// The result shape a query promises its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cmd {
    One,
    Many,
    Exec,
    ExecRows,
    ExecResult,
    ExecLastId,
    CopyFrom,
    BatchExec,
    BatchMany,
    BatchOne,
}

const ALL: [Cmd; 10] = [
    Cmd::One,
    Cmd::Many,
    Cmd::Exec,
    Cmd::ExecRows,
    Cmd::ExecResult,
    Cmd::ExecLastId,
    Cmd::CopyFrom,
    Cmd::BatchExec,
    Cmd::BatchMany,
    Cmd::BatchOne,
];

impl Cmd {
    pub fn as_str(self) -> &'static str {
        match self {
            Cmd::One => ":one",
            Cmd::Many => ":many",
            Cmd::Exec => ":exec",
            Cmd::ExecRows => ":execrows",
            Cmd::ExecResult => ":execresult",
            Cmd::ExecLastId => ":execlastid",
            Cmd::CopyFrom => ":copyfrom",
            Cmd::BatchExec => ":batchexec",
            Cmd::BatchMany => ":batchmany",
            Cmd::BatchOne => ":batchone",
        }
    }

    /// Whether the caller expects rows back.
    pub fn returns_rows(self) -> bool {
        matches!(self, Cmd::One | Cmd::Many | Cmd::BatchOne | Cmd::BatchMany)
    }

    pub fn is_batch(self) -> bool {
        matches!(self, Cmd::BatchExec | Cmd::BatchMany | Cmd::BatchOne)
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cmd {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ALL.into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::Metadata(format!("invalid query type: {s}")))
    }
}

/// Query names become identifiers in generated code.
fn validate_query_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => (first.is_alphabetic() || first == '_') && chars.all(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    };
    if !valid {
        return Err(Error::Metadata(format!("invalid query name {name:?}")));
    }
    Ok(())
}

/// Finds the `name: Foo :cmd` annotation in a query's comments.
///
/// Returns `None` when no comment carries an annotation. Comment styles the
/// dialect does not allow are ignored.
///
/// ```rust
/// use sqlc_core::metadata::{parse_query_name_and_type, Cmd};
/// use sqlc_core::CommentSyntax;
///
/// let sql = "-- name: GetAuthor :one\nSELECT * FROM authors WHERE id = $1";
/// let parsed = parse_query_name_and_type(sql, CommentSyntax::default()).unwrap();
/// assert_eq!(parsed, Some(("GetAuthor".to_string(), Cmd::One)));
/// ```
pub fn parse_query_name_and_type(sql: &str, syntax: CommentSyntax) -> Result<Option<(String, Cmd)>> {
    for line in sql.lines() {
        let prefix = if line.starts_with("--") && syntax.dash {
            "--"
        } else if line.starts_with("/*") && syntax.slash_star {
            "/*"
        } else if line.starts_with('#') && syntax.hash {
            "#"
        } else {
            continue;
        };
        let rest = &line[prefix.len()..];
        if !rest.trim_start().starts_with("name") || !rest.contains(':') {
            continue;
        }
        if !rest.starts_with(" name: ") {
            return Err(Error::Metadata(format!("invalid metadata: {line}")));
        }

        let mut parts: Vec<&str> = line.trim().split(' ').collect();
        if prefix == "/*" && parts.last() == Some(&"*/") {
            parts.pop();
        }
        match parts.len() {
            3 => {
                let known = ALL.iter().map(|c| format!("'{c}'")).collect::<Vec<_>>().join(", ");
                return Err(Error::Metadata(format!("missing query type [{known}]: {line}")));
            }
            4 => {}
            _ => return Err(Error::Metadata(format!("invalid query comment: {line}"))),
        }
        let name = parts[2];
        let cmd: Cmd = parts[3].trim().parse()?;
        validate_query_name(name)?;
        return Ok(Some((name.to_string(), cmd)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STYLES: CommentSyntax = CommentSyntax { dash: true, slash_star: true, hash: true };

    #[test]
    fn comment_styles() {
        for sql in ["-- name: ListUsers :many", "/* name: ListUsers :many */", "# name: ListUsers :many"] {
            assert_eq!(parse_query_name_and_type(sql, ALL_STYLES).unwrap(), Some(("ListUsers".into(), Cmd::Many)), "{sql}");
        }
        assert_eq!(parse_query_name_and_type("# name: ListUsers :many", CommentSyntax::default()).unwrap(), None);
    }

    #[test]
    fn rejects_malformed_annotations() {
        let err = |sql: &str| match parse_query_name_and_type(sql, ALL_STYLES).unwrap_err() {
            Error::Metadata(m) => m,
            other => panic!("unexpected error {other:?}"),
        };
        assert!(err("-- name: Foo").starts_with("missing query type"));
        assert_eq!(err("-- name: Foo :two"), "invalid query type: :two");
        assert_eq!(err("--name: Foo :one"), "invalid metadata: --name: Foo :one");
        assert_eq!(err("-- name: 1Foo :one"), "invalid query name \"1Foo\"");
        assert!(err("-- name: Foo :one extra").starts_with("invalid query comment"));
    }

    #[test]
    fn unannotated_queries() {
        assert_eq!(parse_query_name_and_type("SELECT 1;\n-- just a comment", ALL_STYLES).unwrap(), None);
    }
}
