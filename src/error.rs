use serde::Serialize;
use thiserror::Error;

/// Sentinel classification shared by catalog and validation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Exists,
    NotFound,
    NotUnique,
    Invalid,
}

impl ErrorKind {
    fn suffix(self) -> Option<&'static str> {
        match self {
            ErrorKind::Exists => Some("already exists"),
            ErrorKind::NotFound => Some("does not exist"),
            ErrorKind::NotUnique => Some("is not unique"),
            ErrorKind::Invalid => None,
        }
    }
}

fn with_suffix(message: &str, kind: &ErrorKind) -> String {
    match kind.suffix() {
        Some(suffix) => format!("{message} {suffix}"),
        None => message.to_string(),
    }
}

/// A diagnostic about user SQL, renderable as a compiler-style error.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{}", with_suffix(.message, .kind))]
pub struct SqlError {
    pub kind: ErrorKind,
    /// Stable SQLSTATE-like code
    pub code: &'static str,
    pub message: String,
    /// Byte offset into the query or schema source
    pub location: Option<i32>,
    /// 1-based line, filled in by [`SqlError::with_position`]
    pub line: usize,
    /// 1-based column, filled in by [`SqlError::with_position`]
    pub column: usize,
}

impl SqlError {
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        SqlError { kind, code, message: message.into(), location: None, line: 0, column: 0 }
    }

    /// A validator error with no sentinel kind.
    pub fn invalid(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invalid, code, message)
    }

    pub fn at(mut self, location: i32) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets the location unless one is already present.
    pub fn or_at(mut self, location: i32) -> Self {
        if self.location.is_none() {
            self.location = Some(location);
        }
        self
    }

    /// Resolves `location` into a line and column of `source`.
    pub fn with_position(mut self, source: &str) -> Self {
        let Some(location) = self.location else {
            return self;
        };
        let offset = (location.max(0) as usize).min(source.len());
        let mut line = 1;
        let mut column = 1;
        for (i, c) in source.char_indices() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        self.line = line;
        self.column = column;
        self
    }

    pub fn column_exists(rel: &str, name: &str) -> Self {
        Self::new(ErrorKind::Exists, "42701", format!("column \"{name}\" of relation \"{rel}\""))
    }

    pub fn column_not_found(rel: &str, name: &str) -> Self {
        Self::new(ErrorKind::NotFound, "42703", format!("column \"{name}\" of relation \"{rel}\""))
    }

    pub fn relation_exists(rel: &str) -> Self {
        Self::new(ErrorKind::Exists, "42P07", format!("relation \"{rel}\""))
    }

    pub fn relation_not_found(rel: &str) -> Self {
        Self::new(ErrorKind::NotFound, "42P01", format!("relation \"{rel}\""))
    }

    pub fn schema_exists(name: &str) -> Self {
        Self::new(ErrorKind::Exists, "42P06", format!("schema \"{name}\""))
    }

    pub fn schema_not_found(name: &str) -> Self {
        Self::new(ErrorKind::NotFound, "3F000", format!("schema \"{name}\""))
    }

    pub fn type_exists(name: &str) -> Self {
        Self::new(ErrorKind::Exists, "42710", format!("type \"{name}\""))
    }

    pub fn type_not_found(name: &str) -> Self {
        Self::new(ErrorKind::NotFound, "42704", format!("type \"{name}\""))
    }

    pub fn function_not_found(name: &str) -> Self {
        Self::new(ErrorKind::NotFound, "42704", format!("function \"{name}\""))
    }

    pub fn function_not_unique(name: &str) -> Self {
        Self::new(ErrorKind::NotUnique, "42725", format!("function name \"{name}\""))
    }

    pub fn permission_denied(schema: &str) -> Self {
        Self::invalid("42501", format!("permission denied for schema \"{schema}\""))
    }

    pub fn is_exists(&self) -> bool {
        self.kind == ErrorKind::Exists
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_not_unique(&self) -> bool {
        self.kind == ErrorKind::NotUnique
    }
}

/// Error structure representing the basic error scenarios for `sqlc_core`.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Sql(#[from] SqlError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid edit: {0}")]
    Edit(String),
    #[error("Invalid query metadata: {0}")]
    Metadata(String),
    #[error("Invalid statement: {0}")]
    Statement(String),
}

impl Error {
    /// The structured diagnostic, when this error came from SQL analysis.
    pub fn sql(&self) -> Option<&SqlError> {
        match self {
            Error::Sql(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

pub type SqlResult<T> = core::result::Result<T, SqlError>;
