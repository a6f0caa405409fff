use serde::{Deserialize, Serialize};

use crate::engine::{Engine, IdentifierCase};
use crate::{Error, Result};

/// Settings for one compilation run.
///
/// ```rust
/// use sqlc_core::{Config, Engine};
///
/// let config = Config::from_json(r#"{"engine": "sqlite"}"#).unwrap();
/// assert_eq!(config.engine, Engine::SQLite);
/// assert_eq!(config.default_schema(), "main");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub engine: Engine,
    #[serde(default)]
    pub default_schema: Option<String>,
    #[serde(default)]
    pub identifier_case: Option<IdentifierCase>,
    /// Extra schemas searched when resolving unqualified function names
    #[serde(default)]
    pub search_path: Vec<String>,
}

impl Config {
    pub fn new(engine: Engine) -> Self {
        Config { engine, ..Default::default() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        if matches!(config.default_schema.as_deref(), Some("")) {
            return Err(Error::Config("default_schema must not be empty".into()));
        }
        Ok(config)
    }

    pub fn default_schema(&self) -> &str {
        self.default_schema.as_deref().unwrap_or_else(|| self.engine.default_schema())
    }

    pub fn identifier_case(&self) -> IdentifierCase {
        self.identifier_case.unwrap_or_else(|| self.engine.identifier_case())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_defaults_apply() {
        let config = Config::from_json(r#"{"engine": "mysql"}"#).unwrap();
        assert_eq!(config.default_schema(), "public");
        assert_eq!(config.identifier_case(), IdentifierCase::Insensitive);
    }

    #[test]
    fn explicit_settings_win() {
        let config = Config::from_json(r#"{"engine": "postgresql", "default_schema": "app", "identifier_case": "insensitive", "search_path": ["ext"]}"#).unwrap();
        assert_eq!(config.default_schema(), "app");
        assert_eq!(config.identifier_case(), IdentifierCase::Insensitive);
        assert_eq!(config.search_path, vec!["ext".to_string()]);
    }

    #[test]
    fn rejects_unknown_fields_and_empty_schema() {
        assert!(matches!(Config::from_json(r#"{"dialect": "mysql"}"#), Err(Error::Config(_))));
        assert!(matches!(Config::from_json(r#"{"default_schema": ""}"#), Err(Error::Config(_))));
    }
}
