//! JSON enum definitions.
//!
//! An alternative to scanning sources: a file such as `enums.json`
//!
//! ```json
//! {
//!   "package": "enums",
//!   "enums": [
//!     { "name": "Role", "plural": "Roles", "values": { "Admin": "admin", "User": "user" } }
//!   ]
//! }
//! ```
//!
//! Keys of `values` are constant names, entries keep file order.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{EnumDef, EnumValue};

/// Errors while loading an enum config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config does not name a package")]
    MissingPackage,

    #[error("enum at position {position} has no name")]
    MissingName { position: usize },

    #[error("enum {name} has no values")]
    EmptyEnum { name: String },
}

/// One enum entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumEntry {
    pub name: String,
    #[serde(default)]
    pub plural: Option<String>,
    #[serde(default)]
    pub values: IndexMap<String, String>,
}

/// The whole payload.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumConfig {
    pub package: String,
    #[serde(default)]
    pub enums: Vec<EnumEntry>,
}

impl EnumConfig {
    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EnumConfig = serde_json::from_str(json)?;
        if config.package.trim().is_empty() {
            return Err(ConfigError::MissingPackage);
        }
        Ok(config)
    }

    /// Convert every entry into an [`EnumDef`], in file order.
    pub fn enum_defs(&self) -> Result<Vec<EnumDef>, ConfigError> {
        self.enums
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.to_enum_def(i + 1))
            .collect()
    }
}

impl EnumEntry {
    fn to_enum_def(&self, position: usize) -> Result<EnumDef, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::MissingName { position });
        }
        if self.values.is_empty() {
            return Err(ConfigError::EmptyEnum {
                name: self.name.clone(),
            });
        }

        let values = self
            .values
            .iter()
            .map(|(constant, value)| EnumValue::new(constant.as_str(), value.as_str()))
            .collect();

        let def = EnumDef::new(self.name.as_str(), values);
        Ok(match &self.plural {
            Some(plural) if !plural.is_empty() => def.with_plural(plural.as_str()),
            _ => def,
        })
    }
}

/// Read and parse a config file.
pub fn load_config(path: &Path) -> Result<EnumConfig, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded enum config");
    EnumConfig::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "package": "enums",
        "enums": [
            {
                "name": "Role",
                "plural": "Roles",
                "values": { "Guest": "guest", "Admin": "admin", "User": "user" }
            },
            { "name": "Status", "values": { "InProgress": "in_progress" } }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = EnumConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.package, "enums");

        let defs = config.enum_defs().unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].plural_name(), "Roles");
        assert_eq!(defs[1].plural_name(), "Statuses");
        assert_eq!(defs[1].values, vec![EnumValue::new("InProgress", "in_progress")]);
    }

    #[test]
    fn test_values_keep_file_order() {
        let defs = EnumConfig::from_json(SAMPLE).unwrap().enum_defs().unwrap();
        let names: Vec<_> = defs[0].values.iter().map(|v| v.constant_name.as_str()).collect();
        assert_eq!(names, vec!["Guest", "Admin", "User"]);
    }

    #[test]
    fn test_empty_values_rejected() {
        let config =
            EnumConfig::from_json(r#"{"package":"p","enums":[{"name":"Empty","values":{}}]}"#)
                .unwrap();
        assert!(matches!(
            config.enum_defs(),
            Err(ConfigError::EmptyEnum { name }) if name == "Empty"
        ));
    }

    #[test]
    fn test_missing_name_rejected() {
        let config = EnumConfig::from_json(r#"{"package":"p","enums":[{"name":"","values":{"A":"a"}}]}"#)
            .unwrap();
        assert!(matches!(
            config.enum_defs(),
            Err(ConfigError::MissingName { position: 1 })
        ));
    }

    #[test]
    fn test_missing_package_rejected() {
        assert!(matches!(
            EnumConfig::from_json(r#"{"package":"","enums":[]}"#),
            Err(ConfigError::MissingPackage)
        ));
        assert!(matches!(
            EnumConfig::from_json(r#"{"enums":[]}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("enums.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.enums.len(), 2);

        let missing = load_config(&dir.path().join("absent.json"));
        assert!(matches!(missing, Err(ConfigError::ReadFailed { .. })));
    }
}
