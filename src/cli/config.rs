//! Configuration file
//!
//! Every field is optional; a missing file flag means all defaults.
//!
//! ```json
//! { "max_input_bytes": 1048576, "schema_env": "ORDERLY_SCHEMA",
//!   "check_semantics": true, "log_filter": "info" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Largest accepted stdin in bytes (default 1 MiB)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,

    /// Environment variable the validator reads its schema from
    #[serde(default = "default_schema_env")]
    pub schema_env: String,

    /// Run the semantic checker before emitting or validating
    #[serde(default = "default_check_semantics")]
    pub check_semantics: bool,

    /// Log filter directive, overridden by ORDERLY_LOG
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_max_input_bytes() -> u64 {
    1048576
} // 1 MiB
fn default_schema_env() -> String {
    "ORDERLY_SCHEMA".to_string()
}
fn default_check_semantics() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            schema_env: default_schema_env(),
            check_semantics: default_check_semantics(),
            log_filter: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.max_input_bytes == 0 {
            return Err(CliError::config_error("max_input_bytes must be > 0"));
        }

        if self.schema_env.trim().is_empty() {
            return Err(CliError::config_error("schema_env must not be empty"));
        }
        if self.schema_env.contains('=') || self.schema_env.contains('\0') {
            return Err(CliError::config_error(format!(
                "Invalid schema_env: '{}'",
                self.schema_env
            )));
        }

        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(CliError::config_error("log_filter must not be empty"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let file = write_config("{}");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_input_bytes, 1048576);
        assert_eq!(config.schema_env, "ORDERLY_SCHEMA");
        assert!(config.check_semantics);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_overrides() {
        let file = write_config(
            r#"{"max_input_bytes": 64, "schema_env": "MY_SCHEMA", "check_semantics": false, "log_filter": "debug"}"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.max_input_bytes, 64);
        assert_eq!(config.schema_env, "MY_SCHEMA");
        assert!(!config.check_semantics);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values() {
        for content in [
            r#"{"max_input_bytes": 0}"#,
            r#"{"schema_env": ""}"#,
            r#"{"schema_env": "A=B"}"#,
            r#"{"log_filter": " "}"#,
            r#"{"max_input_bytes": "big"}"#,
            "not json",
        ] {
            let file = write_config(content);
            let err = Config::load(file.path()).unwrap_err();
            assert_eq!(err.code_str(), "ORDERLY_CLI_CONFIG_ERROR", "{}", content);
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/orderly.json")).unwrap_err();
        assert!(err.message().starts_with("Failed to read config"));
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
