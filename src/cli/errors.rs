//! CLI-specific error types
//!
//! Schema and instance failures are reported by the commands themselves;
//! a `CliError` means the command could not run at all.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Standard input over the configured limit
    InputTooLarge,
    /// No schema given to the validator
    SchemaMissing,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ORDERLY_CLI_CONFIG_ERROR",
            Self::IoError => "ORDERLY_CLI_IO_ERROR",
            Self::InputTooLarge => "ORDERLY_CLI_INPUT_TOO_LARGE",
            Self::SchemaMissing => "ORDERLY_CLI_SCHEMA_MISSING",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn input_too_large(limit: u64) -> Self {
        Self::new(
            CliErrorCode::InputTooLarge,
            format!("input exceeds max_input_bytes ({} bytes)", limit),
        )
    }

    pub fn schema_missing(env: &str) -> Self {
        Self::new(
            CliErrorCode::SchemaMissing,
            format!("no schema given: pass --schema-file or set {}", env),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self.code {
            CliErrorCode::SchemaMissing => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_exit_code() {
        let err = CliError::schema_missing("ORDERLY_SCHEMA");
        assert_eq!(
            err.to_string(),
            "ORDERLY_CLI_SCHEMA_MISSING: no schema given: pass --schema-file or set ORDERLY_SCHEMA"
        );
        assert_eq!(err.exit_code(), 2);
        assert_eq!(CliError::input_too_large(10).exit_code(), 1);
    }

    #[test]
    fn test_from_io_error() {
        let err: CliError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert_eq!(err.message(), "boom");
    }
}
