//! JSON-Schema reader errors

use thiserror::Error;

use crate::schema::{pointer, Severity};

/// A JSON document that is not a well-formed schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {reason}", pointer::display(.path))]
pub struct SchemaFormatError {
    /// JSON pointer to the offending keyword or subschema
    pub path: String,
    pub reason: String,
}

impl SchemaFormatError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Any failure reading JSON-Schema text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonSchemaError {
    /// The text is not JSON at all
    #[error("line {line}, column {column}: invalid JSON: {message}")]
    Syntax {
        line: u32,
        column: u32,
        message: String,
    },
    #[error(transparent)]
    Format(#[from] SchemaFormatError),
}

impl JsonSchemaError {
    pub fn code(&self) -> &'static str {
        match self {
            JsonSchemaError::Syntax { .. } => "ORDERLY_JSON_SYNTAX_ERROR",
            JsonSchemaError::Format(_) => "ORDERLY_SCHEMA_FORMAT_ERROR",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }

    /// 1-based (line, column) for syntax errors
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            JsonSchemaError::Syntax { line, column, .. } => Some((*line, *column)),
            JsonSchemaError::Format(_) => None,
        }
    }
}

impl From<serde_json::Error> for JsonSchemaError {
    fn from(e: serde_json::Error) -> Self {
        let suffix = format!(" at line {} column {}", e.line(), e.column());
        let full = e.to_string();
        let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();
        JsonSchemaError::Syntax {
            line: e.line() as u32,
            column: e.column() as u32,
            message,
        }
    }
}

/// Result of reading a schema from a JSON value
pub type FormatResult<T> = Result<T, SchemaFormatError>;

/// Result of reading a schema from JSON text
pub type JsonSchemaResult<T> = Result<T, JsonSchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = SchemaFormatError::new("/properties/age/minimum", "'minimum' property requires a numeric value");
        assert_eq!(
            err.to_string(),
            "#/properties/age/minimum: 'minimum' property requires a numeric value"
        );
    }

    #[test]
    fn test_syntax_error_from_serde() {
        let err: JsonSchemaError = serde_json::from_str::<serde_json::Value>("{\n  \"type\": }")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "ORDERLY_JSON_SYNTAX_ERROR");
        assert_eq!(err.position().map(|(line, _)| line), Some(2));
        assert!(!err.to_string().contains(" at line "));
    }
}
