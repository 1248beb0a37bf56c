//! Instance validation errors
//!
//! Every violation is reported as a `ValidationError`; a failed validation
//! as a whole is `ValidationFailed` (ORDERLY_VALIDATION_FAILED, REJECT).

use std::fmt;

use thiserror::Error;

use crate::schema::{pointer, Severity};

/// One place where an instance does not conform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// JSON pointer into the instance
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn type_mismatch(path: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(path, format!("expected {}, found {}", expected, actual))
    }

    pub fn missing_property(path: impl Into<String>) -> Self {
        Self::new(path, "required property is missing")
    }

    pub fn extra_property(path: impl Into<String>) -> Self {
        Self::new(path, "property is not allowed by the schema")
    }

    pub fn missing_requirement(path: impl Into<String>, name: &str) -> Self {
        Self::new(path, format!("requires sibling property '{}'", name))
    }

    pub fn missing_position(path: impl Into<String>) -> Self {
        Self::new(path, "required tuple element is missing")
    }

    pub fn extra_element(path: impl Into<String>) -> Self {
        Self::new(path, "element is not allowed by the tuple")
    }

    pub fn duplicate_item(path: impl Into<String>, first: usize) -> Self {
        Self::new(path, format!("duplicates item {}", first))
    }

    pub fn not_in_enum(path: impl Into<String>) -> Self {
        Self::new(path, "value is not one of the enumerated values")
    }

    pub fn pattern_mismatch(path: impl Into<String>, pattern: &str) -> Self {
        Self::new(path, format!("string does not match pattern /{}/", pattern))
    }

    pub fn invalid_pattern(path: impl Into<String>, pattern: &str) -> Self {
        Self::new(path, format!("pattern /{}/ does not compile", pattern))
    }

    /// Prefix the message with the union alternative that produced it
    pub fn in_alternative(self, index: usize, kind: &str) -> Self {
        Self {
            path: self.path,
            message: format!("alternative {} ({}): {}", index, kind, self.message),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", pointer::display(&self.path), self.message)
    }
}

/// An instance that failed validation, with every violation found
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{}] {}: instance has {} violation(s)", self.severity(), self.code(), .errors.len())]
pub struct ValidationFailed {
    pub errors: Vec<ValidationError>,
}

impl ValidationFailed {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn code(&self) -> &'static str {
        "ORDERLY_VALIDATION_FAILED"
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationFailed>;
