//! Compile errors
//!
//! Lex, parse and JSON errors are FATAL: no tree is produced. Semantic
//! errors are REJECT: the tree exists but must not be used.

use thiserror::Error;

use crate::checker::SemanticError;
use crate::jsonschema::JsonSchemaError;
use crate::orderly::{source_context, OrderlyError};
use crate::schema::Severity;

/// Any reason a schema text could not be turned into a usable tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Orderly(#[from] OrderlyError),
    #[error(transparent)]
    JsonSchema(#[from] JsonSchemaError),
    #[error("{} semantic error(s)", .0.len())]
    Semantic(Vec<SemanticError>),
    #[error("cannot read schema file {path}: {message}")]
    Io { path: String, message: String },
}

impl CompileError {
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::Orderly(e) => e.code(),
            CompileError::JsonSchema(e) => e.code(),
            CompileError::Semantic(_) => "ORDERLY_SEMANTIC_ERROR",
            CompileError::Io { .. } => "ORDERLY_SCHEMA_IO_ERROR",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            CompileError::Semantic(_) => Severity::Reject,
            _ => Severity::Fatal,
        }
    }

    /// 1-based (line, column) when the error points into source text
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            CompileError::Orderly(e) => Some(e.position()),
            CompileError::JsonSchema(e) => e.position(),
            _ => None,
        }
    }
}

/// Compile result type
pub type CompileResult<T> = Result<T, CompileError>;

/// Human-readable report of a compile failure
///
/// ```text
/// Schema is invalid: line 1, column 17: expected property name, found ';'
/// object { string ; }
///                 ^
/// ```
pub fn render_diagnostic(source: &str, err: &CompileError) -> String {
    let mut out = format!("Schema is invalid: {}\n", err);
    match err {
        CompileError::Semantic(errors) => {
            for e in errors {
                out.push_str("  ");
                out.push_str(&e.to_string());
                out.push('\n');
            }
        }
        _ => {
            if let Some((line, column)) = err.position() {
                let context = source_context(source, line, column);
                if !context.is_empty() {
                    out.push_str(&context);
                    out.push('\n');
                }
            }
        }
    }
    out
}
