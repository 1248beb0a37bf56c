//! Semantic checker findings
//!
//! Codes:
//! - DUPLICATE_PROPERTY, EMPTY_RANGE, INVALID_PATTERN
//! - UNION_ARITY, DUPLICATE_ALTERNATIVE, TUPLE_ARITY
//! - EMPTY_ENUM, ENUM_MISMATCH, DEFAULT_MISMATCH
//! - UNKNOWN_REQUIRES, MISPLACED_REQUIRES

use thiserror::Error;

use crate::schema::{pointer, Severity};

/// What is wrong with a grammatically valid tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticErrorKind {
    #[error("duplicate property name '{0}'")]
    DuplicateProperty(String),
    #[error("{0}")]
    EmptyRange(String),
    #[error("invalid regular expression /{pattern}/: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("union needs at least two alternatives, found {0}")]
    UnionArity(usize),
    #[error("union alternative {index} duplicates alternative {first}")]
    DuplicateAlternative { index: usize, first: usize },
    #[error("{0}")]
    TupleArity(String),
    #[error("enumeration must list at least one value")]
    EmptyEnum,
    #[error("enumerated value {value} does not match the schema: {reason}")]
    EnumMismatch { value: String, reason: String },
    #[error("default value {value} does not match the schema: {reason}")]
    DefaultMismatch { value: String, reason: String },
    #[error("'{0}' is required alongside this property but is not a sibling property")]
    UnknownRequires(String),
    #[error("requires only applies to object properties")]
    MisplacedRequires,
}

impl SemanticErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateProperty(_) => "DUPLICATE_PROPERTY",
            Self::EmptyRange(_) => "EMPTY_RANGE",
            Self::InvalidPattern { .. } => "INVALID_PATTERN",
            Self::UnionArity(_) => "UNION_ARITY",
            Self::DuplicateAlternative { .. } => "DUPLICATE_ALTERNATIVE",
            Self::TupleArity(_) => "TUPLE_ARITY",
            Self::EmptyEnum => "EMPTY_ENUM",
            Self::EnumMismatch { .. } => "ENUM_MISMATCH",
            Self::DefaultMismatch { .. } => "DEFAULT_MISMATCH",
            Self::UnknownRequires(_) => "UNKNOWN_REQUIRES",
            Self::MisplacedRequires => "MISPLACED_REQUIRES",
        }
    }
}

/// One finding, located by a JSON pointer into the JSON-Schema form of the tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {kind}", pointer::display(.path))]
pub struct SemanticError {
    pub path: String,
    pub kind: SemanticErrorKind,
}

impl SemanticError {
    pub fn new(path: impl Into<String>, kind: SemanticErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}
