//! Severity shared by every error kind in the crate
//!
//! - FATAL: lexing, parsing and schema-format errors stop the compile
//! - REJECT: semantic and validation errors are collected and reported together

use std::fmt;

/// Severity levels for compile and validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Schema or instance rejected after a full pass
    Reject,
    /// Processing stopped at the first problem; no tree was produced
    Fatal,
}

impl Severity {
    pub fn is_fatal(self) -> bool {
        self == Severity::Fatal
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}
