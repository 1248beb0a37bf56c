//! Semantic checker
//!
//! Finds problems the grammar cannot rule out: duplicate property names,
//! empty ranges, patterns the `regex` crate rejects, degenerate unions and
//! tuples, and enumerations or defaults that contradict their own schema.

mod checker;
mod errors;

pub use checker::check;
pub use errors::{SemanticError, SemanticErrorKind};
