//! orderly - a compact schema notation that compiles to and from JSON Schema
//!
//! Pipeline: lexer, parser (or JSON-Schema reader), semantic checker, then
//! either canonical emission in both notations or instance validation.
//!
//! ```ignore
//! use orderly::compiler::{compile, emit, Format, InputFormat};
//!
//! let node = compile("object { string name; integer {1500,3000} invented; };", InputFormat::Orderly)?;
//! let json_schema = emit(&node, Format::JsonSchema);
//! let errors = orderly::validator::validate(&node, &serde_json::json!({"name": "x"}));
//! ```

pub mod checker;
pub mod cli;
pub mod compiler;
pub mod jsonschema;
pub mod observability;
pub mod orderly;
pub mod schema;
pub mod validator;
