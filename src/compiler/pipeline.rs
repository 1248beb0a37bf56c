//! Text in, tree out, text back
//!
//! `parse` builds a tree from either notation; `compile` also runs the
//! semantic checker; `emit` renders a tree canonically.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use super::errors::{CompileError, CompileResult};
use crate::checker::check;
use crate::jsonschema::{parse_json_schema, to_json_schema};
use crate::orderly::{parse_orderly, to_orderly};
use crate::schema::SchemaNode;

/// Output notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Orderly,
    JsonSchema,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Orderly => "orderly",
            Format::JsonSchema => "jsonschema",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orderly" => Ok(Format::Orderly),
            "jsonschema" | "json" => Ok(Format::JsonSchema),
            other => Err(format!(
                "unknown format '{}', expected orderly or jsonschema",
                other
            )),
        }
    }
}

/// Input notation; `Auto` tries Orderly first, then JSON Schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    Orderly,
    JsonSchema,
    #[default]
    Auto,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Orderly => "orderly",
            InputFormat::JsonSchema => "jsonschema",
            InputFormat::Auto => "auto",
        }
    }

    /// Guess the notation of a schema file from its extension
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("orderly") => InputFormat::Orderly,
            Some("json" | "jsonschema") => InputFormat::JsonSchema,
            _ => InputFormat::Auto,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(InputFormat::Auto),
            other => match other.parse::<Format>() {
                Ok(Format::Orderly) => Ok(InputFormat::Orderly),
                Ok(Format::JsonSchema) => Ok(InputFormat::JsonSchema),
                Err(_) => Err(format!(
                    "unknown format '{}', expected orderly, jsonschema or auto",
                    other
                )),
            },
        }
    }
}

/// Build a tree from schema text without semantic checks
pub fn parse(text: &str, format: InputFormat) -> CompileResult<SchemaNode> {
    match format {
        InputFormat::Orderly => Ok(parse_orderly(text)?),
        InputFormat::JsonSchema => Ok(parse_json_schema(text)?),
        InputFormat::Auto => match parse_orderly(text) {
            Ok(node) => Ok(node),
            Err(orderly_err) => match parse_json_schema(text) {
                Ok(node) => {
                    debug!("input is not orderly, read as json schema");
                    Ok(node)
                }
                // Orderly never starts with '{', so report the JSON error for JSON-looking text
                Err(json_err) if text.trim_start().starts_with('{') => Err(json_err.into()),
                Err(_) => Err(orderly_err.into()),
            },
        },
    }
}

/// Build a tree and run the semantic checker over it
pub fn compile(text: &str, format: InputFormat) -> CompileResult<SchemaNode> {
    let node = parse(text, format)?;
    let findings = check(&node);
    if findings.is_empty() {
        Ok(node)
    } else {
        Err(CompileError::Semantic(findings))
    }
}

/// Render a tree canonically in the requested notation
pub fn emit(node: &SchemaNode, format: Format) -> String {
    match format {
        Format::Orderly => to_orderly(node),
        Format::JsonSchema => to_json_schema(node),
    }
}

/// `compile` when `check_semantics` is set, `parse` otherwise
pub fn build(text: &str, format: InputFormat, check_semantics: bool) -> CompileResult<SchemaNode> {
    if check_semantics {
        compile(text, format)
    } else {
        parse(text, format)
    }
}

/// Read a schema file and the notation its extension implies
pub fn read_schema_file(path: &Path) -> CompileResult<(String, InputFormat)> {
    let text = fs::read_to_string(path).map_err(|e| CompileError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok((text, InputFormat::for_path(path)))
}

/// Read and build a schema file
pub fn load_schema_file(path: &Path, check_semantics: bool) -> CompileResult<SchemaNode> {
    let (text, format) = read_schema_file(path)?;
    build(&text, format, check_semantics)
}
