//! The JSON-Schema notation: reader and canonical writer

mod document;
mod errors;
mod reader;
mod writer;

pub use document::parse_document;
pub use errors::{FormatResult, JsonSchemaError, JsonSchemaResult, SchemaFormatError};
pub use reader::{parse_json_schema, read_schema};
pub use writer::{to_json_schema, to_json_value};
