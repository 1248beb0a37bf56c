//! Instance validation against a schema tree

mod errors;
mod validator;

pub use errors::{ValidationError, ValidationFailed, ValidationResult};
pub use validator::{json_type_name, validate, SchemaValidator};
