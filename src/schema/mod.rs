//! Schema tree shared by the Orderly and JSON-Schema notations
//!
//! Both readers build a `SchemaNode`, the checker and validator walk it,
//! and both writers render it. Trees are acyclic and owned by the caller.

mod dump;
mod errors;
pub mod keywords;
pub mod pointer;
mod range;
mod types;

pub use dump::dump;
pub use errors::Severity;
pub use range::{normalize_value, Bound, LengthRange, Limit, NumericRange};
pub use types::{
    Additional, ArraySchema, Items, ObjectSchema, PropertyDef, SchemaKind, SchemaNode,
    StringSchema,
};
