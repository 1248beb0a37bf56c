//! Compiler facade over both notations
//!
//! ```ignore
//! let node = compile("object { string name; };", InputFormat::Auto)?;
//! print!("{}", emit(&node, Format::JsonSchema));
//! ```

mod errors;
mod pipeline;

pub use errors::{render_diagnostic, CompileError, CompileResult};
pub use pipeline::{
    build, compile, emit, load_schema_file, parse, read_schema_file, Format, InputFormat,
};
