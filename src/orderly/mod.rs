//! The Orderly notation: lexer, parser and canonical writer
//!
//! ```text
//! object {
//!     string name;
//!     integer {1500,3000} invented;
//! };
//! ```

mod errors;
mod lexer;
mod parser;
mod token;
mod writer;

pub use errors::{
    source_context, LexError, LexErrorKind, OrderlyError, OrderlyResult, ParseError,
    ParseErrorKind,
};
pub use lexer::Lexer;
pub use parser::{parse_orderly, Parser};
pub use token::{Token, TokenKind};
pub use writer::to_orderly;
