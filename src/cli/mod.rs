//! Command-line interface
//!
//! - reformat: convert between the two notations
//! - lex / parse: token and tree listings for Orderly source
//! - check: report schema errors
//! - validate: check a JSON instance against a schema

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    check, format_token, lex, parse, reformat, run, run_command, validate, SchemaSource,
};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, read_limited, write_text};
