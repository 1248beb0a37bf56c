//! CLI argument definitions using clap
//!
//! Commands (all read stdin):
//! - orderly reformat [-i orderly|jsonschema|auto] [-o orderly|jsonschema]
//! - orderly lex
//! - orderly parse
//! - orderly check [-i ...]
//! - orderly validate [-q] [--schema-file <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::compiler::{Format, InputFormat};

/// Orderly - compact schemas that compile to and from JSON Schema
#[derive(Parser, Debug)]
#[command(name = "orderly")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a schema to canonical text in either notation
    Reformat {
        /// Input notation: orderly, jsonschema or auto
        #[arg(short = 'i', long = "input", default_value = "auto")]
        input: InputFormat,

        /// Output notation: orderly or jsonschema
        #[arg(short = 'o', long = "output", default_value = "orderly")]
        output: Format,
    },

    /// Print the Orderly token stream
    Lex,

    /// Print the parsed schema tree
    Parse,

    /// Report syntax and semantic errors, silent when the schema is valid
    Check {
        /// Input notation: orderly, jsonschema or auto
        #[arg(short = 'i', long = "input", default_value = "auto")]
        input: InputFormat,
    },

    /// Validate a JSON instance against a schema
    Validate {
        /// Only report through the exit status
        #[arg(short, long)]
        quiet: bool,

        /// Schema file; defaults to the schema environment variable
        #[arg(long)]
        schema_file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
