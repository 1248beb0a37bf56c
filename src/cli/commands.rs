//! CLI command implementations
//!
//! Every handler takes its input text and the two output streams and
//! returns the process exit status. Schema and instance problems are
//! reported on the streams; only infrastructure failures become `CliError`.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use serde_json::Value;

use crate::compiler::{self, render_diagnostic, CompileError, Format, InputFormat};
use crate::observability::{init_logging, log_event, Event, ObservationScope};
use crate::orderly::{parse_orderly, Lexer, Token};
use crate::schema::dump;
use crate::validator::SchemaValidator;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{read_input, write_text};

/// Where the validator gets its schema from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// A schema file, notation chosen by extension
    File(PathBuf),
    /// Schema text, notation detected
    Text(String),
}

impl SchemaSource {
    /// `--schema-file` if given, otherwise the configured environment variable
    pub fn resolve(schema_file: Option<PathBuf>, config: &Config) -> CliResult<Self> {
        match schema_file {
            Some(path) => Ok(SchemaSource::File(path)),
            None => match env::var(&config.schema_env) {
                Ok(text) if !text.trim().is_empty() => Ok(SchemaSource::Text(text)),
                _ => Err(CliError::schema_missing(&config.schema_env)),
            },
        }
    }

    fn read(&self) -> Result<(String, InputFormat), CompileError> {
        match self {
            SchemaSource::File(path) => compiler::read_schema_file(path),
            SchemaSource::Text(text) => Ok((text.clone(), InputFormat::Auto)),
        }
    }
}

/// Parse arguments, load configuration, run the command
pub fn run() -> CliResult<i32> {
    let cli = Cli::parse_args();
    let config = Config::load_or_default(cli.config.as_deref())?;

    if let Err(e) = init_logging(config.log_filter.as_deref()) {
        eprintln!("{}", e);
    }
    if let Some(path) = &cli.config {
        log_event(Event::ConfigLoaded, &path.display().to_string());
    }

    run_command(cli.command, &config)
}

/// Run a command against stdin, stdout and stderr
pub fn run_command(command: Command, config: &Config) -> CliResult<i32> {
    // the validator's schema is resolved before stdin is consumed
    let source = match &command {
        Command::Validate { schema_file, .. } => {
            Some(SchemaSource::resolve(schema_file.clone(), config)?)
        }
        _ => None,
    };

    let input = read_input(config.max_input_bytes).map_err(|e| {
        if *e.code() == CliErrorCode::InputTooLarge {
            log_event(Event::InputTooLarge, e.message());
        }
        e
    })?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match (command, source) {
        (Command::Reformat { input: from, output }, _) => {
            reformat(&input, from, output, config, &mut out, &mut err)
        }
        (Command::Lex, _) => lex(&input, &mut out, &mut err),
        (Command::Parse, _) => parse(&input, &mut out, &mut err),
        (Command::Check { input: from }, _) => check(&input, from, &mut out),
        (Command::Validate { quiet, .. }, Some(source)) => {
            validate(&source, &input, quiet, config, &mut out, &mut err)
        }
        (Command::Validate { .. }, None) => Err(CliError::schema_missing(&config.schema_env)),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Canonical text of a schema in the requested notation
pub fn reformat<W: Write, E: Write>(
    text: &str,
    from: InputFormat,
    to: Format,
    config: &Config,
    out: &mut W,
    err: &mut E,
) -> CliResult<i32> {
    let scope = ObservationScope::new("REFORMAT");

    match compiler::build(text, from, config.check_semantics) {
        Ok(node) => {
            log_event(Event::SchemaCompiled, from.as_str());
            write_text(out, &compiler::emit(&node, to))?;
            scope.complete();
            Ok(0)
        }
        Err(e) => {
            log_event(Event::SchemaRejected, e.code());
            write_text(err, &render_diagnostic(text, &e))?;
            scope.fail(e.code());
            Ok(1)
        }
    }
}

/// One line per token, end of input included
pub fn lex<W: Write, E: Write>(text: &str, out: &mut W, err: &mut E) -> CliResult<i32> {
    let mut listing = String::new();
    for token in Lexer::new(text) {
        match token {
            Ok(token) => listing.push_str(&format_token(&token)),
            Err(e) => {
                write_text(out, &listing)?;
                let e = CompileError::Orderly(e.into());
                write_text(err, &render_diagnostic(text, &e))?;
                return Ok(1);
            }
        }
    }
    write_text(out, &listing)?;
    Ok(0)
}

/// `(line,col): 'lexeme' kind`
pub fn format_token(token: &Token) -> String {
    format!(
        "({},{}): '{}' {}\n",
        token.line,
        token.column,
        token.lexeme,
        token.kind.name()
    )
}

/// Tree dump of an Orderly schema, without semantic checks
pub fn parse<W: Write, E: Write>(text: &str, out: &mut W, err: &mut E) -> CliResult<i32> {
    match parse_orderly(text) {
        Ok(node) => {
            write_text(out, &dump(&node))?;
            Ok(0)
        }
        Err(e) => {
            write_text(err, &render_diagnostic(text, &CompileError::Orderly(e)))?;
            Ok(1)
        }
    }
}

/// Silent on success, diagnostic on stdout otherwise
pub fn check<W: Write>(text: &str, from: InputFormat, out: &mut W) -> CliResult<i32> {
    match compiler::compile(text, from) {
        Ok(_) => Ok(0),
        Err(e) => {
            log_event(Event::SchemaRejected, e.code());
            write_text(out, &render_diagnostic(text, &e))?;
            Ok(1)
        }
    }
}

/// 0 when the instance conforms, 1 when it does not, 2 when the schema is unusable
pub fn validate<W: Write, E: Write>(
    source: &SchemaSource,
    instance: &str,
    quiet: bool,
    config: &Config,
    out: &mut W,
    err: &mut E,
) -> CliResult<i32> {
    let scope = ObservationScope::new("VALIDATE");

    let (text, format) = match source.read() {
        Ok(found) => found,
        Err(e) => {
            write_text(err, &render_diagnostic("", &e))?;
            scope.fail(e.code());
            return Ok(2);
        }
    };
    let node = match compiler::build(&text, format, config.check_semantics) {
        Ok(node) => node,
        Err(e) => {
            log_event(Event::SchemaRejected, e.code());
            write_text(err, &render_diagnostic(&text, &e))?;
            scope.fail(e.code());
            return Ok(2);
        }
    };

    let value: Value = match serde_json::from_str(instance) {
        Ok(value) => value,
        Err(e) => {
            log_event(Event::InstanceInvalid, "not JSON");
            if !quiet {
                write_text(err, &format!("JSON is invalid: {}\n", e))?;
            }
            scope.complete();
            return Ok(1);
        }
    };

    let status = match SchemaValidator::new(&node).validate_instance(&value) {
        Ok(()) => {
            log_event(Event::InstanceValid, "");
            if !quiet {
                write_text(out, "JSON is valid\n")?;
            }
            0
        }
        Err(failed) => {
            log_event(Event::InstanceInvalid, &failed.to_string());
            if !quiet {
                let mut report = String::from("JSON is invalid\n");
                for e in &failed.errors {
                    report.push_str(&e.to_string());
                    report.push('\n');
                }
                write_text(err, &report)?;
            }
            1
        }
    };
    scope.complete();
    Ok(status)
}
