//! Standard input and output for CLI commands
//!
//! - Input: the whole of stdin as UTF-8, bounded by `max_input_bytes`
//! - Output: written and flushed in one go

use std::io::{self, Read, Write};

use super::errors::{CliError, CliResult};

/// Read all of `reader`, failing once more than `max_bytes` arrive
pub fn read_limited<R: Read>(reader: R, max_bytes: u64) -> CliResult<String> {
    let mut buf = Vec::new();
    reader.take(max_bytes.saturating_add(1)).read_to_end(&mut buf)?;
    if buf.len() as u64 > max_bytes {
        return Err(CliError::input_too_large(max_bytes));
    }
    String::from_utf8(buf).map_err(|_| CliError::io_error("input is not valid UTF-8"))
}

/// Read standard input
pub fn read_input(max_bytes: u64) -> CliResult<String> {
    read_limited(io::stdin().lock(), max_bytes)
}

/// Write text and flush
pub fn write_text<W: Write>(writer: &mut W, text: &str) -> CliResult<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}
