//! Orderly CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`; the exit status
//! comes from the command, or from the error when it could not run.

use orderly::cli;

fn main() {
    match cli::run() {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
