//! Command handlers for the Celer CLI.
//!
//! Each submodule implements one command (run, repl, parse, ...). Shared
//! pieces like source loading and parse error reporting live here.

use std::io::{self, Read, Write};

use celer_parse::ParseError;
use thiserror::Error;

mod debug;
mod explain;
mod repl;
mod run;

pub use debug::{lex_file, parse_file, token_dump};
pub use explain::explain_error;
pub use repl::{is_declaration_chunk, repl_loop, run_repl, wrap_chunk, Repl};
pub use run::{run_file, run_source};

/// Exit status when the input cannot be read.
pub const EXIT_READ_FAILURE: i32 = 1;
/// Exit status when the program has syntax errors.
pub const EXIT_PARSE_ERRORS: i32 = 2;

/// Display name used for programs read from standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// Failure to obtain source text.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("error reading '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[error("error reading standard input: {0}")]
    Stdin(#[source] io::Error),
}

impl CliError {
    fn from_io(path: &str, err: io::Error) -> Self {
        let path = path.to_string();
        match err.kind() {
            io::ErrorKind::NotFound => CliError::NotFound { path },
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Read { path, source: err },
        }
    }
}

/// Source text together with the name it is reported under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub text: String,
}

/// Read a named file, or all of stdin when `path` is `None` or `-`.
pub fn read_source(path: Option<&str>) -> Result<Source, CliError> {
    match path {
        None | Some("-") => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(CliError::Stdin)?;
            Ok(Source {
                name: STDIN_NAME.to_string(),
                text,
            })
        }
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| CliError::from_io(path, e))?;
            Ok(Source {
                name: path.to_string(),
                text,
            })
        }
    }
}

/// Read a file for the inspection commands, exiting on failure.
pub(crate) fn read_file(path: &str) -> String {
    match read_source(Some(path)) {
        Ok(source) => source.text,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(EXIT_READ_FAILURE);
        }
    }
}

/// Write the short error listing: a count, then one `@line:col message`
/// line per error.
pub fn report_parse_errors<W: Write>(out: &mut W, errors: &[ParseError]) -> io::Result<()> {
    writeln!(out, "Parse errors: {}", errors.len())?;
    for error in errors {
        writeln!(out, " {error}")?;
    }
    Ok(())
}
