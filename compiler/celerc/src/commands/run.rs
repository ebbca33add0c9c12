//! The `run` command: parse and evaluate a Celer program.

use std::io::{self, Write};

use celer_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use celer_eval::{eval_program_with, stdout_handler, Environment, SharedPrintHandler};
use tracing::{debug, warn};

use super::{read_source, Source, EXIT_PARSE_ERRORS, EXIT_READ_FAILURE};

/// Run a file, or stdin when `path` is `None` or `-`.
///
/// Returns the process exit status: 0 on success, 1 when the source cannot
/// be read, 2 when it has syntax errors.
pub fn run_file(path: Option<&str>, color: ColorMode) -> i32 {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            return EXIT_READ_FAILURE;
        }
    };
    let is_tty = io::IsTerminal::is_terminal(&io::stderr());
    let stderr = io::stderr();
    run_source(&source, stdout_handler(), &mut stderr.lock(), color, is_tty)
}

/// Parse and evaluate `source` against a fresh environment.
///
/// Syntax errors are rendered to `errors`, followed by a one-line summary,
/// and nothing is evaluated. `print` output goes to `handler`. The value
/// `main` returns does not affect the exit status.
pub fn run_source<W: Write>(
    source: &Source,
    handler: SharedPrintHandler,
    errors: &mut W,
    color: ColorMode,
    is_tty: bool,
) -> i32 {
    let parsed = celer_parse::parse(&source.text);
    if parsed.has_errors() {
        if let Err(err) = writeln!(errors, "Parse errors: {}", parsed.errors.len()) {
            warn!(%err, "failed to write parse error header");
        }
        let mut emitter = TerminalEmitter::with_color_mode(&mut *errors, color, is_tty)
            .with_source(&source.text)
            .with_file_path(&source.name);
        emitter.emit_all(&parsed.diagnostics());
        emitter.emit_summary(parsed.errors.len());
        emitter.flush();
        return EXIT_PARSE_ERRORS;
    }

    let mut env = Environment::new();
    let outcome = eval_program_with(&parsed.program, &mut env, handler);
    debug!(file = %source.name, signal = ?outcome.signal, "program finished");
    0
}
