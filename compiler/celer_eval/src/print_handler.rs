//! Where `print` output goes.
//!
//! `celer run` and the REPL write to stdout; tests capture into a buffer
//! and assert on it. The set of sinks is closed, so dispatch is an enum.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Output sink for the `print` builtin.
pub enum PrintHandlerImpl {
    /// Each line goes straight to the process's stdout.
    Stdout,
    /// Lines accumulate in memory.
    Buffer(Mutex<String>),
}

impl PrintHandlerImpl {
    /// Write `line` followed by a newline.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => {
                // A closed pipe must not abort the program.
                if let Err(err) = writeln!(std::io::stdout().lock(), "{line}") {
                    tracing::debug!(%err, "stdout write failed");
                }
            }
            Self::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(line);
                buf.push('\n');
            }
        }
    }

    /// Everything captured so far; empty for stdout.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stdout => String::new(),
            Self::Buffer(buf) => buf.lock().clone(),
        }
    }
}

/// Print handler shared between an interpreter and whoever reads it back.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

/// A fresh, empty capturing handler.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(Mutex::default()))
}
