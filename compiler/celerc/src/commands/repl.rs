//! The `repl` command: an interactive loop over one persistent environment.
//!
//! Input is collected in chunks terminated by a `;;` line. A chunk that
//! starts with a declaration keyword is parsed as a program; anything else
//! is wrapped into a temporary `main` and run immediately.

use std::io::{self, BufRead, Write};

use celer_eval::{eval_program_with, stdout_handler, Environment, SharedPrintHandler};
use tracing::debug;

use super::report_parse_errors;

const PROMPT: &str = "celer> ";
const CONTINUATION_PROMPT: &str = "....> ";
const CHUNK_TERMINATOR: &str = ";;";
const QUIT_COMMAND: &str = ":quit";
const HELP_COMMAND: &str = ":help";
const DECLARATION_KEYWORDS: [&str; 3] = ["variable", "const", "Function"];

/// Run the REPL on the process's stdin and stdout.
pub fn run_repl() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    repl_loop(stdin.lock(), stdout.lock(), stderr.lock(), stdout_handler())
}

/// Drive a REPL session until `:quit` or end of input.
///
/// Prompts and banners go to `out`, parse errors to `err`, and the output
/// of `print` to `handler`.
pub fn repl_loop<R, W, E>(input: R, out: W, err: E, handler: SharedPrintHandler) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut repl = Repl::new(input, out, err, handler);
    repl.banner()?;
    while let Some(chunk) = repl.read_chunk()? {
        repl.run_chunk(&chunk)?;
    }
    repl.goodbye()
}

/// REPL state: the I/O handles plus the environment shared by all chunks.
pub struct Repl<R, W, E> {
    input: R,
    out: W,
    err: E,
    handler: SharedPrintHandler,
    env: Environment,
}

impl<R: BufRead, W: Write, E: Write> Repl<R, W, E> {
    pub fn new(input: R, out: W, err: E, handler: SharedPrintHandler) -> Self {
        Repl {
            input,
            out,
            err,
            handler,
            env: Environment::new(),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "Celer REPL")?;
        writeln!(self.out, "End each chunk with ';;'. Commands: :help, :quit")
    }

    fn goodbye(&mut self) -> io::Result<()> {
        writeln!(self.out, "Goodbye!")?;
        self.out.flush()
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Type Celer declarations or statements. End the chunk with a ';;' line."
        )?;
        writeln!(self.out, "Commands: :quit (exit), :help (this help)")
    }

    /// Read lines up to a `;;` line.
    ///
    /// Returns `None` on `:quit`, or at end of input with nothing buffered.
    /// End of input after some lines yields what was collected.
    pub fn read_chunk(&mut self) -> io::Result<Option<String>> {
        let mut chunk = String::new();
        let mut line = String::new();
        let mut first = true;
        loop {
            let prompt = if first { PROMPT } else { CONTINUATION_PROMPT };
            first = false;
            write!(self.out, "{prompt}")?;
            self.out.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok((!chunk.is_empty()).then_some(chunk));
            }
            match line.trim_end_matches(['\n', '\r']) {
                CHUNK_TERMINATOR => return Ok(Some(chunk)),
                QUIT_COMMAND => return Ok(None),
                HELP_COMMAND => self.help()?,
                _ => chunk.push_str(&line),
            }
        }
    }

    /// Parse and evaluate one chunk against the session environment.
    ///
    /// Syntax errors are listed on the error stream and leave the
    /// environment untouched.
    pub fn run_chunk(&mut self, chunk: &str) -> io::Result<()> {
        let source = if is_declaration_chunk(chunk) {
            chunk.to_string()
        } else {
            wrap_chunk(chunk)
        };
        let parsed = celer_parse::parse(&source);
        if parsed.has_errors() {
            report_parse_errors(&mut self.err, &parsed.errors)?;
            return self.err.flush();
        }
        let outcome = eval_program_with(&parsed.program, &mut self.env, self.handler.clone());
        debug!(?outcome, "chunk evaluated");
        Ok(())
    }
}

/// Whether the chunk's first word is a declaration keyword.
///
/// Only spaces, tabs and carriage returns are skipped before the keyword,
/// which must be followed by whitespace, `(`, `:` or the end of input.
pub fn is_declaration_chunk(chunk: &str) -> bool {
    let text = chunk.trim_start_matches([' ', '\t', '\r']);
    DECLARATION_KEYWORDS.iter().any(|keyword| {
        text.strip_prefix(keyword).is_some_and(|rest| {
            rest.chars()
                .next()
                .is_none_or(|c| matches!(c, ' ' | '\t' | '\r' | '\n' | '(' | ':'))
        })
    })
}

/// Wrap loose statements into a zero-parameter `main`.
pub fn wrap_chunk(chunk: &str) -> String {
    format!("Function main() -> void {{\n{chunk}\n}}\n")
}
