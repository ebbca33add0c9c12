//! Debug commands: `parse` and `lex` for inspecting the front end.

use std::fmt::Write as _;
use std::io;

use celer_lexer::lex;

use super::{read_file, report_parse_errors, EXIT_PARSE_ERRORS};
use crate::ast_dump::dump_program;

/// Parse a file and print its syntax tree.
///
/// Whatever could be parsed is printed first; syntax errors then go to
/// stderr and the process exits with status 2.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let parsed = celer_parse::parse(&content);
    print!("{}", dump_program(&parsed.program));

    if parsed.has_errors() {
        if let Err(err) = report_parse_errors(&mut io::stderr(), &parsed.errors) {
            tracing::warn!(%err, "failed to write parse errors");
        }
        std::process::exit(EXIT_PARSE_ERRORS);
    }
}

/// Lex a file and print the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    print!("{}", token_dump(&content));
}

/// One `line:col Kind 'lexeme'` line per token, end of file included.
pub fn token_dump(source: &str) -> String {
    let mut out = String::new();
    for token in lex(source) {
        let _ = writeln!(out, "{} {:?} '{}'", token.pos, token.kind, token.lexeme);
    }
    out
}
