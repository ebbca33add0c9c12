//! The `explain` command: describe a diagnostic error code.

use celer_diagnostic::ErrorCode;

/// Print the description of `code_str`, or list the known codes when it
/// is not one of them.
pub fn explain_error(code_str: &str) {
    let Some(code) = ErrorCode::from_code(code_str) else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("E0xxx are lexical errors, E1xxx are syntax errors.");
        std::process::exit(1);
    };

    let phase = if code.is_lexer_error() {
        "lexical error"
    } else {
        "syntax error"
    };
    println!("{code}: {} ({phase})", code.description());
}
