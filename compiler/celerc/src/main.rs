//! Celer CLI
//!
//! Runs programs, hosts the REPL and dumps front-end output.

use celer_diagnostic::emitter::ColorMode;
use celerc::commands::{explain_error, lex_file, parse_file, run_file, run_repl};
use celerc::tracing_setup::init_tracing;

fn main() {
    init_tracing();

    let mut color = ColorMode::Auto;
    let mut args: Vec<String> = Vec::new();
    for arg in std::env::args() {
        if let Some(value) = arg.strip_prefix("--color=") {
            let Some(mode) = ColorMode::parse(value) else {
                eprintln!("error: invalid color mode '{value}' (expected auto, always, never)");
                std::process::exit(1);
            };
            color = mode;
        } else {
            args.push(arg);
        }
    }

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let status = run_file(args.get(2).map(String::as_str), color);
            if status != 0 {
                std::process::exit(status);
            }
        }
        "repl" => {
            if let Err(e) = run_repl() {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: celer parse <file>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: celer lex <file>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Celer {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: celer --explain <ERROR_CODE>");
                eprintln!("Example: celer --explain E1002");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Celer - a small imperative language");
    println!();
    println!("Usage: celer <command> [options]");
    println!();
    println!("Commands:");
    println!("  run [file]           Run a program (reads stdin without a file or with '-')");
    println!("  repl                 Start the interactive loop");
    println!("  parse <file>         Parse and print the syntax tree");
    println!("  lex <file>           Tokenize and print the tokens");
    println!("  --explain <code>     Explain an error code (e.g., E1002)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --color=<mode>       Diagnostic colors: auto (default), always, never");
    println!();
    println!("Environment:");
    println!("  CELER_LOG=<filter>   Enable tracing on stderr (e.g., celer_eval=trace)");
}
