//! End-to-end tests: source text through the parser and the evaluator.

use celer_eval::{buffer_handler, eval_program_with, Environment, Outcome, Value};
use pretty_assertions::assert_eq;

fn eval(source: &str) -> (String, Environment, Outcome) {
    let parsed = celer_parse::parse(source);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
    let mut env = Environment::new();
    let handler = buffer_handler();
    let outcome = eval_program_with(&parsed.program, &mut env, handler.clone());
    (handler.get_output(), env, outcome)
}

const DEMO: &str = r#"
*-- Globals
variable limit: int = 5;
const greeting: string = "sum";

/* Adds the first n integers. */
Function sum_to(n: int) -> int {
    variable total: int = 0;
    for (variable k: int = 1; k <= n; k += 1) {
        total += k;
    }
    return total;
}

Function describe(x: float) -> string {
    return x > 1.0 ? { true: "big" : false: "small" };
}

Function main() -> void {
    print(greeting, sum_to(limit));
    print(describe(2.5), describe(0.5));
    variable ratio: float = 1.0 / 8;
    print(ratio, ratio * 1000000000);
    countdown = 3;
    for (countdown > 0) {
        countdown -= 1;
        if (countdown == 1) { continue; }
        print("tick", countdown);
    }
}
"#;

#[test]
fn demo_program_output() {
    let (output, env, outcome) = eval(DEMO);
    assert_eq!(
        output,
        "sum 15\nbig small\n0.125 1.25e+08\ntick 2\ntick 0\n"
    );
    assert_eq!(outcome, Outcome::normal(Value::Void));
    assert_eq!(env.depth(), 1);
    assert_eq!(env.lookup("limit"), Some(Value::Int(5)));
    assert_eq!(env.lookup("countdown"), None);
}

#[test]
fn compound_assignment_sequence() {
    let (_, env, _) = eval(
        "variable i: int = 0;
         Function main() -> void { i += 5; i -= 2; }",
    );
    assert_eq!(env.lookup("i"), Some(Value::Int(3)));
}

#[test]
fn division_and_modulo_by_zero() {
    let (_, _, outcome) = eval("Function main() -> int { return 5 / 0 + 5 % 0; }");
    assert_eq!(outcome.value, Value::Int(0));
}

#[test]
fn c_like_loop_counts_three_iterations() {
    let (output, _, _) = eval(
        "Function main() -> void {
             for (variable k: int = 0; k < 3; k = k + 1) { print(k); }
         }",
    );
    assert_eq!(output, "0\n1\n2\n");
}

#[test]
fn newest_function_definition_wins() {
    let (_, _, outcome) = eval(
        "Function f() -> int { return 1; }
         Function f() -> int { return 2; }
         Function main() -> int { return f(); }",
    );
    assert_eq!(outcome.value, Value::Int(2));
}

#[test]
fn const_assignment_refused_and_first_declaration_wins() {
    let (_, env, _) = eval(
        "const c: int = 1;
         Function main() -> void { c = 2; }",
    );
    assert_eq!(env.lookup("c"), Some(Value::Int(1)));

    let (_, env, _) = eval("const c: int = 1; const c: int = 2;");
    assert_eq!(env.lookup("c"), Some(Value::Int(1)));
}

#[test]
fn evaluation_is_deterministic() {
    let (first_out, first_env, first) = eval(DEMO);
    let (second_out, second_env, second) = eval(DEMO);
    assert_eq!(first_out, second_out);
    assert_eq!(first, second);
    for name in ["limit", "greeting"] {
        assert_eq!(first_env.lookup(name), second_env.lookup(name));
    }
}
