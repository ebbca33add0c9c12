use super::*;
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;

struct Run {
    output: String,
    env: Environment,
    outcome: Outcome,
}

fn run_in(env: &mut Environment, source: &str) -> (String, Outcome) {
    let parsed = celer_parse::parse(source);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
    let handler = buffer_handler();
    let outcome = Interpreter::new(env)
        .with_print_handler(handler.clone())
        .eval_program(&parsed.program);
    (handler.get_output(), outcome)
}

fn run(source: &str) -> Run {
    let mut env = Environment::new();
    let (output, outcome) = run_in(&mut env, source);
    Run {
        output,
        env,
        outcome,
    }
}

fn run_main(body: &str) -> String {
    run(&format!("Function main() -> void {{\n{body}\n}}\n")).output
}

#[test]
fn test_hello() {
    assert_eq!(run_main(r#"print("hello, world");"#), "hello, world\n");
}

#[test]
fn test_main_return_value_is_outcome() {
    let result = run("Function main() -> int { return 40 + 2; }");
    assert_eq!(result.outcome, Outcome::normal(Value::Int(42)));
    assert_eq!(result.env.depth(), 1);
}

#[test]
fn test_no_main() {
    let result = run("variable x: int = 3;");
    assert_eq!(result.outcome, Outcome::normal(Value::Void));
    assert_eq!(result.env.lookup("x"), Some(Value::Int(3)));
    assert_eq!(result.output, "");
}

#[test]
fn test_main_with_params_is_not_entry() {
    let result = run("Function main(x: int) -> void { print(\"ran\"); }");
    assert_eq!(result.output, "");
}

#[test]
fn test_string_escapes_decoded() {
    assert_eq!(
        run_main(r#"print("a\tb\n\"c\"\\");"#),
        "a\tb\n\"c\"\\\n"
    );
}

#[test]
fn test_print_value_forms() {
    assert_eq!(
        run_main("print(1, 2.5, 1.0 / 3.0, true, 10 / 4, missing);"),
        "1 2.5 0.333333 true 2 void\n"
    );
}

#[test]
fn test_precedence_at_runtime() {
    assert_eq!(run_main("print(1 + 2 * 3, (1 + 2) * 3, -2 * 3);"), "7 9 -6\n");
}

#[test]
fn test_compound_assignment() {
    let result = run(
        "variable i: int = 0;
         Function main() -> void { i += 5; i -= 2; }",
    );
    assert_eq!(result.env.lookup("i"), Some(Value::Int(3)));
}

#[test]
fn test_compound_assignment_on_missing_name_is_void() {
    assert_eq!(run_main("print(ghost += 1); print(ghost);"), "void\nvoid\n");
}

#[test]
fn test_assignment_defines_local() {
    let result = run("Function main() -> void { fresh = 1; print(fresh); }");
    assert_eq!(result.output, "1\n");
    // Defined in main's block scope, gone afterwards.
    assert_eq!(result.env.lookup("fresh"), None);
}

#[test]
fn test_assignment_is_an_expression() {
    assert_eq!(run_main("a = b = 4; print(a, b);"), "4 4\n");
}

#[test]
fn test_const_refuses_assignment() {
    let result = run(
        "const c: int = 1;
         Function main() -> void { c = 2; print(c); }",
    );
    // The refused store defines a shadow in main's scope.
    assert_eq!(result.output, "2\n");
    assert_eq!(result.env.lookup("c"), Some(Value::Int(1)));
}

#[test]
fn test_const_redeclaration_keeps_first() {
    let result = run("const c: int = 1; const c: int = 2;");
    assert_eq!(result.env.lookup("c"), Some(Value::Int(1)));
}

#[test]
fn test_compound_assignment_on_const_is_refused() {
    let result = run(
        "const c: int = 1;
         Function main() -> void { print(c += 5); }",
    );
    assert_eq!(result.output, "6\n");
    assert_eq!(result.env.lookup("c"), Some(Value::Int(1)));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(run_main("print(5 / 0, 5 % 0);"), "0 0\n");
}

#[test]
fn test_if_else() {
    assert_eq!(
        run_main(
            "if (1 < 2) { print(\"yes\"); } else { print(\"no\"); }
             if (\"\") { print(\"yes\"); } else { print(\"no\"); }
             if (false) { print(\"skipped\"); }"
        ),
        "yes\nno\n"
    );
}

#[test]
fn test_c_like_for_runs_three_times() {
    let result = run(
        "variable count: int = 0;
         Function main() -> void {
             for (variable k: int = 0; k < 3; k = k + 1) { count += 1; }
         }",
    );
    assert_eq!(result.env.lookup("count"), Some(Value::Int(3)));
}

#[test]
fn test_for_variable_outlives_loop() {
    assert_eq!(
        run_main("for (variable k: int = 0; k < 3; k += 1) { } print(k);"),
        "3\n"
    );
}

#[test]
fn test_while_like_for() {
    assert_eq!(
        run_main("n = 3; for (n > 0) { print(n); n -= 1; }"),
        "3\n2\n1\n"
    );
}

#[test]
fn test_break_and_continue() {
    assert_eq!(
        run_main(
            "for (i = 0; i < 10; i += 1) {
                 if (i % 2 == 0) { continue; }
                 if (i > 6) { break; }
                 print(i);
             }"
        ),
        "1\n3\n5\n"
    );
}

#[test]
fn test_continue_runs_post_expression() {
    assert_eq!(
        run_main("for (i = 0; i < 3; i += 1) { continue; } print(i);"),
        "3\n"
    );
}

#[test]
fn test_for_without_header_parts() {
    assert_eq!(
        run_main("i = 0; for (;;) { i += 1; if (i == 4) { break; } } print(i);"),
        "4\n"
    );
}

#[test]
fn test_return_from_nested_loops() {
    let result = run(
        "Function find() -> int {
             for (i = 0; i < 5; i += 1) {
                 for (j = 0; j < 5; j += 1) {
                     if (i * j == 6) { return i * 10 + j; }
                 }
             }
             return -1;
         }
         Function main() -> int { return find(); }",
    );
    assert_eq!(result.outcome.value, Value::Int(23));
    assert_eq!(result.env.depth(), 1);
}

#[test]
fn test_break_only_leaves_inner_loop() {
    assert_eq!(
        run_main(
            "for (i = 0; i < 2; i += 1) {
                 for (;;) { break; }
                 print(i);
             }"
        ),
        "0\n1\n"
    );
}

#[test]
fn test_ternary_evaluates_one_branch() {
    assert_eq!(
        run_main(
            "x = 1 ? { true: print(\"t\") : false: print(\"f\") };
             print(0 ? { true: \"yes\" : false: \"no\" });"
        ),
        "t\nno\n"
    );
}

#[test]
fn test_logical_operators_do_not_short_circuit() {
    let result = run(
        "variable hits: int = 0;
         Function touch() -> bool { hits += 1; return true; }
         Function main() -> void {
             print(false && touch());
             print(true || touch());
         }",
    );
    assert_eq!(result.output, "false\ntrue\n");
    assert_eq!(result.env.lookup("hits"), Some(Value::Int(2)));
}

#[test]
fn test_recursion() {
    let result = run(
        "Function fib(n: int) -> int {
             if (n < 2) { return n; }
             return fib(n - 1) + fib(n - 2);
         }
         Function main() -> int { return fib(15); }",
    );
    assert_eq!(result.outcome.value, Value::Int(610));
}

#[test]
fn test_newest_function_wins() {
    let result = run(
        "Function f() -> int { return 1; }
         Function f() -> int { return 2; }
         Function main() -> int { return f(); }",
    );
    assert_eq!(result.outcome.value, Value::Int(2));
}

#[test]
fn test_missing_args_bind_void_and_extras_are_evaluated() {
    let result = run(
        "variable side: int = 0;
         Function bump() -> int { side += 1; return side; }
         Function show(a: int, b: int) -> void { print(a, b); }
         Function main() -> void { show(1); show(1, 2, bump()); }",
    );
    assert_eq!(result.output, "1 void\n1 2\n");
    assert_eq!(result.env.lookup("side"), Some(Value::Int(1)));
}

#[test]
fn test_unknown_function_is_void() {
    assert_eq!(run_main("print(nothing(1, 2));"), "void\n");
}

#[test]
fn test_non_identifier_callee_is_void() {
    assert_eq!(run_main("print((print)(1));"), "void\n");
}

#[test]
fn test_calls_see_caller_scope() {
    let result = run(
        "Function peek() -> int { return secret; }
         Function main() -> int { secret = 7; return peek(); }",
    );
    assert_eq!(result.outcome.value, Value::Int(7));
}

#[test]
fn test_parameters_are_local() {
    let result = run(
        "variable x: int = 1;
         Function set(x: int) -> void { x = 99; }
         Function main() -> void { set(5); }",
    );
    assert_eq!(result.env.lookup("x"), Some(Value::Int(1)));
}

#[test]
fn test_nested_block_scope() {
    assert_eq!(
        run_main("{ inner = 1; print(inner); } print(inner);"),
        "1\nvoid\n"
    );
}

#[test]
fn test_string_concat_and_type_errors() {
    assert_eq!(
        run_main(r#"print("ab" + "cd", "ab" + 1, true + 1, "a" < "b");"#),
        "abcd void void void\n"
    );
}

#[test]
fn test_environment_persists_across_programs() {
    let mut env = Environment::new();
    let (first, _) = run_in(
        &mut env,
        "variable total: int = 10; Function add(n: int) -> int { return total + n; }",
    );
    assert_eq!(first, "");
    let (second, outcome) = run_in(&mut env, "Function main() -> int { return add(5); }");
    assert_eq!(second, "");
    assert_eq!(outcome.value, Value::Int(15));
    // The earlier `main` is not re-run by a later program without one.
    let (third, outcome) = run_in(&mut env, "variable y: int = 1;");
    assert_eq!(third, "");
    assert_eq!(outcome.value, Value::Void);
}

#[test]
fn test_deep_recursion_does_not_overflow() {
    let result = run(
        "Function down(n: int) -> int {
             if (n == 0) { return 0; }
             return down(n - 1) + 1;
         }
         Function main() -> int { return down(5000); }",
    );
    assert_eq!(result.outcome.value, Value::Int(5000));
}

#[test]
fn test_deterministic() {
    let source = "variable acc: int = 0;
        Function main() -> void {
            for (i = 0; i < 20; i += 1) { acc += i * i; print(acc % 7); }
        }";
    let first = run(source);
    let second = run(source);
    assert_eq!(first.output, second.output);
    assert_eq!(first.env.lookup("acc"), second.env.lookup("acc"));
}
