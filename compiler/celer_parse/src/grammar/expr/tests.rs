use celer_diagnostic::ErrorCode;
use celer_ir::{Declaration, Expr, ExprKind, Position, StmtKind};
use pretty_assertions::assert_eq;

use crate::{parse, ParseOutput};

const PRELUDE: &str = "Function main() -> void { ";

fn wrap(src: &str) -> String {
    format!("{PRELUDE}{src}; }}")
}

fn first_expr(output: &ParseOutput) -> Expr {
    let Some(Declaration::Function(func)) = output.program.decls.first() else {
        panic!("expected a function, got {:?}", output.program.decls);
    };
    match &func.body.stmts[0].kind {
        StmtKind::Expr(expr) => expr.clone(),
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn parse_expr(src: &str) -> Expr {
    let output = parse(&wrap(src));
    assert!(!output.has_errors(), "{src}: {:?}", output.errors);
    first_expr(&output)
}

/// Compact prefix rendering for structural assertions.
fn sexp(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Ident(name) => name.clone(),
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Float(f) => format!("{f:?}"),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Str(raw) => raw.clone(),
        ExprKind::Unary { op, operand } => format!("({} {})", op.as_symbol(), sexp(operand)),
        ExprKind::Binary { left, op, right } => {
            format!("({} {} {})", op.as_symbol(), sexp(left), sexp(right))
        }
        ExprKind::Assign { target, op, value } => {
            format!("({} {target} {})", op.as_symbol(), sexp(value))
        }
        ExprKind::Grouping(inner) => format!("(group {})", sexp(inner)),
        ExprKind::Ternary {
            cond,
            when_true,
            when_false,
        } => format!("(? {} {} {})", sexp(cond), sexp(when_true), sexp(when_false)),
        ExprKind::Call { callee, args } => {
            let mut out = format!("(call {}", sexp(callee));
            for arg in args {
                out.push(' ');
                out.push_str(&sexp(arg));
            }
            out.push(')');
            out
        }
    }
}

fn shape(src: &str) -> String {
    sexp(&parse_expr(src))
}

#[test]
fn test_multiplicative_binds_tighter() {
    assert_eq!(shape("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(shape("1 * 2 + 3"), "(+ (* 1 2) 3)");
}

#[test]
fn test_binary_left_associative() {
    assert_eq!(shape("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(shape("8 / 4 % 3"), "(% (/ 8 4) 3)");
}

#[test]
fn test_precedence_ladder() {
    assert_eq!(
        shape("a || b && c == d < e + f * g"),
        "(|| a (&& b (== c (< d (+ e (* f g))))))"
    );
}

#[test]
fn test_assignment_right_associative() {
    assert_eq!(shape("a = b = 1"), "(= a (= b 1))");
}

#[test]
fn test_compound_assignment() {
    assert_eq!(shape("i += 5"), "(+= i 5)");
    assert_eq!(shape("i %= 2 + 1"), "(%= i (+ 2 1))");
}

#[test]
fn test_unary() {
    assert_eq!(shape("-a * b"), "(* (- a) b)");
    assert_eq!(shape("!a == b"), "(== (! a) b)");
    assert_eq!(shape("- -1"), "(- (- 1))");
}

#[test]
fn test_calls() {
    assert_eq!(shape("f()"), "(call f)");
    assert_eq!(shape("f(1, 2)(3)"), "(call (call f 1 2) 3)");
    assert_eq!(shape("a + f(1) * 2"), "(+ a (* (call f 1) 2))");
    assert_eq!(shape("-f(x)"), "(- (call f x))");
    assert_eq!(shape("print(a = 1)"), "(call print (= a 1))");
}

#[test]
fn test_grouping() {
    assert_eq!(shape("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
}

#[test]
fn test_literals() {
    assert_eq!(shape("3.25"), "3.25");
    assert_eq!(shape(r#""a\nb""#), r#""a\nb""#);
    assert_eq!(shape("true"), "true");
    assert_eq!(shape("false"), "false");
}

#[test]
fn test_int_literal_saturates() {
    assert_eq!(shape("99999999999999999999"), i64::MAX.to_string());
}

#[test]
fn test_ternary() {
    assert_eq!(shape("x ? { true: 1 : false: 0 }"), "(? x 1 0)");
    assert_eq!(
        shape("(10 + 2) * 3 == 36 ? { true: 1 : false: 0 }"),
        "(? (== (* (group (+ 10 2)) 3) 36) 1 0)"
    );
    assert_eq!(shape("i = c ? { true: 1 : false: 0 }"), "(= i (? c 1 0))");
}

#[test]
fn test_ternary_binds_looser_than_binary() {
    assert_eq!(shape("1 + x ? { true: 1 : false: 0 }"), "(? (+ 1 x) 1 0)");
    assert_eq!(shape("a && b ? { true: 1 : false: 0 }"), "(? (&& a b) 1 0)");
}

fn ternary_under_binary(expr: &Expr, under_binary: bool) -> bool {
    match &expr.kind {
        ExprKind::Ternary {
            cond,
            when_true,
            when_false,
        } => {
            under_binary
                || ternary_under_binary(cond, false)
                || ternary_under_binary(when_true, false)
                || ternary_under_binary(when_false, false)
        }
        ExprKind::Binary { left, right, .. } => {
            ternary_under_binary(left, true) || ternary_under_binary(right, true)
        }
        ExprKind::Unary { operand, .. } => ternary_under_binary(operand, true),
        ExprKind::Assign { value, .. } => ternary_under_binary(value, false),
        _ => false,
    }
}

#[test]
fn test_ternary_never_under_binary_without_grouping() {
    for src in [
        "1 + x ? { true: 1 : false: 0 }",
        "a * b - c ? { true: a : false: b }",
        "a == b || c ? { true: 1 : false: 2 }",
        "y = a < b ? { true: a : false: b }",
    ] {
        let expr = parse_expr(src);
        assert!(!ternary_under_binary(&expr, false), "{src}");
    }
}

#[test]
fn test_binary_position_is_operator() {
    let expr = parse_expr("a + b");
    assert_eq!(expr.pos, Position::new(1, 29));
}

#[test]
fn test_assign_position_is_target() {
    let expr = parse_expr("a = 1");
    assert_eq!(expr.pos, Position::new(1, 27));
}

#[test]
fn test_invalid_assignment_target() {
    let output = parse(&wrap("1 = 2"));
    assert_eq!(output.errors.len(), 1);
    let err = &output.errors[0];
    assert_eq!(err.code, ErrorCode::E1007);
    assert_eq!(err.message, "left side of assignment must be an identifier");
    assert_eq!(err.pos, Position::new(1, 27));
    assert_eq!(sexp(&first_expr(&output)), "1");
}

#[test]
fn test_missing_primary_yields_zero() {
    let output = parse(&wrap("1 + )"));
    let err = &output.errors[0];
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.message, "expected expression");
    assert_eq!(err.pos, Position::new(1, 31));
    assert_eq!(sexp(&first_expr(&output)), "(+ 1 0)");
}

#[test]
fn test_unclosed_call() {
    let output = parse(&wrap("f(1, 2"));
    assert_eq!(output.errors[0].code, ErrorCode::E1003);
    assert_eq!(output.errors[0].message, "expected ')' after arguments");
}

#[test]
fn test_illegal_token_in_expression() {
    let output = parse(&wrap("a @ b"));
    let err = &output.errors[0];
    assert_eq!(err.code, ErrorCode::E0002);
    assert_eq!(err.context.as_deref(), Some("expected ';' at end of statement"));
}
