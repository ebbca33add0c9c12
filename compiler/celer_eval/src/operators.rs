//! Binary and unary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch over the fixed value set. Ill-typed operand
//! combinations yield `Value::Void` rather than an error; that is the
//! language's only runtime failure channel.

use celer_ir::{BinaryOp, UnaryOp};

use crate::value::{Value, FLOAT_EPSILON};

/// Evaluate a binary operation. Both operands are always already evaluated.
pub fn evaluate_binary(left: &Value, op: BinaryOp, right: &Value) -> Value {
    match op {
        BinaryOp::Add => match (left, right) {
            (Value::Str(a), Value::Str(b)) => Value::Str(format!("{a}{b}")),
            _ => arith(left, right, i64::wrapping_add, |a, b| a + b),
        },
        BinaryOp::Sub => arith(left, right, i64::wrapping_sub, |a, b| a - b),
        BinaryOp::Mul => arith(left, right, i64::wrapping_mul, |a, b| a * b),
        BinaryOp::Div => arith(left, right, int_div, |a, b| a / b),
        BinaryOp::Mod => match (left, right) {
            (Value::Int(a), Value::Int(b)) => Value::Int(int_rem(*a, *b)),
            _ => Value::Void,
        },
        BinaryOp::Eq => Value::Bool(values_equal(left, right)),
        BinaryOp::NotEq => Value::Bool(!values_equal(left, right)),
        BinaryOp::Lt => less_than(left, right).map_or(Value::Void, Value::Bool),
        BinaryOp::LtEq => less_or_equal(left, right).map_or(Value::Void, Value::Bool),
        BinaryOp::Gt => less_or_equal(left, right).map_or(Value::Void, |le| Value::Bool(!le)),
        BinaryOp::GtEq => less_than(left, right).map_or(Value::Void, |lt| Value::Bool(!lt)),
        BinaryOp::And => Value::Bool(left.is_truthy() && right.is_truthy()),
        BinaryOp::Or => Value::Bool(left.is_truthy() || right.is_truthy()),
    }
}

/// Evaluate a unary operation.
///
/// Negation is `0 - operand`, so it shares the numeric promotion rules of
/// subtraction and yields `Void` for non-numeric operands.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> Value {
    match op {
        UnaryOp::Neg => evaluate_binary(&Value::Int(0), BinaryOp::Sub, operand),
        UnaryOp::Not => Value::Bool(!operand.is_truthy()),
    }
}

/// Equality as `==` sees it.
///
/// Same-kind values compare natively (floats within [`FLOAT_EPSILON`]), a
/// mixed int/float pair compares numerically, any other mismatch is unequal.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Void, Value::Void) => true,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() < FLOAT_EPSILON,
            _ => false,
        },
    }
}

/// Integer arithmetic for two ints, float arithmetic when both operands are
/// numeric and at least one is a float, `Void` otherwise.
#[inline]
fn arith(
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Value::Int(int_op(*a, *b));
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => Value::Float(float_op(a, b)),
        _ => Value::Void,
    }
}

/// Integer division; a zero divisor yields 0.
#[inline]
fn int_div(a: i64, b: i64) -> i64 {
    if b == 0 {
        0
    } else {
        a.wrapping_div(b)
    }
}

/// Integer remainder; a zero divisor yields 0.
#[inline]
fn int_rem(a: i64, b: i64) -> i64 {
    if b == 0 {
        0
    } else {
        a.wrapping_rem(b)
    }
}

/// `Some(a < b)` for numeric operands, `None` otherwise.
fn less_than(left: &Value, right: &Value) -> Option<bool> {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Some(a < b);
    }
    Some(left.as_f64()? < right.as_f64()?)
}

fn less_or_equal(left: &Value, right: &Value) -> Option<bool> {
    Some(less_than(left, right)? || values_equal(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bin(left: impl Into<Value>, op: BinaryOp, right: impl Into<Value>) -> Value {
        evaluate_binary(&left.into(), op, &right.into())
    }

    #[test]
    fn test_int_arithmetic() {
        assert_eq!(bin(2_i64, BinaryOp::Add, 3_i64), Value::Int(5));
        assert_eq!(bin(2_i64, BinaryOp::Sub, 3_i64), Value::Int(-1));
        assert_eq!(bin(4_i64, BinaryOp::Mul, 3_i64), Value::Int(12));
        assert_eq!(bin(7_i64, BinaryOp::Div, 2_i64), Value::Int(3));
        assert_eq!(bin(-7_i64, BinaryOp::Div, 2_i64), Value::Int(-3));
        assert_eq!(bin(7_i64, BinaryOp::Mod, 3_i64), Value::Int(1));
        assert_eq!(bin(-7_i64, BinaryOp::Mod, 3_i64), Value::Int(-1));
    }

    #[test]
    fn test_zero_divisor_yields_zero() {
        assert_eq!(bin(5_i64, BinaryOp::Div, 0_i64), Value::Int(0));
        assert_eq!(bin(5_i64, BinaryOp::Mod, 0_i64), Value::Int(0));
        assert_eq!(bin(i64::MIN, BinaryOp::Div, -1_i64), Value::Int(i64::MIN));
    }

    #[test]
    fn test_float_promotion() {
        assert_eq!(bin(1_i64, BinaryOp::Add, 0.5_f64), Value::Float(1.5));
        assert_eq!(bin(1.5_f64, BinaryOp::Mul, 2_i64), Value::Float(3.0));
        assert_eq!(bin(1_i64, BinaryOp::Div, 4.0_f64), Value::Float(0.25));
        assert_eq!(bin(1.0_f64, BinaryOp::Div, 0.0_f64), Value::Float(f64::INFINITY));
    }

    #[test]
    fn test_float_modulo_is_void() {
        assert_eq!(bin(5.5_f64, BinaryOp::Mod, 2_i64), Value::Void);
    }

    #[test]
    fn test_string_concat() {
        assert_eq!(bin("ab", BinaryOp::Add, "cd"), Value::string("abcd"));
        assert_eq!(bin("ab", BinaryOp::Sub, "cd"), Value::Void);
        assert_eq!(bin("ab", BinaryOp::Add, 1_i64), Value::Void);
    }

    #[test]
    fn test_ill_typed_is_void() {
        assert_eq!(bin(true, BinaryOp::Add, 1_i64), Value::Void);
        assert_eq!(bin(1.5_f64, BinaryOp::Add, "s"), Value::Void);
        assert_eq!(evaluate_binary(&Value::Void, BinaryOp::Mul, &Value::Int(1)), Value::Void);
    }

    #[test]
    fn test_equality() {
        assert_eq!(bin(1_i64, BinaryOp::Eq, 1_i64), Value::Bool(true));
        assert_eq!(bin(1_i64, BinaryOp::Eq, 1.0_f64), Value::Bool(true));
        assert_eq!(bin(0.1_f64 + 0.2_f64, BinaryOp::Eq, 0.3_f64), Value::Bool(true));
        assert_eq!(bin("a", BinaryOp::Eq, "a"), Value::Bool(true));
        assert_eq!(bin("1", BinaryOp::Eq, 1_i64), Value::Bool(false));
        assert_eq!(bin(true, BinaryOp::NotEq, 1_i64), Value::Bool(true));
        assert!(values_equal(&Value::Void, &Value::Void));
    }

    #[test]
    fn test_ordering() {
        assert_eq!(bin(1_i64, BinaryOp::Lt, 2_i64), Value::Bool(true));
        assert_eq!(bin(2_i64, BinaryOp::LtEq, 2.0_f64), Value::Bool(true));
        assert_eq!(bin(3_i64, BinaryOp::Gt, 2.5_f64), Value::Bool(true));
        assert_eq!(bin(2_i64, BinaryOp::GtEq, 3_i64), Value::Bool(false));
    }

    #[test]
    fn test_ordering_non_numeric_is_void() {
        for op in [BinaryOp::Lt, BinaryOp::LtEq, BinaryOp::Gt, BinaryOp::GtEq] {
            assert_eq!(bin("a", op, "b"), Value::Void, "{op:?}");
            assert_eq!(bin(true, op, 1_i64), Value::Void, "{op:?}");
        }
    }

    #[test]
    fn test_logical_coerces() {
        assert_eq!(bin(1_i64, BinaryOp::And, "x"), Value::Bool(true));
        assert_eq!(bin(0_i64, BinaryOp::Or, ""), Value::Bool(false));
        assert_eq!(bin(0.0_f64, BinaryOp::Or, 2_i64), Value::Bool(true));
    }

    #[test]
    fn test_unary() {
        assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::Int(4)), Value::Int(-4));
        assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::Float(1.5)), Value::Float(-1.5));
        assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::string("s")), Value::Void);
        assert_eq!(evaluate_unary(UnaryOp::Not, &Value::Int(0)), Value::Bool(true));
        assert_eq!(evaluate_unary(UnaryOp::Not, &Value::string("s")), Value::Bool(false));
    }
}
