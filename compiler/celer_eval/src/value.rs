//! Runtime values.
//!
//! Values are plain owned data: reading a variable clones its value, so two
//! reads of a string yield two independent buffers and nothing is ever
//! aliased between bindings.

use std::fmt;

/// Absolute tolerance used by float truthiness and float equality.
pub const FLOAT_EPSILON: f64 = 1e-12;

/// A dynamically typed Celer value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// Result of statements, missing bindings and ill-typed operations.
    #[default]
    Void,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Boolean coercion used by conditions, `!`, `&&` and `||`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => f.abs() > FLOAT_EPSILON,
            Value::Str(s) => !s.is_empty(),
            Value::Void => false,
        }
    }

    /// Numeric view of an int or float; `None` for every other kind.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[expect(
                clippy::cast_precision_loss,
                reason = "int to float promotion is the language's numeric rule"
            )]
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

/// Textual form written by `print`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("void"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => f.write_str(&format_general(*x)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// Significant digits of the general float format.
const PRECISION: i32 = 6;

/// Digits after the point in the scientific rendering (`PRECISION - 1`).
const MANTISSA_DECIMALS: usize = 5;

/// Format a float the way C's `%g` does: six significant digits, trailing
/// zeros dropped, exponent form when the decimal exponent is below -4 or
/// at least the precision.
pub fn format_general(x: f64) -> String {
    if x.is_nan() {
        return if x.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if x.is_infinite() {
        return if x < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to PRECISION digits first decides the exponent, as C does.
    let scientific = format!("{x:.MANTISSA_DECIMALS$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return x.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return x.to_string();
    };

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(PRECISION - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{x:.decimals$}")).to_string()
    }
}

/// Drop trailing zeros after a decimal point, and the point itself if bare.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
