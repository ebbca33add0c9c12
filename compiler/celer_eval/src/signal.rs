//! Control-flow signals.
//!
//! Statements report how they finished through [`Signal`]; `break`,
//! `continue` and `return` travel outward as ordinary return values until
//! the loop or call that consumes them.

use crate::Value;

/// How a statement finished.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Signal {
    /// Completed normally; continue with the next statement.
    #[default]
    None,
    /// `return`, carrying its value (`Void` for a bare `return;`).
    Return(Value),
    Break,
    Continue,
    /// Reserved for faults that abort evaluation. No current operation
    /// raises it; loops and blocks propagate it like `Return`.
    RuntimeError,
}

impl Signal {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Signal::None)
    }
}

/// Final result of evaluating a program: the terminal signal and a value.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Outcome {
    pub signal: Signal,
    pub value: Value,
}

impl Outcome {
    /// A normal completion carrying `value`.
    pub fn normal(value: Value) -> Self {
        Outcome {
            signal: Signal::None,
            value,
        }
    }
}
