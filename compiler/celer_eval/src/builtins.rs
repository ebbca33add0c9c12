//! Native functions callable from Celer code.
//!
//! The registry belongs to an [`Environment`](crate::Environment) rather
//! than the process, so independent sessions never share builtin state.
//! Builtins are looked up by name before user functions.

use rustc_hash::FxHashMap;

use crate::print_handler::PrintHandlerImpl;
use crate::Value;

/// Signature of a native function: the evaluated arguments, unchecked for
/// arity, plus the output sink of the running interpreter.
pub type BuiltinFn = fn(&[Value], &PrintHandlerImpl) -> Value;

/// Name to native function table.
#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    table: FxHashMap<String, BuiltinFn>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        BuiltinRegistry::default()
    }

    /// Register `func` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &str, func: BuiltinFn) {
        self.table.insert(name.to_string(), func);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<BuiltinFn> {
        self.table.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Register the standard builtins. Safe to call repeatedly.
    pub fn register_prelude(&mut self) {
        self.register("print", print);
    }
}

/// `print(a, b, ...)`: the textual form of every argument, separated by
/// single spaces, followed by a newline.
pub fn print(args: &[Value], out: &PrintHandlerImpl) -> Value {
    let line = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    out.println(&line);
    Value::Void
}
