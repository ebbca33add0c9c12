//! RAII-style scope guards for Interpreter environment management.
//!
//! The [`ScopedInterpreter`] guard pops the scope it pushed when dropped, so
//! every way out of a block or call (normal completion, `break`, `continue`,
//! `return`, or unwinding) restores the environment to its prior depth.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`,
//! giving transparent access to all interpreter methods.
//!
//! ```text
//! interpreter.with_env_scope(|scoped| {
//!     scoped.env.define(name, value, Mutability::Mutable);
//!     scoped.eval_block(body)
//! })
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;

/// RAII guard that pops one environment scope on drop.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Push a scope and return a guard that pops it when dropped.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a new environment scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }
}
