//! Environment for variable and function scoping in the interpreter.
//!
//! Uses a scope stack (not cloning): blocks and calls push a scope whose
//! parent is the scope that was current, and pop it on every exit path.
//! Because a call scope is parented on the calling scope, free names in a
//! function body resolve through the caller's bindings.
//!
//! Variables and functions follow different shadowing rules inside a single
//! scope. Definitions always append; a variable lookup returns the *oldest*
//! binding of a name in the nearest scope that has one, while a function
//! lookup returns the *newest*.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use celer_ir::FunctionRef;

use crate::builtins::BuiltinRegistry;
use crate::Value;

/// Whether a variable binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `variable` declarations, parameters and implicit definitions.
    Mutable,
    /// Top-level `const` declarations.
    Immutable,
}

impl Mutability {
    /// Returns `true` if this is `Mutable`.
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }

    #[inline]
    pub fn from_const(is_const: bool) -> Self {
        if is_const {
            Mutability::Immutable
        } else {
            Mutability::Mutable
        }
    }
}

/// Error returned by `assign` when assignment fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The nearest binding of the name is a constant.
    Immutable,
    /// Variable not found in any scope.
    Undefined,
}

/// A single-threaded scope handle: `Rc<RefCell<T>>` behind a factory.
///
/// Scopes never cross threads, so the cheaper `Rc` is used instead of
/// `Arc`. `#[repr(transparent)]` keeps the wrapper layout-identical to the
/// inner handle.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A variable binding.
#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

impl Binding {
    fn store(&mut self, value: Value) -> Result<(), AssignError> {
        if !self.mutability.is_mutable() {
            return Err(AssignError::Immutable);
        }
        self.value = value;
        Ok(())
    }
}

/// A single scope containing variable bindings and function handles.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    /// Bindings per name in definition order; only the first is visible.
    bindings: FxHashMap<String, Vec<Binding>>,
    /// Function handles per name in definition order; the last is visible.
    functions: FxHashMap<String, Vec<FunctionRef>>,
    /// Parent scope (the scope that was current when this one was pushed).
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// Create a new empty scope with no parent.
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }

    /// Define a variable in this scope.
    ///
    /// Never overwrites: an existing binding of the same name stays the one
    /// that lookups in this scope find.
    #[inline]
    pub fn define(&mut self, name: &str, value: Value, mutability: Mutability) {
        self.bindings
            .entry(name.to_string())
            .or_default()
            .push(Binding { value, mutability });
    }

    /// Register a function handle in this scope under its declared name.
    pub fn define_function(&mut self, func: FunctionRef) {
        self.functions
            .entry(func.name.clone())
            .or_default()
            .push(func);
    }

    fn local_binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name).and_then(|list| list.first())
    }

    fn local_binding_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.bindings.get_mut(name).and_then(|list| list.first_mut())
    }

    fn local_function(&self, name: &str) -> Option<&FunctionRef> {
        self.functions.get(name).and_then(|list| list.last())
    }

    /// Apply `find` to this scope, then to each ancestor, returning the first hit.
    ///
    /// Iterative so deep call chains do not recurse once per scope.
    fn find_in_chain<T>(&self, find: impl Fn(&Scope) -> Option<T>) -> Option<T> {
        if let Some(found) = find(self) {
            return Some(found);
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let scope_ref = scope.borrow();
            if let Some(found) = find(&scope_ref) {
                return Some(found);
            }
            next = scope_ref.parent.clone();
        }
        None
    }

    /// Look up a variable by name.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.find_in_chain(|scope| scope.local_binding(name).map(|b| b.value.clone()))
    }

    /// Look up a function by name.
    pub fn lookup_function(&self, name: &str) -> Option<FunctionRef> {
        self.find_in_chain(|scope| scope.local_function(name).cloned())
    }

    /// Assign to the nearest visible binding of `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.local_binding_mut(name) {
            return binding.store(value);
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let mut scope_mut = scope.borrow_mut();
            if let Some(binding) = scope_mut.local_binding_mut(name) {
                return binding.store(value);
            }
            next = scope_mut.parent.clone();
        }
        Err(AssignError::Undefined)
    }
}

/// Environment for the interpreter using a scope stack.
///
/// The global scope is always at the bottom and is never popped, so one
/// environment can be reused across many program evaluations (the REPL)
/// and keep accumulating globals and functions.
pub struct Environment {
    /// Stack of scopes, with current scope at the top.
    scopes: Vec<LocalScope<Scope>>,
    /// Global scope (always at the bottom).
    global: LocalScope<Scope>,
    /// Native functions, consulted before any user function.
    builtins: BuiltinRegistry,
}

impl Environment {
    /// Create a new environment with a global scope and no builtins.
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
            builtins: BuiltinRegistry::new(),
        }
    }

    /// Get the current scope depth (1 when only the global scope is live).
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a new scope whose parent is the current scope.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope().clone();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    fn current_scope(&self) -> &LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global)
    }

    /// Define a variable in the current scope.
    #[inline]
    pub fn define(&mut self, name: &str, value: Value, mutability: Mutability) {
        self.current_scope()
            .borrow_mut()
            .define(name, value, mutability);
    }

    /// Look up a variable from the current scope outward.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current_scope().borrow().lookup(name)
    }

    /// Assign to an existing variable visible from the current scope.
    #[inline]
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        self.current_scope().borrow_mut().assign(name, value)
    }

    /// Register a function in the current scope.
    pub fn define_function(&mut self, func: FunctionRef) {
        self.current_scope().borrow_mut().define_function(func);
    }

    /// Look up a user function from the current scope outward.
    pub fn lookup_function(&self, name: &str) -> Option<FunctionRef> {
        self.current_scope().borrow().lookup_function(name)
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub fn builtins_mut(&mut self) -> &mut BuiltinRegistry {
        &mut self.builtins
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("builtins", &self.builtins)
            .finish_non_exhaustive()
    }
}
