//! Declared types.
//!
//! Types on declarations are advisory: nothing checks them before
//! evaluation. They are kept for the AST dump and future checking.

use std::fmt;

/// A type written after `:` or `->`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TypeSpec {
    /// Spelled as the identifier `void` (not a keyword).
    #[default]
    Void,
    Int,
    Bool,
    Float,
    String,
}

impl TypeSpec {
    pub const fn name(self) -> &'static str {
        match self {
            TypeSpec::Void => "void",
            TypeSpec::Int => "int",
            TypeSpec::Bool => "bool",
            TypeSpec::Float => "float",
            TypeSpec::String => "string",
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
