//! Host functions callable from Wisp.
//!
//! A [`BuiltinRegistry`] is built explicitly and handed to the interpreter
//! through its builder. Identifiers with no lexical binding fall back to the
//! registry, so programs may shadow any builtin with a `let`.

mod standard;

use std::fmt;

use rustc_hash::FxHashMap;

use crate::errors::{arity_mismatch, EvalError};
use crate::print_handler::PrintHandlerImpl;
use crate::Value;

/// Host function signature.
pub type BuiltinFn = fn(&BuiltinContext<'_>, &[Value]) -> Result<Value, EvalError>;

/// Number of arguments a builtin accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Inclusive bounds.
    Range(usize, usize),
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Range(lo, hi) => (lo..=hi).contains(&count),
            Arity::Variadic => true,
        }
    }

    /// Phrase used in arity errors, e.g. "2 arguments".
    pub fn describe(self) -> String {
        match self {
            Arity::Exact(n) => plural_arguments(n),
            Arity::Range(lo, hi) => format!("{lo} to {hi} arguments"),
            Arity::Variadic => "any number of arguments".to_string(),
        }
    }
}

/// "1 argument", "2 arguments".
pub(crate) fn plural_arguments(n: usize) -> String {
    if n == 1 {
        "1 argument".to_string()
    } else {
        format!("{n} arguments")
    }
}

/// What a builtin may reach of the running interpreter.
pub struct BuiltinContext<'a> {
    print: &'a PrintHandlerImpl,
}

impl<'a> BuiltinContext<'a> {
    pub fn new(print: &'a PrintHandlerImpl) -> Self {
        BuiltinContext { print }
    }

    pub fn print_handler(&self) -> &PrintHandlerImpl {
        self.print
    }
}

/// A named host function.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub func: BuiltinFn,
}

impl Builtin {
    pub const fn new(name: &'static str, arity: Arity, func: BuiltinFn) -> Self {
        Builtin { name, arity, func }
    }

    /// Check arity, then run.
    pub fn call(&self, ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
        if !self.arity.accepts(args.len()) {
            return Err(arity_mismatch(self.name, self.arity.describe(), args.len()));
        }
        (self.func)(ctx, args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Builtins by name.
#[derive(Clone, Default)]
pub struct BuiltinRegistry {
    entries: FxHashMap<&'static str, Builtin>,
}

impl BuiltinRegistry {
    /// A registry with no builtins.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard library: collections, conversions and printing.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for builtin in standard::BUILTINS {
            registry.register(*builtin);
        }
        registry
    }

    /// Add `builtin`, returning any builtin it replaces.
    pub fn register(&mut self, builtin: Builtin) -> Option<Builtin> {
        self.entries.insert(builtin.name, builtin)
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("names", &self.names())
            .finish()
    }
}
