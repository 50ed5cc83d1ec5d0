//! Lexical environments.
//!
//! An [`Environment`] is a handle to one scope in a parent-linked chain.
//! Handles are cheap to clone and share the scope they point at: a closure
//! keeps its defining scope, and through the parent links every enclosing
//! scope, alive for as long as the closure exists.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use wisp_ir::Name;

use crate::Value;

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `let x = ...`
    Mutable,
    /// `const x = ...`
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Why [`Environment::set`] or a definition failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The binding in the way is a constant.
    Immutable,
    /// No scope in the chain binds the name.
    Undefined,
}

/// A single-threaded, shared, interior-mutable scope.
///
/// Wraps `Rc<RefCell<T>>` so that every scope allocation goes through
/// [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

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

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Bindings of one scope.
struct Scope {
    bindings: FxHashMap<Name, Binding>,
    parent: Option<LocalScope<Scope>>,
}

struct Binding {
    value: Value,
    mutability: Mutability,
}

/// Handle to a scope in the environment chain.
#[derive(Clone)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// A root scope with no parent.
    pub fn new_global() -> Self {
        Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: None,
        }))
    }

    /// A fresh scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.0.clone()),
        }))
    }

    /// Bind `name` in this scope, replacing any mutable binding it already
    /// holds here. A constant in this scope stays put.
    pub fn define(&self, name: Name, value: Value) -> Result<(), AssignError> {
        self.bind(name, value, Mutability::Mutable)
    }

    /// Bind `name` in this scope as a constant.
    pub fn define_const(&self, name: Name, value: Value) -> Result<(), AssignError> {
        self.bind(name, value, Mutability::Immutable)
    }

    fn bind(&self, name: Name, value: Value, mutability: Mutability) -> Result<(), AssignError> {
        let mut scope = self.0.borrow_mut();
        if scope
            .bindings
            .get(&name)
            .is_some_and(|binding| !binding.mutability.is_mutable())
        {
            return Err(AssignError::Immutable);
        }
        scope.bindings.insert(name, Binding { value, mutability });
        Ok(())
    }

    /// Value of the nearest binding of `name`.
    pub fn get(&self, name: Name) -> Option<Value> {
        let mut scope = self.0.clone();
        loop {
            let parent = {
                let current = scope.borrow();
                if let Some(binding) = current.bindings.get(&name) {
                    return Some(binding.value.clone());
                }
                current.parent.clone()?
            };
            scope = parent;
        }
    }

    /// Reassign the nearest binding of `name`. Never creates a binding.
    pub fn set(&self, name: Name, value: Value) -> Result<(), AssignError> {
        let mut scope = self.0.clone();
        loop {
            let parent = {
                let mut current = scope.borrow_mut();
                if let Some(binding) = current.bindings.get_mut(&name) {
                    if !binding.mutability.is_mutable() {
                        return Err(AssignError::Immutable);
                    }
                    binding.value = value;
                    return Ok(());
                }
                current.parent.clone().ok_or(AssignError::Undefined)?
            };
            scope = parent;
        }
    }

    /// Whether this scope itself (not a parent) binds `name`.
    pub fn has_own(&self, name: Name) -> bool {
        self.0.borrow().bindings.contains_key(&name)
    }

    /// Number of bindings held directly by this scope.
    pub fn len(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        f.debug_struct("Environment")
            .field("bindings", &scope.bindings.len())
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}
