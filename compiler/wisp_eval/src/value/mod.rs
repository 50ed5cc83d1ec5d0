//! Runtime values.
//!
//! Scalars are stored inline. Arrays and hashes are reference types: a
//! `Value` holds an `Rc` to shared storage, so assignment aliases and index
//! assignment is visible through every alias. Functions, classes and
//! instances compare by identity.

use std::cell::RefCell;
use std::fmt::{self, Write as _};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use wisp_ir::ast::FunctionLiteral;
use wisp_ir::Name;

use crate::builtins::Builtin;
use crate::environment::Environment;
use crate::errors::{unusable_hash_key, EvalError};

/// Shared, mutable array storage.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Shared, mutable hash storage.
pub type HashRef = Rc<RefCell<FxHashMap<HashKey, Value>>>;

#[derive(Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Bool(bool),
    Null,
    Array(ArrayRef),
    Hash(HashRef),
    Function(Rc<FunctionValue>),
    Builtin(Builtin),
    BoundMethod(Rc<BoundMethod>),
    Class(Rc<ClassValue>),
    Instance(Rc<Instance>),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn hash(entries: FxHashMap<HashKey, Value>) -> Self {
        Value::Hash(Rc::new(RefCell::new(entries)))
    }

    /// Name of this value's kind, as shown in error messages and by `type()`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::Hash(_) => "hash",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::BoundMethod(_) => "method",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }

    /// Zero, empty strings and collections, `null` and `false` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Null => false,
            Value::Array(items) => !items.borrow().is_empty(),
            Value::Hash(entries) => !entries.borrow().is_empty(),
            Value::Function(_)
            | Value::Builtin(_)
            | Value::BoundMethod(_)
            | Value::Class(_)
            | Value::Instance(_) => true,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Language equality: numbers by value across kinds, collections
/// structurally, callables and objects by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other, &mut Vec::new())
    }
}

/// Structural equality. `open` holds the container pairs being compared;
/// meeting a pair again means both sides cycle back the same way, so it
/// counts as equal.
fn values_equal(left: &Value, right: &Value, open: &mut Vec<(*const (), *const ())>) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
            int_equals_float(*a, *b)
        }
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        (Value::Array(a), Value::Array(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let pair = (Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>());
            if open.contains(&pair) {
                return true;
            }
            let (a, b) = (a.borrow(), b.borrow());
            if a.len() != b.len() {
                return false;
            }
            open.push(pair);
            let equal = wisp_stack::ensure_sufficient_stack(|| {
                a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y, open))
            });
            open.pop();
            equal
        }
        (Value::Hash(a), Value::Hash(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let pair = (Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>());
            if open.contains(&pair) {
                return true;
            }
            let (a, b) = (a.borrow(), b.borrow());
            if a.len() != b.len() {
                return false;
            }
            open.push(pair);
            let equal = wisp_stack::ensure_sufficient_stack(|| {
                a.iter().all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y, open)))
            });
            open.pop();
            equal
        }
        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
        (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
        (Value::BoundMethod(a), Value::BoundMethod(b)) => {
            Rc::ptr_eq(&a.receiver, &b.receiver) && Rc::ptr_eq(&a.method, &b.method)
        }
        (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
        (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

/// Exact comparison: the float must be integral and inside `i64` range.
fn int_equals_float(n: i64, x: f64) -> bool {
    // 2^63 as f64; every integral float below it in magnitude fits in i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    x.fract() == 0.0 && (-LIMIT..LIMIT).contains(&x) && n == x as i64
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

/// Keys a hash accepts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Int(i64),
    Bool(bool),
    Str(Rc<str>),
}

impl TryFrom<&Value> for HashKey {
    type Error = EvalError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(HashKey::Int(*n)),
            Value::Bool(b) => Ok(HashKey::Bool(*b)),
            Value::Str(s) => Ok(HashKey::Str(Rc::clone(s))),
            other => Err(unusable_hash_key(other.type_name())),
        }
    }
}

impl From<HashKey> for Value {
    fn from(key: HashKey) -> Self {
        match key {
            HashKey::Int(n) => Value::Int(n),
            HashKey::Bool(b) => Value::Bool(b),
            HashKey::Str(s) => Value::Str(s),
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Int(n) => write!(f, "{n}"),
            HashKey::Bool(b) => write!(f, "{b}"),
            HashKey::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// A user function closed over its defining environment.
pub struct FunctionValue {
    pub name: Option<&'static str>,
    pub literal: Rc<FunctionLiteral>,
    pub closure: Environment,
}

impl FunctionValue {
    pub fn new(name: Option<&'static str>, literal: Rc<FunctionLiteral>, closure: Environment) -> Self {
        FunctionValue {
            name,
            literal,
            closure,
        }
    }

    #[inline]
    pub fn params(&self) -> &[Name] {
        &self.literal.params
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.literal.arity()
    }

    pub fn display_name(&self) -> &'static str {
        self.name.unwrap_or("<anonymous>")
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

/// A class: a parent link, an optional `init` constructor and a method table.
///
/// Inheritance is not flattened; lookups walk the parent chain.
pub struct ClassValue {
    pub name: &'static str,
    pub parent: Option<Rc<ClassValue>>,
    pub constructor: Option<Rc<FunctionValue>>,
    pub methods: FxHashMap<Name, Rc<FunctionValue>>,
}

impl ClassValue {
    /// This class followed by its ancestors, nearest first.
    pub fn ancestry(self: &Rc<Self>) -> impl Iterator<Item = Rc<ClassValue>> {
        std::iter::successors(Some(Rc::clone(self)), |class| class.parent.clone())
    }

    /// The method `name` and the class whose table holds it.
    pub fn find_method(self: &Rc<Self>, name: Name) -> Option<(Rc<FunctionValue>, Rc<ClassValue>)> {
        self.ancestry().find_map(|class| {
            let method = class.methods.get(&name).cloned()?;
            Some((method, class))
        })
    }

    /// The nearest constructor and the class that declares it.
    pub fn find_constructor(self: &Rc<Self>) -> Option<(Rc<FunctionValue>, Rc<ClassValue>)> {
        self.ancestry().find_map(|class| {
            let ctor = class.constructor.clone()?;
            Some((ctor, class))
        })
    }
}

impl fmt::Debug for ClassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassValue")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name))
            .field("methods", &self.methods.len())
            .finish_non_exhaustive()
    }
}

/// An object created by `new`.
pub struct Instance {
    pub class: Rc<ClassValue>,
    fields: RefCell<FxHashMap<Name, Value>>,
}

impl Instance {
    pub fn new(class: Rc<ClassValue>) -> Self {
        Instance {
            class,
            fields: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn get_field(&self, name: Name) -> Option<Value> {
        self.fields.borrow().get(&name).cloned()
    }

    pub fn set_field(&self, name: Name, value: Value) {
        self.fields.borrow_mut().insert(name, value);
    }
}

/// A method read off an instance, remembering both the receiver and the
/// class whose table supplied the method.
pub struct BoundMethod {
    pub receiver: Rc<Instance>,
    pub method: Rc<FunctionValue>,
    /// Class context while the method runs.
    pub owner: Rc<ClassValue>,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        render(self, false, &mut Vec::new(), &mut out)?;
        f.write_str(&out)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        render(self, true, &mut Vec::new(), &mut out)?;
        write!(f, "{}({out})", self.type_name())
    }
}

/// Write `value`; strings are quoted when `quoted` or when nested. `open`
/// holds the containers being written, so a self-containing array prints
/// `[...]` instead of recursing forever.
fn render(value: &Value, quoted: bool, open: &mut Vec<*const ()>, out: &mut String) -> fmt::Result {
    match value {
        Value::Int(n) => write!(out, "{n}"),
        Value::Float(x) => write!(out, "{x:?}"),
        Value::Str(s) if quoted => write!(out, "{s:?}"),
        Value::Str(s) => write!(out, "{s}"),
        Value::Bool(b) => write!(out, "{b}"),
        Value::Null => write!(out, "null"),
        Value::Array(items) => {
            let id = Rc::as_ptr(items).cast::<()>();
            if open.contains(&id) {
                return write!(out, "[...]");
            }
            open.push(id);
            out.push('[');
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render(item, true, open, out)?;
            }
            out.push(']');
            open.pop();
            Ok(())
        }
        Value::Hash(entries) => {
            let id = Rc::as_ptr(entries).cast::<()>();
            if open.contains(&id) {
                return write!(out, "{{...}}");
            }
            open.push(id);
            let entries = entries.borrow();
            let mut keys: Vec<&HashKey> = entries.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write!(out, "{key}: ")?;
                if let Some(value) = entries.get(key) {
                    render(value, true, open, out)?;
                }
            }
            out.push('}');
            open.pop();
            Ok(())
        }
        Value::Function(func) => match func.name {
            Some(name) => write!(out, "<fn {name}>"),
            None => write!(out, "<fn>"),
        },
        Value::Builtin(builtin) => write!(out, "<builtin {}>", builtin.name),
        Value::BoundMethod(bound) => write!(
            out,
            "<method {}.{}>",
            bound.owner.name,
            bound.method.display_name()
        ),
        Value::Class(class) => write!(out, "<class {}>", class.name),
        Value::Instance(instance) => write!(out, "<{} instance>", instance.class.name),
    }
}

#[cfg(test)]
mod tests;
