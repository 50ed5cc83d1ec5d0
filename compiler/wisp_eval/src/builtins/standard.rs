//! The standard builtin set.
//!
//! Mutating builtins (`push`, `pop`, `reverse`, `insert`, `remove`) change
//! their array or hash argument in place; `push` and `reverse` hand back the
//! same array so calls can be chained.

use std::fmt::Write as _;

use super::{Arity, Builtin, BuiltinContext};
use crate::errors::{type_mismatch, EvalError};
use crate::value::{ArrayRef, HashKey, HashRef, Value};

pub(super) const BUILTINS: &[Builtin] = &[
    Builtin::new("len", Arity::Exact(1), len),
    Builtin::new("push", Arity::Exact(2), push),
    Builtin::new("pop", Arity::Exact(1), pop),
    Builtin::new("first", Arity::Exact(1), first),
    Builtin::new("last", Arity::Exact(1), last),
    Builtin::new("rest", Arity::Exact(1), rest),
    Builtin::new("reverse", Arity::Exact(1), reverse),
    Builtin::new("keys", Arity::Exact(1), keys),
    Builtin::new("values", Arity::Exact(1), values),
    Builtin::new("has", Arity::Exact(2), has),
    Builtin::new("insert", Arity::Exact(3), insert),
    Builtin::new("remove", Arity::Exact(2), remove),
    Builtin::new("str", Arity::Exact(1), to_str),
    Builtin::new("int", Arity::Exact(1), to_int),
    Builtin::new("float", Arity::Exact(1), to_float),
    Builtin::new("type", Arity::Exact(1), type_of),
    Builtin::new("print", Arity::Variadic, print),
    Builtin::new("println", Arity::Variadic, println),
];

#[cold]
fn bad_argument(builtin: &str, expected: &str, got: &Value) -> EvalError {
    type_mismatch(expected, got.type_name()).with_note(format!("in argument to `{builtin}`"))
}

fn array_arg<'v>(builtin: &str, value: &'v Value) -> Result<&'v ArrayRef, EvalError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(bad_argument(builtin, "array", other)),
    }
}

fn hash_arg<'v>(builtin: &str, value: &'v Value) -> Result<&'v HashRef, EvalError> {
    match value {
        Value::Hash(entries) => Ok(entries),
        other => Err(bad_argument(builtin, "hash", other)),
    }
}

fn len(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let n = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.borrow().len(),
        Value::Hash(entries) => entries.borrow().len(),
        other => return Err(bad_argument("len", "string, array or hash", other)),
    };
    i64::try_from(n)
        .map(Value::Int)
        .map_err(|_| EvalError::new("length does not fit in an int"))
}

fn push(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let items = array_arg("push", &args[0])?;
    items.borrow_mut().push(args[1].clone());
    Ok(args[0].clone())
}

fn pop(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let items = array_arg("pop", &args[0])?;
    let popped = items.borrow_mut().pop();
    popped.ok_or_else(|| EvalError::new("cannot pop from an empty array"))
}

fn first(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let items = array_arg("first", &args[0])?;
    let first = items.borrow().first().cloned();
    Ok(first.unwrap_or(Value::Null))
}

fn last(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let items = array_arg("last", &args[0])?;
    let last = items.borrow().last().cloned();
    Ok(last.unwrap_or(Value::Null))
}

/// A new array of everything after the first element.
fn rest(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let items = array_arg("rest", &args[0])?;
    let tail = items.borrow().iter().skip(1).cloned().collect();
    Ok(Value::array(tail))
}

fn reverse(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Array(items) => {
            items.borrow_mut().reverse();
            Ok(args[0].clone())
        }
        Value::Str(s) => Ok(Value::string(s.chars().rev().collect::<String>())),
        other => Err(bad_argument("reverse", "array or string", other)),
    }
}

fn sorted_keys(entries: &HashRef) -> Vec<HashKey> {
    let mut keys: Vec<HashKey> = entries.borrow().keys().cloned().collect();
    keys.sort();
    keys
}

/// Keys in sorted order.
fn keys(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let entries = hash_arg("keys", &args[0])?;
    Ok(Value::array(
        sorted_keys(entries).into_iter().map(Value::from).collect(),
    ))
}

/// Values in the order `keys` lists their keys.
fn values(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let entries = hash_arg("values", &args[0])?;
    let keys = sorted_keys(entries);
    let map = entries.borrow();
    Ok(Value::array(
        keys.iter().filter_map(|key| map.get(key).cloned()).collect(),
    ))
}

/// Key membership for hashes, element membership for arrays.
fn has(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Hash(entries) => {
            let key = HashKey::try_from(&args[1])?;
            Ok(Value::Bool(entries.borrow().contains_key(&key)))
        }
        Value::Array(items) => Ok(Value::Bool(items.borrow().contains(&args[1]))),
        other => Err(bad_argument("has", "hash or array", other)),
    }
}

fn insert(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let entries = hash_arg("insert", &args[0])?;
    let key = HashKey::try_from(&args[1])?;
    entries.borrow_mut().insert(key, args[2].clone());
    Ok(args[0].clone())
}

/// Remove a key, returning its value or `null`.
fn remove(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    let entries = hash_arg("remove", &args[0])?;
    let key = HashKey::try_from(&args[1])?;
    let removed = entries.borrow_mut().remove(&key);
    Ok(removed.unwrap_or(Value::Null))
}

fn to_str(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Str(_) => Ok(args[0].clone()),
        other => Ok(Value::string(other.to_string())),
    }
}

fn to_int(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(x) => {
            let truncated = x.trunc();
            if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64
            {
                Ok(Value::Int(truncated as i64))
            } else {
                Err(EvalError::new(format!("cannot convert {x:?} to int")))
            }
        }
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| EvalError::new(format!("cannot convert {s:?} to int"))),
        other => Err(bad_argument("int", "number, bool or string", other)),
    }
}

fn to_float(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(x) => Ok(Value::Float(*x)),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| EvalError::new(format!("cannot convert {s:?} to float"))),
        other => Err(bad_argument("float", "number or string", other)),
    }
}

fn type_of(_: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::string(args[0].type_name()))
}

/// Arguments joined by single spaces.
fn join(args: &[Value]) -> String {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let _ = write!(line, "{arg}");
    }
    line
}

fn print(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    ctx.print_handler().print(&join(args));
    Ok(Value::Null)
}

fn println(ctx: &BuiltinContext<'_>, args: &[Value]) -> Result<Value, EvalError> {
    ctx.print_handler().println(&join(args));
    Ok(Value::Null)
}
