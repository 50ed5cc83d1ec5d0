//! Indexing and property access.

use std::rc::Rc;

use wisp_ir::Name;

use super::Interpreter;
use crate::errors::{
    index_out_of_bounds, not_an_instance, not_indexable, type_mismatch, undefined_property,
    EvalError,
};
use crate::value::{BoundMethod, HashKey};
use crate::Value;

/// Position in a sequence of `len` elements; negative indices count from
/// the end.
fn resolve_index(index: i64, len: usize) -> Result<usize, EvalError> {
    let resolved = if index < 0 {
        i64::try_from(len).ok().map(|len| index + len)
    } else {
        Some(index)
    };
    resolved
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

/// `container[index]`.
///
/// A missing hash key reads as `null`; indexing a string yields a
/// one-character string.
pub(super) fn index_value(container: &Value, index: &Value) -> Result<Value, EvalError> {
    match (container, index) {
        (Value::Array(items), Value::Int(i)) => {
            let items = items.borrow();
            let at = resolve_index(*i, items.len())?;
            Ok(items[at].clone())
        }
        (Value::Hash(entries), key) => {
            let key = HashKey::try_from(key)?;
            Ok(entries.borrow().get(&key).cloned().unwrap_or(Value::Null))
        }
        (Value::Str(s), Value::Int(i)) => {
            let at = resolve_index(*i, s.chars().count())?;
            let c = s.chars().nth(at).map(String::from).unwrap_or_default();
            Ok(Value::string(c))
        }
        (Value::Array(_) | Value::Str(_), other) => Err(type_mismatch("int index", other.type_name())),
        (other, _) => Err(not_indexable(other.type_name())),
    }
}

/// `container[index] = value`. Arrays take in-range indices, hashes insert
/// or replace.
pub(super) fn set_index(container: &Value, index: &Value, value: Value) -> Result<(), EvalError> {
    match (container, index) {
        (Value::Array(items), Value::Int(i)) => {
            let mut items = items.borrow_mut();
            let at = resolve_index(*i, items.len())?;
            items[at] = value;
            Ok(())
        }
        (Value::Array(_), other) => Err(type_mismatch("int index", other.type_name())),
        (Value::Hash(entries), key) => {
            let key = HashKey::try_from(key)?;
            entries.borrow_mut().insert(key, value);
            Ok(())
        }
        (Value::Str(_), _) => Err(type_mismatch("array or hash", "string")
            .with_note("strings cannot be modified in place")),
        (other, _) => Err(not_indexable(other.type_name())),
    }
}

impl Interpreter<'_> {
    /// `object.name`: an own field, else a method found on the class chain,
    /// bound to the instance.
    pub(super) fn get_property(&self, object: &Value, name: Name) -> Result<Value, EvalError> {
        let Value::Instance(instance) = object else {
            return Err(not_an_instance(object.type_name(), self.name_str(name)));
        };
        if let Some(value) = instance.get_field(name) {
            return Ok(value);
        }
        if let Some((method, owner)) = instance.class.find_method(name) {
            return Ok(Value::BoundMethod(Rc::new(BoundMethod {
                receiver: Rc::clone(instance),
                method,
                owner,
            })));
        }
        Err(undefined_property(instance.class.name, self.name_str(name)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn negative_indices_count_from_end() {
        assert_eq!(resolve_index(-1, 3).unwrap(), 2);
        assert_eq!(resolve_index(-3, 3).unwrap(), 0);
        assert_eq!(resolve_index(0, 3).unwrap(), 0);
    }

    #[test]
    fn out_of_range_indices() {
        for index in [3, -4, i64::MIN, i64::MAX] {
            let err = resolve_index(index, 3).unwrap_err();
            assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index, len: 3 });
        }
        assert!(resolve_index(0, 0).is_err());
    }

    #[test]
    fn string_indexing_by_character() {
        let s = Value::string("héllo");
        assert_eq!(index_value(&s, &Value::Int(1)).unwrap(), Value::string("é"));
        assert_eq!(index_value(&s, &Value::Int(-1)).unwrap(), Value::string("o"));
        assert!(set_index(&s, &Value::Int(0), Value::string("x")).is_err());
    }

    #[test]
    fn missing_hash_key_reads_null() {
        let h = Value::hash(rustc_hash::FxHashMap::default());
        assert_eq!(index_value(&h, &Value::string("k")).unwrap(), Value::Null);
        set_index(&h, &Value::string("k"), Value::Int(1)).unwrap();
        assert_eq!(index_value(&h, &Value::string("k")).unwrap(), Value::Int(1));
    }

    #[test]
    fn non_indexable() {
        let err = index_value(&Value::Int(1), &Value::Int(0)).unwrap_err();
        assert_eq!(err.message, "int is not indexable");
    }
}
