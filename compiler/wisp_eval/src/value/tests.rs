#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn hash_of(entries: Vec<(HashKey, Value)>) -> Value {
    Value::hash(entries.into_iter().collect())
}

#[test]
fn truthiness() {
    let falsy = [
        Value::Int(0),
        Value::Float(0.0),
        Value::string(""),
        Value::array(vec![]),
        Value::hash(FxHashMap::default()),
        Value::Null,
        Value::Bool(false),
    ];
    for value in &falsy {
        assert!(!value.is_truthy(), "{value:?} should be falsy");
    }

    let truthy = [
        Value::Int(-1),
        Value::Float(0.5),
        Value::string("0"),
        Value::array(vec![Value::Null]),
        Value::Bool(true),
    ];
    for value in &truthy {
        assert!(value.is_truthy(), "{value:?} should be truthy");
    }
}

#[test]
fn equality_crosses_numeric_kinds() {
    assert_eq!(Value::Int(2), Value::Float(2.0));
    assert_ne!(Value::Int(2), Value::Float(2.5));
    assert_ne!(Value::Int(0), Value::Null);
    assert_eq!(Value::Null, Value::Null);
    assert_ne!(Value::string("1"), Value::Int(1));
}

#[test]
fn int_float_equality_is_exact() {
    assert_ne!(Value::Int(9_007_199_254_740_993), Value::Float(9_007_199_254_740_992.0));
    assert_eq!(Value::Int(9_007_199_254_740_992), Value::Float(9_007_199_254_740_992.0));
    assert_eq!(Value::Float(-4.0), Value::Int(-4));
    assert_ne!(Value::Int(i64::MAX), Value::Float(9_223_372_036_854_775_808.0));
    assert_eq!(Value::Int(i64::MIN), Value::Float(-9_223_372_036_854_775_808.0));
    assert_ne!(Value::Int(0), Value::Float(f64::NAN));
    assert_ne!(Value::Int(1), Value::Float(f64::INFINITY));
}

#[test]
fn arrays_and_hashes_compare_structurally() {
    let a = Value::array(vec![Value::Int(1), Value::string("x")]);
    let b = Value::array(vec![Value::Float(1.0), Value::string("x")]);
    assert_eq!(a, b);
    assert_ne!(a, Value::array(vec![Value::Int(1)]));

    let h1 = hash_of(vec![(HashKey::Str("k".into()), Value::Int(1))]);
    let h2 = hash_of(vec![(HashKey::Str("k".into()), Value::Int(1))]);
    let h3 = hash_of(vec![(HashKey::Str("k".into()), Value::Int(2))]);
    assert_eq!(h1, h2);
    assert_ne!(h1, h3);
}

#[test]
fn cyclic_arrays_compare_structurally() {
    let a = Value::array(vec![Value::Int(1)]);
    let b = Value::array(vec![Value::Int(1)]);
    for value in [&a, &b] {
        if let Value::Array(items) = value {
            items.borrow_mut().push(value.clone());
        }
    }
    assert_eq!(a, b);
    assert_eq!(a, Value::array(vec![Value::Int(1), b.clone()]));
    assert_ne!(a, Value::array(vec![Value::Int(1), Value::Int(1)]));
    for value in [&a, &b] {
        if let Value::Array(items) = value {
            items.borrow_mut().clear();
        }
    }
}

#[test]
fn arrays_alias_on_clone() {
    let a = Value::array(vec![Value::Int(1)]);
    let alias = a.clone();
    if let Value::Array(items) = &alias {
        items.borrow_mut().push(Value::Int(2));
    }
    assert_eq!(a.to_string(), "[1, 2]");
}

#[test]
fn display_forms() {
    assert_eq!(Value::Int(-3).to_string(), "-3");
    assert_eq!(Value::Float(7.0).to_string(), "7.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::string("hi").to_string(), "hi");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(
        Value::array(vec![Value::string("a"), Value::Bool(true), Value::Null]).to_string(),
        r#"["a", true, null]"#
    );
}

#[test]
fn hash_display_sorts_keys() {
    let h = hash_of(vec![
        (HashKey::Str("b".into()), Value::Int(2)),
        (HashKey::Int(1), Value::string("one")),
        (HashKey::Str("a".into()), Value::Int(1)),
    ]);
    assert_eq!(h.to_string(), r#"{1: "one", "a": 1, "b": 2}"#);
}

#[test]
fn self_containing_array_prints_ellipsis() {
    let a = Value::array(vec![Value::Int(1)]);
    if let Value::Array(items) = &a {
        items.borrow_mut().push(a.clone());
    }
    assert_eq!(a.to_string(), "[1, [...]]");
    // Break the cycle so the test does not leak.
    if let Value::Array(items) = &a {
        items.borrow_mut().clear();
    }
}

#[test]
fn hash_keys() {
    assert_eq!(HashKey::try_from(&Value::Int(3)).unwrap(), HashKey::Int(3));
    assert_eq!(
        HashKey::try_from(&Value::string("k")).unwrap(),
        HashKey::Str("k".into())
    );
    let err = HashKey::try_from(&Value::Float(1.5)).unwrap_err();
    assert_eq!(err.message, "unusable as hash key: float");
    assert_eq!(Value::from(HashKey::Bool(true)), Value::Bool(true));
}

#[test]
fn type_names() {
    assert_eq!(Value::Int(1).type_name(), "int");
    assert_eq!(Value::Float(1.0).type_name(), "float");
    assert_eq!(Value::string("").type_name(), "string");
    assert_eq!(Value::array(vec![]).type_name(), "array");
    assert_eq!(Value::Null.type_name(), "null");
}
