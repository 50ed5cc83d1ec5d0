#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use wisp_ir::ast::Program;
use wisp_ir::{Position, StringInterner};

use super::*;
use crate::builtins::{Arity, Builtin, BuiltinContext};
use crate::{buffer_handler, EvalErrorKind};

fn parse(source: &str, interner: &StringInterner) -> Program {
    let output = wisp_parse::parse(source, interner);
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    output.program
}

#[test]
fn globals_persist_between_programs() {
    let interner = StringInterner::new();
    let mut interp = Interpreter::builder(&interner)
        .print_handler(buffer_handler())
        .build();
    interp
        .eval_program(&parse("let x = 40; fn add(n) { x + n }", &interner))
        .unwrap();
    let value = interp.eval_program(&parse("add(2)", &interner)).unwrap();
    assert_eq!(value, Value::Int(42));
    assert!(interp.globals().has_own(interner.intern("x")));
}

#[test]
fn shared_environment_through_builder() {
    let interner = StringInterner::new();
    let env = Environment::new_global();
    env.define(interner.intern("seed"), Value::Int(7)).unwrap();
    let mut interp = Interpreter::builder(&interner).env(env.clone()).build();
    interp
        .eval_program(&parse("let doubled = seed * 2;", &interner))
        .unwrap();
    assert_eq!(env.get(interner.intern("doubled")), Some(Value::Int(14)));
}

#[test]
fn custom_builtin_registry() {
    fn answer(_: &BuiltinContext<'_>, _: &[Value]) -> Result<Value, EvalError> {
        Ok(Value::Int(42))
    }

    let interner = StringInterner::new();
    let mut registry = BuiltinRegistry::new();
    registry.register(Builtin::new("answer", Arity::Exact(0), answer));
    let mut interp = Interpreter::builder(&interner).builtins(registry).build();

    let value = interp.eval_program(&parse("answer()", &interner)).unwrap();
    assert_eq!(value, Value::Int(42));

    let err = interp.eval_program(&parse("len([])", &interner)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UndefinedVariable { name: "len".into() });
}

#[test]
fn partial_statement_runs() {
    let interner = StringInterner::new();
    let program = parse("let a = 1; let b = a + 1; b * 10", &interner);
    let mut interp = Interpreter::new(&interner);
    let value = interp.eval_statements(&program.statements[..2]).unwrap();
    assert_eq!(value, Value::Null);
    assert_eq!(
        interp.globals().get(interner.intern("b")),
        Some(Value::Int(2))
    );
}

#[test]
fn host_can_call_wisp_functions() {
    let interner = StringInterner::new();
    let mut interp = Interpreter::new(&interner);
    let square = interp
        .eval_program(&parse("fn(x) { x * x }", &interner))
        .unwrap();
    let result = interp
        .call_value(&square, vec![Value::Int(9)], Position::START)
        .ok()
        .unwrap();
    assert_eq!(result, Value::Int(81));
    assert_eq!(interp.call_depth(), 0);
}

#[test]
fn builder_limits() {
    let interner = StringInterner::new();
    let interp = Interpreter::builder(&interner)
        .max_loop_iterations(5)
        .max_call_depth(9)
        .build();
    assert_eq!(
        interp.limits(),
        EvalLimits {
            max_loop_iterations: 5,
            max_call_depth: 9,
        }
    );
    assert!(interp.builtins().contains("println"));
    assert!(std::ptr::eq(interp.interner(), &interner));
}

#[test]
fn output_goes_to_configured_handler() {
    let interner = StringInterner::new();
    let print = buffer_handler();
    let mut interp = Interpreter::builder(&interner)
        .print_handler(print.clone())
        .build();
    interp
        .eval_program(&parse("println(\"a\", 1); print([true]);", &interner))
        .unwrap();
    assert_eq!(interp.print_handler().get_output(), "a 1\n[true]");
    assert_eq!(print.get_output(), "a 1\n[true]");
}
