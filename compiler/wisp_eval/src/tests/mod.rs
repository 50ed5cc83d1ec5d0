//! Language-level evaluation tests: source in, value or error out.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod arithmetic;
mod closures;

use wisp_ir::StringInterner;

use crate::{buffer_handler, EvalError, EvalLimits, Interpreter, Value};

/// Parse `source`, failing the test on any parse error.
fn parse(source: &str, interner: &StringInterner) -> wisp_ir::ast::Program {
    let output = wisp_parse::parse(source, interner);
    assert!(
        output.errors.is_empty(),
        "unexpected parse errors: {:?}",
        output.errors
    );
    output.program
}

/// Run `source` with captured output and the given limits.
fn run_with(source: &str, limits: EvalLimits) -> (Result<Value, EvalError>, String) {
    let interner = StringInterner::new();
    let program = parse(source, &interner);
    let print = buffer_handler();
    let mut interpreter = Interpreter::builder(&interner)
        .print_handler(print.clone())
        .limits(limits)
        .build();
    let result = interpreter.eval_program(&program);
    (result, print.get_output())
}

fn run(source: &str) -> Result<Value, EvalError> {
    run_with(source, EvalLimits::default()).0
}

/// Displayed value of a program that must succeed.
fn eval(source: &str) -> String {
    match run(source) {
        Ok(value) => value.to_string(),
        Err(err) => panic!("evaluation failed: {err}\nsource:\n{source}"),
    }
}

/// Error of a program that must fail.
fn eval_err(source: &str) -> EvalError {
    match run(source) {
        Ok(value) => panic!("expected an error, got {value}\nsource:\n{source}"),
        Err(err) => err,
    }
}

/// Printed output of a program that must succeed.
fn output(source: &str) -> String {
    let (result, printed) = run_with(source, EvalLimits::default());
    if let Err(err) = result {
        panic!("evaluation failed: {err}\nsource:\n{source}");
    }
    printed
}
