use pretty_assertions::assert_eq;

use super::{eval, eval_err, output, run_with};
use crate::{EvalErrorKind, EvalLimits};

#[test]
fn counter_closure_keeps_state() {
    let source = "
        fn make_counter() {
            let count = 0;
            return fn() {
                count += 1;
                return count;
            };
        }
        let counter = make_counter();
        counter();
        counter();
        counter()
    ";
    assert_eq!(eval(source), "3");
}

#[test]
fn counters_are_independent() {
    let source = "
        fn make_counter() {
            let count = 0;
            return fn() { count += 1; count };
        }
        let a = make_counter();
        let b = make_counter();
        a(); a();
        b();
        [a(), b()]
    ";
    assert_eq!(eval(source), "[3, 2]");
}

#[test]
fn closures_see_later_updates_of_captured_scope() {
    assert_eq!(eval("let x = 1; let get = fn() { x }; x = 5; get()"), "5");
}

#[test]
fn recursion_through_declaration() {
    let source = "
        fn fib(n) {
            if n < 2 { return n; }
            return fib(n - 1) + fib(n - 2);
        }
        fib(15)
    ";
    assert_eq!(eval(source), "610");
}

#[test]
fn named_function_expression_sees_itself() {
    let source = "
        let fact = fn f(n) { if n <= 1 { 1 } else { n * f(n - 1) } };
        fact(5)
    ";
    assert_eq!(eval(source), "120");
}

#[test]
fn implicit_result_is_last_statement() {
    assert_eq!(eval("fn f() { 1; 2 } f()"), "2");
    assert_eq!(eval("fn f() { let x = 1; } f()"), "null");
    assert_eq!(eval("fn f() { return; } f()"), "null");
}

#[test]
fn parameters_shadow_outer_names() {
    assert_eq!(eval("let x = 1; fn f(x) { x * 10 } f(2) + x"), "21");
}

#[test]
fn higher_order_functions() {
    let source = "
        fn map(items, f) {
            let out = [];
            for (let i = 0; i < len(items); i += 1) {
                push(out, f(items[i]));
            }
            out
        }
        map([1, 2, 3], fn(x) { x * x })
    ";
    assert_eq!(eval(source), "[1, 4, 9]");
}

#[test]
fn function_display() {
    assert_eq!(eval("fn add(a, b) { a + b } add"), "<fn add>");
    assert_eq!(eval("let sq = fn(x) { x * x }; sq"), "<fn sq>");
    assert_eq!(eval("fn(x) { x }"), "<fn>");
    assert_eq!(eval("len"), "<builtin len>");
}

#[test]
fn arity_is_checked_before_binding() {
    let err = eval_err("fn add(a, b) { a + b }\nadd(1)");
    assert_eq!(err.kind.code(), wisp_diagnostic::ErrorCode::E2003);
    assert_eq!(err.message, "add expects 2 arguments, got 1");
    assert_eq!(err.pos.map(|p| p.line), Some(2));
}

#[test]
fn builtins_can_be_shadowed() {
    assert_eq!(eval("let len = fn(x) { 42 }; len([1])"), "42");
}

#[test]
fn deep_recursion_hits_call_depth_limit() {
    let source = "fn down(n) { return down(n + 1); }\ndown(0)";
    let limits = EvalLimits {
        max_call_depth: 64,
        ..EvalLimits::default()
    };
    let err = run_with(source, limits).0.unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 64 });
    let trace = err.backtrace.expect("backtrace attached");
    assert_eq!(trace.frames()[0].name, "down");
}

#[test]
fn default_call_depth_is_reachable() {
    let source = "fn count(n) { if n == 0 { return 0; } return 1 + count(n - 1); }\ncount(2000)";
    assert_eq!(eval(source), "2000");
}

#[test]
fn printing_from_functions() {
    let source = r#"
        fn greet(name) { println("hello", name); }
        greet("wisp");
        print(1, 2);
        print("!");
    "#;
    assert_eq!(output(source), "hello wisp\n1 2!");
}
