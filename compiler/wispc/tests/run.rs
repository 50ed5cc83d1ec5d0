//! End-to-end tests through the driver.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use wisp_eval::EvalLimits;
use wispc::{run, ErrorCode, RunConfig};

fn run_captured(source: &str) -> wispc::RunOutcome {
    run(source, &RunConfig::captured())
}

#[test]
fn clean_program_runs_to_completion() {
    let outcome = run_captured(
        r#"
        fn fib(n) { if n < 2 { return n; } return fib(n - 1) + fib(n - 2); }
        println("fib", fib(15));
        fib(10)
        "#,
    );
    assert!(!outcome.has_errors());
    assert_eq!(outcome.value.unwrap().to_string(), "55");
    assert_eq!(outcome.output, "fib 610\n");
    assert_eq!(outcome.rendered, "");
}

#[test]
fn parse_errors_are_rendered_with_source_line() {
    let outcome = run_captured("let x = ;");
    assert_eq!(outcome.error_count(), 1);
    assert_eq!(outcome.diagnostics[0].code, ErrorCode::E1002);
    assert!(outcome.value.is_none());
    let expected_snippet = concat!(
        " --> 1:8\n",
        "  |\n",
        "1 | let x = ;\n",
        "  |         ^ expected expression\n",
    );
    assert!(
        outcome.rendered.starts_with("error[E1002]: expected expression"),
        "{}",
        outcome.rendered
    );
    assert!(outcome.rendered.contains(expected_snippet), "{}", outcome.rendered);
}

#[test]
fn every_parse_error_is_reported() {
    let outcome = run_captured("let a = ;\nlet b = 2;\nlet c = ;");
    let lines: Vec<_> = outcome
        .diagnostics
        .iter()
        .map(|d| d.primary_pos().map(|p| p.line))
        .collect();
    assert_eq!(lines, [Some(1), Some(3)]);
}

#[test]
fn programs_with_syntax_errors_do_not_run_by_default() {
    let outcome = run_captured("println(1);\nlet x = ;\nprintln(2);");
    assert_eq!(outcome.output, "");
    assert!(outcome.value.is_none());
}

#[test]
fn partial_mode_runs_the_clean_prefix() {
    let config = RunConfig::captured().with_partial(true);
    let outcome = run("println(1);\nlet x = ;\nprintln(2);", &config);
    assert_eq!(outcome.output, "1\n");
    assert_eq!(outcome.error_count(), 1);
}

#[test]
fn runtime_errors_become_diagnostics() {
    let outcome = run_captured("let total = 1;\nprintln(total + missing);");
    assert_eq!(outcome.error_count(), 1);
    let diag = &outcome.diagnostics[0];
    assert_eq!(diag.code, ErrorCode::E2002);
    assert_eq!(diag.primary_pos().map(|p| (p.line, p.column)), Some((2, 16)));
    assert!(outcome.rendered.contains("2 | println(total + missing);"));
    assert!(outcome.value.is_none());
}

#[test]
fn output_before_a_runtime_error_is_kept() {
    let outcome = run_captured("println(\"before\");\n1 % 0;\nprintln(\"after\");");
    assert_eq!(outcome.output, "before\n");
    assert_eq!(outcome.diagnostics[0].code, ErrorCode::E2004);
}

#[test]
fn runtime_backtrace_is_a_note() {
    let outcome = run_captured("fn boom() { return [][0]; }\nboom();");
    assert!(outcome.rendered.contains("= note: call stack:"), "{}", outcome.rendered);
    assert!(outcome.rendered.contains("boom"));
}

#[test]
fn limits_are_forwarded() {
    let config = RunConfig::captured().with_limits(EvalLimits {
        max_loop_iterations: 50,
        ..EvalLimits::default()
    });
    let outcome = run("while true {}", &config);
    assert_eq!(outcome.diagnostics[0].code, ErrorCode::E2010);
}

#[test]
fn lexical_errors_are_reported() {
    let outcome = run_captured("let s = \"unterminated");
    assert!(outcome.has_errors());
    assert!(outcome.value.is_none());
}

#[test]
fn classes_end_to_end() {
    let source = r#"
        class Shape {
            fn init(name) { this.name = name; }
            fn describe() { return this.name + " with area " + str(this.area()); }
        }
        class Square extends Shape {
            fn init(side) { super("square"); this.side = side; }
            fn area() { return this.side * this.side; }
        }
        println(new Square(3).describe());
    "#;
    let outcome = run_captured(source);
    assert!(!outcome.has_errors(), "{}", outcome.rendered);
    assert_eq!(outcome.output, "square with area 9\n");
}
