#![allow(clippy::unwrap_used, clippy::expect_used)]

mod statements;

use wisp_ir::ast::{Expr, ExprKind, Program, Stmt, StmtKind};
use wisp_ir::StringInterner;

use crate::{parse, ParseOutput};

/// Parse and insist there were no errors.
fn parse_ok(source: &str, interner: &StringInterner) -> Program {
    let output = parse(source, interner);
    assert!(
        output.errors.is_empty(),
        "unexpected errors for {source:?}: {:?}",
        output.errors
    );
    output.program
}

fn parse_with_errors(source: &str) -> ParseOutput {
    let interner = StringInterner::new();
    let output = parse(source, &interner);
    assert!(output.has_errors(), "expected errors for {source:?}");
    output
}

/// The single expression statement in `source`, as an s-expression.
fn sexp_of(source: &str) -> String {
    let interner = StringInterner::new();
    let program = parse_ok(source, &interner);
    assert_eq!(program.statements.len(), 1, "{source:?}");
    match &program.statements[0].kind {
        StmtKind::Expression(expr) => sexp(expr, &interner),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn sexp(expr: &Expr, interner: &StringInterner) -> String {
    let list = |items: &[Expr]| {
        items
            .iter()
            .map(|e| format!(" {}", sexp(e, interner)))
            .collect::<String>()
    };
    match &expr.kind {
        ExprKind::Ident(name) => interner.lookup(*name).to_string(),
        ExprKind::Int(v) => v.to_string(),
        ExprKind::Float(v) => format!("{v:?}"),
        ExprKind::Str(s) => format!("{s:?}"),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Null => "null".to_string(),
        ExprKind::Array(items) => format!("[{}]", list(items).trim_start()),
        ExprKind::Hash(pairs) => {
            let pairs: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("({} {})", sexp(k, interner), sexp(v, interner)))
                .collect();
            format!("{{{}}}", pairs.join(" "))
        }
        ExprKind::Prefix { op, operand } => format!("({op} {})", sexp(operand, interner)),
        ExprKind::Binary { op, left, right } => {
            format!("({op} {} {})", sexp(left, interner), sexp(right, interner))
        }
        ExprKind::Logical { op, left, right } => {
            format!("({op} {} {})", sexp(left, interner), sexp(right, interner))
        }
        ExprKind::Index { target, index } => {
            format!("(index {} {})", sexp(target, interner), sexp(index, interner))
        }
        ExprKind::Call { callee, args } => format!("(call {}{})", sexp(callee, interner), list(args)),
        ExprKind::Assign { target, op, value } => {
            let op = op.map_or(String::new(), |op| op.to_string());
            format!("({op}= {} {})", sexp(target, interner), sexp(value, interner))
        }
        ExprKind::Property { object, name } => {
            format!("(. {} {})", sexp(object, interner), interner.lookup(*name))
        }
        ExprKind::New { class, args } => format!("(new {}{})", sexp(class, interner), list(args)),
        ExprKind::This => "this".to_string(),
        ExprKind::Super { method: None } => "super".to_string(),
        ExprKind::Super { method: Some(m) } => format!("super.{}", interner.lookup(*m)),
        ExprKind::Function(func) => {
            let params: Vec<&str> = func.params.iter().map(|p| interner.lookup(*p)).collect();
            let name = func
                .name
                .map_or(String::new(), |n| format!("{} ", interner.lookup(n)));
            format!("(fn {name}({}) {})", params.join(" "), func.body.stmts.len())
        }
    }
}

fn only_statement(program: &Program) -> &Stmt {
    assert_eq!(program.statements.len(), 1);
    &program.statements[0]
}
