use pretty_assertions::assert_eq;
use wisp_ir::ast::StmtKind;
use wisp_ir::StringInterner;

use super::{only_statement, parse_ok, sexp};

#[test]
fn let_and_const() {
    let interner = StringInterner::new();
    let program = parse_ok("let x = 1; let y; const Z = x + 1;", &interner);
    assert_eq!(program.statements.len(), 3);
    match &program.statements[1].kind {
        StmtKind::Let { name, value } => {
            assert_eq!(interner.lookup(*name), "y");
            assert!(value.is_none());
        }
        other => panic!("expected let, got {other:?}"),
    }
    match &program.statements[2].kind {
        StmtKind::Const { name, value } => {
            assert_eq!(interner.lookup(*name), "Z");
            assert_eq!(sexp(value, &interner), "(+ x 1)");
        }
        other => panic!("expected const, got {other:?}"),
    }
}

#[test]
fn terminator_optional_before_brace_and_eof() {
    let interner = StringInterner::new();
    let program = parse_ok("{ let x = 1 }\nlet y = 2", &interner);
    assert_eq!(program.statements.len(), 2);
    let program = parse_ok(";; let x = 1;; ;", &interner);
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn statement_positions() {
    let interner = StringInterner::new();
    let program = parse_ok("let a = 1;\n  a = 2;", &interner);
    let pos = program.statements[1].pos;
    assert_eq!((pos.line, pos.column, pos.offset), (2, 2, 13));

    let program = parse_ok("total + 1;\nitems[0];\nf(x);", &interner);
    let starts: Vec<_> = program
        .statements
        .iter()
        .map(|stmt| (stmt.pos.line, stmt.pos.column))
        .collect();
    assert_eq!(starts, [(1, 0), (2, 0), (3, 0)]);
    match &program.statements[0].kind {
        StmtKind::Expression(expr) => assert_eq!(expr.pos.column, 6),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn deeply_nested_blocks_parse() {
    let interner = StringInterner::new();
    let depth = 10_000;
    let source = format!("{}1;{}", "{".repeat(depth), "}".repeat(depth));
    let program = parse_ok(&source, &interner);
    assert_eq!(program.statements.len(), 1);
    assert!(matches!(program.statements[0].kind, StmtKind::Block(_)));
    // Dropping the tree recurses once per level on this thread.
    std::mem::forget(program);
}

#[test]
fn if_chain() {
    let interner = StringInterner::new();
    let program = parse_ok(
        "if a { 1; } elif b { 2; } else if c { 3; } else { 4; 5; }",
        &interner,
    );
    match &only_statement(&program).kind {
        StmtKind::If {
            branches,
            else_block,
        } => {
            let conds: Vec<String> = branches.iter().map(|b| sexp(&b.cond, &interner)).collect();
            assert_eq!(conds, ["a", "b", "c"]);
            assert_eq!(else_block.as_ref().map(|b| b.stmts.len()), Some(2));
        }
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn if_condition_may_be_parenthesized() {
    let interner = StringInterner::new();
    let program = parse_ok("if (x > 1) { y; }", &interner);
    let StmtKind::If { branches, else_block } = &only_statement(&program).kind else {
        panic!("expected if");
    };
    assert_eq!(sexp(&branches[0].cond, &interner), "(> x 1)");
    assert!(else_block.is_none());
}

#[test]
fn while_loop() {
    let interner = StringInterner::new();
    let program = parse_ok("while i < 10 { i += 1; if i == 5 { break; } continue; }", &interner);
    let StmtKind::While { cond, body } = &only_statement(&program).kind else {
        panic!("expected while");
    };
    assert_eq!(sexp(cond, &interner), "(< i 10)");
    assert_eq!(body.stmts.len(), 3);
    assert!(matches!(body.stmts[2].kind, StmtKind::Continue));
}

#[test]
fn for_loop_full_header() {
    let interner = StringInterner::new();
    let program = parse_ok("for (let i = 0; i < 3; i += 1) { print(i); }", &interner);
    let StmtKind::For {
        init,
        cond,
        step,
        body,
    } = &only_statement(&program).kind
    else {
        panic!("expected for");
    };
    assert!(matches!(init.as_deref().map(|s| &s.kind), Some(StmtKind::Let { .. })));
    assert_eq!(cond.as_ref().map(|c| sexp(c, &interner)).as_deref(), Some("(< i 3)"));
    assert_eq!(step.as_ref().map(|s| sexp(s, &interner)).as_deref(), Some("(+= i 1)"));
    assert_eq!(body.stmts.len(), 1);
}

#[test]
fn for_loop_empty_header() {
    let interner = StringInterner::new();
    let program = parse_ok("for (;;) { break; }", &interner);
    let StmtKind::For {
        init, cond, step, ..
    } = &only_statement(&program).kind
    else {
        panic!("expected for");
    };
    assert!(init.is_none() && cond.is_none() && step.is_none());

    let program = parse_ok("for (i = 0; ; ) { break; }", &interner);
    let StmtKind::For { init, .. } = &only_statement(&program).kind else {
        panic!("expected for");
    };
    assert!(matches!(init.as_deref().map(|s| &s.kind), Some(StmtKind::Expression(_))));
}

#[test]
fn function_declaration() {
    let interner = StringInterner::new();
    let program = parse_ok("fn add(a, b) { return a + b; }", &interner);
    let StmtKind::Function(func) = &only_statement(&program).kind else {
        panic!("expected function declaration");
    };
    assert_eq!(func.name.map(|n| interner.lookup(n)), Some("add"));
    assert_eq!(func.arity(), 2);
    match &func.body.stmts[0].kind {
        StmtKind::Return(Some(value)) => assert_eq!(sexp(value, &interner), "(+ a b)"),
        other => panic!("expected return, got {other:?}"),
    }
}

#[test]
fn bare_return() {
    let interner = StringInterner::new();
    let program = parse_ok("fn f() { return; } return", &interner);
    let StmtKind::Function(func) = &program.statements[0].kind else {
        panic!("expected function declaration");
    };
    assert!(matches!(func.body.stmts[0].kind, StmtKind::Return(None)));
    assert!(matches!(program.statements[1].kind, StmtKind::Return(None)));
}

#[test]
fn class_declaration() {
    let interner = StringInterner::new();
    let source = "class Dog extends Animal {
        fn init(name) { super(name); this.tricks = []; }
        fn speak() { return super.speak() + \"!\"; }
    }";
    let program = parse_ok(source, &interner);
    let StmtKind::Class(class) = &only_statement(&program).kind else {
        panic!("expected class");
    };
    assert_eq!(interner.lookup(class.name), "Dog");
    let parent = class.parent.expect("parent");
    assert_eq!(interner.lookup(parent.name), "Animal");
    assert_eq!((parent.pos.line, parent.pos.column), (1, 18));
    let names: Vec<&str> = class
        .methods
        .iter()
        .filter_map(|m| m.name.map(|n| interner.lookup(n)))
        .collect();
    assert_eq!(names, ["init", "speak"]);
}

#[test]
fn loop_control_inside_nested_block() {
    let interner = StringInterner::new();
    parse_ok("while true { if x { { break; } } }", &interner);
    parse_ok("for (;;) { fn f() { while y { continue; } } break; }", &interner);
}
