//! The tree-walking interpreter.
//!
//! Evaluation is split by concern:
//! - `stmt`: statements, blocks and loops
//! - `expr`: expression dispatch, operators and assignment
//! - `call`: calling functions, bound methods and builtins
//! - `class`: class declarations, `new`, `this` and `super`
//! - `access`: indexing and property access

mod access;
mod builder;
mod call;
mod class;
mod expr;
mod stmt;

use wisp_ir::ast::{Program, Stmt};
use wisp_ir::{Name, StringInterner};

use crate::builtins::BuiltinRegistry;
use crate::diagnostics::CallStack;
use crate::errors::{control_outside_loop, EvalError, Signal};
use crate::limits::EvalLimits;
use crate::print_handler::SharedPrintHandler;
use crate::{Environment, Value};

pub use builder::InterpreterBuilder;

/// Names the evaluator binds or looks up on its own.
#[derive(Clone, Copy, Debug)]
struct RuntimeNames {
    this: Name,
    super_: Name,
    init: Name,
}

impl RuntimeNames {
    fn new(interner: &StringInterner) -> Self {
        RuntimeNames {
            this: interner.intern("this"),
            super_: interner.intern("super"),
            init: interner.intern("init"),
        }
    }
}

/// Tree-walking interpreter for one program.
///
/// The interpreter owns the global scope, so consecutive calls to
/// [`Interpreter::eval_program`] see each other's definitions.
pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    globals: Environment,
    builtins: BuiltinRegistry,
    print: SharedPrintHandler,
    limits: EvalLimits,
    call_stack: CallStack,
    names: RuntimeNames,
}

impl<'a> Interpreter<'a> {
    /// Interpreter with the standard builtins, printing to stdout.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    pub fn builder(interner: &'a StringInterner) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(interner)
    }

    /// Run a program. The result is the value of its last statement, or the
    /// value of a top-level `return`.
    pub fn eval_program(&mut self, program: &Program) -> Result<Value, EvalError> {
        self.eval_statements(&program.statements)
    }

    /// Run a sequence of top-level statements in the global scope.
    pub fn eval_statements(&mut self, statements: &[Stmt]) -> Result<Value, EvalError> {
        let globals = self.globals.clone();
        let mut last = Value::Null;
        for stmt in statements {
            tracing::debug!(pos = %stmt.pos, "statement");
            match self.eval_stmt(stmt, &globals) {
                Ok(value) => last = value,
                Err(Signal::Return(value)) => return Ok(value),
                Err(Signal::Break) => return Err(control_outside_loop("break").or_pos(stmt.pos)),
                Err(Signal::Continue) => {
                    return Err(control_outside_loop("continue").or_pos(stmt.pos))
                }
                Err(Signal::Error(err)) => return Err(*err),
            }
        }
        Ok(last)
    }

    /// The global scope.
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub fn limits(&self) -> EvalLimits {
        self.limits
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Current depth of nested calls.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    #[inline]
    fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }
}

#[cfg(test)]
mod tests;
