//! Wisp Eval - tree-walking evaluator for Wisp programs.
//!
//! # Architecture
//!
//! - `Interpreter`: walks the AST produced by `wisp_parse`, one `eval_*`
//!   handler per node kind
//! - `Environment`: parent-linked lexical scopes shared through `Rc`
//! - `evaluate_binary` / `evaluate_unary`: operator dispatch on value kinds
//! - `BuiltinRegistry`: host functions injected through `InterpreterBuilder`
//! - `Signal`: `return`, `break`, `continue` and errors, carried in the
//!   `Err` arm of every evaluation result
//!
//! Evaluation is single-threaded; values hold `Rc` handles and are not
//! `Send`.

pub mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
pub mod interpreter;
mod limits;
mod operators;
mod print_handler;
mod unary_operators;
mod value;

pub use builtins::{Arity, Builtin, BuiltinContext, BuiltinFn, BuiltinRegistry};
pub use diagnostics::{CallFrame, CallStack};
pub use environment::{AssignError, Environment, LocalScope, Mutability};
pub use errors::{BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult, Signal};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use limits::EvalLimits;
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{ArrayRef, BoundMethod, ClassValue, FunctionValue, HashKey, HashRef, Instance, Value};

#[cfg(test)]
mod tests;
