//! `InterpreterBuilder` for configuring an [`Interpreter`].

use wisp_ir::StringInterner;

use super::{Interpreter, RuntimeNames};
use crate::builtins::BuiltinRegistry;
use crate::diagnostics::CallStack;
use crate::limits::EvalLimits;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::Environment;

/// Builder for [`Interpreter`].
///
/// Defaults: the standard builtins, stdout printing, default limits and a
/// fresh global scope.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    builtins: Option<BuiltinRegistry>,
    print_handler: Option<SharedPrintHandler>,
    limits: EvalLimits,
    env: Option<Environment>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            builtins: None,
            print_handler: None,
            limits: EvalLimits::default(),
            env: None,
        }
    }

    /// Builtins visible to the program.
    #[must_use]
    pub fn builtins(mut self, builtins: BuiltinRegistry) -> Self {
        self.builtins = Some(builtins);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn limits(mut self, limits: EvalLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn max_loop_iterations(mut self, max: u64) -> Self {
        self.limits.max_loop_iterations = max;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, max: usize) -> Self {
        self.limits.max_call_depth = max;
        self
    }

    /// Run in an existing global scope instead of a fresh one.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            interner: self.interner,
            globals: self.env.unwrap_or_else(Environment::new_global),
            builtins: self.builtins.unwrap_or_else(BuiltinRegistry::standard),
            print: self.print_handler.unwrap_or_else(stdout_handler),
            limits: self.limits,
            call_stack: CallStack::new(self.limits.max_call_depth),
            names: RuntimeNames::new(self.interner),
        }
    }
}
