//! Calling functions, bound methods and builtins.

use std::rc::Rc;

use wisp_ir::ast::{Expr, ExprKind};
use wisp_ir::Position;

use super::Interpreter;
use crate::builtins::{plural_arguments, Builtin, BuiltinContext};
use crate::diagnostics::CallFrame;
use crate::errors::{arity_mismatch, control_outside_loop, not_callable, EvalResult, Signal};
use crate::value::{ClassValue, FunctionValue, Instance};
use crate::{Environment, Mutability, Value};

/// The instance and class context a method runs with.
pub(super) struct Receiver<'r> {
    pub(super) instance: &'r Rc<Instance>,
    pub(super) owner: &'r Rc<ClassValue>,
}

impl Interpreter<'_> {
    /// `callee(args...)`.
    pub(super) fn eval_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        if let ExprKind::Super { method: None } = callee.kind {
            let args = self.eval_args(args, env)?;
            return self.call_super_constructor(env, args, pos);
        }
        let callee = self.eval_expr(callee, env)?;
        let args = self.eval_args(args, env)?;
        self.call_value(&callee, args, pos)
    }

    /// Call any callable value. `pos` is the call site.
    pub fn call_value(&mut self, callee: &Value, args: Vec<Value>, pos: Position) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args, None, pos),
            Value::BoundMethod(bound) => self.call_function(
                &bound.method,
                args,
                Some(Receiver {
                    instance: &bound.receiver,
                    owner: &bound.owner,
                }),
                pos,
            ),
            Value::Builtin(builtin) => self.call_builtin(*builtin, &args, pos),
            Value::Class(class) => Err(not_callable(format!("class {}", class.name))
                .with_pos(pos)
                .with_note(format!("use `new {}(...)` to create an instance", class.name))
                .into()),
            other => Err(not_callable(other.type_name()).with_pos(pos).into()),
        }
    }

    /// Run a user function in a fresh child of its closure scope.
    ///
    /// With a receiver the scope also binds `this` and `super`, which is how
    /// methods and closures created inside them find their class context.
    #[tracing::instrument(level = "debug", skip_all, fields(function = func.display_name()))]
    pub(super) fn call_function(
        &mut self,
        func: &Rc<FunctionValue>,
        args: Vec<Value>,
        receiver: Option<Receiver<'_>>,
        pos: Position,
    ) -> EvalResult {
        let display = match &receiver {
            Some(receiver) => format!("{}.{}", receiver.owner.name, func.display_name()),
            None => func.display_name().to_string(),
        };
        if args.len() != func.arity() {
            let err = arity_mismatch(&display, plural_arguments(func.arity()), args.len());
            return Err(err.with_pos(pos).into());
        }

        let call_env = func.closure.child();
        if let Some(receiver) = receiver {
            let this = Value::Instance(Rc::clone(receiver.instance));
            let owner = Value::Class(Rc::clone(receiver.owner));
            self.declare(&call_env, self.names.this, this, Mutability::Mutable, pos)?;
            self.declare(&call_env, self.names.super_, owner, Mutability::Mutable, pos)?;
        }
        for (param, arg) in func.params().iter().zip(args) {
            self.declare(&call_env, *param, arg, Mutability::Mutable, pos)?;
        }

        self.call_stack
            .push(CallFrame {
                name: display,
                call_pos: Some(pos),
            })
            .map_err(|e| e.with_pos(pos))?;
        tracing::trace!(
            depth = self.call_stack.depth(),
            remaining_stack = ?wisp_stack::remaining_stack(),
            "enter"
        );

        let body = &func.literal.body;
        let result = wisp_stack::ensure_sufficient_stack(|| self.eval_block(body, &call_env));
        let result = match result {
            Ok(value) | Err(Signal::Return(value)) => Ok(value),
            Err(Signal::Break) => Err(control_outside_loop("break")),
            Err(Signal::Continue) => Err(control_outside_loop("continue")),
            Err(Signal::Error(err)) => Err(*err),
        };
        let result = result.map_err(|err| Signal::from(self.call_stack.attach_backtrace(err)));
        self.call_stack.pop();
        result
    }

    fn call_builtin(&mut self, builtin: Builtin, args: &[Value], pos: Position) -> EvalResult {
        self.call_stack
            .push(CallFrame {
                name: builtin.name.to_string(),
                call_pos: Some(pos),
            })
            .map_err(|e| e.with_pos(pos))?;
        let ctx = BuiltinContext::new(&self.print);
        let result = builtin
            .call(&ctx, args)
            .map_err(|err| self.call_stack.attach_backtrace(err.or_pos(pos)));
        self.call_stack.pop();
        Ok(result?)
    }
}
