//! Statements, blocks and loops.

use std::rc::Rc;

use wisp_ir::ast::{Block, Expr, ExprKind, IfBranch, Stmt, StmtKind};
use wisp_ir::{Name, Position};

use super::Interpreter;
use crate::errors::{const_assignment, EvalResult, Signal};
use crate::limits::LoopFuse;
use crate::value::FunctionValue;
use crate::{Environment, Mutability, Value};

/// What a loop does after its body finished one iteration.
enum LoopFlow {
    Next,
    Exit,
}

/// Sort a body's outcome into loop control and everything else.
fn loop_flow(result: EvalResult) -> EvalResult<LoopFlow> {
    match result {
        Ok(_) | Err(Signal::Continue) => Ok(LoopFlow::Next),
        Err(Signal::Break) => Ok(LoopFlow::Exit),
        Err(other) => Err(other),
    }
}

impl Interpreter<'_> {
    /// Evaluate one statement.
    ///
    /// Expression statements, blocks and `if` produce a value; every other
    /// statement produces `null`.
    pub fn eval_stmt(&mut self, stmt: &Stmt, env: &Environment) -> EvalResult {
        wisp_stack::ensure_sufficient_stack(|| self.eval_stmt_inner(stmt, env))
    }

    fn eval_stmt_inner(&mut self, stmt: &Stmt, env: &Environment) -> EvalResult {
        tracing::trace!(pos = %stmt.pos, "eval_stmt");
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                let value = match value {
                    Some(expr) => self.eval_initializer(*name, expr, env)?,
                    None => Value::Null,
                };
                self.declare(env, *name, value, Mutability::Mutable, stmt.pos)?;
                Ok(Value::Null)
            }
            StmtKind::Const { name, value } => {
                let value = self.eval_initializer(*name, value, env)?;
                self.declare(env, *name, value, Mutability::Immutable, stmt.pos)?;
                Ok(Value::Null)
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Null,
                };
                Err(Signal::Return(value))
            }
            StmtKind::Expression(expr) => self.eval_expr(expr, env),
            StmtKind::Block(block) => self.eval_block(block, &env.child()),
            StmtKind::If {
                branches,
                else_block,
            } => self.eval_if(branches, else_block.as_ref(), env),
            StmtKind::While { cond, body } => self.eval_while(cond, body, env, stmt.pos),
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => self.eval_for(
                init.as_deref(),
                cond.as_ref(),
                step.as_ref(),
                body,
                env,
                stmt.pos,
            ),
            StmtKind::Break => Err(Signal::Break),
            StmtKind::Continue => Err(Signal::Continue),
            StmtKind::Class(decl) => self.eval_class_decl(decl, env, stmt.pos),
            StmtKind::Function(literal) => {
                let func = FunctionValue::new(
                    literal.name.map(|name| self.name_str(name)),
                    Rc::clone(literal),
                    env.clone(),
                );
                if let Some(name) = literal.name {
                    let func = Value::Function(Rc::new(func));
                    self.declare(env, name, func, Mutability::Mutable, stmt.pos)?;
                }
                Ok(Value::Null)
            }
        }
    }

    /// Bind a declaration in `env`. A constant bound in the same scope
    /// cannot be replaced.
    pub(super) fn declare(
        &self,
        env: &Environment,
        name: Name,
        value: Value,
        mutability: Mutability,
        pos: Position,
    ) -> EvalResult<()> {
        let bound = match mutability {
            Mutability::Mutable => env.define(name, value),
            Mutability::Immutable => env.define_const(name, value),
        };
        bound.map_err(|_| const_assignment(self.name_str(name)).with_pos(pos).into())
    }

    /// Evaluate a `let`/`const` initializer. An anonymous function literal
    /// takes the name it is bound to.
    fn eval_initializer(&mut self, name: Name, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            ExprKind::Function(literal) if literal.name.is_none() => {
                Ok(Value::Function(Rc::new(FunctionValue::new(
                    Some(self.name_str(name)),
                    Rc::clone(literal),
                    env.clone(),
                ))))
            }
            _ => self.eval_expr(expr, env),
        }
    }

    /// Run `block` in `env`, which the caller has already opened for it.
    /// The value is that of the last statement.
    pub(super) fn eval_block(&mut self, block: &Block, env: &Environment) -> EvalResult {
        let mut last = Value::Null;
        for stmt in &block.stmts {
            last = self.eval_stmt(stmt, env)?;
        }
        Ok(last)
    }

    fn eval_if(
        &mut self,
        branches: &[IfBranch],
        else_block: Option<&Block>,
        env: &Environment,
    ) -> EvalResult {
        for branch in branches {
            if self.eval_expr(&branch.cond, env)?.is_truthy() {
                return self.eval_block(&branch.body, &env.child());
            }
        }
        match else_block {
            Some(block) => self.eval_block(block, &env.child()),
            None => Ok(Value::Null),
        }
    }

    fn eval_while(
        &mut self,
        cond: &Expr,
        body: &Block,
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        let mut fuse = LoopFuse::new(self.limits.max_loop_iterations, pos);
        while self.eval_expr(cond, env)?.is_truthy() {
            fuse.tick()?;
            if let LoopFlow::Exit = loop_flow(self.eval_block(body, &env.child()))? {
                break;
            }
        }
        Ok(Value::Null)
    }

    /// `for (init; cond; step) body`. The header gets its own scope; `step`
    /// also runs after `continue`.
    fn eval_for(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        step: Option<&Expr>,
        body: &Block,
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        let loop_env = env.child();
        if let Some(init) = init {
            self.eval_stmt(init, &loop_env)?;
        }
        let mut fuse = LoopFuse::new(self.limits.max_loop_iterations, pos);
        loop {
            if let Some(cond) = cond {
                if !self.eval_expr(cond, &loop_env)?.is_truthy() {
                    break;
                }
            }
            fuse.tick()?;
            if let LoopFlow::Exit = loop_flow(self.eval_block(body, &loop_env.child()))? {
                break;
            }
            if let Some(step) = step {
                self.eval_expr(step, &loop_env)?;
            }
        }
        Ok(Value::Null)
    }
}
