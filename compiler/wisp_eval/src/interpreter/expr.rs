//! Expression dispatch.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use wisp_ir::ast::{BinaryOp, Expr, ExprKind, FunctionLiteral, LogicalOp};
use wisp_ir::{Name, Position};

use super::access::{index_value, set_index};
use super::Interpreter;
use crate::errors::{
    const_assignment, invalid_assignment_target, not_an_instance, type_mismatch,
    undefined_variable, EvalError, EvalResult,
};
use crate::value::{FunctionValue, HashKey};
use crate::{evaluate_binary, evaluate_unary, AssignError, Environment, Mutability, Value};

impl Interpreter<'_> {
    /// Evaluate an expression.
    pub fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        wisp_stack::ensure_sufficient_stack(|| self.eval_expr_inner(expr, env))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, env: &Environment) -> EvalResult {
        match &expr.kind {
            ExprKind::Ident(name) => Ok(self.lookup_variable(*name, env, expr.pos)?),
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Float(x) => Ok(Value::Float(*x)),
            ExprKind::Str(s) => Ok(Value::Str(Rc::clone(s))),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Array(items) => {
                let values = self.eval_args(items, env)?;
                Ok(Value::array(values))
            }
            ExprKind::Hash(pairs) => self.eval_hash(pairs, env),
            ExprKind::Prefix { op, operand } => {
                let value = self.eval_expr(operand, env)?;
                Ok(evaluate_unary(&value, *op).map_err(|e| e.with_pos(expr.pos))?)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                Ok(evaluate_binary(&left, &right, *op).map_err(|e| e.with_pos(expr.pos))?)
            }
            ExprKind::Logical { op, left, right } => self.eval_logical(*op, left, right, env, expr.pos),
            ExprKind::Index { target, index } => {
                let container = self.eval_expr(target, env)?;
                let index = self.eval_expr(index, env)?;
                Ok(index_value(&container, &index).map_err(|e| e.with_pos(expr.pos))?)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, env, expr.pos),
            ExprKind::Assign { target, op, value } => {
                self.eval_assign(target, *op, value, env, expr.pos)
            }
            ExprKind::Property { object, name } => {
                let object = self.eval_expr(object, env)?;
                Ok(self
                    .get_property(&object, *name)
                    .map_err(|e| e.with_pos(expr.pos))?)
            }
            ExprKind::New { class, args } => self.eval_new(class, args, env, expr.pos),
            ExprKind::This => Ok(self.eval_this(env).map_err(|e| e.with_pos(expr.pos))?),
            ExprKind::Super { method } => self.eval_super(*method, env, expr.pos),
            ExprKind::Function(literal) => self.make_closure(literal, env, expr.pos),
        }
    }

    /// Evaluate expressions left to right.
    pub(super) fn eval_args(&mut self, exprs: &[Expr], env: &Environment) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs {
            values.push(self.eval_expr(expr, env)?);
        }
        Ok(values)
    }

    /// Resolve an identifier: lexical scopes first, then the builtins.
    fn lookup_variable(&self, name: Name, env: &Environment, pos: Position) -> Result<Value, EvalError> {
        if let Some(value) = env.get(name) {
            return Ok(value);
        }
        let text = self.name_str(name);
        self.builtins
            .get(text)
            .map(Value::Builtin)
            .ok_or_else(|| undefined_variable(text).with_pos(pos))
    }

    fn eval_hash(&mut self, pairs: &[(Expr, Expr)], env: &Environment) -> EvalResult {
        let mut entries = FxHashMap::default();
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr, env)?;
            let key = HashKey::try_from(&key).map_err(|e| e.with_pos(key_expr.pos))?;
            let value = self.eval_expr(value_expr, env)?;
            entries.insert(key, value);
        }
        Ok(Value::hash(entries))
    }

    /// `&&` and `||` take bool operands and skip the right one when the left
    /// decides the result.
    fn eval_logical(
        &mut self,
        op: LogicalOp,
        left: &Expr,
        right: &Expr,
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        let left = self.eval_expr(left, env)?;
        let left = bool_operand(&left, op).map_err(|e| e.with_pos(pos))?;
        match (op, left) {
            (LogicalOp::And, false) => return Ok(Value::Bool(false)),
            (LogicalOp::Or, true) => return Ok(Value::Bool(true)),
            _ => {}
        }
        let right = self.eval_expr(right, env)?;
        Ok(Value::Bool(
            bool_operand(&right, op).map_err(|e| e.with_pos(pos))?,
        ))
    }

    /// `target = value` or `target op= value`; evaluates to the stored value.
    fn eval_assign(
        &mut self,
        target: &Expr,
        op: Option<BinaryOp>,
        value: &Expr,
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        match &target.kind {
            ExprKind::Ident(name) => {
                let new_value = match op {
                    None => self.eval_expr(value, env)?,
                    Some(op) => {
                        let current = self.lookup_variable(*name, env, target.pos)?;
                        self.combine(&current, op, value, env, pos)?
                    }
                };
                env.set(*name, new_value.clone()).map_err(|err| {
                    let text = self.name_str(*name);
                    match err {
                        AssignError::Immutable => const_assignment(text),
                        AssignError::Undefined => undefined_variable(text),
                    }
                    .with_pos(target.pos)
                })?;
                Ok(new_value)
            }
            ExprKind::Index {
                target: container,
                index,
            } => {
                let container = self.eval_expr(container, env)?;
                let index = self.eval_expr(index, env)?;
                let new_value = match op {
                    None => self.eval_expr(value, env)?,
                    Some(op) => {
                        let current =
                            index_value(&container, &index).map_err(|e| e.with_pos(target.pos))?;
                        self.combine(&current, op, value, env, pos)?
                    }
                };
                set_index(&container, &index, new_value.clone())
                    .map_err(|e| e.with_pos(target.pos))?;
                Ok(new_value)
            }
            ExprKind::Property { object, name } => {
                let object = self.eval_expr(object, env)?;
                let Value::Instance(instance) = &object else {
                    let err = not_an_instance(object.type_name(), self.name_str(*name));
                    return Err(err.with_pos(target.pos).into());
                };
                let new_value = match op {
                    None => self.eval_expr(value, env)?,
                    Some(op) => {
                        let current = self
                            .get_property(&object, *name)
                            .map_err(|e| e.with_pos(target.pos))?;
                        self.combine(&current, op, value, env, pos)?
                    }
                };
                instance.set_field(*name, new_value.clone());
                Ok(new_value)
            }
            _ => Err(invalid_assignment_target().with_pos(target.pos).into()),
        }
    }

    /// The value of `current op value` for compound assignment.
    fn combine(
        &mut self,
        current: &Value,
        op: BinaryOp,
        value: &Expr,
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        let rhs = self.eval_expr(value, env)?;
        Ok(evaluate_binary(current, &rhs, op).map_err(|e| e.with_pos(pos))?)
    }

    /// A function literal closes over `env`. A named literal also sees its
    /// own name, bound in a scope of its own.
    fn make_closure(
        &self,
        literal: &Rc<FunctionLiteral>,
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        let Some(name) = literal.name else {
            return Ok(Value::Function(Rc::new(FunctionValue::new(
                None,
                Rc::clone(literal),
                env.clone(),
            ))));
        };
        let scope = env.child();
        let func = Value::Function(Rc::new(FunctionValue::new(
            Some(self.name_str(name)),
            Rc::clone(literal),
            scope.clone(),
        )));
        self.declare(&scope, name, func.clone(), Mutability::Mutable, pos)?;
        Ok(func)
    }
}

fn bool_operand(value: &Value, op: LogicalOp) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(type_mismatch(
            &format!("bool operands for `{op}`"),
            other.type_name(),
        )),
    }
}
