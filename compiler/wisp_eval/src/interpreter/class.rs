//! Classes: declarations, instantiation, `this` and `super`.
//!
//! The class context is lexical. Calling a method binds `this` to the
//! receiver and `super` to the class whose method table supplied the
//! method, in the call's own scope. `super` therefore resolves against the
//! declaring class rather than the receiver's runtime class, and closures
//! created inside a method keep both.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use wisp_ir::ast::{ClassDecl, Expr, ExprKind, ParentRef};
use wisp_ir::{Name, Position};

use super::call::Receiver;
use super::Interpreter;
use crate::errors::{
    arity_mismatch, circular_inheritance, class_redefinition, no_parent_class, not_a_class,
    super_outside_class, this_outside_method, undefined_property, undefined_variable,
    EvalError, EvalResult,
};
use crate::value::{BoundMethod, ClassValue, FunctionValue, Instance};
use crate::{Environment, Mutability, Value};

impl Interpreter<'_> {
    /// `class Name extends Parent { ... }`.
    pub(super) fn eval_class_decl(
        &mut self,
        decl: &ClassDecl,
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        let name = self.name_str(decl.name);
        if env.has_own(decl.name) {
            return Err(class_redefinition(name).with_pos(pos).into());
        }
        let parent = match &decl.parent {
            Some(parent) => Some(self.resolve_parent(decl.name, parent, env)?),
            None => None,
        };

        let class_env = env.child();
        let mut constructor = None;
        let mut methods = FxHashMap::default();
        for literal in &decl.methods {
            let Some(method_name) = literal.name else {
                continue;
            };
            let method = Rc::new(FunctionValue::new(
                Some(self.name_str(method_name)),
                Rc::clone(literal),
                class_env.clone(),
            ));
            if method_name == self.names.init {
                constructor = Some(method);
            } else {
                methods.insert(method_name, method);
            }
        }

        let class = ClassValue {
            name,
            parent,
            constructor,
            methods,
        };
        tracing::debug!(
            class = name,
            parent = ?class.parent.as_ref().map(|p| p.name),
            methods = class.methods.len(),
            "defined class"
        );
        self.declare(env, decl.name, Value::Class(Rc::new(class)), Mutability::Mutable, pos)?;
        Ok(Value::Null)
    }

    /// Look up the class named in an `extends` clause.
    fn resolve_parent(
        &self,
        class_name: Name,
        parent: &ParentRef,
        env: &Environment,
    ) -> Result<Rc<ClassValue>, EvalError> {
        let name = self.name_str(class_name);
        let parent_name = self.name_str(parent.name);
        if parent.name == class_name {
            return Err(circular_inheritance(name).with_pos(parent.pos));
        }
        match env.get(parent.name) {
            Some(Value::Class(class)) => {
                if class.ancestry().any(|ancestor| ancestor.name == name) {
                    return Err(circular_inheritance(name).with_pos(parent.pos));
                }
                Ok(class)
            }
            Some(_) => Err(not_a_class(parent_name).with_pos(parent.pos)),
            None => Err(undefined_variable(parent_name).with_pos(parent.pos)),
        }
    }

    /// `new Class(args...)`.
    pub(super) fn eval_new(
        &mut self,
        class_expr: &Expr,
        args: &[Expr],
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        let class = match self.eval_expr(class_expr, env)? {
            Value::Class(class) => class,
            other => {
                let described = match class_expr.kind {
                    ExprKind::Ident(name) => self.name_str(name),
                    _ => other.type_name(),
                };
                return Err(not_a_class(described).with_pos(class_expr.pos).into());
            }
        };
        let args = self.eval_args(args, env)?;
        self.instantiate(&class, args, pos)
    }

    /// Allocate an instance and run the nearest constructor on it.
    fn instantiate(&mut self, class: &Rc<ClassValue>, args: Vec<Value>, pos: Position) -> EvalResult {
        let instance = Rc::new(Instance::new(Rc::clone(class)));
        match class.find_constructor() {
            Some((ctor, owner)) => {
                let receiver = Receiver {
                    instance: &instance,
                    owner: &owner,
                };
                self.call_function(&ctor, args, Some(receiver), pos)?;
            }
            None if !args.is_empty() => {
                let err = arity_mismatch(&format!("{}.init", class.name), "0 arguments", args.len());
                return Err(err.with_pos(pos).into());
            }
            None => {}
        }
        Ok(Value::Instance(instance))
    }

    pub(super) fn eval_this(&self, env: &Environment) -> Result<Value, EvalError> {
        env.get(self.names.this).ok_or_else(this_outside_method)
    }

    /// The receiver and declaring class of the enclosing method.
    fn class_context(&self, env: &Environment) -> Result<(Rc<Instance>, Rc<ClassValue>), EvalError> {
        match (env.get(self.names.this), env.get(self.names.super_)) {
            (Some(Value::Instance(instance)), Some(Value::Class(owner))) => Ok((instance, owner)),
            _ => Err(super_outside_class()),
        }
    }

    fn parent_of(owner: &ClassValue) -> Result<Rc<ClassValue>, EvalError> {
        owner
            .parent
            .clone()
            .ok_or_else(|| no_parent_class(owner.name))
    }

    /// `super.method`, bound to the current `this`; or, for a bare `super`,
    /// the parent constructor.
    pub(super) fn eval_super(
        &mut self,
        method: Option<Name>,
        env: &Environment,
        pos: Position,
    ) -> EvalResult {
        let (instance, owner) = self.class_context(env).map_err(|e| e.with_pos(pos))?;
        let parent = Self::parent_of(&owner).map_err(|e| e.with_pos(pos))?;
        let found = match method {
            Some(name) => match parent.find_method(name) {
                Some(found) => Some(found),
                None => {
                    let err = undefined_property(parent.name, self.name_str(name));
                    return Err(err.with_pos(pos).into());
                }
            },
            None => parent.find_constructor(),
        };
        Ok(match found {
            Some((method, owner)) => Value::BoundMethod(Rc::new(BoundMethod {
                receiver: instance,
                method,
                owner,
            })),
            None => Value::Null,
        })
    }

    /// `super(args...)`: run the nearest constructor above the current class
    /// context on the current `this`.
    pub(super) fn call_super_constructor(
        &mut self,
        env: &Environment,
        args: Vec<Value>,
        pos: Position,
    ) -> EvalResult {
        let (instance, owner) = self.class_context(env).map_err(|e| e.with_pos(pos))?;
        let parent = Self::parent_of(&owner).map_err(|e| e.with_pos(pos))?;
        match parent.find_constructor() {
            Some((ctor, ctor_owner)) => {
                let receiver = Receiver {
                    instance: &instance,
                    owner: &ctor_owner,
                };
                self.call_function(&ctor, args, Some(receiver), pos)
            }
            None if !args.is_empty() => {
                let err = arity_mismatch(&format!("{}.init", parent.name), "0 arguments", args.len());
                Err(err.with_pos(pos).into())
            }
            None => Ok(Value::Null),
        }
    }
}
