//! Runtime errors and control-flow signals.
//!
//! `EvalErrorKind` is the structured category of a runtime failure; the
//! factory functions at the bottom of this module are the construction API
//! and keep `kind` and `message` in sync.
//!
//! `Signal` is what evaluation hands back in the `Err` arm: `return`,
//! `break` and `continue` travel the same path as errors and are caught by
//! the construct that owns them.

use std::fmt;

use wisp_diagnostic::{Diagnostic, ErrorCode};
use wisp_ir::ast::{BinaryOp, UnaryOp};
use wisp_ir::Position;

use crate::Value;

/// Non-local exits carried up the evaluation chain.
#[derive(Clone, Debug)]
pub enum Signal {
    /// `return value`, unwrapped at the call boundary.
    Return(Value),
    /// `break`, caught by the innermost loop.
    Break,
    /// `continue`, caught by the innermost loop.
    Continue,
    /// A runtime error, reported by the top-level caller.
    Error(Box<EvalError>),
}

impl From<EvalError> for Signal {
    #[inline]
    fn from(err: EvalError) -> Self {
        Signal::Error(Box::new(err))
    }
}

/// Result of evaluating a node.
pub type EvalResult<T = Value> = Result<T, Signal>;

/// Typed category of a runtime error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arithmetic
    ModuloByZero,
    IntegerOverflow {
        operation: &'static str,
    },

    // Operands
    TypeMismatch {
        expected: String,
        got: String,
    },
    InvalidBinaryOp {
        type_name: String,
        op: BinaryOp,
    },
    BinaryTypeMismatch {
        left: String,
        right: String,
        op: BinaryOp,
    },
    InvalidUnaryOp {
        type_name: String,
        op: UnaryOp,
    },

    // Bindings
    UndefinedVariable {
        name: String,
    },
    ConstAssignment {
        name: String,
    },
    InvalidAssignmentTarget,

    // Collections
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    UnusableHashKey {
        type_name: String,
    },
    NotIndexable {
        type_name: String,
    },

    // Calls
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },
    NotCallable {
        description: String,
    },

    // Objects
    UndefinedProperty {
        class: String,
        property: String,
    },
    NotAnInstance {
        type_name: String,
        property: String,
    },
    NotAClass {
        name: String,
    },
    ClassRedefinition {
        name: String,
    },
    CircularInheritance {
        name: String,
    },
    SuperOutsideClass,
    NoParentClass {
        class: String,
    },
    ThisOutsideMethod,

    // Limits and control flow
    LoopLimitExceeded {
        limit: u64,
    },
    StackOverflow {
        depth: usize,
    },
    ControlOutsideLoop {
        keyword: &'static str,
    },

    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    /// Diagnostic code for this category.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::TypeMismatch { .. }
            | Self::InvalidBinaryOp { .. }
            | Self::BinaryTypeMismatch { .. }
            | Self::InvalidUnaryOp { .. }
            | Self::NotIndexable { .. }
            | Self::NotAnInstance { .. }
            | Self::NotAClass { .. }
            | Self::InvalidAssignmentTarget => ErrorCode::E2001,
            Self::UndefinedVariable { .. } => ErrorCode::E2002,
            Self::ArityMismatch { .. } => ErrorCode::E2003,
            Self::ModuloByZero => ErrorCode::E2004,
            Self::IndexOutOfBounds { .. } => ErrorCode::E2005,
            Self::NotCallable { .. } => ErrorCode::E2006,
            Self::UndefinedProperty { .. } => ErrorCode::E2007,
            Self::ClassRedefinition { .. }
            | Self::CircularInheritance { .. }
            | Self::NoParentClass { .. } => ErrorCode::E2008,
            Self::ConstAssignment { .. } => ErrorCode::E2009,
            Self::LoopLimitExceeded { .. } | Self::StackOverflow { .. } => ErrorCode::E2010,
            Self::ThisOutsideMethod | Self::SuperOutsideClass => ErrorCode::E2011,
            Self::IntegerOverflow { .. } => ErrorCode::E2012,
            Self::UnusableHashKey { .. } => ErrorCode::E2013,
            Self::ControlOutsideLoop { .. } | Self::Custom { .. } => ErrorCode::E2099,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::InvalidBinaryOp { type_name, op } => {
                write!(f, "operator `{op}` cannot be applied to {type_name}")
            }
            Self::BinaryTypeMismatch { left, right, op } => {
                write!(f, "operator `{op}` cannot be applied to {left} and {right}")
            }
            Self::InvalidUnaryOp { type_name, op } => {
                write!(f, "unary `{op}` cannot be applied to {type_name}")
            }

            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::ConstAssignment { name } => write!(f, "cannot assign to constant: {name}"),
            Self::InvalidAssignmentTarget => write!(f, "invalid assignment target"),

            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::UnusableHashKey { type_name } => write!(f, "unusable as hash key: {type_name}"),
            Self::NotIndexable { type_name } => write!(f, "{type_name} is not indexable"),

            Self::ArityMismatch {
                name,
                expected,
                got,
            } => write!(f, "{name} expects {expected}, got {got}"),
            Self::NotCallable { description } => write!(f, "{description} is not callable"),

            Self::UndefinedProperty { class, property } => {
                write!(f, "undefined property `{property}` on {class} instance")
            }
            Self::NotAnInstance {
                type_name,
                property,
            } => write!(f, "cannot access property `{property}` on {type_name}"),
            Self::NotAClass { name } => write!(f, "{name} is not a class"),
            Self::ClassRedefinition { name } => {
                write!(f, "`{name}` is already defined in this scope")
            }
            Self::CircularInheritance { name } => {
                write!(f, "circular inheritance: class {name} would be its own ancestor")
            }
            Self::SuperOutsideClass => write!(f, "`super` used outside of a class method"),
            Self::NoParentClass { class } => write!(f, "class {class} has no parent class"),
            Self::ThisOutsideMethod => write!(f, "`this` used outside of a method"),

            Self::LoopLimitExceeded { limit } => {
                write!(f, "loop exceeded the iteration limit of {limit}")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }
            Self::ControlOutsideLoop { keyword } => write!(f, "`{keyword}` outside of a loop"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// One frame of a captured call stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    /// Where the call was made.
    pub call_pos: Option<Position>,
}

/// Snapshot of the call stack where an error escaped a function,
/// innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{i}: {}", frame.name)?;
            if let Some(pos) = frame.call_pos {
                write!(f, " called at {pos}")?;
            }
        }
        Ok(())
    }
}

/// A runtime error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    pub pos: Option<Position>,
    pub backtrace: Option<EvalBacktrace>,
    pub notes: Vec<String>,
}

impl EvalError {
    /// An error with just a message (`Custom` kind).
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_kind(EvalErrorKind::Custom {
            message: message.clone(),
        })
    }

    #[cold]
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            pos: None,
            backtrace: None,
            notes: Vec::new(),
        }
    }

    /// Attach a source position.
    #[must_use]
    pub fn with_pos(mut self, pos: Position) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Attach `pos` unless a more precise position is already set.
    #[must_use]
    pub fn or_pos(mut self, pos: Position) -> Self {
        self.pos.get_or_insert(pos);
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.message.clone());
        if let Some(pos) = self.pos {
            diag = diag.with_label(pos, self.code().description());
        }
        for note in &self.notes {
            diag = diag.with_note(note.clone());
        }
        if let Some(backtrace) = self.backtrace.as_ref().filter(|b| !b.is_empty()) {
            diag = diag.with_note(format!("call stack:\n{backtrace}"));
        }
        diag
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{} at {pos}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Arithmetic

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

// Operands

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Operator not defined for a single operand type.
#[cold]
pub fn invalid_binary_op(type_name: &str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

/// Operator applied to two incompatible operand types.
#[cold]
pub fn binary_type_mismatch(left: &str, right: &str, op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        left: left.to_string(),
        right: right.to_string(),
        op,
    })
}

#[cold]
pub fn invalid_unary_op(type_name: &str, op: UnaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

// Bindings

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn const_assignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstAssignment {
        name: name.to_string(),
    })
}

#[cold]
pub fn invalid_assignment_target() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignmentTarget)
}

// Collections

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn unusable_hash_key(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnusableHashKey {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_indexable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIndexable {
        type_name: type_name.to_string(),
    })
}

// Calls

/// `expected` is already phrased, e.g. "2 arguments".
#[cold]
pub fn arity_mismatch(name: &str, expected: impl Into<String>, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected: expected.into(),
        got,
    })
}

#[cold]
pub fn not_callable(description: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        description: description.into(),
    })
}

// Objects

#[cold]
pub fn undefined_property(class: &str, property: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedProperty {
        class: class.to_string(),
        property: property.to_string(),
    })
}

#[cold]
pub fn not_an_instance(type_name: &str, property: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnInstance {
        type_name: type_name.to_string(),
        property: property.to_string(),
    })
}

#[cold]
pub fn not_a_class(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAClass {
        name: name.to_string(),
    })
}

#[cold]
pub fn class_redefinition(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ClassRedefinition {
        name: name.to_string(),
    })
}

#[cold]
pub fn circular_inheritance(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CircularInheritance {
        name: name.to_string(),
    })
}

#[cold]
pub fn super_outside_class() -> EvalError {
    EvalError::from_kind(EvalErrorKind::SuperOutsideClass)
}

#[cold]
pub fn no_parent_class(class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoParentClass {
        class: class.to_string(),
    })
}

#[cold]
pub fn this_outside_method() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ThisOutsideMethod)
}

// Limits and control flow

#[cold]
pub fn loop_limit_exceeded(limit: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LoopLimitExceeded { limit })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn control_outside_loop(keyword: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ControlOutsideLoop { keyword })
}
