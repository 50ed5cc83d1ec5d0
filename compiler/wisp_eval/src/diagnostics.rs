//! Call frame tracking.
//!
//! Every call to a user function, bound method or builtin pushes a
//! [`CallFrame`]; the depth check is part of [`CallStack::push`]. When an
//! error escapes a function the stack is snapshotted into an
//! [`EvalBacktrace`] and attached to the error.

use wisp_ir::Position;

use crate::errors::{stack_overflow, BacktraceFrame, EvalBacktrace, EvalError};

/// Frames kept in a captured backtrace; deep recursion keeps the innermost.
const MAX_BACKTRACE_FRAMES: usize = 32;

/// A live call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Function, method (`Class.method`) or builtin name.
    pub name: String,
    /// Where the call was made, not where the callee is defined.
    pub call_pos: Option<Position>,
}

/// The interpreter's call stack.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame. On overflow the frame is not pushed.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(stack_overflow(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot of the stack, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .take(MAX_BACKTRACE_FRAMES)
            .map(|f| BacktraceFrame {
                name: f.name.clone(),
                call_pos: f.call_pos,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a snapshot unless `err` already carries one from a deeper frame.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    fn frame(name: &str, line: u32) -> CallFrame {
        CallFrame {
            name: name.to_string(),
            call_pos: Some(Position::new(line, 0, 0)),
        }
    }

    #[test]
    fn push_checks_depth() {
        let mut stack = CallStack::new(2);
        stack.push(frame("a", 1)).unwrap();
        stack.push(frame("b", 2)).unwrap();
        let err = stack.push(frame("c", 3)).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 2 });
        assert_eq!(stack.depth(), 2);

        stack.pop();
        stack.pop();
        assert!(stack.is_empty());
    }

    #[test]
    fn capture_is_innermost_first() {
        let mut stack = CallStack::new(8);
        stack.push(frame("outer", 1)).unwrap();
        stack.push(frame("inner", 4)).unwrap();
        let names: Vec<_> = stack
            .capture()
            .frames()
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(names, ["inner", "outer"]);
    }

    #[test]
    fn capture_keeps_innermost_frames() {
        let mut stack = CallStack::new(100);
        for line in 1..=40 {
            stack.push(frame("f", line)).unwrap();
        }
        let trace = stack.capture();
        assert_eq!(trace.len(), MAX_BACKTRACE_FRAMES);
        assert_eq!(trace.frames()[0].call_pos.map(|p| p.line), Some(40));
    }

    #[test]
    fn backtrace_attached_once() {
        let mut stack = CallStack::new(8);
        stack.push(frame("outer", 1)).unwrap();
        stack.push(frame("inner", 4)).unwrap();
        let err = stack.attach_backtrace(EvalError::new("boom"));
        stack.pop();
        let err = stack.attach_backtrace(err);
        assert_eq!(err.backtrace.map(|b| b.len()), Some(2));
    }

    #[test]
    fn empty_stack_attaches_nothing() {
        let stack = CallStack::new(8);
        assert!(stack.attach_backtrace(EvalError::new("boom")).backtrace.is_none());
    }
}
