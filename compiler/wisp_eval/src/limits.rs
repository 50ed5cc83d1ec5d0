//! Resource limits for evaluation.

use wisp_ir::Position;

use crate::errors::{loop_limit_exceeded, EvalError};

/// Bounds that turn runaway programs into runtime errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalLimits {
    /// Iterations a single execution of a loop may run.
    pub max_loop_iterations: u64,
    /// Nested calls allowed before `StackOverflow`.
    pub max_call_depth: usize,
}

impl EvalLimits {
    pub const DEFAULT_MAX_LOOP_ITERATIONS: u64 = 1_000_000;
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 2048;
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_loop_iterations: Self::DEFAULT_MAX_LOOP_ITERATIONS,
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Iteration counter for one execution of a loop.
pub(crate) struct LoopFuse {
    limit: u64,
    count: u64,
    pos: Position,
}

impl LoopFuse {
    pub(crate) fn new(limit: u64, pos: Position) -> Self {
        LoopFuse {
            limit,
            count: 0,
            pos,
        }
    }

    /// Count one iteration; fails once the limit is passed.
    pub(crate) fn tick(&mut self) -> Result<(), EvalError> {
        self.count += 1;
        if self.count > self.limit {
            return Err(loop_limit_exceeded(self.limit).with_pos(self.pos));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn fuse_allows_exactly_the_limit() {
        let pos = Position::new(4, 0, 30);
        let mut fuse = LoopFuse::new(3, pos);
        for _ in 0..3 {
            assert!(fuse.tick().is_ok());
        }
        let err = fuse.tick().err();
        assert_eq!(err.as_ref().map(|e| &e.kind), Some(&EvalErrorKind::LoopLimitExceeded { limit: 3 }));
        assert_eq!(err.and_then(|e| e.pos), Some(pos));
    }

    #[test]
    fn defaults() {
        let limits = EvalLimits::default();
        assert_eq!(limits.max_loop_iterations, 1_000_000);
        assert_eq!(limits.max_call_depth, 2048);
    }
}
