//! Diagnostic system for Wisp.
//!
//! Every phase reports problems as a [`Diagnostic`]: an [`ErrorCode`] for
//! searchability, a message, and labels pointing at source positions. The
//! [`emitter`] turns them into the human-readable form:
//!
//! ```text
//! error[E1002]: expected expression, found `;`
//!  --> 1:8
//!   |
//! 1 | let x = ;
//!   |         ^ expected expression
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod line_table;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::{render, render_all, ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
pub use line_table::LineTable;
