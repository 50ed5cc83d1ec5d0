//! Diagnostic emitters.
//!
//! [`TerminalEmitter`] writes the human-readable form with the offending
//! source line and a caret under the reported column. [`render`] and
//! [`render_all`] are the uncolored string forms used by the driver and by
//! tests.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Sink for diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);

    /// Closing line such as `error: aborting due to 2 previous errors`.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Render one diagnostic against `source`, without colors.
pub fn render(diagnostic: &Diagnostic, source: &str) -> String {
    let mut out = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut out, source, ColorMode::Never, false);
        emitter.emit(diagnostic);
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Render several diagnostics, each followed by a blank line.
pub fn render_all(diagnostics: &[Diagnostic], source: &str) -> String {
    let mut out = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut out, source, ColorMode::Never, false);
        emitter.emit_all(diagnostics);
    }
    String::from_utf8_lossy(&out).into_owned()
}
