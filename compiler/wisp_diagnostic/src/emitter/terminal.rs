//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::Write;

use crate::{Diagnostic, Label, LineTable, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when writing to a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes diagnostics with source snippets for a single source text.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    source: &'src str,
    lines: LineTable,
    colors: bool,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, source: &'src str, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            source,
            lines: LineTable::build(source),
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        }
    }

    /// Width of the line-number gutter for this diagnostic.
    fn gutter_width(diagnostic: &Diagnostic) -> usize {
        diagnostic
            .labels
            .iter()
            .map(|l| l.pos.line.to_string().len())
            .max()
            .unwrap_or(1)
    }

    fn write_snippet(&mut self, label: &Label, gutter: usize, severity: Severity) {
        let pad = " ".repeat(gutter);
        let _ = write!(self.writer, "{pad}");
        self.write_colored("--> ", colors::GUTTER);
        let _ = writeln!(self.writer, "{}", label.pos);

        let Some(text) = self.lines.line_text(self.source, label.pos.line) else {
            return;
        };

        // Tabs before the column are echoed so the caret lines up.
        let indent: String = text
            .chars()
            .take(label.pos.column as usize)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let marker = if label.is_primary { '^' } else { '-' };
        let underline: String = std::iter::repeat(marker).take(label.width as usize).collect();

        self.write_colored(&format!("{pad} |"), colors::GUTTER);
        let _ = writeln!(self.writer);
        self.write_colored(&format!("{:>gutter$} |", label.pos.line), colors::GUTTER);
        let _ = writeln!(self.writer, " {text}");
        self.write_colored(&format!("{pad} |"), colors::GUTTER);
        let _ = write!(self.writer, " {indent}");
        let color = if label.is_primary {
            Self::severity_color(severity)
        } else {
            colors::GUTTER
        };
        if label.message.is_empty() {
            self.write_colored(&underline, color);
        } else {
            self.write_colored(&format!("{underline} {}", label.message), color);
        }
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        let color = Self::severity_color(diagnostic.severity);
        self.write_colored(
            &format!("{}[{}]", diagnostic.severity, diagnostic.code),
            color,
        );
        if self.colors {
            let _ = writeln!(
                self.writer,
                "{}: {}{}",
                colors::BOLD,
                diagnostic.message,
                colors::RESET
            );
        } else {
            let _ = writeln!(self.writer, ": {}", diagnostic.message);
        }

        let gutter = Self::gutter_width(diagnostic);
        for label in &diagnostic.labels {
            self.write_snippet(label, gutter, diagnostic.severity);
        }

        for note in &diagnostic.notes {
            let pad = " ".repeat(gutter);
            let _ = write!(self.writer, "{pad} = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let errors = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {errors}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {errors}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}
