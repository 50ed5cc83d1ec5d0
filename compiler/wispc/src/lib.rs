//! Wisp driver.
//!
//! Ties the phases together for embedders:
//!
//! ```text
//! source ──► wisp_lexer ──► wisp_parse ──► wisp_eval
//!                               │              │
//!                               └──► Diagnostic ◄┘
//! ```
//!
//! [`run`] never panics on bad input. Every lexical, syntax and runtime
//! error comes back as a [`Diagnostic`] plus its rendered text.
//!
//! Enable tracing with environment variables:
//! - `RUST_LOG=wisp_eval=debug` - statement dispatch and class creation
//! - `RUST_LOG=wisp_parse=trace` - every recorded parse error
//! - `WISP_LOG_TREE=1` - indented span tree instead of flat lines

use std::sync::Once;

use wisp_diagnostic::{render_all, Diagnostic};
use wisp_eval::{buffer_handler, stdout_handler, EvalLimits, Interpreter, Value};
use wisp_ir::ast::Stmt;
use wisp_ir::StringInterner;
use wisp_parse::{parse, ParseError};

pub use wisp_diagnostic::ErrorCode;

/// Knobs for one [`run`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RunConfig {
    pub limits: EvalLimits,
    /// Evaluate the statements before the first syntax error even when
    /// the program has errors.
    pub partial: bool,
    /// Collect printed output in [`RunOutcome::output`] instead of writing
    /// it to stdout.
    pub capture_output: bool,
}

impl RunConfig {
    /// Configuration used by tests and embedders that want the output back.
    pub fn captured() -> Self {
        RunConfig {
            capture_output: true,
            ..RunConfig::default()
        }
    }

    #[must_use]
    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: EvalLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// What a [`run`] produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// Value of the last evaluated statement, if evaluation ran to the end.
    pub value: Option<Value>,
    /// Captured output; empty unless [`RunConfig::capture_output`] is set.
    pub output: String,
    /// Parse errors in discovery order, followed by at most one runtime error.
    pub diagnostics: Vec<Diagnostic>,
    /// `diagnostics` rendered against the source, without colors.
    pub rendered: String,
}

impl RunOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// Parse `source` without running it.
pub fn check(source: &str) -> Vec<Diagnostic> {
    let interner = StringInterner::new();
    parse(source, &interner)
        .errors
        .iter()
        .map(ParseError::to_diagnostic)
        .collect()
}

/// Lex, parse and evaluate `source`.
///
/// A program with syntax errors is not evaluated unless
/// [`RunConfig::partial`] is set, in which case the statements that precede
/// the first error still run.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn run(source: &str, config: &RunConfig) -> RunOutcome {
    let interner = StringInterner::new();
    let parsed = parse(source, &interner);
    let mut diagnostics: Vec<Diagnostic> =
        parsed.errors.iter().map(ParseError::to_diagnostic).collect();

    let statements: &[Stmt] = match (parsed.has_errors(), config.partial) {
        (false, _) => &parsed.program.statements,
        (true, true) => parsed.runnable_prefix(),
        (true, false) => &[],
    };
    let should_eval = !parsed.has_errors() || !statements.is_empty();

    let print = if config.capture_output {
        buffer_handler()
    } else {
        stdout_handler()
    };

    let mut value = None;
    if should_eval {
        tracing::debug!(
            statements = statements.len(),
            partial = parsed.has_errors(),
            "evaluating"
        );
        let mut interp = Interpreter::builder(&interner)
            .print_handler(print.clone())
            .limits(config.limits)
            .build();
        match interp.eval_statements(statements) {
            Ok(result) => value = Some(result),
            Err(err) => {
                tracing::debug!(code = %err.code(), "runtime error: {}", err.message);
                diagnostics.push(err.to_diagnostic());
            }
        }
    }

    let rendered = render_all(&diagnostics, source);
    RunOutcome {
        value,
        output: print.get_output(),
        diagnostics,
        rendered,
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set;
/// `WISP_LOG_TREE` switches from flat lines to an indented span tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
        // Another subscriber may already be global; keep it.
        let _ = if std::env::var_os("WISP_LOG_TREE").is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
    });
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn config_defaults() {
        let config = RunConfig::default();
        assert!(!config.partial);
        assert!(!config.capture_output);
        assert_eq!(config.limits, EvalLimits::default());
        assert!(RunConfig::captured().capture_output);
    }

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }

    #[test]
    fn check_reports_without_running() {
        assert!(check("println(1);").is_empty());
        assert_eq!(check("let x = ;\nlet y = ;").len(), 2);
    }
}
