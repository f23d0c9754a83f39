//! Diagnostics and error reporting for cmm.
//!
//! Every stage (scanner, parser/binder, call-site analyzer) lowers its typed errors into one [`CompileError`].
//! Two renderings exist:
//! - [`format_error`]: the stable one-line `Line: <n>: error: <message>` form that tests and scripts rely on.
//! - [`render_fancy`]: a miette graphical report with the offending source line underlined.

use std::fmt;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// A compile-time error with location information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
        }
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lexical, message, span)
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    pub fn binding(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Binding, message, span)
    }

    pub fn semantic(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Semantic, message, span)
    }

    /// 1-based source line the error is reported at.
    pub fn line(&self) -> u32 {
        self.span.line
    }
}

/// Which stage produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed literal or stray character.
    Lexical,
    /// Unexpected token; the parser entered panic mode.
    Syntax,
    /// Use before declaration, duplicate or conflicting declaration.
    Binding,
    /// Call-site validation after a successful parse.
    Semantic,
}

impl ErrorKind {
    /// Stable diagnostic code shown by the fancy renderer.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "cmm::lexical",
            ErrorKind::Syntax => "cmm::syntax",
            ErrorKind::Binding => "cmm::binding",
            ErrorKind::Semantic => "cmm::semantic",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Binding => write!(f, "binding error"),
            ErrorKind::Semantic => write!(f, "semantic error"),
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.end.saturating_sub(span.start))
    }
}

impl Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some(self.kind.to_string()), self.span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Format an error in the one-line form: `Line: <n>: error: <message>`.
pub fn format_error(error: &CompileError) -> String {
    format!("Line: {}: error: {}", error.line(), error.message)
}

/// Render an error as a miette graphical report against `source`.
///
/// Colors are disabled so the output is stable; the CLI decides whether a terminal gets this form at all.
pub fn render_fancy(file_name: &str, source: &str, error: &CompileError) -> String {
    let report = Report::new(error.clone()).with_source_code(NamedSource::new(file_name, source.to_string()));
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    let mut out = String::new();
    match handler.render_report(&mut out, &*report) {
        Ok(()) => out,
        Err(_) => format_error(error),
    }
}
