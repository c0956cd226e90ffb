//! Error types and result aliases for the Lumen analyzer.

use crate::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main error type for the Lumen front end.
///
/// Modeled analysis failures are reported through the [`DiagnosticSink`]
/// and never surface as `Err`; this type exists for the crate boundary
/// (callers that want a single failure value) and for internal plumbing.
///
/// [`DiagnosticSink`]: crate::DiagnosticSink
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("scope error: {0}")]
    #[diagnostic(code(lumen::scope))]
    Scope(String),

    #[error("{0}")]
    #[diagnostic(code(lumen::scope))]
    ScopeWithSpan(String, #[label("here")] Span),

    #[error("type error: {0}")]
    #[diagnostic(code(lumen::type_check))]
    Type(String),

    #[error("{0}")]
    #[diagnostic(code(lumen::type_check))]
    TypeWithSpan(String, #[label("here")] Span),

    #[error("analysis failed with {0} error(s)")]
    #[diagnostic(code(lumen::analysis))]
    AnalysisFailed(usize),
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start.offset..span.end.offset)
    }
}

/// Result type alias using the Lumen error type.
pub type Result<T> = std::result::Result<T, Error>;
