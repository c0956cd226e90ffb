//! Core types and utilities for the Lumen semantic analyzer.
//!
//! This crate provides source spans, the shared error type, the diagnostics
//! sink, and the type system used by every analysis stage.

mod diagnostics;
mod error;
mod span;
pub mod type_system;

pub use diagnostics::{Diagnostic, DiagnosticSink, Severity, Stage};
pub use error::{Error, Result};
pub use span::{Location, Span};
