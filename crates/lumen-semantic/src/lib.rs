//! Semantic analysis for the Lumen language.
//!
//! Takes the parsed translation units of one program and produces a
//! populated scope tree plus per-node type/symbol/constant annotations,
//! or precise, recoverable diagnostics. Analysis never stops at the
//! first error: every failure is reported and replaced by an error
//! sentinel so the rest of the program still resolves.
//!
//! The pipeline runs four strictly ordered passes over all units
//! (module registration, name collection, header resolution, body
//! resolution), which is what lets declarations reference each other
//! regardless of file order.

mod builtins;
mod const_eval;
mod context;
mod errors;
mod passes;
mod resolver;
mod symbol;
mod table;

pub use builtins::install_builtins;
pub use const_eval::{ConstValue, eval};
pub use context::SemanticContext;
pub use errors::{ScopeError, TypeError};
pub use symbol::{FuncSignature, Symbol, SymbolId, SymbolKind, TypeSymbolKind};
pub use table::{Scope, ScopeId, ScopeKind, SymbolTable};

use lumen_ast::Unit;
use lumen_core::type_system::TypeRegistry;
use lumen_core::{DiagnosticSink, Error, Result};

/// Everything one analysis run produces. The scope tree, registry, and
/// context maps are what a code generator or IDE layer consumes.
#[derive(Debug)]
pub struct Analysis {
    pub table: SymbolTable,
    pub types: TypeRegistry,
    pub context: SemanticContext,
    pub diagnostics: DiagnosticSink,
}

impl Analysis {
    /// Whether the run is clean enough for code generation: no
    /// error-level diagnostics. Warnings never block.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    /// Collapses the run into a single result for callers that don't
    /// inspect individual diagnostics.
    pub fn check(&self) -> Result<()> {
        if self.succeeded() {
            Ok(())
        } else {
            Err(Error::AnalysisFailed(self.diagnostics.error_count()))
        }
    }
}

/// Analyzes a program given as parsed translation units.
///
/// Builds a fresh symbol table and type registry, installs the built-in
/// primitive scope exactly once, and runs the four pipeline passes in
/// order, each over every unit. The built-in scope is read-only from
/// then on and file order never affects the outcome.
#[must_use]
pub fn analyze(units: &[Unit]) -> Analysis {
    let mut table = SymbolTable::new();
    let mut types = TypeRegistry::new();
    install_builtins(&mut table, &mut types);

    let mut context = SemanticContext::new();
    let mut diagnostics = DiagnosticSink::new();

    passes::Analyzer::new(&mut table, &mut types, &mut context, &mut diagnostics).run(units);

    Analysis {
        table,
        types,
        context,
        diagnostics,
    }
}
