//! The resolution pipeline.
//!
//! Four passes, each a full walk over every translation unit before the
//! next starts. The strict ordering is the forward-reference guarantee:
//! by the time anything resolves a type, every name in every unit is
//! already declared, so a class may freely reference a sibling declared
//! later in the same or another file.
//!
//! 1. module registration ([`modules`])
//! 2. name collection and imports ([`names`])
//! 3. declaration-header resolution ([`headers`])
//! 4. body and initializer resolution ([`bodies`])

mod bodies;
mod headers;
mod modules;
mod names;

use crate::context::SemanticContext;
use crate::symbol::SymbolId;
use crate::table::{ScopeId, SymbolTable};
use lumen_ast::Unit;
use lumen_core::type_system::{TypeId, TypeRegistry};
use lumen_core::{DiagnosticSink, Stage};

/// Shared state of one pipeline run. Pass and resolver methods live in
/// the files of this module and of [`crate::resolver`].
pub(crate) struct Analyzer<'a> {
    pub(crate) table: &'a mut SymbolTable,
    pub(crate) types: &'a mut TypeRegistry,
    pub(crate) context: &'a mut SemanticContext,
    pub(crate) sink: &'a mut DiagnosticSink,

    /// Per-unit file scopes, in unit order; created by pass 1.
    pub(crate) file_scopes: Vec<ScopeId>,

    /// The pass currently running, for diagnostics.
    pub(crate) stage: Stage,
    /// Scope resolution currently happens in.
    pub(crate) scope: ScopeId,
    /// Declared return type of the function body being resolved.
    pub(crate) expected_return: Option<TypeId>,
    /// The type whose members are being resolved, for visibility checks.
    pub(crate) self_type: Option<SymbolId>,
    /// Loop nesting depth, for break/continue validation.
    pub(crate) loop_depth: usize,
}

impl<'a> Analyzer<'a> {
    pub(crate) fn new(
        table: &'a mut SymbolTable,
        types: &'a mut TypeRegistry,
        context: &'a mut SemanticContext,
        sink: &'a mut DiagnosticSink,
    ) -> Self {
        let scope = table.global();
        Self {
            table,
            types,
            context,
            sink,
            file_scopes: Vec::new(),
            stage: Stage::Modules,
            scope,
            expected_return: None,
            self_type: None,
            loop_depth: 0,
        }
    }

    /// Runs all four passes in order over every unit.
    pub(crate) fn run(&mut self, units: &[Unit]) {
        self.stage = Stage::Modules;
        self.register_modules(units);

        self.stage = Stage::Names;
        self.collect_names(units);

        self.stage = Stage::Headers;
        self.resolve_headers(units);

        self.stage = Stage::Bodies;
        self.resolve_bodies(units);
    }

    /// Runs `f` with `scope` as the current scope, restoring afterwards.
    pub(crate) fn in_scope<R>(&mut self, scope: ScopeId, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.scope, scope);
        let result = f(self);
        self.scope = previous;
        result
    }
}
