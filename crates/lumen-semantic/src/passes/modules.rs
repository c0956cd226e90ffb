//! Pass 1: module registration.
//!
//! Walks only module declarations. Module declarations with the same
//! qualified path share one symbol and one export scope, whichever unit
//! they appear in, so exports merge across files. Nested modules bind
//! recursively.

use crate::errors::{ScopeError, report};
use crate::passes::Analyzer;
use crate::symbol::{Symbol, SymbolId, SymbolKind, TypeSymbolKind};
use crate::table::{ScopeId, ScopeKind};
use lumen_ast::{Decl, Modifiers, ModuleDecl, ModuleKind, Unit};
use lumen_core::type_system::{DeclKey, TypeId};

impl Analyzer<'_> {
    pub(crate) fn register_modules(&mut self, units: &[Unit]) {
        let global = self.table.global();
        for unit in units {
            let file = self.table.create_scope(Some(global), ScopeKind::File, None);
            self.file_scopes.push(file);
        }
        for unit in units {
            self.register_module_decls(&unit.decls, global);
        }
    }

    fn register_module_decls(&mut self, decls: &[Decl], parent: ScopeId) {
        for decl in decls {
            let Decl::Module(module) = decl else { continue };
            if let Some(symbol) = self.register_module_path(module, parent) {
                self.context.set_symbol(module.id, symbol);
                let export = self
                    .table
                    .static_scope_of(symbol)
                    .expect("module symbols always carry an export scope");
                self.register_module_decls(&module.decls, export);
            }
        }
    }

    /// Creates or merges every segment of the module's qualified path,
    /// returning the symbol of the last segment.
    fn register_module_path(&mut self, module: &ModuleDecl, parent: ScopeId) -> Option<SymbolId> {
        let mut scope = parent;
        let mut symbol = None;
        for segment in &module.path {
            match self.declare_module_segment(scope, segment, module) {
                Ok(sym) => {
                    scope = self
                        .table
                        .static_scope_of(sym)
                        .expect("module symbols always carry an export scope");
                    symbol = Some(sym);
                }
                Err(err) => {
                    report(self.sink, self.stage, &err, Some(module.span));
                    return None;
                }
            }
        }
        symbol
    }

    fn declare_module_segment(
        &mut self,
        scope: ScopeId,
        name: &str,
        module: &ModuleDecl,
    ) -> Result<SymbolId, ScopeError> {
        if let Some(existing) = self.table.lookup_local(scope, name) {
            return match &self.table.symbol(existing).kind {
                SymbolKind::TypeDecl { kind, .. } if kind.is_namespace_like() => Ok(existing),
                _ => Err(ScopeError::AlreadyDefined {
                    name: name.to_string(),
                }),
            };
        }

        let kind = match module.kind {
            ModuleKind::Module => TypeSymbolKind::Module,
            ModuleKind::Namespace => TypeSymbolKind::Namespace,
        };
        let export = self
            .table
            .create_scope(Some(scope), ScopeKind::Module, None);
        let symbol = self.table.define(
            scope,
            Symbol::new(
                name,
                Modifiers::public(),
                Some(module.span),
                SymbolKind::TypeDecl {
                    kind,
                    type_id: TypeId::UNRESOLVED,
                    static_scope: export,
                    instance_scope: None,
                    super_type: None,
                },
            ),
        )?;
        self.table.set_scope_owner(export, symbol);
        let type_id = self.types.create_namespace(name, DeclKey(symbol.as_u32()));
        self.table.assign_type_id(symbol, type_id);
        Ok(symbol)
    }
}
