//! Pass 2: name collection.
//!
//! Declares every class/interface/enum, function name, and variable name
//! as a bare symbol in its scope, so that every name resolves before any
//! type is computed. Function names become overload-set placeholders;
//! bodies and types are untouched here. Import directives run in a
//! second sweep, after every unit's names exist.

use crate::errors::{ScopeError, report};
use crate::passes::Analyzer;
use crate::symbol::{Symbol, SymbolId, SymbolKind, TypeSymbolKind};
use crate::table::{ScopeId, ScopeKind};
use lumen_ast::{Decl, EnumDecl, TypeDecl, TypeDeclKind, Unit, UsingDecl, VarDecl};
use lumen_core::type_system::{DeclKey, TypeId};

impl Analyzer<'_> {
    pub(crate) fn collect_names(&mut self, units: &[Unit]) {
        let global = self.table.global();
        for (unit, file) in units.iter().zip(self.file_scopes.clone()) {
            // Top-level names bind globally; the file scope only carries
            // this unit's imports, parented so lookup falls through.
            self.collect_decls(&unit.decls, global, file);
        }
        for (unit, file) in units.iter().zip(self.file_scopes.clone()) {
            self.process_usings(&unit.decls, file);
        }
    }

    fn collect_decls(&mut self, decls: &[Decl], bind_scope: ScopeId, lexical: ScopeId) {
        for decl in decls {
            match decl {
                Decl::Module(module) => {
                    let Some(symbol) = self.context.symbol_of(module.id) else {
                        continue;
                    };
                    let export = self
                        .table
                        .static_scope_of(symbol)
                        .expect("module symbols always carry an export scope");
                    self.collect_decls(&module.decls, export, export);
                }
                Decl::Type(ty) => self.declare_type(ty, bind_scope, lexical),
                Decl::Enum(en) => self.declare_enum(en, bind_scope, lexical),
                Decl::Func(func) => {
                    if let Err(err) =
                        self.table
                            .declare_func_name(bind_scope, &func.name, Some(func.span))
                    {
                        report(self.sink, self.stage, &err, Some(func.span));
                    }
                }
                Decl::Var(var) => self.declare_var(var, bind_scope),
                Decl::Using(_) => {}
            }
        }
    }

    fn declare_type(&mut self, decl: &TypeDecl, bind_scope: ScopeId, lexical: ScopeId) {
        let kind = match decl.kind {
            TypeDeclKind::Class => TypeSymbolKind::Class,
            TypeDeclKind::Interface => TypeSymbolKind::Interface,
        };
        let Some(symbol) = self.declare_type_symbol(&decl.name, kind, decl, bind_scope, lexical)
        else {
            return;
        };
        self.context.set_symbol(decl.id, symbol);

        let static_scope = self
            .table
            .static_scope_of(symbol)
            .expect("type symbols always carry a static scope");
        for member in &decl.members {
            match member {
                Decl::Func(func) => {
                    let Some(scope) = self.member_scope(symbol, func.modifiers.is_static) else {
                        continue;
                    };
                    if let Err(err) =
                        self.table.declare_func_name(scope, &func.name, Some(func.span))
                    {
                        report(self.sink, self.stage, &err, Some(func.span));
                    }
                }
                Decl::Var(var) => {
                    let Some(scope) = self.member_scope(symbol, var.modifiers.is_static) else {
                        continue;
                    };
                    self.declare_var(var, scope);
                }
                // Nested type declarations live in the static scope.
                Decl::Type(_) | Decl::Enum(_) => {
                    self.collect_decls(std::slice::from_ref(member), static_scope, static_scope);
                }
                Decl::Module(_) | Decl::Using(_) => {}
            }
        }
    }

    fn declare_enum(&mut self, decl: &EnumDecl, bind_scope: ScopeId, lexical: ScopeId) {
        if let Some(symbol) =
            self.declare_type_symbol_plain(&decl.name, TypeSymbolKind::Enum, decl.span, decl.modifiers, bind_scope, lexical)
        {
            self.context.set_symbol(decl.id, symbol);
        }
    }

    fn declare_type_symbol(
        &mut self,
        name: &str,
        kind: TypeSymbolKind,
        decl: &TypeDecl,
        bind_scope: ScopeId,
        lexical: ScopeId,
    ) -> Option<SymbolId> {
        self.declare_type_symbol_plain(name, kind, decl.span, decl.modifiers, bind_scope, lexical)
    }

    fn declare_type_symbol_plain(
        &mut self,
        name: &str,
        kind: TypeSymbolKind,
        span: lumen_core::Span,
        modifiers: lumen_ast::Modifiers,
        bind_scope: ScopeId,
        lexical: ScopeId,
    ) -> Option<SymbolId> {
        let static_scope = self
            .table
            .create_scope(Some(lexical), ScopeKind::Type(kind), None);
        let defined = self.table.define(
            bind_scope,
            Symbol::new(
                name,
                modifiers,
                Some(span),
                SymbolKind::TypeDecl {
                    kind,
                    type_id: TypeId::UNRESOLVED,
                    static_scope,
                    instance_scope: None,
                    super_type: None,
                },
            ),
        );
        let symbol = match defined {
            Ok(symbol) => symbol,
            Err(err) => {
                report(self.sink, self.stage, &err, Some(span));
                return None;
            }
        };
        self.table.set_scope_owner(static_scope, symbol);
        let user_kind = kind.user_kind().expect("declared types are user kinds");
        let type_id = self
            .types
            .create_user(name, DeclKey(symbol.as_u32()), user_kind);
        self.table.assign_type_id(symbol, type_id);
        Some(symbol)
    }

    fn declare_var(&mut self, decl: &VarDecl, scope: ScopeId) {
        let symbol = Symbol::var(
            &decl.name,
            decl.modifiers,
            Some(decl.span),
            TypeId::UNRESOLVED,
            decl.mutable,
        );
        match self.table.define(scope, symbol) {
            Ok(id) => self.context.set_symbol(decl.id, id),
            Err(err) => report(self.sink, self.stage, &err, Some(decl.span)),
        }
    }

    /// Static members live in the type scope, instance members in the
    /// lazily-created instance scope.
    pub(crate) fn member_scope(&mut self, symbol: SymbolId, is_static: bool) -> Option<ScopeId> {
        if is_static {
            self.table.static_scope_of(symbol)
        } else {
            self.table.instance_scope(symbol)
        }
    }

    // --- import directives -------------------------------------------

    fn process_usings(&mut self, decls: &[Decl], scope: ScopeId) {
        for decl in decls {
            match decl {
                Decl::Using(using) => self.process_using(using, scope),
                Decl::Module(module) => {
                    if let Some(symbol) = self.context.symbol_of(module.id)
                        && let Some(export) = self.table.static_scope_of(symbol)
                    {
                        self.process_usings(&module.decls, export);
                    }
                }
                _ => {}
            }
        }
    }

    fn process_using(&mut self, using: &UsingDecl, scope: ScopeId) {
        let Some(target) = self.resolve_using_path(using, scope) else {
            return;
        };

        let outcome = if using.wildcard {
            self.table.define_using_unqualified(scope, target).err()
        } else {
            let name = using
                .alias
                .clone()
                .or_else(|| using.path.last().cloned())
                .unwrap_or_default();
            self.table.define_using(scope, &name, target).err()
        };
        if let Some(err) = outcome {
            report(self.sink, self.stage, &err, Some(using.span));
        }
    }

    /// Walks a qualified import path: the first segment resolves
    /// lexically, the rest as members of the export scope reached so far.
    fn resolve_using_path(&mut self, using: &UsingDecl, scope: ScopeId) -> Option<SymbolId> {
        let mut segments = using.path.iter();
        let first = segments.next()?;
        let Some(mut current) = self.table.resolve(scope, first, false) else {
            self.report_not_defined(first, using);
            return None;
        };

        for segment in segments {
            let Some(static_scope) = self.table.static_scope_of(current) else {
                self.report_not_defined(segment, using);
                return None;
            };
            let Some(next) = self.table.lookup_local(static_scope, segment) else {
                self.report_not_defined(segment, using);
                return None;
            };
            current = next;
        }
        Some(current)
    }

    fn report_not_defined(&mut self, name: &str, using: &UsingDecl) {
        report(
            self.sink,
            self.stage,
            &ScopeError::NotDefined {
                name: name.to_string(),
            },
            Some(using.span),
        );
    }
}
