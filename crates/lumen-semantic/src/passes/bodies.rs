//! Pass 4: body and initializer resolution.
//!
//! The only pass that types expressions. Function bodies open a scope
//! under their parameter scope; variable initializers are checked against
//! the declared type, or supply it when the declaration was `auto`, and
//! are constant-folded into the symbol when the binding is immutable.

use crate::const_eval::eval;
use crate::errors::{TypeError, report};
use crate::passes::Analyzer;
use crate::symbol::{SymbolId, SymbolKind};
use crate::table::{ScopeId, ScopeKind};
use lumen_ast::{Decl, FuncDecl, Unit, VarDecl};
use lumen_core::type_system::TypeId;

impl Analyzer<'_> {
    pub(crate) fn resolve_bodies(&mut self, units: &[Unit]) {
        for (unit, file) in units.iter().zip(self.file_scopes.clone()) {
            self.body_decls(&unit.decls, file, None);
        }
    }

    fn body_decls(&mut self, decls: &[Decl], lexical: ScopeId, owner: Option<SymbolId>) {
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
                    self.body_decls(&module.decls, export, None);
                }
                Decl::Type(ty) => {
                    let Some(symbol) = self.context.symbol_of(ty.id) else {
                        continue;
                    };
                    let static_scope = self
                        .table
                        .static_scope_of(symbol)
                        .expect("type symbols always carry a static scope");
                    // Member initializers may touch private siblings.
                    let previous_self = std::mem::replace(&mut self.self_type, Some(symbol));
                    self.body_decls(&ty.members, static_scope, Some(symbol));
                    self.self_type = previous_self;
                }
                Decl::Enum(_) => {}
                Decl::Func(func) => self.resolve_func_body(func, owner),
                Decl::Var(var) => self.resolve_var_initializer(var, lexical),
                Decl::Using(_) => {}
            }
        }
    }

    fn resolve_func_body(&mut self, decl: &FuncDecl, owner: Option<SymbolId>) {
        let Some(symbol) = self.context.symbol_of(decl.id) else {
            return;
        };
        let SymbolKind::Func {
            signature,
            param_scope,
            ..
        } = &self.table.symbol(symbol).kind
        else {
            return;
        };
        let return_type = signature.return_type;
        let Some(param_scope) = *param_scope else {
            return;
        };
        let Some(body) = &decl.body else {
            return;
        };

        let body_scope = self
            .table
            .create_scope(Some(param_scope), ScopeKind::Function, None);

        let previous_return = self.expected_return.replace(return_type);
        let previous_self = std::mem::replace(&mut self.self_type, owner);
        let previous_depth = std::mem::take(&mut self.loop_depth);

        self.in_scope(body_scope, |a| a.resolve_stmts(&body.stmts));

        self.expected_return = previous_return;
        self.self_type = previous_self;
        self.loop_depth = previous_depth;
    }

    /// Types a module-level or member variable initializer. Locals go
    /// through the statement walker instead.
    fn resolve_var_initializer(&mut self, decl: &VarDecl, lexical: ScopeId) {
        let Some(symbol) = self.context.symbol_of(decl.id) else {
            return;
        };
        let declared = match &self.table.symbol(symbol).kind {
            SymbolKind::Var { ty, .. } => *ty,
            _ => return,
        };

        let Some(init) = &decl.initializer else {
            if declared == TypeId::UNRESOLVED {
                report(
                    self.sink,
                    self.stage,
                    &TypeError::CannotInfer {
                        name: decl.name.clone(),
                    },
                    Some(decl.span),
                );
                self.table.assign_var_type(symbol, TypeId::ERROR);
            }
            return;
        };

        let init_type = self.in_scope(lexical, |a| a.resolve_expr(init));

        if declared == TypeId::UNRESOLVED {
            // Declared `auto`: the initializer supplies the type.
            self.table.assign_var_type(symbol, init_type.id);
        } else if !self.types.can_cast(init_type.id, declared) {
            report(
                self.sink,
                self.stage,
                &TypeError::Mismatch {
                    expected: self.types.display_name(declared),
                    found: self.types.display_name(init_type.id),
                },
                Some(init.span),
            );
        }

        if let Some(value) = eval(init, self.table, self.context) {
            self.context.set_const(init.id, value.clone());
            if !decl.mutable {
                self.table.set_var_value(symbol, value);
            }
        }
    }
}
