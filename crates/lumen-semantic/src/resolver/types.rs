//! Datatype-node resolution: from a written type to a registry id.

use crate::errors::{ScopeError, TypeError, report};
use crate::passes::Analyzer;
use crate::symbol::{SymbolId, SymbolKind};
use lumen_ast::{TypeExpr, TypeExprKind};
use lumen_core::type_system::TypeId;

impl Analyzer<'_> {
    /// Resolves a written type in the current scope. Failures are
    /// reported and come back as the error sentinel; `auto` comes back
    /// unresolved for the caller to infer.
    pub(crate) fn resolve_type_expr(&mut self, expr: &TypeExpr) -> TypeId {
        match &expr.kind {
            TypeExprKind::Named { path } => self.resolve_named_type(expr, path),
            TypeExprKind::Pointer { inner, konst } => {
                let pointee = self.resolve_type_expr(inner);
                self.types.create_pointer(pointee, *konst)
            }
            TypeExprKind::Function { params, ret } => {
                let parameters = params.iter().map(|p| self.resolve_type_expr(p)).collect();
                let return_type = self.resolve_type_expr(ret);
                self.types.create_function(parameters, return_type)
            }
            TypeExprKind::Auto => TypeId::UNRESOLVED,
            TypeExprKind::Void => TypeId::VOID,
            // The parser already reported unparsable type syntax.
            TypeExprKind::Error => TypeId::ERROR,
        }
    }

    fn resolve_named_type(&mut self, expr: &TypeExpr, path: &[String]) -> TypeId {
        let Some((first, rest)) = path.split_first() else {
            return TypeId::ERROR;
        };
        let Some(mut symbol) = self.table.resolve(self.scope, first, false) else {
            report(
                self.sink,
                self.stage,
                &ScopeError::NotDefined {
                    name: first.clone(),
                },
                Some(expr.span),
            );
            return TypeId::ERROR;
        };

        for segment in rest {
            let Some(next) = self.lookup_type_member(symbol, segment) else {
                report(
                    self.sink,
                    self.stage,
                    &ScopeError::NotDefined {
                        name: segment.clone(),
                    },
                    Some(expr.span),
                );
                return TypeId::ERROR;
            };
            symbol = next;
        }

        match &self.table.symbol(symbol).kind {
            SymbolKind::TypeDecl { kind, type_id, .. } if !kind.is_namespace_like() => *type_id,
            _ => {
                report(self.sink, self.stage, &TypeError::ExpectedTypeName, Some(expr.span));
                TypeId::ERROR
            }
        }
    }

    /// One qualification step: a member of a module's export scope or of
    /// a type's static scope.
    pub(crate) fn lookup_type_member(&self, symbol: SymbolId, name: &str) -> Option<SymbolId> {
        let scope = self.table.static_scope_of(symbol)?;
        self.table.lookup_local(scope, name)
    }
}
