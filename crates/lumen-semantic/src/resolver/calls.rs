//! Call resolution and overload selection.

use crate::errors::{ScopeError, TypeError, report};
use crate::passes::Analyzer;
use crate::symbol::{SymbolId, SymbolKind};
use lumen_ast::{Expr, ExprKind};
use lumen_core::Span;
use lumen_core::type_system::{Type, TypeId, TypeKind};

impl Analyzer<'_> {
    pub(crate) fn resolve_call(&mut self, expr: &Expr, callee: &Expr, args: &[Expr]) -> Type {
        let callee_type = self.resolve_expr(callee);
        let arg_types: Vec<TypeId> = args.iter().map(|a| self.resolve_expr(a).id).collect();

        if callee_type.id.is_sentinel() {
            return Type::rvalue(callee_type.id);
        }

        let Some(kind) = self.types.get(callee_type.id).cloned() else {
            return Type::error();
        };

        match kind {
            TypeKind::OverloadSet { decl } => {
                let set = SymbolId::from_decl(decl);
                let name = self.table.symbol(set).name.clone();
                let scope_name = self.callee_scope_name(set);
                let funcs = self.table.overloads(set);
                let Some(func) =
                    self.select_overload(&funcs, &arg_types, &name, &scope_name, expr.span)
                else {
                    return Type::error();
                };
                self.context.set_symbol(expr.id, func);
                Type::rvalue(self.func_return_type(func))
            }

            // Calling a function-typed value: one fixed signature.
            TypeKind::Function {
                parameters,
                return_type,
            } => {
                self.check_fixed_signature(&parameters, &arg_types, args, expr.span);
                Type::rvalue(return_type)
            }

            _ => {
                let name = match &callee.kind {
                    ExprKind::Ident(name) => name.clone(),
                    ExprKind::Member { name, .. } => name.clone(),
                    _ => self.types.display_name(callee_type.id),
                };
                report(
                    self.sink,
                    self.stage,
                    &TypeError::NotAFunction { name },
                    Some(callee.span),
                );
                Type::error()
            }
        }
    }

    /// Picks the minimum-cost candidate among the overloads every
    /// argument can cast into. Selection is deterministic and
    /// independent of declaration order: a strictly lower cost wins, an
    /// equal-cost pair is ambiguous.
    pub(crate) fn select_overload(
        &mut self,
        funcs: &[SymbolId],
        args: &[TypeId],
        name: &str,
        scope_name: &str,
        span: Span,
    ) -> Option<SymbolId> {
        let mut best: Option<(u32, SymbolId)> = None;
        let mut ambiguous = false;

        for &func in funcs {
            let SymbolKind::Func { signature, .. } = &self.table.symbol(func).kind else {
                continue;
            };
            if signature.params.len() != args.len() {
                continue;
            }
            let mut cost = 0u32;
            let mut viable = true;
            for (&arg, &param) in args.iter().zip(&signature.params) {
                match self.types.cast_cost(arg, param) {
                    Some(step) => cost += step,
                    None => {
                        viable = false;
                        break;
                    }
                }
            }
            if !viable {
                continue;
            }
            match best {
                None => best = Some((cost, func)),
                Some((lowest, _)) if cost < lowest => {
                    best = Some((cost, func));
                    ambiguous = false;
                }
                Some((lowest, _)) if cost == lowest => ambiguous = true,
                Some(_) => {}
            }
        }

        match best {
            None => {
                let arg_types = self.display_types(args);
                report(
                    self.sink,
                    self.stage,
                    &ScopeError::NoFuncOverload {
                        name: name.to_string(),
                        arg_types,
                        scope_name: scope_name.to_string(),
                    },
                    Some(span),
                );
                None
            }
            Some((_, func)) if ambiguous => {
                report(
                    self.sink,
                    self.stage,
                    &ScopeError::AmbiguousOverloadedFunc {
                        name: name.to_string(),
                    },
                    Some(span),
                );
                // The error is reported once; the first minimum keeps
                // downstream typing alive.
                Some(func)
            }
            Some((_, func)) => Some(func),
        }
    }

    fn check_fixed_signature(
        &mut self,
        params: &[TypeId],
        args: &[TypeId],
        arg_exprs: &[Expr],
        span: Span,
    ) {
        if params.len() != args.len() {
            report(
                self.sink,
                self.stage,
                &TypeError::ArgCount {
                    expected: params.len(),
                    found: args.len(),
                },
                Some(span),
            );
            return;
        }
        for ((&param, &arg), arg_expr) in params.iter().zip(args).zip(arg_exprs) {
            if !self.types.can_cast(arg, param) {
                report(
                    self.sink,
                    self.stage,
                    &TypeError::Mismatch {
                        expected: self.types.display_name(param),
                        found: self.types.display_name(arg),
                    },
                    Some(arg_expr.span),
                );
            }
        }
    }

    pub(crate) fn func_return_type(&self, func: SymbolId) -> TypeId {
        match &self.table.symbol(func).kind {
            SymbolKind::Func { signature, .. } => signature.return_type,
            _ => TypeId::ERROR,
        }
    }

    fn callee_scope_name(&self, set: SymbolId) -> String {
        self.table
            .symbol(set)
            .defined_in
            .map(|scope| self.table.scope_display_name(scope))
            .unwrap_or_else(|| "this scope".to_string())
    }

    fn display_types(&self, types: &[TypeId]) -> String {
        types
            .iter()
            .map(|&id| self.types.display_name(id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
