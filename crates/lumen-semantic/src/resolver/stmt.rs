//! Statement walking inside function bodies.

use crate::const_eval::eval;
use crate::errors::{TypeError, report};
use crate::passes::Analyzer;
use crate::symbol::Symbol;
use crate::table::ScopeKind;
use lumen_ast::{Block, CatchClause, Expr, Stmt, StmtKind, VarDecl};
use lumen_core::Span;
use lumen_core::type_system::TypeId;

impl Analyzer<'_> {
    pub(crate) fn resolve_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.resolve_stmt(stmt);
        }
    }

    /// Opens a fresh child scope for the block.
    pub(crate) fn resolve_block(&mut self, block: &Block) {
        let scope = self
            .table
            .create_scope(Some(self.scope), ScopeKind::Function, None);
        self.in_scope(scope, |a| a.resolve_stmts(&block.stmts));
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Block(block) => self.resolve_block(block),

            StmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                self.check_condition(cond);
                self.resolve_block(then_block);
                if let Some(otherwise) = else_block {
                    self.resolve_block(otherwise);
                }
            }

            StmtKind::While { cond, body } => {
                self.check_condition(cond);
                self.loop_depth += 1;
                self.resolve_block(body);
                self.loop_depth -= 1;
            }

            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                // The header gets its own scope so the induction
                // variable doesn't leak past the loop.
                let header = self
                    .table
                    .create_scope(Some(self.scope), ScopeKind::Function, None);
                self.in_scope(header, |a| {
                    if let Some(init) = init {
                        a.resolve_stmt(init);
                    }
                    if let Some(cond) = cond {
                        a.check_condition(cond);
                    }
                    if let Some(step) = step {
                        a.resolve_expr(step);
                    }
                    a.loop_depth += 1;
                    a.resolve_block(body);
                    a.loop_depth -= 1;
                });
            }

            StmtKind::Match { scrutinee, arms } => {
                let scrutinee_type = self.resolve_expr(scrutinee);
                for arm in arms {
                    if let Some(pattern) = &arm.pattern {
                        let pattern_type = self.resolve_expr(pattern);
                        if !self.types.can_cast(pattern_type.id, scrutinee_type.id) {
                            report(
                                self.sink,
                                self.stage,
                                &TypeError::Mismatch {
                                    expected: self.types.display_name(scrutinee_type.id),
                                    found: self.types.display_name(pattern_type.id),
                                },
                                Some(pattern.span),
                            );
                        }
                    }
                    self.resolve_block(&arm.body);
                }
            }

            StmtKind::Try {
                body,
                catches,
                finally,
            } => {
                self.resolve_block(body);
                for catch in catches {
                    self.resolve_catch(catch);
                }
                if let Some(finally) = finally {
                    self.resolve_block(finally);
                }
            }

            StmtKind::Return { value } => self.resolve_return(value.as_ref(), stmt.span),

            StmtKind::Break => self.check_in_loop("break", stmt.span),
            StmtKind::Continue => self.check_in_loop("continue", stmt.span),

            StmtKind::Var(decl) => self.resolve_local_var(decl),

            StmtKind::Expr(expr) => {
                self.resolve_expr(expr);
            }
        }
    }

    fn resolve_catch(&mut self, catch: &CatchClause) {
        let scope = self
            .table
            .create_scope(Some(self.scope), ScopeKind::Function, None);
        self.in_scope(scope, |a| {
            let ty = a.resolve_type_expr(&catch.ty);
            let binding =
                Symbol::var(&catch.name, lumen_ast::Modifiers::new(), Some(catch.span), ty, false);
            if let Err(err) = a.table.define(scope, binding) {
                report(a.sink, a.stage, &err, Some(catch.span));
            }
            a.resolve_stmts(&catch.body.stmts);
        });
    }

    fn check_condition(&mut self, cond: &Expr) {
        let ty = self.resolve_expr(cond);
        if ty.id.is_sentinel() {
            return;
        }
        if !self.types.can_cast(ty.id, TypeId::BOOL) {
            report(
                self.sink,
                self.stage,
                &TypeError::NonBoolCondition {
                    found: self.types.display_name(ty.id),
                },
                Some(cond.span),
            );
        }
    }

    fn check_in_loop(&mut self, stmt: &'static str, span: Span) {
        if self.loop_depth == 0 {
            report(self.sink, self.stage, &TypeError::OutsideLoop { stmt }, Some(span));
        }
    }

    fn resolve_return(&mut self, value: Option<&Expr>, span: Span) {
        let expected = self.expected_return.unwrap_or(TypeId::VOID);
        let (found, value_span) = match value {
            Some(expr) => (self.resolve_expr(expr).id, expr.span),
            None => (TypeId::VOID, span),
        };
        if found.is_sentinel() || expected.is_sentinel() {
            return;
        }
        if !self.types.can_cast(found, expected) {
            report(
                self.sink,
                self.stage,
                &TypeError::ReturnMismatch {
                    expected: self.types.display_name(expected),
                    found: self.types.display_name(found),
                },
                Some(value_span),
            );
        }
    }

    /// Local declarations define into the current function scope; this
    /// is the one place the scope tree still grows during pass 4.
    fn resolve_local_var(&mut self, decl: &VarDecl) {
        let declared = decl
            .declared_type
            .as_ref()
            .filter(|ty| !ty.is_auto())
            .map(|ty| self.resolve_type_expr(ty));
        let init_type = decl.initializer.as_ref().map(|init| self.resolve_expr(init));

        let ty = match (declared, init_type) {
            (Some(declared), Some(init)) => {
                if !self.types.can_cast(init.id, declared) {
                    report(
                        self.sink,
                        self.stage,
                        &TypeError::Mismatch {
                            expected: self.types.display_name(declared),
                            found: self.types.display_name(init.id),
                        },
                        Some(decl.span),
                    );
                }
                declared
            }
            (Some(declared), None) => declared,
            (None, Some(init)) => init.id,
            (None, None) => {
                report(
                    self.sink,
                    self.stage,
                    &TypeError::CannotInfer {
                        name: decl.name.clone(),
                    },
                    Some(decl.span),
                );
                TypeId::ERROR
            }
        };

        let symbol = Symbol::var(&decl.name, decl.modifiers, Some(decl.span), ty, decl.mutable);
        let symbol = match self.table.define(self.scope, symbol) {
            Ok(id) => id,
            Err(err) => {
                report(self.sink, self.stage, &err, Some(decl.span));
                return;
            }
        };
        self.context.set_symbol(decl.id, symbol);

        if let Some(init) = &decl.initializer
            && let Some(value) = eval(init, self.table, self.context)
        {
            self.context.set_const(init.id, value.clone());
            if !decl.mutable {
                self.table.set_var_value(symbol, value);
            }
        }
    }
}
