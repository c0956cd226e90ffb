//! Operator resolution.
//!
//! Binary and unary operators are ordinary overloaded functions looked
//! up in the left (or only) operand's instance scope; primitives
//! pre-register theirs at startup, user types may declare their own.
//! Assignment and `is`/`as` never reach this table; they are
//! special-cased in the expression resolver.

use crate::const_eval::eval;
use crate::errors::{ScopeError, report};
use crate::passes::Analyzer;
use crate::symbol::SymbolId;
use lumen_ast::{BinaryOp, Expr, UnaryOp};
use lumen_core::Span;
use lumen_core::type_system::{Type, TypeId};

impl Analyzer<'_> {
    pub(crate) fn resolve_binary(
        &mut self,
        expr: &Expr,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Type {
        let left = self.resolve_expr(lhs);
        let right = self.resolve_expr(rhs);

        // A failed operand was already reported; don't pile on.
        if left.id.is_sentinel() {
            return Type::rvalue(left.id);
        }
        if right.id.is_sentinel() {
            return Type::rvalue(right.id);
        }

        let Some(func) = self.resolve_operator(op.symbol(), left.id, &[right.id], expr.span)
        else {
            return Type::error();
        };
        self.context.set_symbol(expr.id, func);
        let result = Type::rvalue(self.func_return_type(func));

        if let Some(value) = eval(expr, self.table, self.context) {
            self.context.set_const(expr.id, value);
        }
        result
    }

    pub(crate) fn resolve_unary(&mut self, expr: &Expr, op: UnaryOp, operand: &Expr) -> Type {
        let operand_type = self.resolve_expr(operand);
        if operand_type.id.is_sentinel() {
            return Type::rvalue(operand_type.id);
        }

        let Some(func) = self.resolve_operator(op.symbol(), operand_type.id, &[], expr.span)
        else {
            return Type::error();
        };
        self.context.set_symbol(expr.id, func);
        let result = Type::rvalue(self.func_return_type(func));

        if let Some(value) = eval(expr, self.table, self.context) {
            self.context.set_const(expr.id, value);
        }
        result
    }

    /// Looks an operator up in the receiver type's instance scope and
    /// runs overload selection over the other operands.
    fn resolve_operator(
        &mut self,
        name: &str,
        receiver: TypeId,
        args: &[TypeId],
        span: Span,
    ) -> Option<SymbolId> {
        let set = self
            .table
            .symbol_for_type(receiver)
            .and_then(|owner| self.table.instance_scope(owner))
            .and_then(|scope| self.table.resolve(scope, name, true));
        let Some(set) = set else {
            let arg_types = self.display_arg_types(receiver, args);
            report(
                self.sink,
                self.stage,
                &ScopeError::NoFuncOverload {
                    name: name.to_string(),
                    arg_types,
                    scope_name: self.types.display_name(receiver),
                },
                Some(span),
            );
            return None;
        };
        let funcs = self.table.overloads(set);
        let scope_name = self.types.display_name(receiver);
        self.select_overload(&funcs, args, name, &scope_name, span)
    }

    fn display_arg_types(&self, receiver: TypeId, args: &[TypeId]) -> String {
        std::iter::once(receiver)
            .chain(args.iter().copied())
            .map(|id| self.types.display_name(id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
