//! Expression typing.

use crate::errors::{ScopeError, TypeError, report};
use crate::passes::Analyzer;
use crate::symbol::{SymbolId, SymbolKind};
use lumen_ast::{Expr, ExprKind, Literal, TypeExpr, Visibility};
use lumen_core::Span;
use lumen_core::type_system::{DeclKey, Primitive, Type, TypeId, TypeKind};

impl Analyzer<'_> {
    /// Types one expression node and records the result. Every failure
    /// inside has already been reported by the time the error sentinel
    /// comes back.
    pub(crate) fn resolve_expr(&mut self, expr: &Expr) -> Type {
        let ty = self.resolve_expr_inner(expr);
        self.context.set_type(expr.id, ty);
        ty
    }

    fn resolve_expr_inner(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::Literal(lit) => Self::literal_type(lit),
            ExprKind::Ident(name) => self.resolve_ident(expr, name),
            ExprKind::Member { object, name } => self.resolve_member(expr, object, name),
            ExprKind::Binary { op, lhs, rhs } => self.resolve_binary(expr, *op, lhs, rhs),
            ExprKind::Unary { op, operand } => self.resolve_unary(expr, *op, operand),
            ExprKind::Assign { target, value } => self.resolve_assign(expr, target, value),
            ExprKind::Call { callee, args } => self.resolve_call(expr, callee, args),
            ExprKind::Index { object, index } => self.resolve_index(expr, object, index),
            ExprKind::Cast { value, ty } => self.resolve_cast(expr, value, ty),
            ExprKind::TypeTest { value, ty } => self.resolve_type_test(expr, value, ty),
        }
    }

    fn literal_type(lit: &Literal) -> Type {
        let id = match lit {
            Literal::Int(value) => {
                if i32::try_from(*value).is_ok() {
                    TypeId::INT32
                } else {
                    TypeId::INT64
                }
            }
            Literal::Float(_) => TypeId::FLOAT64,
            Literal::Str(_) => TypeId::STRING,
            Literal::Char(_) => TypeId::CHAR,
            Literal::Bool(_) => TypeId::BOOL,
            Literal::Null => TypeId::NULL,
        };
        Type::rvalue(id)
    }

    fn resolve_ident(&mut self, expr: &Expr, name: &str) -> Type {
        let Some(symbol) = self.table.resolve(self.scope, name, false) else {
            report(
                self.sink,
                self.stage,
                &ScopeError::NotDefined {
                    name: name.to_string(),
                },
                Some(expr.span),
            );
            return Type::error();
        };
        self.context.set_symbol(expr.id, symbol);
        self.occurrence_type(symbol)
    }

    /// The type an occurrence of `symbol` has in an expression.
    pub(crate) fn occurrence_type(&mut self, symbol: SymbolId) -> Type {
        match &self.table.symbol(symbol).kind {
            SymbolKind::Var { ty, mutable, .. } => Type::lvalue(*ty, *mutable),
            SymbolKind::ConstVal { ty, .. } => Type::rvalue(*ty).with_konst(true),
            SymbolKind::TypeDecl { type_id, .. } => Type::named(*type_id),
            SymbolKind::OverloadSet { .. } => {
                let id = self.types.create_overload_set(DeclKey(symbol.as_u32()));
                Type::rvalue(id)
            }
            SymbolKind::Func { signature, .. } => {
                let id = self
                    .types
                    .create_function(signature.params.clone(), signature.return_type);
                Type::rvalue(id)
            }
            SymbolKind::Alias { target } | SymbolKind::Using { target } => {
                let target = *target;
                self.occurrence_type(target)
            }
        }
    }

    fn resolve_member(&mut self, expr: &Expr, object: &Expr, name: &str) -> Type {
        let object_type = self.resolve_expr(object);
        if object_type.id.is_sentinel() {
            return Type::rvalue(object_type.id);
        }

        let Some(kind) = self.types.get(object_type.id).cloned() else {
            return Type::error();
        };

        match kind {
            // Module/namespace member: direct export-scope lookup, no
            // parent-chain walk.
            TypeKind::Namespace { name: ns, decl } => {
                let owner = SymbolId::from_decl(decl);
                let Some(found) = self.lookup_type_member(owner, name) else {
                    return self.no_such_member(&ns, name, expr.span);
                };
                self.finish_member(expr, found)
            }

            // `TypeName.member`: static scope, super statics included.
            TypeKind::User { name: tn, decl, .. } if !object_type.flags.expr_result => {
                let owner = SymbolId::from_decl(decl);
                let Some(scope) = self.table.static_scope_of(owner) else {
                    return Type::error();
                };
                let Some(found) = self.table.resolve(scope, name, true) else {
                    return self.no_such_member(&tn, name, expr.span);
                };
                self.finish_member(expr, found)
            }

            // Anything else is instance member access on a value;
            // pointers dereference implicitly.
            _ => {
                let (value_id, through_const) = match kind {
                    TypeKind::Pointer {
                        pointee,
                        pointee_const,
                    } => (pointee, pointee_const),
                    _ => (object_type.id, object_type.flags.konst),
                };
                // The instance scope is created on demand: a type with
                // no own members still resolves inherited ones through
                // its (empty) scope's super consult.
                let found = self
                    .table
                    .symbol_for_type(value_id)
                    .and_then(|owner| self.table.instance_scope(owner))
                    .and_then(|scope| self.table.resolve(scope, name, true));
                let Some(found) = found else {
                    let tn = self.types.display_name(value_id);
                    return self.no_such_member(&tn, name, expr.span);
                };
                let ty = self.finish_member(expr, found);
                // Reading a field through a const object stays const.
                if through_const { ty.with_konst(true) } else { ty }
            }
        }
    }

    fn finish_member(&mut self, expr: &Expr, symbol: SymbolId) -> Type {
        self.check_visibility(symbol, expr.span);
        self.context.set_symbol(expr.id, symbol);
        self.occurrence_type(symbol)
    }

    fn no_such_member(&mut self, type_name: &str, member: &str, span: Span) -> Type {
        report(
            self.sink,
            self.stage,
            &TypeError::NoSuchMember {
                name: type_name.to_string(),
                member: member.to_string(),
            },
            Some(span),
        );
        Type::error()
    }

    /// Private members resolve only from inside the declaring type (or,
    /// for module-level symbols, from inside the declaring scope).
    fn check_visibility(&mut self, symbol: SymbolId, span: Span) {
        let sym = self.table.symbol(symbol);
        if sym.modifiers.visibility != Visibility::Private {
            return;
        }
        let declaring = sym.defined_in;
        let owner = declaring.and_then(|scope| self.table.scope(scope).owner);
        if owner.is_some() && owner == self.self_type {
            return;
        }
        // Lexical containment: the access site sits under the declaring
        // scope itself.
        let mut current = Some(self.scope);
        while let Some(id) = current {
            if Some(id) == declaring {
                return;
            }
            current = self.table.scope(id).parent;
        }
        report(
            self.sink,
            self.stage,
            &TypeError::PrivateAccess {
                name: self.table.symbol(symbol).name.clone(),
            },
            Some(span),
        );
    }

    fn resolve_assign(&mut self, _expr: &Expr, target: &Expr, value: &Expr) -> Type {
        let target_type = self.resolve_expr(target);
        let value_type = self.resolve_expr(value);
        if target_type.id.is_sentinel() {
            return Type::rvalue(target_type.id);
        }

        // Checked before any cast: the target must be a storage
        // location, the binding mutable, the occurrence not const.
        if !target_type.flags.lvalue {
            report(self.sink, self.stage, &TypeError::NotAssignable, Some(target.span));
            return Type::error();
        }
        if target_type.flags.konst {
            report(self.sink, self.stage, &TypeError::AssignConst, Some(target.span));
            return Type::error();
        }
        if !target_type.flags.mutable {
            report(self.sink, self.stage, &TypeError::AssignImmutable, Some(target.span));
            return Type::error();
        }

        if !self.types.can_cast(value_type.id, target_type.id) {
            report(
                self.sink,
                self.stage,
                &TypeError::Mismatch {
                    expected: self.types.display_name(target_type.id),
                    found: self.types.display_name(value_type.id),
                },
                Some(value.span),
            );
        }
        Type::rvalue(target_type.id)
    }

    fn resolve_index(&mut self, _expr: &Expr, object: &Expr, index: &Expr) -> Type {
        let object_type = self.resolve_expr(object);
        let index_type = self.resolve_expr(index);

        let index_is_integer = self
            .types
            .primitive(index_type.id)
            .is_some_and(Primitive::is_integer);
        if !index_is_integer && !index_type.id.is_sentinel() {
            report(
                self.sink,
                self.stage,
                &TypeError::NonIntegerIndex {
                    found: self.types.display_name(index_type.id),
                },
                Some(index.span),
            );
        }

        if object_type.id.is_sentinel() {
            return Type::rvalue(object_type.id);
        }
        match self.types.get(object_type.id) {
            Some(TypeKind::Pointer {
                pointee,
                pointee_const,
            }) => Type::lvalue(*pointee, !*pointee_const),
            Some(TypeKind::Primitive(Primitive::String)) => Type::rvalue(TypeId::CHAR),
            _ => {
                report(
                    self.sink,
                    self.stage,
                    &TypeError::NotIndexable {
                        found: self.types.display_name(object_type.id),
                    },
                    Some(object.span),
                );
                Type::error()
            }
        }
    }

    /// `value as T`: the right side must name a type; the conversion may
    /// also narrow, unlike an implicit cast.
    fn resolve_cast(&mut self, _expr: &Expr, value: &Expr, ty: &TypeExpr) -> Type {
        let value_type = self.resolve_expr(value);
        let target = self.resolve_type_expr(ty);
        if target.is_sentinel() || value_type.id.is_sentinel() {
            return Type::rvalue(target);
        }

        let explicit_ok = self.explicit_cast_allowed(value_type.id, target);
        if !explicit_ok {
            report(
                self.sink,
                self.stage,
                &TypeError::Mismatch {
                    expected: self.types.display_name(target),
                    found: self.types.display_name(value_type.id),
                },
                Some(value.span),
            );
        }
        Type::rvalue(target)
    }

    fn explicit_cast_allowed(&self, source: TypeId, target: TypeId) -> bool {
        if self.types.can_cast(source, target) || self.types.can_cast(target, source) {
            return true;
        }
        // Numeric conversions may narrow explicitly.
        let both_numeric = self
            .types
            .primitive(source)
            .is_some_and(Primitive::is_numeric)
            && self
                .types
                .primitive(target)
                .is_some_and(Primitive::is_numeric);
        if both_numeric {
            return true;
        }
        // Pointers reinterpret explicitly.
        matches!(self.types.get(source), Some(TypeKind::Pointer { .. }))
            && matches!(self.types.get(target), Some(TypeKind::Pointer { .. }))
    }

    /// `value is T`: type-tests always yield bool.
    fn resolve_type_test(&mut self, _expr: &Expr, value: &Expr, ty: &TypeExpr) -> Type {
        self.resolve_expr(value);
        self.resolve_type_expr(ty);
        Type::rvalue(TypeId::BOOL)
    }
}

impl SymbolId {
    /// Recovers the symbol behind a registry declaration key. The table
    /// hands out keys from symbol ids, so this is the inverse.
    pub(crate) fn from_decl(decl: DeclKey) -> Self {
        Self(decl.0)
    }
}
