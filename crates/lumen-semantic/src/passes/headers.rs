//! Pass 3: declaration-header resolution.
//!
//! Resolves what a declaration *is* without touching bodies: super-type
//! references (with the open/interface/class extension rules), function
//! modifier sets, parameter and return types, enum variant constants,
//! and declared variable types. After this pass every signature in the
//! program is known, so pass 4 can type-check call sites in any order.

use crate::const_eval::{ConstValue, eval};
use crate::errors::{ScopeError, TypeError, report};
use crate::passes::Analyzer;
use crate::symbol::{FuncSignature, Symbol, SymbolId, SymbolKind};
use crate::table::{ScopeId, ScopeKind};
use lumen_ast::{Decl, EnumDecl, FuncDecl, TypeDecl, TypeDeclKind, Unit, VarDecl};
use lumen_core::Span;
use lumen_core::type_system::{DeclKey, Primitive, TypeId, TypeKind, UserKind};

impl Analyzer<'_> {
    pub(crate) fn resolve_headers(&mut self, units: &[Unit]) {
        let global = self.table.global();
        for (unit, file) in units.iter().zip(self.file_scopes.clone()) {
            // Top-level names were bound globally in pass 2; the file
            // scope is only the lexical context (it holds the imports).
            self.header_decls(&unit.decls, global, file, None);
        }
    }

    fn header_decls(
        &mut self,
        decls: &[Decl],
        bind_scope: ScopeId,
        lexical: ScopeId,
        owner: Option<SymbolId>,
    ) {
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
                    self.header_decls(&module.decls, export, export, None);
                }
                Decl::Type(ty) => self.resolve_type_header(ty),
                Decl::Enum(en) => self.resolve_enum_variants(en),
                Decl::Func(func) => self.resolve_func_header(func, owner, bind_scope, lexical),
                Decl::Var(var) => self.resolve_var_header(var, lexical),
                Decl::Using(_) => {}
            }
        }
    }

    fn resolve_type_header(&mut self, decl: &TypeDecl) {
        let Some(symbol) = self.context.symbol_of(decl.id) else {
            return;
        };
        let static_scope = self
            .table
            .static_scope_of(symbol)
            .expect("type symbols always carry a static scope");

        if let Some(super_expr) = &decl.super_type {
            let super_id =
                self.in_scope(static_scope, |a| a.resolve_type_expr(super_expr));
            self.check_super(decl, symbol, super_id, super_expr.span);
        }

        self.header_decls(&decl.members, static_scope, static_scope, Some(symbol));
    }

    /// Validates an inheritance clause. A failed rule is reported but the
    /// super type is still recorded, so member lookup through the chain
    /// keeps working and one bad clause produces exactly one diagnostic.
    fn check_super(&mut self, decl: &TypeDecl, symbol: SymbolId, super_id: TypeId, span: Span) {
        if super_id.is_sentinel() {
            return;
        }
        let Some(TypeKind::User {
            kind: super_kind, ..
        }) = self.types.get(super_id).cloned()
        else {
            let err = match decl.kind {
                TypeDeclKind::Interface => TypeError::InterfaceExtendsNonInterface,
                TypeDeclKind::Class => TypeError::ClassExtendsInvalid,
            };
            report(self.sink, self.stage, &err, Some(span));
            return;
        };

        match (decl.kind, super_kind) {
            (TypeDeclKind::Interface, UserKind::Interface) => {}
            (TypeDeclKind::Interface, _) => {
                report(
                    self.sink,
                    self.stage,
                    &TypeError::InterfaceExtendsNonInterface,
                    Some(span),
                );
                return;
            }
            (TypeDeclKind::Class, UserKind::Class | UserKind::Interface) => {}
            (TypeDeclKind::Class, _) => {
                report(self.sink, self.stage, &TypeError::ClassExtendsInvalid, Some(span));
                return;
            }
        }

        let Some(super_sym) = self.table.symbol_for_type(super_id) else {
            return;
        };
        if !self.table.symbol(super_sym).modifiers.is_open {
            report(
                self.sink,
                self.stage,
                &TypeError::MustBeOpen {
                    name: self.table.symbol(super_sym).name.clone(),
                },
                Some(span),
            );
            // Recorded anyway: the error does not block analysis of the
            // subtype's members.
        }
        self.table.set_super_type(symbol, super_id);
        self.types
            .set_super(DeclKey(symbol.as_u32()), DeclKey(super_sym.as_u32()));
    }

    fn resolve_enum_variants(&mut self, decl: &EnumDecl) {
        let Some(symbol) = self.context.symbol_of(decl.id) else {
            return;
        };
        let enum_type = match &self.table.symbol(symbol).kind {
            SymbolKind::TypeDecl { type_id, .. } => *type_id,
            _ => return,
        };
        let static_scope = self
            .table
            .static_scope_of(symbol)
            .expect("type symbols always carry a static scope");

        let mut next = 0i64;
        for variant in &decl.variants {
            let value = match &variant.value {
                Some(expr) => match eval(expr, self.table, self.context) {
                    Some(ConstValue::Int { value, .. }) => value,
                    _ => {
                        report(
                            self.sink,
                            self.stage,
                            &ScopeError::InvalidConstValue,
                            Some(variant.span),
                        );
                        next
                    }
                },
                None => next,
            };
            next = value + 1;

            let constant = Symbol::new(
                &variant.name,
                lumen_ast::Modifiers::public(),
                Some(variant.span),
                SymbolKind::ConstVal {
                    ty: enum_type,
                    value: ConstValue::Int {
                        value,
                        ty: Primitive::Int32,
                    },
                },
            );
            if let Err(err) = self.table.define(static_scope, constant) {
                report(self.sink, self.stage, &err, Some(variant.span));
            }
        }
    }

    fn resolve_func_header(
        &mut self,
        decl: &FuncDecl,
        owner: Option<SymbolId>,
        bind_scope: ScopeId,
        lexical: ScopeId,
    ) {
        // Where the finished symbol goes: static scope or instance scope
        // for members, the scope the name was collected into otherwise.
        let define_scope = match owner {
            Some(type_sym) => match self.member_scope(type_sym, decl.modifiers.is_static) {
                Some(scope) => scope,
                None => return,
            },
            None => bind_scope,
        };

        // The body's lexical context: member functions see their type's
        // scopes, free functions the file (imports included).
        let param_parent = if owner.is_some() { define_scope } else { lexical };
        let param_scope = self
            .table
            .create_scope(Some(param_parent), ScopeKind::Params, None);

        let mut params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let ty = self.in_scope(param_scope, |a| a.resolve_type_expr(&param.ty));
            params.push(ty);
            let symbol =
                Symbol::var(&param.name, lumen_ast::Modifiers::new(), Some(param.span), ty, false);
            if let Err(err) = self.table.define(param_scope, symbol) {
                report(self.sink, self.stage, &err, Some(param.span));
            }
        }

        let return_type = if decl.return_type.is_auto() {
            report(self.sink, self.stage, &TypeError::ExpectedTypeName, Some(decl.span));
            TypeId::ERROR
        } else {
            self.in_scope(param_scope, |a| a.resolve_type_expr(&decl.return_type))
        };

        if decl.is_operator {
            self.check_operator_arity(decl);
        }
        if decl.modifiers.is_override {
            self.check_override(decl, owner);
        }

        let symbol = Symbol::new(
            &decl.name,
            decl.modifiers,
            Some(decl.span),
            SymbolKind::Func {
                signature: FuncSignature {
                    params,
                    return_type,
                },
                param_scope: Some(param_scope),
                is_operator: decl.is_operator,
            },
        );
        match self.table.define_func(define_scope, symbol, self.types) {
            Ok(id) => self.context.set_symbol(decl.id, id),
            Err(err) => report(self.sink, self.stage, &err, Some(decl.span)),
        }
    }

    /// Binary operators take exactly one parameter beside the receiver,
    /// unary operators none; `-` may be either.
    fn check_operator_arity(&mut self, decl: &FuncDecl) {
        let arity = decl.params.len();
        let expected = match decl.name.as_str() {
            "!" | "~" => 0,
            "-" if arity == 0 => return,
            _ => 1,
        };
        if arity != expected {
            report(
                self.sink,
                self.stage,
                &ScopeError::OperParamCountMismatch {
                    operator: decl.name.clone(),
                    expected,
                },
                Some(decl.span),
            );
        }
    }

    /// `override` must name something in the super chain.
    fn check_override(&mut self, decl: &FuncDecl, owner: Option<SymbolId>) {
        let overridden = owner
            .and_then(|type_sym| match &self.table.symbol(type_sym).kind {
                SymbolKind::TypeDecl { super_type, .. } => *super_type,
                _ => None,
            })
            .and_then(|super_id| self.table.symbol_for_type(super_id))
            .and_then(|super_sym| self.table.instance_scope_of(super_sym))
            .and_then(|scope| self.table.resolve(scope, &decl.name, true));
        if overridden.is_none() {
            report(
                self.sink,
                self.stage,
                &TypeError::OverridesNothing {
                    name: decl.name.clone(),
                },
                Some(decl.span),
            );
        }
    }

    fn resolve_var_header(&mut self, decl: &VarDecl, lexical: ScopeId) {
        let Some(symbol) = self.context.symbol_of(decl.id) else {
            return;
        };
        if let Some(type_expr) = &decl.declared_type
            && !type_expr.is_auto()
        {
            let ty = self.in_scope(lexical, |a| a.resolve_type_expr(type_expr));
            self.table.assign_var_type(symbol, ty);
        }
        // `auto` stays unresolved until the initializer is typed in
        // pass 4.
    }
}
