//! Shared AST-building helpers for the integration tests.
//!
//! The parser is a separate component, so tests construct the trees it
//! would produce directly.

use lumen_ast::{
    BinaryOp, Block, Decl, Expr, ExprKind, FuncDecl, Literal, Modifiers, NodeIdGen, Param, Stmt,
    TypeDecl, TypeDeclKind, TypeExpr, Unit, VarDecl,
};
use lumen_core::{Location, Span};

/// Allocates node ids and stamps a dummy span on everything.
pub struct Builder {
    pub ids: NodeIdGen,
}

#[allow(dead_code)]
impl Builder {
    pub fn new() -> Self {
        Self {
            ids: NodeIdGen::new(),
        }
    }

    pub fn span(&self) -> Span {
        Span::point(Location::new(1, 1, 0))
    }

    pub fn ty(&self, name: &str) -> TypeExpr {
        TypeExpr::simple(self.span(), name)
    }

    pub fn ptr(&self, inner: &str, konst: bool) -> TypeExpr {
        TypeExpr::pointer(self.span(), self.ty(inner), konst)
    }

    pub fn int(&mut self, value: i64) -> Expr {
        let span = self.span();
        Expr::int(&mut self.ids, span, value)
    }

    pub fn float(&mut self, value: f64) -> Expr {
        let span = self.span();
        Expr::float(&mut self.ids, span, value)
    }

    pub fn string(&mut self, value: &str) -> Expr {
        let span = self.span();
        Expr::string(&mut self.ids, span, value)
    }

    pub fn boolean(&mut self, value: bool) -> Expr {
        let span = self.span();
        Expr::boolean(&mut self.ids, span, value)
    }

    pub fn null(&mut self) -> Expr {
        let span = self.span();
        Expr::new(&mut self.ids, span, ExprKind::Literal(Literal::Null))
    }

    pub fn ident(&mut self, name: &str) -> Expr {
        let span = self.span();
        Expr::ident(&mut self.ids, span, name)
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        let span = self.span();
        Expr::binary(&mut self.ids, span, op, lhs, rhs)
    }

    pub fn assign(&mut self, target: Expr, value: Expr) -> Expr {
        let span = self.span();
        Expr::assign(&mut self.ids, span, target, value)
    }

    pub fn call(&mut self, callee: &str, args: Vec<Expr>) -> Expr {
        let callee = self.ident(callee);
        self.call_expr(callee, args)
    }

    pub fn call_expr(&mut self, callee: Expr, args: Vec<Expr>) -> Expr {
        let span = self.span();
        Expr::call(&mut self.ids, span, callee, args)
    }

    pub fn member(&mut self, object: Expr, name: &str) -> Expr {
        let span = self.span();
        Expr::member(&mut self.ids, span, object, name)
    }

    pub fn index(&mut self, object: Expr, index: Expr) -> Expr {
        let span = self.span();
        Expr::new(
            &mut self.ids,
            span,
            ExprKind::Index {
                object: Box::new(object),
                index: Box::new(index),
            },
        )
    }

    pub fn cast(&mut self, value: Expr, ty: TypeExpr) -> Expr {
        let span = self.span();
        Expr::new(
            &mut self.ids,
            span,
            ExprKind::Cast {
                value: Box::new(value),
                ty,
            },
        )
    }

    pub fn type_test(&mut self, value: Expr, ty: TypeExpr) -> Expr {
        let span = self.span();
        Expr::new(
            &mut self.ids,
            span,
            ExprKind::TypeTest {
                value: Box::new(value),
                ty,
            },
        )
    }

    /// `var name: ty = init` (module-level or member).
    pub fn var(
        &mut self,
        name: &str,
        ty: Option<&str>,
        init: Option<Expr>,
        mutable: bool,
    ) -> VarDecl {
        let declared = ty.map(|name| self.ty(name));
        self.var_typed(name, declared, init, mutable)
    }

    pub fn var_typed(
        &mut self,
        name: &str,
        declared_type: Option<TypeExpr>,
        initializer: Option<Expr>,
        mutable: bool,
    ) -> VarDecl {
        VarDecl {
            id: self.ids.next(),
            span: self.span(),
            name: name.to_string(),
            modifiers: Modifiers::new(),
            mutable,
            declared_type,
            initializer,
        }
    }

    pub fn param(&self, name: &str, ty: TypeExpr) -> Param {
        Param {
            span: self.span(),
            name: name.to_string(),
            ty,
        }
    }

    pub fn func(
        &mut self,
        name: &str,
        params: &[(&str, &str)],
        ret: &str,
        body: Vec<Stmt>,
    ) -> FuncDecl {
        self.func_with(name, Modifiers::new(), params, ret, body)
    }

    pub fn func_with(
        &mut self,
        name: &str,
        modifiers: Modifiers,
        params: &[(&str, &str)],
        ret: &str,
        body: Vec<Stmt>,
    ) -> FuncDecl {
        let params = params
            .iter()
            .map(|(pname, pty)| {
                let ty = self.ty(pty);
                self.param(pname, ty)
            })
            .collect();
        let return_type = if ret == "void" {
            TypeExpr::void(self.span())
        } else {
            self.ty(ret)
        };
        self.func_decl(name, modifiers, params, return_type, body)
    }

    pub fn func_decl(
        &mut self,
        name: &str,
        modifiers: Modifiers,
        params: Vec<Param>,
        return_type: TypeExpr,
        body: Vec<Stmt>,
    ) -> FuncDecl {
        FuncDecl {
            id: self.ids.next(),
            span: self.span(),
            name: name.to_string(),
            modifiers,
            is_operator: false,
            params,
            return_type,
            body: Some(Block::new(self.span(), body)),
        }
    }

    pub fn class(
        &mut self,
        name: &str,
        modifiers: Modifiers,
        super_type: Option<&str>,
        members: Vec<Decl>,
    ) -> TypeDecl {
        self.type_decl(TypeDeclKind::Class, name, modifiers, super_type, members)
    }

    pub fn interface(
        &mut self,
        name: &str,
        modifiers: Modifiers,
        super_type: Option<&str>,
        members: Vec<Decl>,
    ) -> TypeDecl {
        self.type_decl(TypeDeclKind::Interface, name, modifiers, super_type, members)
    }

    fn type_decl(
        &mut self,
        kind: TypeDeclKind,
        name: &str,
        modifiers: Modifiers,
        super_type: Option<&str>,
        members: Vec<Decl>,
    ) -> TypeDecl {
        TypeDecl {
            id: self.ids.next(),
            span: self.span(),
            kind,
            name: name.to_string(),
            modifiers,
            super_type: super_type.map(|s| self.ty(s)),
            members,
        }
    }

    pub fn unit(&self, name: &str, decls: Vec<Decl>) -> Unit {
        Unit::new(name, decls)
    }
}

/// Number of error-level diagnostics whose message contains `needle`.
#[allow(dead_code)]
pub fn errors_containing(analysis: &lumen_semantic::Analysis, needle: &str) -> usize {
    analysis
        .diagnostics
        .iter()
        .filter(|d| d.severity == lumen_core::Severity::Error && d.message.contains(needle))
        .count()
}
