//! Datatype nodes: how source code names a type.

use lumen_core::Span;

/// A type as written in source, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub span: Span,
    pub kind: TypeExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExprKind {
    /// A possibly-qualified name: `int32`, `geometry.Point`.
    Named { path: Vec<String> },

    /// `*T` or `*const T`.
    Pointer { inner: Box<TypeExpr>, konst: bool },

    /// `func(int32, bool): void`.
    Function {
        params: Vec<TypeExpr>,
        ret: Box<TypeExpr>,
    },

    /// Declared type left to inference.
    Auto,

    /// Explicit `void`.
    Void,

    /// Placeholder the parser emits for unparsable type syntax.
    Error,
}

impl TypeExpr {
    #[must_use]
    pub fn named(span: Span, path: Vec<String>) -> Self {
        Self {
            span,
            kind: TypeExprKind::Named { path },
        }
    }

    /// Convenience for an unqualified name.
    #[must_use]
    pub fn simple(span: Span, name: &str) -> Self {
        Self::named(span, vec![name.to_string()])
    }

    #[must_use]
    pub fn pointer(span: Span, inner: TypeExpr, konst: bool) -> Self {
        Self {
            span,
            kind: TypeExprKind::Pointer {
                inner: Box::new(inner),
                konst,
            },
        }
    }

    #[must_use]
    pub fn auto(span: Span) -> Self {
        Self {
            span,
            kind: TypeExprKind::Auto,
        }
    }

    #[must_use]
    pub fn void(span: Span) -> Self {
        Self {
            span,
            kind: TypeExprKind::Void,
        }
    }

    /// Whether the declared type was left to inference.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self.kind, TypeExprKind::Auto)
    }
}
