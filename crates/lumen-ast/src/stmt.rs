//! Statement nodes.

use crate::{Expr, TypeExpr, VarDecl};
use lumen_core::Span;

/// A braced sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub span: Span,
    pub stmts: Vec<Stmt>,
}

impl Block {
    #[must_use]
    pub fn new(span: Span, stmts: Vec<Stmt>) -> Self {
        Self { span, stmts }
    }

    #[must_use]
    pub fn empty(span: Span) -> Self {
        Self {
            span,
            stmts: Vec::new(),
        }
    }
}

/// One arm of a `match` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub span: Span,
    /// Pattern expression compared against the scrutinee. `None` is the
    /// default arm.
    pub pattern: Option<Expr>,
    pub body: Block,
}

/// One catch clause of a `try` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub span: Span,
    pub name: String,
    pub ty: TypeExpr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub span: Span,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Block(Block),

    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },

    While {
        cond: Expr,
        body: Block,
    },

    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Block,
    },

    Match {
        scrutinee: Expr,
        arms: Vec<MatchArm>,
    },

    Try {
        body: Block,
        catches: Vec<CatchClause>,
        finally: Option<Block>,
    },

    Return {
        value: Option<Expr>,
    },

    Break,

    Continue,

    /// Local variable declaration.
    Var(VarDecl),

    Expr(Expr),
}

impl Stmt {
    #[must_use]
    pub fn expr(expr: Expr) -> Self {
        Self {
            span: expr.span,
            kind: StmtKind::Expr(expr),
        }
    }

    #[must_use]
    pub fn ret(span: Span, value: Option<Expr>) -> Self {
        Self {
            span,
            kind: StmtKind::Return { value },
        }
    }

    #[must_use]
    pub fn var(decl: VarDecl) -> Self {
        Self {
            span: decl.span,
            kind: StmtKind::Var(decl),
        }
    }
}
