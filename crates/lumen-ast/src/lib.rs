//! Abstract syntax tree for the Lumen language.
//!
//! This is the surface the parser hands to semantic analysis. Nodes carry
//! a [`Span`] and a unique [`NodeId`] and hold no resolution state of
//! their own; every analysis result is keyed externally by node id.
//!
//! [`Span`]: lumen_core::Span

mod decl;
mod expr;
mod modifiers;
mod node_id;
mod stmt;
mod types;

pub use decl::{
    Decl, EnumDecl, EnumVariant, FuncDecl, ModuleDecl, ModuleKind, Param, TypeDecl, TypeDeclKind,
    Unit, UsingDecl, VarDecl,
};
pub use expr::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
pub use modifiers::{Modifiers, Visibility};
pub use node_id::{NodeId, NodeIdGen};
pub use stmt::{Block, CatchClause, MatchArm, Stmt, StmtKind};
pub use types::{TypeExpr, TypeExprKind};
