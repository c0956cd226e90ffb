//! Declaration nodes: translation units, modules, types, functions,
//! variables, and import directives.

use crate::{Block, Expr, Modifiers, NodeId, TypeExpr};
use lumen_core::Span;

/// One translation unit (the parse of one source file).
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// File name, carried for diagnostics only.
    pub name: String,
    pub decls: Vec<Decl>,
}

impl Unit {
    #[must_use]
    pub fn new(name: &str, decls: Vec<Decl>) -> Self {
        Self {
            name: name.to_string(),
            decls,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Module(ModuleDecl),
    Type(TypeDecl),
    Enum(EnumDecl),
    Func(FuncDecl),
    Var(VarDecl),
    Using(UsingDecl),
}

/// `module a.b { ... }` or `namespace a { ... }`.
///
/// Module declarations with the same qualified path, in the same or
/// different units, merge into one symbol and one export scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDecl {
    pub id: NodeId,
    pub span: Span,
    pub kind: ModuleKind,
    pub path: Vec<String>,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Module,
    Namespace,
}

/// `class` / `interface` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub id: NodeId,
    pub span: Span,
    pub kind: TypeDeclKind,
    pub name: String,
    pub modifiers: Modifiers,
    pub super_type: Option<TypeExpr>,
    pub members: Vec<Decl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclKind {
    Class,
    Interface,
}

/// `enum` declaration. Variants become constants of the enum type in its
/// static scope, numbered from zero unless given an explicit value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub modifiers: Modifiers,
    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub span: Span,
    pub name: String,
    pub value: Option<Expr>,
}

/// Function declaration. Operator methods set `is_operator` and use the
/// operator's source spelling as `name` (e.g. `"+"`).
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub modifiers: Modifiers,
    pub is_operator: bool,
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
    /// `None` for abstract/interface members.
    pub body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub span: Span,
    pub name: String,
    pub ty: TypeExpr,
}

/// Variable declaration: module-level, member, or local.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub modifiers: Modifiers,
    pub mutable: bool,
    /// `None` means the declared type was `auto`.
    pub declared_type: Option<TypeExpr>,
    pub initializer: Option<Expr>,
}

/// `using a.b.c`, `using x = a.b.c`, or `using a.b.*`.
#[derive(Debug, Clone, PartialEq)]
pub struct UsingDecl {
    pub span: Span,
    pub path: Vec<String>,
    pub alias: Option<String>,
    pub wildcard: bool,
}
