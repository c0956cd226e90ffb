//! The closed set of declarable entities.
//!
//! Symbols live in an arena inside [`SymbolTable`] and are referenced by
//! [`SymbolId`] handles, so the cyclic shape of the language (a type owns
//! a scope whose symbols refer back to the type) is plain id equality
//! rather than ownership.
//!
//! [`SymbolTable`]: crate::SymbolTable

use crate::const_eval::ConstValue;
use crate::table::ScopeId;
use lumen_ast::Modifiers;
use lumen_core::Span;
use lumen_core::type_system::{TypeId, UserKind};

/// Handle to a symbol in the table's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// What kind of declaration a type symbol stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSymbolKind {
    /// Built-in primitive; installed once before analysis begins.
    Primitive,
    Class,
    Interface,
    Enum,
    Module,
    Namespace,
}

impl TypeSymbolKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Module => "module",
            Self::Namespace => "namespace",
        }
    }

    /// The registry-side kind, for user-declared types.
    #[must_use]
    pub const fn user_kind(self) -> Option<UserKind> {
        match self {
            Self::Class => Some(UserKind::Class),
            Self::Interface => Some(UserKind::Interface),
            Self::Enum => Some(UserKind::Enum),
            Self::Module => Some(UserKind::Module),
            Self::Namespace => Some(UserKind::Namespace),
            Self::Primitive => None,
        }
    }

    /// Modules and namespaces have an export scope but no instances.
    #[must_use]
    pub const fn is_namespace_like(self) -> bool {
        matches!(self, Self::Module | Self::Namespace)
    }
}

/// A resolved function signature. Functions compare by
/// (name, parameter types, return type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncSignature {
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
}

/// One variant per declarable entity.
#[derive(Debug, Clone)]
pub enum SymbolKind {
    /// A variable binding (module-level, member, parameter, or local).
    /// `value` holds the constant-folded initializer when there is one
    /// and the binding is immutable.
    Var {
        ty: TypeId,
        mutable: bool,
        value: Option<ConstValue>,
    },

    /// A single concrete function. Always reached through an
    /// [`SymbolKind::OverloadSet`] binding. Built-in operator functions
    /// have no parameter scope.
    Func {
        signature: FuncSignature,
        param_scope: Option<ScopeId>,
        is_operator: bool,
    },

    /// The merge of all same-named functions in one scope.
    OverloadSet { funcs: Vec<SymbolId> },

    /// A declared type: class, interface, enum, module, namespace, or
    /// built-in primitive. Owns one static scope and, on demand, one
    /// instance scope for non-static members. `super_type` is settable
    /// once, after the scopes exist and before member resolution.
    TypeDecl {
        kind: TypeSymbolKind,
        type_id: TypeId,
        static_scope: ScopeId,
        instance_scope: Option<ScopeId>,
        super_type: Option<TypeId>,
    },

    /// A named compile-time constant, e.g. an enum variant.
    ConstVal { ty: TypeId, value: ConstValue },

    /// A declared alternate name for another symbol.
    Alias { target: SymbolId },

    /// A `using` import binding.
    Using { target: SymbolId },
}

/// A named, resolved language entity.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub modifiers: Modifiers,
    /// `None` for built-ins.
    pub span: Option<Span>,
    /// The scope this symbol was first bound into.
    pub defined_in: Option<ScopeId>,
    pub kind: SymbolKind,
}

impl Symbol {
    #[must_use]
    pub fn new(name: &str, modifiers: Modifiers, span: Option<Span>, kind: SymbolKind) -> Self {
        Self {
            name: name.to_string(),
            modifiers,
            span,
            defined_in: None,
            kind,
        }
    }

    /// Shorthand for a variable symbol without a constant value.
    #[must_use]
    pub fn var(name: &str, modifiers: Modifiers, span: Option<Span>, ty: TypeId, mutable: bool) -> Self {
        Self::new(
            name,
            modifiers,
            span,
            SymbolKind::Var {
                ty,
                mutable,
                value: None,
            },
        )
    }

    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Func { .. } | SymbolKind::OverloadSet { .. })
    }

    #[must_use]
    pub const fn is_type(&self) -> bool {
        matches!(self.kind, SymbolKind::TypeDecl { .. })
    }

    /// The declared type of a value symbol, if it has one.
    #[must_use]
    pub fn value_type(&self) -> Option<TypeId> {
        match &self.kind {
            SymbolKind::Var { ty, .. } | SymbolKind::ConstVal { ty, .. } => Some(*ty),
            _ => None,
        }
    }
}
