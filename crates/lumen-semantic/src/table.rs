//! The scope tree and symbol arena.
//!
//! Scopes form a parent-linked acyclic tree whose structure is fixed at
//! creation; only the name map of a scope grows. Both scopes and symbols
//! are arena-stored and referenced by copyable ids, so a type symbol can
//! own a scope whose symbols refer back to the type without any ownership
//! cycle.

use crate::const_eval::ConstValue;
use crate::errors::ScopeError;
use crate::symbol::{FuncSignature, Symbol, SymbolId, SymbolKind, TypeSymbolKind};
use lumen_core::type_system::{TypeId, TypeRegistry};
use std::collections::HashMap;

/// Handle to a scope in the table's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// What a scope belongs to; drives member-lookup boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    /// Per-translation-unit scope holding that file's imports.
    File,
    /// Export scope of a module; shared by every declaration of the same
    /// qualified module path.
    Module,
    Namespace,
    /// Static members of a class/interface/enum/primitive.
    Type(TypeSymbolKind),
    /// Non-static members; lazily created next to a type scope.
    Instance,
    Function,
    /// Parameter list of one function.
    Params,
}

impl ScopeKind {
    /// Scopes a member lookup may walk through. Member resolution never
    /// continues past a type scope into file or global scope.
    #[must_use]
    pub const fn is_member_boundary(self) -> bool {
        !matches!(self, Self::Type(_) | Self::Instance)
    }
}

/// One name-to-symbol table with a parent link.
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    /// The type symbol this scope belongs to, for type/instance/module
    /// scopes.
    pub owner: Option<SymbolId>,
    symbols: HashMap<String, SymbolId>,
}

impl Scope {
    /// Names bound directly in this scope, unordered.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.symbols.iter().map(|(name, id)| (name.as_str(), *id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

const SUPER_CHAIN_LIMIT: usize = 128;

/// The scope tree and symbol arena for one analysis run.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    global: ScopeId,
    /// Reverse map from a declared type to its symbol, for operator and
    /// member lookup on values of that type.
    type_symbols: HashMap<TypeId, SymbolId>,
}

impl SymbolTable {
    /// Creates a table containing only the empty global scope. Built-ins
    /// are installed by a separate, explicit step before analysis begins.
    #[must_use]
    pub fn new() -> Self {
        let global = Scope {
            parent: None,
            kind: ScopeKind::Global,
            owner: None,
            symbols: HashMap::new(),
        };
        Self {
            scopes: vec![global],
            symbols: Vec::new(),
            global: ScopeId(0),
            type_symbols: HashMap::new(),
        }
    }

    #[must_use]
    pub fn global(&self) -> ScopeId {
        self.global
    }

    pub fn create_scope(
        &mut self,
        parent: Option<ScopeId>,
        kind: ScopeKind,
        owner: Option<SymbolId>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            kind,
            owner,
            symbols: HashMap::new(),
        });
        id
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0 as usize]
    }

    /// Adds a symbol to the arena without binding it to any name.
    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    fn bind(&mut self, scope: ScopeId, name: &str, id: SymbolId) {
        if self.symbols[id.0 as usize].defined_in.is_none() {
            self.symbols[id.0 as usize].defined_in = Some(scope);
        }
        self.scopes[scope.0 as usize]
            .symbols
            .insert(name.to_string(), id);
    }

    /// Defines a non-function symbol in `scope`. A name is unique per
    /// scope except for functions, which go through [`define_func`].
    ///
    /// [`define_func`]: Self::define_func
    pub fn define(&mut self, scope: ScopeId, symbol: Symbol) -> Result<SymbolId, ScopeError> {
        if self.scope(scope).symbols.contains_key(&symbol.name) {
            return Err(ScopeError::AlreadyDefined {
                name: symbol.name.clone(),
            });
        }
        let name = symbol.name.clone();
        let id = self.add_symbol(symbol);
        self.bind(scope, &name, id);
        Ok(id)
    }

    /// Looks a name up in `scope` alone, without walking parents or the
    /// super chain. Import bindings and aliases are followed.
    #[must_use]
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scope(scope)
            .symbols
            .get(name)
            .map(|&id| self.deref_alias(id))
    }

    /// Resolves `name` starting at `scope`, walking up the parent chain
    /// to the nearest definition. At type and instance scopes the
    /// resolved super chain is consulted before moving outward.
    ///
    /// With `as_member = true` the walk stops at the first scope that is
    /// not part of a type, so member lookup never escapes into file or
    /// global scope.
    #[must_use]
    pub fn resolve(&self, scope: ScopeId, name: &str, as_member: bool) -> Option<SymbolId> {
        self.resolve_at(scope, name, as_member, 0)
    }

    fn resolve_at(
        &self,
        scope: ScopeId,
        name: &str,
        as_member: bool,
        depth: usize,
    ) -> Option<SymbolId> {
        if depth > SUPER_CHAIN_LIMIT {
            return None;
        }
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.scope(id);
            if as_member && s.kind.is_member_boundary() {
                return None;
            }
            if let Some(&found) = s.symbols.get(name) {
                return Some(self.deref_alias(found));
            }
            if let Some(inherited) = self.resolve_in_super(s, name, depth) {
                return Some(inherited);
            }
            current = s.parent;
        }
        None
    }

    /// Consults the super type's matching scope when `scope` belongs to a
    /// type whose inheritance has been resolved. Supers without an
    /// instance scope of their own are stepped over.
    fn resolve_in_super(&self, scope: &Scope, name: &str, depth: usize) -> Option<SymbolId> {
        if !matches!(scope.kind, ScopeKind::Type(_) | ScopeKind::Instance) {
            return None;
        }
        let want_instance = scope.kind == ScopeKind::Instance;
        let mut owner = scope.owner?;

        for _ in 0..SUPER_CHAIN_LIMIT {
            let SymbolKind::TypeDecl { super_type, .. } = &self.symbol(owner).kind else {
                return None;
            };
            let super_sym = self.symbol_for_type((*super_type)?)?;
            let SymbolKind::TypeDecl {
                static_scope,
                instance_scope,
                ..
            } = &self.symbol(super_sym).kind
            else {
                return None;
            };
            let target = if want_instance {
                *instance_scope
            } else {
                Some(*static_scope)
            };
            if let Some(target) = target {
                // The recursive walk consults the rest of the chain.
                return self.resolve_at(target, name, true, depth + 1);
            }
            owner = super_sym;
        }
        None
    }

    /// Follows `using` and alias bindings to the symbol they name.
    #[must_use]
    pub fn deref_alias(&self, mut id: SymbolId) -> SymbolId {
        for _ in 0..SUPER_CHAIN_LIMIT {
            match &self.symbol(id).kind {
                SymbolKind::Alias { target } | SymbolKind::Using { target } => id = *target,
                _ => return id,
            }
        }
        id
    }

    /// Declares a bare overload-set placeholder for a function name, so
    /// the name resolves before any signature has been computed. Returns
    /// the existing set when the name is already a function.
    pub fn declare_func_name(
        &mut self,
        scope: ScopeId,
        name: &str,
        span: Option<lumen_core::Span>,
    ) -> Result<SymbolId, ScopeError> {
        if let Some(&existing) = self.scope(scope).symbols.get(name) {
            return match &self.symbol(existing).kind {
                SymbolKind::OverloadSet { .. } => Ok(existing),
                _ => Err(ScopeError::AlreadyDefined {
                    name: name.to_string(),
                }),
            };
        }
        let set = self.add_symbol(Symbol::new(
            name,
            lumen_ast::Modifiers::new(),
            span,
            SymbolKind::OverloadSet { funcs: Vec::new() },
        ));
        self.bind(scope, name, set);
        Ok(set)
    }

    /// Defines a function, merging it into the scope's overload set for
    /// its name instead of rejecting the duplicate. An identical
    /// signature is a redeclaration; identical parameters with a
    /// different return type conflict; a non-function holding the name
    /// cannot be overloaded.
    pub fn define_func(
        &mut self,
        scope: ScopeId,
        symbol: Symbol,
        registry: &TypeRegistry,
    ) -> Result<SymbolId, ScopeError> {
        let SymbolKind::Func { signature, .. } = &symbol.kind else {
            return Err(ScopeError::AlreadyDefined {
                name: symbol.name.clone(),
            });
        };
        let name = symbol.name.clone();
        let set = match self.scope(scope).symbols.get(&name).copied() {
            Some(existing) => match &self.symbol(existing).kind {
                SymbolKind::OverloadSet { funcs } => {
                    for &func in funcs {
                        let SymbolKind::Func {
                            signature: other, ..
                        } = &self.symbol(func).kind
                        else {
                            continue;
                        };
                        if !same_params(signature, other, registry) {
                            continue;
                        }
                        return Err(
                            if registry.same_type(signature.return_type, other.return_type) {
                                ScopeError::Redeclaration { name }
                            } else {
                                ScopeError::ConflictingOverloads { name }
                            },
                        );
                    }
                    existing
                }
                _ => return Err(ScopeError::AlreadyDefined { name }),
            },
            None => self.declare_func_name(scope, &name, symbol.span)?,
        };

        let id = self.add_symbol(symbol);
        self.symbols[id.0 as usize].defined_in = Some(scope);
        if let SymbolKind::OverloadSet { funcs } = &mut self.symbol_mut(set).kind {
            funcs.push(id);
        }
        Ok(id)
    }

    /// The individual functions of an overload set (or the symbol itself
    /// when it is a single function).
    #[must_use]
    pub fn overloads(&self, id: SymbolId) -> Vec<SymbolId> {
        match &self.symbol(id).kind {
            SymbolKind::OverloadSet { funcs } => funcs.clone(),
            SymbolKind::Func { .. } => vec![id],
            _ => Vec::new(),
        }
    }

    /// Binds `name` in `scope` as an import of `target`. Private symbols
    /// cannot be re-exported.
    pub fn define_using(
        &mut self,
        scope: ScopeId,
        name: &str,
        target: SymbolId,
    ) -> Result<SymbolId, ScopeError> {
        let target = self.deref_alias(target);
        if self.symbol(target).modifiers.visibility == lumen_ast::Visibility::Private {
            return Err(ScopeError::CannotExport {
                name: name.to_string(),
            });
        }
        if self.scope(scope).symbols.contains_key(name) {
            return Err(ScopeError::AlreadyDefined {
                name: name.to_string(),
            });
        }
        let modifiers = self.symbol(target).modifiers;
        let id = self.add_symbol(Symbol::new(
            name,
            modifiers,
            None,
            SymbolKind::Using { target },
        ));
        self.bind(scope, name, id);
        Ok(id)
    }

    /// Re-exports every non-private member of a module/namespace into
    /// `scope` (`using a.b.*`). Names already bound locally win silently.
    pub fn define_using_unqualified(
        &mut self,
        scope: ScopeId,
        namespace: SymbolId,
    ) -> Result<(), ScopeError> {
        let SymbolKind::TypeDecl {
            kind, static_scope, ..
        } = &self.symbol(namespace).kind
        else {
            return Err(ScopeError::NotDefined {
                name: self.symbol(namespace).name.clone(),
            });
        };
        if !kind.is_namespace_like() {
            return Err(ScopeError::NotDefined {
                name: self.symbol(namespace).name.clone(),
            });
        }
        let members: Vec<(String, SymbolId)> = self
            .scope(*static_scope)
            .bindings()
            .map(|(name, id)| (name.to_string(), id))
            .collect();
        for (name, target) in members {
            let target = self.deref_alias(target);
            if self.symbol(target).modifiers.visibility == lumen_ast::Visibility::Private {
                continue;
            }
            if self.scope(scope).symbols.contains_key(&name) {
                continue;
            }
            let modifiers = self.symbol(target).modifiers;
            let id = self.add_symbol(Symbol::new(
                &name,
                modifiers,
                None,
                SymbolKind::Using { target },
            ));
            self.bind(scope, &name, id);
        }
        Ok(())
    }

    /// The symbol declaring `type_id`, when one exists.
    #[must_use]
    pub fn symbol_for_type(&self, type_id: TypeId) -> Option<SymbolId> {
        self.type_symbols.get(&type_id).copied()
    }

    pub(crate) fn register_type_symbol(&mut self, type_id: TypeId, symbol: SymbolId) {
        self.type_symbols.insert(type_id, symbol);
    }

    /// Back-links a type/instance scope to its owning symbol. Needed
    /// because the scope is created before the symbol that owns it.
    pub(crate) fn set_scope_owner(&mut self, scope: ScopeId, owner: SymbolId) {
        self.scopes[scope.0 as usize].owner = Some(owner);
    }

    /// The static scope of a type symbol.
    #[must_use]
    pub fn static_scope_of(&self, symbol: SymbolId) -> Option<ScopeId> {
        match &self.symbol(symbol).kind {
            SymbolKind::TypeDecl { static_scope, .. } => Some(*static_scope),
            _ => None,
        }
    }

    /// The instance scope of a type symbol, if one has been created.
    #[must_use]
    pub fn instance_scope_of(&self, symbol: SymbolId) -> Option<ScopeId> {
        match &self.symbol(symbol).kind {
            SymbolKind::TypeDecl { instance_scope, .. } => *instance_scope,
            _ => None,
        }
    }

    /// The instance scope of a type symbol, created on first use. Its
    /// parent is the type's static scope, so instance lookup can still
    /// reach static members.
    pub fn instance_scope(&mut self, symbol: SymbolId) -> Option<ScopeId> {
        let SymbolKind::TypeDecl {
            static_scope,
            instance_scope,
            ..
        } = &self.symbol(symbol).kind
        else {
            return None;
        };
        if let Some(existing) = instance_scope {
            return Some(*existing);
        }
        let parent = *static_scope;
        let created = self.create_scope(Some(parent), ScopeKind::Instance, Some(symbol));
        if let SymbolKind::TypeDecl { instance_scope, .. } = &mut self.symbol_mut(symbol).kind {
            *instance_scope = Some(created);
        }
        Some(created)
    }

    /// Records the resolved super type of a type symbol. Settable once;
    /// returns whether this call set it.
    pub fn set_super_type(&mut self, symbol: SymbolId, super_type: TypeId) -> bool {
        if let SymbolKind::TypeDecl {
            super_type: slot, ..
        } = &mut self.symbol_mut(symbol).kind
            && slot.is_none()
        {
            *slot = Some(super_type);
            return true;
        }
        false
    }

    /// Fills in the declared type of a variable once header or inference
    /// resolution computes it.
    pub(crate) fn assign_var_type(&mut self, symbol: SymbolId, ty: TypeId) {
        if let SymbolKind::Var { ty: slot, .. } = &mut self.symbol_mut(symbol).kind {
            *slot = ty;
        }
    }

    /// Records the constant-folded initializer value of a variable.
    pub(crate) fn set_var_value(&mut self, symbol: SymbolId, value: ConstValue) {
        if let SymbolKind::Var { value: slot, .. } = &mut self.symbol_mut(symbol).kind {
            *slot = Some(value);
        }
    }

    /// Fills in the registry id of a type symbol created before its type.
    pub(crate) fn assign_type_id(&mut self, symbol: SymbolId, ty: TypeId) {
        if let SymbolKind::TypeDecl { type_id, .. } = &mut self.symbol_mut(symbol).kind {
            *type_id = ty;
        }
        self.register_type_symbol(ty, symbol);
    }

    /// Name of a scope for diagnostics: the owning type/module, or the
    /// scope kind.
    #[must_use]
    pub fn scope_display_name(&self, scope: ScopeId) -> String {
        let s = self.scope(scope);
        if let Some(owner) = s.owner {
            return self.symbol(owner).name.clone();
        }
        match s.kind {
            ScopeKind::Global => "the global scope".to_string(),
            ScopeKind::File => "this file".to_string(),
            _ => "this scope".to_string(),
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

fn same_params(a: &FuncSignature, b: &FuncSignature, registry: &TypeRegistry) -> bool {
    a.params.len() == b.params.len()
        && a.params
            .iter()
            .zip(&b.params)
            .all(|(x, y)| registry.same_type(*x, *y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_ast::Modifiers;
    use lumen_core::type_system::TypeId;

    fn var(name: &str, ty: TypeId) -> Symbol {
        Symbol::var(name, Modifiers::new(), None, ty, false)
    }

    fn func(name: &str, params: Vec<TypeId>, ret: TypeId) -> Symbol {
        Symbol::new(
            name,
            Modifiers::new(),
            None,
            SymbolKind::Func {
                signature: FuncSignature {
                    params,
                    return_type: ret,
                },
                param_scope: None,
                is_operator: false,
            },
        )
    }

    #[test]
    fn define_rejects_duplicates() {
        let mut table = SymbolTable::new();
        let global = table.global();
        table.define(global, var("x", TypeId::INT32)).unwrap();
        let err = table.define(global, var("x", TypeId::STRING)).unwrap_err();
        assert_eq!(
            err,
            ScopeError::AlreadyDefined {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn resolve_finds_nearest_definition() {
        let mut table = SymbolTable::new();
        let global = table.global();
        let outer = table.define(global, var("x", TypeId::INT32)).unwrap();
        let inner_scope = table.create_scope(Some(global), ScopeKind::Function, None);
        let inner = table.define(inner_scope, var("x", TypeId::STRING)).unwrap();

        assert_eq!(table.resolve(inner_scope, "x", false), Some(inner));
        assert_eq!(table.resolve(global, "x", false), Some(outer));
    }

    #[test]
    fn child_definitions_never_leak_to_parents() {
        let mut table = SymbolTable::new();
        let global = table.global();
        let child = table.create_scope(Some(global), ScopeKind::Function, None);
        table.define(child, var("local", TypeId::BOOL)).unwrap();
        assert_eq!(table.resolve(global, "local", false), None);
    }

    #[test]
    fn functions_merge_into_an_overload_set() {
        let mut table = SymbolTable::new();
        let registry = TypeRegistry::new();
        let global = table.global();

        let a = table
            .define_func(global, func("f", vec![TypeId::INT32], TypeId::VOID), &registry)
            .unwrap();
        let b = table
            .define_func(global, func("f", vec![TypeId::STRING], TypeId::VOID), &registry)
            .unwrap();

        let set = table.resolve(global, "f", false).unwrap();
        assert_eq!(table.overloads(set), vec![a, b]);
    }

    #[test]
    fn identical_signature_is_a_redeclaration() {
        let mut table = SymbolTable::new();
        let registry = TypeRegistry::new();
        let global = table.global();

        table
            .define_func(global, func("f", vec![TypeId::INT32], TypeId::VOID), &registry)
            .unwrap();
        let err = table
            .define_func(global, func("f", vec![TypeId::INT32], TypeId::VOID), &registry)
            .unwrap_err();
        assert_eq!(
            err,
            ScopeError::Redeclaration {
                name: "f".to_string()
            }
        );
    }

    #[test]
    fn same_params_with_different_return_conflict() {
        let mut table = SymbolTable::new();
        let registry = TypeRegistry::new();
        let global = table.global();

        table
            .define_func(global, func("f", vec![TypeId::INT32], TypeId::VOID), &registry)
            .unwrap();
        let err = table
            .define_func(global, func("f", vec![TypeId::INT32], TypeId::BOOL), &registry)
            .unwrap_err();
        assert_eq!(
            err,
            ScopeError::ConflictingOverloads {
                name: "f".to_string()
            }
        );
    }

    #[test]
    fn overloading_a_non_function_fails() {
        let mut table = SymbolTable::new();
        let registry = TypeRegistry::new();
        let global = table.global();

        table.define(global, var("f", TypeId::INT32)).unwrap();
        let err = table
            .define_func(global, func("f", vec![], TypeId::VOID), &registry)
            .unwrap_err();
        assert_eq!(
            err,
            ScopeError::AlreadyDefined {
                name: "f".to_string()
            }
        );
    }

    #[test]
    fn using_binding_resolves_to_target() {
        let mut table = SymbolTable::new();
        let global = table.global();
        let target = table.define(global, var("deep", TypeId::INT32)).unwrap();
        let file = table.create_scope(Some(global), ScopeKind::File, None);
        table.define_using(file, "shallow", target).unwrap();

        assert_eq!(table.resolve(file, "shallow", false), Some(target));
    }

    #[test]
    fn private_symbols_cannot_be_reexported() {
        let mut table = SymbolTable::new();
        let global = table.global();
        let secret = Symbol::var(
            "secret",
            Modifiers::new().with_visibility(lumen_ast::Visibility::Private),
            None,
            TypeId::INT32,
            false,
        );
        let target = table.define(global, secret).unwrap();
        let file = table.create_scope(Some(global), ScopeKind::File, None);
        let err = table.define_using(file, "secret", target).unwrap_err();
        assert_eq!(
            err,
            ScopeError::CannotExport {
                name: "secret".to_string()
            }
        );
    }
}
