use super::{DeclKey, Primitive, TypeId, TypeKind, UserKind};
use std::collections::HashMap;

/// Central registry for all types known to one analysis run.
///
/// The registry provides:
/// - type creation and lookup by [`TypeId`]
/// - the implicit-cast relation (`can_cast`) and its cost (`cast_cost`),
///   which drives overload selection
/// - display names for diagnostics
///
/// Composite types (pointers, functions) are created fresh at each use
/// site; the cast relation therefore compares them structurally. User
/// types compare by declaration identity only.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<TypeId, TypeKind>,
    next_id: u64,
    name_to_id: HashMap<String, TypeId>,
    /// Resolved inheritance edges, child declaration to super declaration.
    /// Settable once per child; `can_cast` walks this chain for upcasts.
    supers: HashMap<DeclKey, DeclKey>,
}

impl TypeRegistry {
    /// Creates a new registry with the built-in types pre-registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            types: HashMap::new(),
            next_id: TypeId::USER_DEFINED_START,
            name_to_id: HashMap::new(),
            supers: HashMap::new(),
        };

        for primitive in Primitive::ALL {
            registry
                .types
                .insert(primitive.type_id(), TypeKind::Primitive(primitive));
            registry
                .name_to_id
                .insert(primitive.name().to_string(), primitive.type_id());
        }
        registry.types.insert(TypeId::ERROR, TypeKind::Error);
        registry
            .types
            .insert(TypeId::UNRESOLVED, TypeKind::Unresolved);

        registry
    }

    fn generate_id(&mut self) -> TypeId {
        let id = TypeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Looks up the kind behind an id.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&TypeKind> {
        self.types.get(&id)
    }

    /// Looks up a type id by source-level name (primitives and user types).
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<TypeId> {
        self.name_to_id.get(name).copied()
    }

    /// The primitive behind an id, if it is one.
    #[must_use]
    pub fn primitive(&self, id: TypeId) -> Option<Primitive> {
        self.get(id).and_then(TypeKind::as_primitive)
    }

    /// Creates a pointer type.
    pub fn create_pointer(&mut self, pointee: TypeId, pointee_const: bool) -> TypeId {
        let id = self.generate_id();
        self.types.insert(
            id,
            TypeKind::Pointer {
                pointee,
                pointee_const,
            },
        );
        id
    }

    /// Creates a function type.
    pub fn create_function(&mut self, parameters: Vec<TypeId>, return_type: TypeId) -> TypeId {
        let id = self.generate_id();
        self.types.insert(
            id,
            TypeKind::Function {
                parameters,
                return_type,
            },
        );
        id
    }

    /// Creates a user-defined type for the given declaration.
    pub fn create_user(&mut self, name: &str, decl: DeclKey, kind: UserKind) -> TypeId {
        let id = self.generate_id();
        self.types.insert(
            id,
            TypeKind::User {
                name: name.to_string(),
                decl,
                kind,
            },
        );
        self.name_to_id.insert(name.to_string(), id);
        id
    }

    /// Creates the type of a bare overloaded-function name.
    pub fn create_overload_set(&mut self, decl: DeclKey) -> TypeId {
        let id = self.generate_id();
        self.types.insert(id, TypeKind::OverloadSet { decl });
        id
    }

    /// Creates the type of a module/namespace name.
    pub fn create_namespace(&mut self, name: &str, decl: DeclKey) -> TypeId {
        let id = self.generate_id();
        self.types.insert(
            id,
            TypeKind::Namespace {
                name: name.to_string(),
                decl,
            },
        );
        id
    }

    /// Records a resolved inheritance edge. The edge is settable once;
    /// a second call for the same child is ignored.
    pub fn set_super(&mut self, child: DeclKey, parent: DeclKey) {
        self.supers.entry(child).or_insert(parent);
    }

    /// The recorded super declaration of `child`, if any.
    #[must_use]
    pub fn super_of(&self, child: DeclKey) -> Option<DeclKey> {
        self.supers.get(&child).copied()
    }

    /// Whether a value of type `source` implicitly converts to `target`.
    #[must_use]
    pub fn can_cast(&self, source: TypeId, target: TypeId) -> bool {
        self.cast_cost(source, target).is_some()
    }

    /// The cost of implicitly converting `source` into `target`, or
    /// `None` when no implicit conversion exists. Identity is 0; numeric
    /// widening costs the rank distance; other permitted conversions
    /// cost 1 per step. Overload selection minimizes the summed cost.
    #[must_use]
    pub fn cast_cost(&self, source: TypeId, target: TypeId) -> Option<u32> {
        if source == target {
            return Some(0);
        }
        // Sentinels convert freely so one failure never cascades.
        if source.is_sentinel() || target.is_sentinel() {
            return Some(0);
        }

        let source_kind = self.get(source)?;
        let target_kind = self.get(target)?;

        match (source_kind, target_kind) {
            (TypeKind::Primitive(s), TypeKind::Primitive(t)) => {
                if s == t {
                    return Some(0);
                }
                // Numeric widening, strictly up the rank.
                let (from, to) = (s.rank()?, t.rank()?);
                (from < to).then(|| to - from)
            }

            // Null literal converts to any pointer.
            (TypeKind::Primitive(Primitive::Null), TypeKind::Pointer { .. }) => Some(1),

            (
                TypeKind::Pointer {
                    pointee: sp,
                    pointee_const: sc,
                },
                TypeKind::Pointer {
                    pointee: tp,
                    pointee_const: tc,
                },
            ) => {
                if !self.same_type(*sp, *tp) {
                    return None;
                }
                match (sc, tc) {
                    // Adding const is fine, dropping it is not.
                    (false, true) => Some(1),
                    (s, t) if s == t => Some(0),
                    _ => None,
                }
            }

            (
                TypeKind::Function {
                    parameters: sp,
                    return_type: sr,
                },
                TypeKind::Function {
                    parameters: tp,
                    return_type: tr,
                },
            ) => {
                let same = sp.len() == tp.len()
                    && sp.iter().zip(tp).all(|(a, b)| self.same_type(*a, *b))
                    && self.same_type(*sr, *tr);
                same.then_some(0)
            }

            (TypeKind::User { decl: s, .. }, TypeKind::User { decl: t, .. }) => {
                if s == t {
                    return Some(0);
                }
                // Upcast along the resolved super chain.
                let mut cost = 0;
                let mut current = *s;
                while let Some(parent) = self.super_of(current) {
                    cost += 1;
                    if parent == *t {
                        return Some(cost);
                    }
                    current = parent;
                }
                None
            }

            _ => None,
        }
    }

    /// Structural sameness, ignoring handle identity. Needed because
    /// composite types are created fresh per use site.
    #[must_use]
    pub fn same_type(&self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (Some(ka), Some(kb)) => match (ka, kb) {
                (TypeKind::Primitive(pa), TypeKind::Primitive(pb)) => pa == pb,
                (
                    TypeKind::Pointer {
                        pointee: pa,
                        pointee_const: ca,
                    },
                    TypeKind::Pointer {
                        pointee: pb,
                        pointee_const: cb,
                    },
                ) => ca == cb && self.same_type(*pa, *pb),
                (
                    TypeKind::Function {
                        parameters: pa,
                        return_type: ra,
                    },
                    TypeKind::Function {
                        parameters: pb,
                        return_type: rb,
                    },
                ) => {
                    pa.len() == pb.len()
                        && pa.iter().zip(pb).all(|(x, y)| self.same_type(*x, *y))
                        && self.same_type(*ra, *rb)
                }
                (TypeKind::User { decl: da, .. }, TypeKind::User { decl: db, .. }) => da == db,
                _ => false,
            },
            _ => false,
        }
    }

    /// Human-readable name for diagnostics.
    #[must_use]
    pub fn display_name(&self, id: TypeId) -> String {
        match self.get(id) {
            Some(TypeKind::Primitive(p)) => p.name().to_string(),
            Some(TypeKind::Pointer {
                pointee,
                pointee_const,
            }) => {
                let inner = self.display_name(*pointee);
                if *pointee_const {
                    format!("*const {inner}")
                } else {
                    format!("*{inner}")
                }
            }
            Some(TypeKind::Function {
                parameters,
                return_type,
            }) => {
                let params = parameters
                    .iter()
                    .map(|p| self.display_name(*p))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("func({params}): {}", self.display_name(*return_type))
            }
            Some(TypeKind::User { name, .. }) => name.clone(),
            Some(TypeKind::OverloadSet { .. }) => "<overload set>".to_string(),
            Some(TypeKind::Namespace { name, .. }) => name.clone(),
            Some(TypeKind::Error) => "<error>".to_string(),
            Some(TypeKind::Unresolved) => "<unresolved>".to_string(),
            None => format!("<unknown {}>", id.as_u64()),
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
