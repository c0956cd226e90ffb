/// Unique identifier for types in the Lumen type system.
///
/// TypeId is a lightweight, copyable handle that references a type without
/// carrying the full type information. Symbols, scopes, and annotations
/// store handles; the registry owns the data, which keeps the cyclic
/// scope/symbol/type references of the language expressible as plain id
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u64);

impl TypeId {
    /// Creates a new TypeId from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    // Built-in type ids (0-999 reserved). The numeric ids follow the
    // widening precedence order so the rank table stays readable.
    pub const BOOL: TypeId = TypeId(0);
    pub const CHAR: TypeId = TypeId(1);
    pub const INT8: TypeId = TypeId(2);
    pub const UINT8: TypeId = TypeId(3);
    pub const INT16: TypeId = TypeId(4);
    pub const UINT16: TypeId = TypeId(5);
    pub const INT32: TypeId = TypeId(6);
    pub const UINT32: TypeId = TypeId(7);
    pub const INT64: TypeId = TypeId(8);
    pub const UINT64: TypeId = TypeId(9);
    pub const FLOAT32: TypeId = TypeId(10);
    pub const FLOAT64: TypeId = TypeId(11);
    pub const STRING: TypeId = TypeId(12);
    pub const VOID: TypeId = TypeId(13);
    pub const NULL: TypeId = TypeId(14);

    /// "Already reported, don't re-report": casts to and from anything.
    pub const ERROR: TypeId = TypeId(15);
    /// "Not yet computed, keep going."
    pub const UNRESOLVED: TypeId = TypeId(16);

    /// Starting id for user-defined types.
    pub const USER_DEFINED_START: u64 = 1000;

    /// Whether this id names one of the two sentinel markers.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == Self::ERROR.0 || self.0 == Self::UNRESOLVED.0
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_distinct() {
        assert_ne!(TypeId::BOOL, TypeId::CHAR);
        assert_ne!(TypeId::ERROR, TypeId::UNRESOLVED);
    }

    #[test]
    fn sentinels_are_flagged() {
        assert!(TypeId::ERROR.is_sentinel());
        assert!(TypeId::UNRESOLVED.is_sentinel());
        assert!(!TypeId::INT32.is_sentinel());
    }

    #[test]
    fn user_ids_start_above_builtins() {
        let user = TypeId::new(TypeId::USER_DEFINED_START);
        assert!(user.as_u64() > TypeId::UNRESOLVED.as_u64());
    }
}
