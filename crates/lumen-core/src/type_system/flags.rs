use super::TypeId;

/// Per-use-site qualities of a type.
///
/// These belong to an *occurrence* of a type, never to the declaration:
/// the expression `p.x` can be a mutable lvalue while `f().x` is a const
/// rvalue of the same declared type. Flag changes build a new value; the
/// registry is never consulted or mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeFlags {
    /// Writing through this occurrence is forbidden.
    pub konst: bool,
    /// The binding this occurrence came from was declared mutable.
    pub mutable: bool,
    /// The occurrence names a storage location.
    pub lvalue: bool,
    /// The occurrence is the computed result of an expression (as opposed
    /// to a type named in source, e.g. the right side of `as`).
    pub expr_result: bool,
}

/// A type occurrence: a registry handle plus use-site flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    pub id: TypeId,
    pub flags: TypeFlags,
}

impl Type {
    /// A plain rvalue occurrence of `id`.
    #[must_use]
    pub const fn rvalue(id: TypeId) -> Self {
        Self {
            id,
            flags: TypeFlags {
                konst: false,
                mutable: false,
                lvalue: false,
                expr_result: true,
            },
        }
    }

    /// An lvalue occurrence of `id`; `mutable` per the binding.
    #[must_use]
    pub const fn lvalue(id: TypeId, mutable: bool) -> Self {
        Self {
            id,
            flags: TypeFlags {
                konst: false,
                mutable,
                lvalue: true,
                expr_result: true,
            },
        }
    }

    /// A type named in source rather than computed from a value.
    #[must_use]
    pub const fn named(id: TypeId) -> Self {
        Self {
            id,
            flags: TypeFlags {
                konst: false,
                mutable: false,
                lvalue: false,
                expr_result: false,
            },
        }
    }

    /// The error sentinel as an rvalue.
    #[must_use]
    pub const fn error() -> Self {
        Self::rvalue(TypeId::ERROR)
    }

    /// The unresolved sentinel as an rvalue.
    #[must_use]
    pub const fn unresolved() -> Self {
        Self::rvalue(TypeId::UNRESOLVED)
    }

    #[must_use]
    pub const fn with_konst(mut self, konst: bool) -> Self {
        self.flags.konst = konst;
        self
    }

    #[must_use]
    pub const fn with_lvalue(mut self, lvalue: bool) -> Self {
        self.flags.lvalue = lvalue;
        self
    }

    #[must_use]
    pub const fn with_mutable(mut self, mutable: bool) -> Self {
        self.flags.mutable = mutable;
        self
    }

    /// Whether assignment through this occurrence is permitted.
    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        self.flags.lvalue && self.flags.mutable && !self.flags.konst
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.id.as_u64() == TypeId::ERROR.as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_build_new_values() {
        let base = Type::rvalue(TypeId::INT32);
        let frozen = base.with_konst(true);
        assert!(!base.flags.konst);
        assert!(frozen.flags.konst);
        assert_eq!(base.id, frozen.id);
    }

    #[test]
    fn assignability_needs_mutable_lvalue() {
        assert!(Type::lvalue(TypeId::INT32, true).is_assignable());
        assert!(!Type::lvalue(TypeId::INT32, false).is_assignable());
        assert!(!Type::rvalue(TypeId::INT32).is_assignable());
        assert!(!Type::lvalue(TypeId::INT32, true).with_konst(true).is_assignable());
    }
}
