use super::TypeId;

/// Built-in primitive types.
///
/// The numeric primitives form a total widening order, `rank`; an implicit
/// cast is permitted only from a lower rank to a higher one. `string`,
/// `void`, and `null` sit outside the numeric tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Char,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    String,
    Void,
    Null,
}

impl Primitive {
    pub const ALL: [Primitive; 15] = [
        Self::Bool,
        Self::Char,
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
        Self::String,
        Self::Void,
        Self::Null,
    ];

    /// All primitives in the numeric widening tower, lowest rank first.
    pub const NUMERIC: [Primitive; 12] = [
        Self::Bool,
        Self::Char,
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
    ];

    /// Widening precedence. `None` for types outside the numeric tower.
    #[must_use]
    pub const fn rank(self) -> Option<u32> {
        let rank = match self {
            Self::Bool => 0,
            Self::Char => 1,
            Self::Int8 => 2,
            Self::UInt8 => 3,
            Self::Int16 => 4,
            Self::UInt16 => 5,
            Self::Int32 => 6,
            Self::UInt32 => 7,
            Self::Int64 => 8,
            Self::UInt64 => 9,
            Self::Float32 => 10,
            Self::Float64 => 11,
            Self::String | Self::Void | Self::Null => return None,
        };
        Some(rank)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.rank().is_some()
    }

    /// Integer types that support `%`, shifts, and bitwise operators.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::UInt8
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
        )
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64
        )
    }

    /// The reserved TypeId of this primitive.
    #[must_use]
    pub const fn type_id(self) -> TypeId {
        match self {
            Self::Bool => TypeId::BOOL,
            Self::Char => TypeId::CHAR,
            Self::Int8 => TypeId::INT8,
            Self::UInt8 => TypeId::UINT8,
            Self::Int16 => TypeId::INT16,
            Self::UInt16 => TypeId::UINT16,
            Self::Int32 => TypeId::INT32,
            Self::UInt32 => TypeId::UINT32,
            Self::Int64 => TypeId::INT64,
            Self::UInt64 => TypeId::UINT64,
            Self::Float32 => TypeId::FLOAT32,
            Self::Float64 => TypeId::FLOAT64,
            Self::String => TypeId::STRING,
            Self::Void => TypeId::VOID,
            Self::Null => TypeId::NULL,
        }
    }

    /// Source-level spelling of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Void => "void",
            Self::Null => "null",
        }
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
