//! Type system for the Lumen language.
//!
//! Types are value-semantic: a [`TypeId`] is a handle into the
//! [`TypeRegistry`] arena, and per-use-site qualities (const, mutable,
//! lvalue) ride beside the handle in [`TypeFlags`] rather than in the
//! registry. The same declared type can therefore appear as a mutable
//! lvalue in one expression and a const rvalue in another without the
//! registry ever being touched.

mod flags;
mod primitive;
mod registry;
mod type_id;
mod type_kind;

pub use flags::{Type, TypeFlags};
pub use primitive::Primitive;
pub use registry::TypeRegistry;
pub use type_id::TypeId;
pub use type_kind::{DeclKey, TypeKind, UserKind};
