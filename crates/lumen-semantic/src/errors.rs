//! Modeled analysis failures.
//!
//! Every failure the resolution core can produce is a value of one of
//! these enums. The core never reports anything itself; callers in the
//! pipeline convert failures into sink entries through [`report`] and
//! substitute an error sentinel, so analysis of sibling nodes continues.

use lumen_core::{DiagnosticSink, Span, Stage};
use thiserror::Error;

/// Failures of scope and symbol operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// The name is already bound to a non-mergeable symbol in this scope.
    #[error("'{name}' is already defined in this scope")]
    AlreadyDefined { name: String },

    #[error("'{name}' is not defined")]
    NotDefined { name: String },

    /// A function with this exact signature (name, parameters, return
    /// type) already exists in the overload set.
    #[error("'{name}' is already declared with this signature")]
    Redeclaration { name: String },

    /// Same name and parameters as an existing overload, but a different
    /// return type; the two can never be told apart at a call site.
    #[error("overload of '{name}' conflicts with an existing declaration")]
    ConflictingOverloads { name: String },

    /// Two or more overloads match the arguments at the same cost.
    #[error("ambiguous call to overloaded function '{name}'")]
    AmbiguousOverloadedFunc { name: String },

    #[error("operator '{operator}' must take exactly {expected} parameter(s)")]
    OperParamCountMismatch { operator: String, expected: usize },

    #[error("no overload of '{name}' accepts ({arg_types}) in {scope_name}")]
    NoFuncOverload {
        name: String,
        arg_types: String,
        scope_name: String,
    },

    #[error("initializer is not a valid constant value")]
    InvalidConstValue,

    #[error("'{name}' is not visible here and cannot be re-exported")]
    CannotExport { name: String },
}

/// Failures of expression and declaration type checking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("type mismatch: expected '{expected}', found '{found}'")]
    Mismatch { expected: String, found: String },

    #[error("cannot assign to immutable binding")]
    AssignImmutable,

    #[error("cannot assign to a constant")]
    AssignConst,

    #[error("expression is not assignable")]
    NotAssignable,

    #[error("'{name}' is not a function")]
    NotAFunction { name: String },

    #[error("expected a type name")]
    ExpectedTypeName,

    #[error("expected a value, found '{found}'")]
    ExpectedValue { found: String },

    #[error("'{name}' must be declared open to be extended")]
    MustBeOpen { name: String },

    #[error("an interface may only extend an interface")]
    InterfaceExtendsNonInterface,

    #[error("a class may only extend a class or an interface")]
    ClassExtendsInvalid,

    #[error("'{name}' is private")]
    PrivateAccess { name: String },

    #[error("wrong number of arguments: expected {expected}, found {found}")]
    ArgCount { expected: usize, found: usize },

    #[error("condition must be 'bool', found '{found}'")]
    NonBoolCondition { found: String },

    #[error("value of type '{found}' cannot be indexed")]
    NotIndexable { found: String },

    #[error("index must be an integer, found '{found}'")]
    NonIntegerIndex { found: String },

    #[error("'{name}' has no member '{member}'")]
    NoSuchMember { name: String, member: String },

    #[error("return value of type '{found}' does not match declared return type '{expected}'")]
    ReturnMismatch { expected: String, found: String },

    #[error("'{stmt}' outside of a loop")]
    OutsideLoop { stmt: &'static str },

    #[error("cannot infer a type for '{name}' without an initializer")]
    CannotInfer { name: String },

    #[error("'{name}' is marked override but overrides nothing")]
    OverridesNothing { name: String },
}

/// The one adapter between the pure resolution core and the sink.
pub(crate) fn report(
    sink: &mut DiagnosticSink,
    stage: Stage,
    error: &impl std::fmt::Display,
    span: Option<Span>,
) {
    sink.error(stage, error.to_string(), span);
}
