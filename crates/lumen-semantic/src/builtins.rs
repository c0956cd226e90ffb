//! One-shot installation of the built-in primitive scope.
//!
//! Installed exactly once per analysis run, before any translation unit
//! is walked, and read-only thereafter. Each primitive gets a type symbol
//! in the global scope and an instance scope pre-registered with its
//! operator symbols; binary operators later resolve against the left
//! operand's instance scope through the ordinary overload machinery.

use crate::symbol::{FuncSignature, Symbol, SymbolId, SymbolKind, TypeSymbolKind};
use crate::table::{ScopeId, ScopeKind, SymbolTable};
use lumen_ast::Modifiers;
use lumen_core::type_system::{Primitive, TypeId, TypeRegistry};

const ARITHMETIC: [&str; 4] = ["+", "-", "*", "/"];
const INTEGER_ONLY: [&str; 4] = ["%", "&", "|", "^"];
const SHIFTS: [&str; 2] = ["<<", ">>"];
const COMPARISONS: [&str; 6] = ["==", "!=", "<", "<=", ">", ">="];

/// Populates `table`'s global scope with the primitive types and their
/// operators. Does nothing when the global scope is already populated.
pub fn install_builtins(table: &mut SymbolTable, types: &mut TypeRegistry) {
    let global = table.global();
    if !table.scope(global).is_empty() {
        return;
    }

    let mut symbols = Vec::with_capacity(Primitive::ALL.len());
    for primitive in Primitive::ALL {
        symbols.push(install_type_symbol(table, primitive));
    }

    for (primitive, &symbol) in Primitive::ALL.iter().zip(&symbols) {
        install_operators(table, types, *primitive, symbol);
    }
}

fn install_type_symbol(table: &mut SymbolTable, primitive: Primitive) -> SymbolId {
    let global = table.global();
    let static_scope = table.create_scope(
        Some(global),
        ScopeKind::Type(TypeSymbolKind::Primitive),
        None,
    );
    let symbol = table
        .define(
            global,
            Symbol::new(
                primitive.name(),
                Modifiers::public(),
                None,
                SymbolKind::TypeDecl {
                    kind: TypeSymbolKind::Primitive,
                    type_id: primitive.type_id(),
                    static_scope,
                    instance_scope: None,
                    super_type: None,
                },
            ),
        )
        .expect("builtin scope is installed once into an empty global scope");
    table.set_scope_owner(static_scope, symbol);
    table.register_type_symbol(primitive.type_id(), symbol);
    symbol
}

fn install_operators(
    table: &mut SymbolTable,
    types: &mut TypeRegistry,
    primitive: Primitive,
    symbol: SymbolId,
) {
    match primitive {
        Primitive::Bool => {
            let scope = table.instance_scope(symbol).expect("type symbol");
            for op in ["&&", "||", "==", "!="] {
                operator(table, types, scope, op, &[TypeId::BOOL], TypeId::BOOL);
            }
            operator(table, types, scope, "!", &[], TypeId::BOOL);
        }

        Primitive::Char => {
            let scope = table.instance_scope(symbol).expect("type symbol");
            for op in COMPARISONS {
                operator(table, types, scope, op, &[TypeId::CHAR], TypeId::BOOL);
            }
        }

        Primitive::String => {
            let scope = table.instance_scope(symbol).expect("type symbol");
            operator(table, types, scope, "+", &[TypeId::STRING], TypeId::STRING);
            for op in ["==", "!="] {
                operator(table, types, scope, op, &[TypeId::STRING], TypeId::BOOL);
            }
        }

        Primitive::Void | Primitive::Null => {}

        _ => install_numeric_operators(table, types, primitive, symbol),
    }
}

/// Arithmetic on the numeric tower. Every numeric type accepts every
/// numeric operand; the result is the higher-ranked of the two, so mixed
/// expressions promote and overload cost picks the exact-operand
/// candidate deterministically.
fn install_numeric_operators(
    table: &mut SymbolTable,
    types: &mut TypeRegistry,
    primitive: Primitive,
    symbol: SymbolId,
) {
    let arith_operands: Vec<Primitive> = Primitive::NUMERIC
        .into_iter()
        .filter(|p| p.is_integer() || p.is_float())
        .collect();
    let scope = table.instance_scope(symbol).expect("type symbol");

    for &operand in &arith_operands {
        let result = promote(primitive, operand).type_id();
        for op in ARITHMETIC {
            operator(table, types, scope, op, &[operand.type_id()], result);
        }
        for op in COMPARISONS {
            operator(table, types, scope, op, &[operand.type_id()], TypeId::BOOL);
        }
    }

    operator(table, types, scope, "-", &[], primitive.type_id());

    if primitive.is_integer() {
        for &operand in arith_operands.iter().filter(|p| p.is_integer()) {
            let result = promote(primitive, operand).type_id();
            for op in INTEGER_ONLY {
                operator(table, types, scope, op, &[operand.type_id()], result);
            }
            // Shift results keep the left operand's type.
            for op in SHIFTS {
                operator(
                    table,
                    types,
                    scope,
                    op,
                    &[operand.type_id()],
                    primitive.type_id(),
                );
            }
        }
        operator(table, types, scope, "~", &[], primitive.type_id());
    }
}

fn promote(a: Primitive, b: Primitive) -> Primitive {
    match (a.rank(), b.rank()) {
        (Some(ra), Some(rb)) if ra >= rb => a,
        _ => b,
    }
}

fn operator(
    table: &mut SymbolTable,
    types: &TypeRegistry,
    scope: ScopeId,
    name: &str,
    params: &[TypeId],
    return_type: TypeId,
) {
    let symbol = Symbol::new(
        name,
        Modifiers::public(),
        None,
        SymbolKind::Func {
            signature: FuncSignature {
                params: params.to_vec(),
                return_type,
            },
            param_scope: None,
            is_operator: true,
        },
    );
    table
        .define_func(scope, symbol, types)
        .expect("builtin operators are registered once and never collide");
}
