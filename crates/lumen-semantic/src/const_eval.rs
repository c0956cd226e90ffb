//! Compile-time constant evaluation.
//!
//! A pure, recursive folder: literals evaluate to themselves, identifiers
//! only when they resolve to a constant binding, operators only when all
//! operands evaluate. "Cannot evaluate" is `None` and nothing else. In
//! particular, division by a constant zero fails closed so the type
//! checker still runs over the expression; it is never an error here.

use crate::context::SemanticContext;
use crate::symbol::SymbolKind;
use crate::table::SymbolTable;
use lumen_ast::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
use lumen_core::type_system::{Primitive, TypeId};

/// A compile-time value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Char(char),
    /// Integer value, stored sign-extended; `ty` gives the native width
    /// the value has already been narrowed to. `uint64` values keep
    /// their bit pattern.
    Int { value: i64, ty: Primitive },
    Float { value: f64, ty: Primitive },
    Str(String),
}

impl ConstValue {
    /// Shorthand for the default integer literal type.
    #[must_use]
    pub const fn int32(value: i64) -> Self {
        Self::Int {
            value,
            ty: Primitive::Int32,
        }
    }

    /// The type id a folded value carries.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        match self {
            Self::Bool(_) => TypeId::BOOL,
            Self::Char(_) => TypeId::CHAR,
            Self::Int { ty, .. } | Self::Float { ty, .. } => ty.type_id(),
            Self::Str(_) => TypeId::STRING,
        }
    }
}

impl std::fmt::Display for ConstValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Int { value, ty } if ty.is_unsigned() => write!(f, "{}", *value as u64),
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Float { value, .. } => write!(f, "{value}"),
            Self::Str(v) => write!(f, "{v}"),
        }
    }
}

/// Folds `expr` into a constant, when every operand is itself constant.
#[must_use]
pub fn eval(expr: &Expr, table: &SymbolTable, context: &SemanticContext) -> Option<ConstValue> {
    match &expr.kind {
        ExprKind::Literal(lit) => eval_literal(lit),

        // An identifier is constant only if resolution bound it to a
        // constant-valued symbol.
        ExprKind::Ident(_) | ExprKind::Member { .. } => {
            let symbol = context.symbol_of(expr.id)?;
            match &table.symbol(symbol).kind {
                SymbolKind::ConstVal { value, .. } => Some(value.clone()),
                SymbolKind::Var {
                    mutable: false,
                    value: Some(value),
                    ..
                } => Some(value.clone()),
                _ => None,
            }
        }

        ExprKind::Unary { op, operand } => {
            let value = eval(operand, table, context)?;
            eval_unary(*op, value)
        }

        ExprKind::Binary { op, lhs, rhs } => {
            let left = eval(lhs, table, context)?;
            let right = eval(rhs, table, context)?;
            eval_binary(*op, left, right)
        }

        _ => None,
    }
}

fn eval_literal(lit: &Literal) -> Option<ConstValue> {
    Some(match lit {
        Literal::Int(v) => ConstValue::Int {
            value: *v,
            ty: if i32::try_from(*v).is_ok() {
                Primitive::Int32
            } else {
                Primitive::Int64
            },
        },
        Literal::Float(v) => ConstValue::Float {
            value: *v,
            ty: Primitive::Float64,
        },
        Literal::Str(v) => ConstValue::Str(v.clone()),
        Literal::Char(v) => ConstValue::Char(*v),
        Literal::Bool(v) => ConstValue::Bool(*v),
        Literal::Null => return None,
    })
}

fn eval_unary(op: UnaryOp, value: ConstValue) -> Option<ConstValue> {
    match (op, value) {
        (UnaryOp::Neg, ConstValue::Int { value, ty }) => Some(ConstValue::Int {
            value: narrow_int(-i128::from(value), ty),
            ty,
        }),
        (UnaryOp::Neg, ConstValue::Float { value, ty }) => Some(ConstValue::Float {
            value: narrow_float(-value, ty),
            ty,
        }),
        (UnaryOp::Not, ConstValue::Bool(v)) => Some(ConstValue::Bool(!v)),
        (UnaryOp::BitNot, ConstValue::Int { value, ty }) => Some(ConstValue::Int {
            value: narrow_int(!i128::from(value), ty),
            ty,
        }),
        _ => None,
    }
}

fn eval_binary(op: BinaryOp, left: ConstValue, right: ConstValue) -> Option<ConstValue> {
    // String concatenation applies whenever either side is a string.
    if op == BinaryOp::Add
        && (matches!(left, ConstValue::Str(_)) || matches!(right, ConstValue::Str(_)))
    {
        return Some(ConstValue::Str(format!("{left}{right}")));
    }

    match (left, right) {
        (ConstValue::Bool(l), ConstValue::Bool(r)) => {
            let result = match op {
                BinaryOp::And => l && r,
                BinaryOp::Or => l || r,
                BinaryOp::Eq => l == r,
                BinaryOp::Ne => l != r,
                _ => return None,
            };
            Some(ConstValue::Bool(result))
        }

        (ConstValue::Char(l), ConstValue::Char(r)) => {
            let result = match op {
                BinaryOp::Eq => l == r,
                BinaryOp::Ne => l != r,
                BinaryOp::Lt => l < r,
                BinaryOp::Le => l <= r,
                BinaryOp::Gt => l > r,
                BinaryOp::Ge => l >= r,
                _ => return None,
            };
            Some(ConstValue::Bool(result))
        }

        (ConstValue::Str(l), ConstValue::Str(r)) => {
            let result = match op {
                BinaryOp::Eq => l == r,
                BinaryOp::Ne => l != r,
                _ => return None,
            };
            Some(ConstValue::Bool(result))
        }

        (
            ConstValue::Int {
                value: l,
                ty: left_ty,
            },
            ConstValue::Int {
                value: r,
                ty: right_ty,
            },
        ) => {
            // Promote to the higher-ranked operand type; arithmetic is
            // performed wide and re-narrowed to that type's native width.
            let ty = promote(left_ty, right_ty);
            let (l, r) = (widen_int(l, left_ty), widen_int(r, right_ty));
            eval_int(op, l, r, ty)
        }

        (ConstValue::Float { value: l, ty: lt }, ConstValue::Float { value: r, ty: rt }) => {
            eval_float(op, l, r, promote(lt, rt))
        }

        // Mixed int/float promotes to the float operand's type.
        (ConstValue::Int { value: l, ty: lt }, ConstValue::Float { value: r, ty: rt }) => {
            eval_float(op, widen_int(l, lt) as f64, r, promote(lt, rt))
        }
        (ConstValue::Float { value: l, ty: lt }, ConstValue::Int { value: r, ty: rt }) => {
            eval_float(op, l, widen_int(r, rt) as f64, promote(lt, rt))
        }

        _ => None,
    }
}

fn eval_int(op: BinaryOp, l: i128, r: i128, ty: Primitive) -> Option<ConstValue> {
    let value = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        // Fails closed: a constant zero divisor means "not a constant",
        // never an error.
        BinaryOp::Div => {
            if r == 0 {
                return None;
            }
            l / r
        }
        BinaryOp::Rem => {
            if r == 0 {
                return None;
            }
            l % r
        }
        BinaryOp::BitAnd => l & r,
        BinaryOp::BitOr => l | r,
        BinaryOp::BitXor => l ^ r,
        BinaryOp::Shl => l << (r & 63),
        BinaryOp::Shr => l >> (r & 63),
        BinaryOp::Eq => return Some(ConstValue::Bool(l == r)),
        BinaryOp::Ne => return Some(ConstValue::Bool(l != r)),
        BinaryOp::Lt => return Some(ConstValue::Bool(l < r)),
        BinaryOp::Le => return Some(ConstValue::Bool(l <= r)),
        BinaryOp::Gt => return Some(ConstValue::Bool(l > r)),
        BinaryOp::Ge => return Some(ConstValue::Bool(l >= r)),
        BinaryOp::And | BinaryOp::Or => return None,
    };
    Some(ConstValue::Int {
        value: narrow_int(value, ty),
        ty,
    })
}

fn eval_float(op: BinaryOp, l: f64, r: f64, ty: Primitive) -> Option<ConstValue> {
    let value = match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l / r,
        BinaryOp::Rem => l % r,
        BinaryOp::Eq => return Some(ConstValue::Bool(l == r)),
        BinaryOp::Ne => return Some(ConstValue::Bool(l != r)),
        BinaryOp::Lt => return Some(ConstValue::Bool(l < r)),
        BinaryOp::Le => return Some(ConstValue::Bool(l <= r)),
        BinaryOp::Gt => return Some(ConstValue::Bool(l > r)),
        BinaryOp::Ge => return Some(ConstValue::Bool(l >= r)),
        _ => return None,
    };
    Some(ConstValue::Float {
        value: narrow_float(value, ty),
        ty,
    })
}

/// The higher-ranked of two numeric operand types.
fn promote(a: Primitive, b: Primitive) -> Primitive {
    match (a.rank(), b.rank()) {
        (Some(ra), Some(rb)) if ra >= rb => a,
        _ => b,
    }
}

/// Sign-aware widening: unsigned types zero-extend from their stored
/// bit pattern.
fn widen_int(value: i64, ty: Primitive) -> i128 {
    match ty {
        Primitive::UInt8 => i128::from(value as u8),
        Primitive::UInt16 => i128::from(value as u16),
        Primitive::UInt32 => i128::from(value as u32),
        Primitive::UInt64 => i128::from(value as u64),
        _ => i128::from(value),
    }
}

/// Re-narrows a wide result to the native representation of `ty`
/// (e.g. 32-bit wraparound for `int32`).
fn narrow_int(value: i128, ty: Primitive) -> i64 {
    match ty {
        Primitive::Bool => i64::from(value != 0),
        Primitive::Char | Primitive::UInt32 => i64::from(value as u32),
        Primitive::Int8 => i64::from(value as i8),
        Primitive::UInt8 => i64::from(value as u8),
        Primitive::Int16 => i64::from(value as i16),
        Primitive::UInt16 => i64::from(value as u16),
        Primitive::Int32 => i64::from(value as i32),
        _ => value as i64,
    }
}

fn narrow_float(value: f64, ty: Primitive) -> f64 {
    if ty == Primitive::Float32 {
        f64::from(value as f32)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_ast::NodeIdGen;
    use lumen_core::{Location, Span};

    fn span() -> Span {
        Span::point(Location::new(1, 1, 0))
    }

    fn fixture() -> (SymbolTable, SemanticContext, NodeIdGen) {
        (SymbolTable::new(), SemanticContext::new(), NodeIdGen::new())
    }

    #[test]
    fn literals_fold_to_themselves() {
        let (table, ctx, mut ids) = fixture();
        let three = Expr::int(&mut ids, span(), 3);
        assert_eq!(eval(&three, &table, &ctx), Some(ConstValue::int32(3)));
    }

    #[test]
    fn addition_folds() {
        let (table, ctx, mut ids) = fixture();
        let lhs = Expr::int(&mut ids, span(), 3);
        let rhs = Expr::int(&mut ids, span(), 4);
        let sum = Expr::binary(&mut ids, span(), BinaryOp::Add, lhs, rhs);
        assert_eq!(eval(&sum, &table, &ctx), Some(ConstValue::int32(7)));
    }

    #[test]
    fn division_by_constant_zero_is_not_constant() {
        let (table, ctx, mut ids) = fixture();
        let lhs = Expr::int(&mut ids, span(), 5);
        let rhs = Expr::int(&mut ids, span(), 0);
        let div = Expr::binary(&mut ids, span(), BinaryOp::Div, lhs, rhs);
        assert_eq!(eval(&div, &table, &ctx), None);

        let lhs = Expr::int(&mut ids, span(), 5);
        let rhs = Expr::int(&mut ids, span(), 0);
        let rem = Expr::binary(&mut ids, span(), BinaryOp::Rem, lhs, rhs);
        assert_eq!(eval(&rem, &table, &ctx), None);
    }

    #[test]
    fn int32_arithmetic_wraps() {
        let result = eval_binary(
            BinaryOp::Add,
            ConstValue::int32(i64::from(i32::MAX)),
            ConstValue::int32(1),
        );
        assert_eq!(result, Some(ConstValue::int32(i64::from(i32::MIN))));
    }

    #[test]
    fn promotion_picks_the_higher_rank() {
        let result = eval_binary(
            BinaryOp::Add,
            ConstValue::int32(1),
            ConstValue::Float {
                value: 2.5,
                ty: Primitive::Float64,
            },
        );
        assert_eq!(
            result,
            Some(ConstValue::Float {
                value: 3.5,
                ty: Primitive::Float64,
            })
        );
    }

    #[test]
    fn string_concatenation_with_either_operand() {
        let result = eval_binary(
            BinaryOp::Add,
            ConstValue::Str("n = ".to_string()),
            ConstValue::int32(4),
        );
        assert_eq!(result, Some(ConstValue::Str("n = 4".to_string())));
    }

    #[test]
    fn comparisons_fold_to_bool() {
        let result = eval_binary(BinaryOp::Lt, ConstValue::int32(2), ConstValue::int32(3));
        assert_eq!(result, Some(ConstValue::Bool(true)));
    }

    #[test]
    fn folding_is_idempotent() {
        let (table, ctx, mut ids) = fixture();
        let lhs = Expr::int(&mut ids, span(), 6);
        let rhs = Expr::int(&mut ids, span(), 7);
        let product = Expr::binary(&mut ids, span(), BinaryOp::Mul, lhs, rhs);
        let folded = eval(&product, &table, &ctx).unwrap();

        // Re-evaluating the folded result as a literal gives it back.
        let ConstValue::Int { value, .. } = folded.clone() else {
            panic!("expected an integer");
        };
        let literal = Expr::int(&mut ids, span(), value);
        assert_eq!(eval(&literal, &table, &ctx), Some(folded));
    }

    #[test]
    fn mutable_bindings_are_not_constant() {
        let (mut table, mut ctx, mut ids) = fixture();
        let global = table.global();
        let sym = table
            .define(
                global,
                crate::symbol::Symbol::var(
                    "x",
                    lumen_ast::Modifiers::new(),
                    None,
                    lumen_core::type_system::TypeId::INT32,
                    true,
                ),
            )
            .unwrap();
        table.set_var_value(sym, ConstValue::int32(9));

        let ident = Expr::ident(&mut ids, span(), "x");
        ctx.set_symbol(ident.id, sym);
        assert_eq!(eval(&ident, &table, &ctx), None);
    }
}
