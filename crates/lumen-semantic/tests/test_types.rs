//! Pointers, explicit casts, type tests, and statement checks.

mod common;

use common::{Builder, errors_containing};
use lumen_ast::{Decl, Modifiers, Stmt, StmtKind, TypeExpr};
use lumen_core::type_system::TypeId;
use lumen_semantic::analyze;

#[test]
fn null_initializes_a_pointer() {
    let mut b = Builder::new();
    let init = b.null();
    let ty = b.ptr("int32", false);
    let var = b.var_typed("p", Some(ty), Some(init), false);
    let unit = b.unit("main.lm", vec![Decl::Var(var)]);

    let analysis = analyze(&[unit]);
    assert!(analysis.succeeded(), "{:?}", analysis.diagnostics);
}

#[test]
fn null_does_not_initialize_a_value_type() {
    let mut b = Builder::new();
    let init = b.null();
    let var = b.var("x", Some("int32"), Some(init), false);
    let unit = b.unit("main.lm", vec![Decl::Var(var)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
}

#[test]
fn indexing_a_pointer_yields_the_pointee_as_lvalue() {
    let mut b = Builder::new();
    // func first(p: *int32): int32 { return p[0] }
    let p = b.ident("p");
    let zero = b.int(0);
    let index = b.index(p, zero);
    let ret = Stmt::ret(b.span(), Some(index));

    let param_ty = b.ptr("int32", false);
    let param = b.param("p", param_ty);
    let ret_ty = b.ty("int32");
    let func = b.func_decl("first", Modifiers::new(), vec![param], ret_ty, vec![ret]);
    let unit = b.unit("main.lm", vec![Decl::Func(func)]);

    let analysis = analyze(&[unit]);
    assert!(analysis.succeeded(), "{:?}", analysis.diagnostics);
}

#[test]
fn writing_through_a_const_pointer_is_rejected() {
    let mut b = Builder::new();
    // func wipe(p: *const int32): void { p[0] = 1 }
    let p = b.ident("p");
    let zero = b.int(0);
    let slot = b.index(p, zero);
    let one = b.int(1);
    let assign = b.assign(slot, one);

    let param_ty = b.ptr("int32", true);
    let param = b.param("p", param_ty);
    let ret_ty = TypeExpr::void(b.span());
    let func = b.func_decl(
        "wipe",
        Modifiers::new(),
        vec![param],
        ret_ty,
        vec![Stmt::expr(assign)],
    );
    let unit = b.unit("main.lm", vec![Decl::Func(func)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
}

#[test]
fn indexing_with_a_float_is_rejected() {
    let mut b = Builder::new();
    let s = b.string("abc");
    let idx = b.float(1.5);
    let index = b.index(s, idx);
    let var = b.var("c", None, Some(index), false);
    let unit = b.unit("main.lm", vec![Decl::Var(var)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "index"), 1);
}

#[test]
fn string_indexing_yields_char() {
    let mut b = Builder::new();
    let s = b.string("abc");
    let idx = b.int(1);
    let index = b.index(s, idx);
    let index_id = index.id;
    let var = b.var("c", Some("char"), Some(index), false);
    let unit = b.unit("main.lm", vec![Decl::Var(var)]);

    let analysis = analyze(&[unit]);
    assert!(analysis.succeeded(), "{:?}", analysis.diagnostics);
    assert_eq!(
        analysis.context.type_of(index_id).map(|t| t.id),
        Some(TypeId::CHAR)
    );
}

#[test]
fn explicit_casts_may_narrow() {
    let mut b = Builder::new();
    // var x: int32 = 1.5 as int32
    let value = b.float(1.5);
    let target = b.ty("int32");
    let cast = b.cast(value, target);
    let var = b.var("x", Some("int32"), Some(cast), false);
    let unit = b.unit("main.lm", vec![Decl::Var(var)]);

    let analysis = analyze(&[unit]);
    assert!(analysis.succeeded(), "{:?}", analysis.diagnostics);
}

#[test]
fn casting_between_unrelated_kinds_is_rejected() {
    let mut b = Builder::new();
    let value = b.string("abc");
    let target = b.ty("int32");
    let cast = b.cast(value, target);
    let var = b.var("x", Some("int32"), Some(cast), false);
    let unit = b.unit("main.lm", vec![Decl::Var(var)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
}

#[test]
fn a_type_test_yields_bool() {
    let mut b = Builder::new();
    let value = b.int(1);
    let target = b.ty("int64");
    let test = b.type_test(value, target);
    let test_id = test.id;
    let var = b.var("ok", Some("bool"), Some(test), false);
    let unit = b.unit("main.lm", vec![Decl::Var(var)]);

    let analysis = analyze(&[unit]);
    assert!(analysis.succeeded(), "{:?}", analysis.diagnostics);
    assert_eq!(
        analysis.context.type_of(test_id).map(|t| t.id),
        Some(TypeId::BOOL)
    );
}

#[test]
fn the_cast_target_must_be_a_type_name() {
    let mut b = Builder::new();
    let init = b.int(1);
    let not_a_type = b.var("v", Some("int32"), Some(init), false);
    let value = b.int(2);
    let target = b.ty("v");
    let cast = b.cast(value, target);
    let var = b.var("x", None, Some(cast), false);
    let unit = b.unit("main.lm", vec![Decl::Var(not_a_type), Decl::Var(var)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "expected a type name"), 1);
}

#[test]
fn conditions_must_be_bool() {
    let mut b = Builder::new();
    let cond = b.int(1);
    let body = lumen_ast::Block::empty(b.span());
    let stmt = Stmt {
        span: b.span(),
        kind: StmtKind::If {
            cond,
            then_block: body,
            else_block: None,
        },
    };
    let func = b.func("main", &[], "void", vec![stmt]);
    let unit = b.unit("main.lm", vec![Decl::Func(func)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "condition"), 1);
}

#[test]
fn break_outside_a_loop_is_reported() {
    let mut b = Builder::new();
    let stmt = Stmt {
        span: b.span(),
        kind: StmtKind::Break,
    };
    let func = b.func("main", &[], "void", vec![stmt]);
    let unit = b.unit("main.lm", vec![Decl::Func(func)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "loop"), 1);
}

#[test]
fn break_inside_a_loop_is_fine() {
    let mut b = Builder::new();
    let cond = b.boolean(true);
    let body = lumen_ast::Block::new(
        b.span(),
        vec![Stmt {
            span: b.span(),
            kind: StmtKind::Break,
        }],
    );
    let stmt = Stmt {
        span: b.span(),
        kind: StmtKind::While { cond, body },
    };
    let func = b.func("main", &[], "void", vec![stmt]);
    let unit = b.unit("main.lm", vec![Decl::Func(func)]);

    let analysis = analyze(&[unit]);
    assert!(analysis.succeeded(), "{:?}", analysis.diagnostics);
}
