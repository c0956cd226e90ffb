//! Overload definition and call-site selection.

mod common;

use common::{Builder, errors_containing};
use lumen_ast::Decl;
use lumen_core::type_system::TypeId;
use lumen_semantic::{SymbolKind, analyze};

#[test]
fn same_name_different_parameters_coexist() {
    let mut b = Builder::new();
    let f1 = b.func("f", &[("x", "int32")], "void", vec![]);
    let f2 = b.func("f", &[("x", "string")], "void", vec![]);
    let unit = b.unit("main.lm", vec![Decl::Func(f1), Decl::Func(f2)]);

    let analysis = analyze(&[unit]);
    assert!(analysis.succeeded(), "{:?}", analysis.diagnostics);

    let set = analysis
        .table
        .resolve(analysis.table.global(), "f", false)
        .unwrap();
    assert_eq!(analysis.table.overloads(set).len(), 2);
}

#[test]
fn identical_signatures_are_rejected() {
    let mut b = Builder::new();
    let f1 = b.func("f", &[("x", "int32")], "void", vec![]);
    let f2 = b.func("f", &[("y", "int32")], "void", vec![]);
    let unit = b.unit("main.lm", vec![Decl::Func(f1), Decl::Func(f2)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "already declared"), 1);
}

#[test]
fn same_parameters_different_return_conflict() {
    let mut b = Builder::new();
    let f1 = b.func("f", &[("x", "int32")], "void", vec![]);
    let f2 = b.func("f", &[("x", "int32")], "bool", vec![]);
    let unit = b.unit("main.lm", vec![Decl::Func(f1), Decl::Func(f2)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "conflicts"), 1);
}

/// `foo(1, 2.0)` against `foo(int32,int32)` and `foo(float64,float64)`
/// picks the float overload: int32 widens to float64, but float64 never
/// narrows to int32.
#[test]
fn lowest_promotion_cost_wins() {
    let mut b = Builder::new();
    let f_int = b.func("foo", &[("a", "int32"), ("b", "int32")], "void", vec![]);
    let f_float = b.func(
        "foo",
        &[("a", "float64"), ("b", "float64")],
        "void",
        vec![],
    );

    let one = b.int(1);
    let two = b.float(2.0);
    let call = b.call("foo", vec![one, two]);
    let call_id = call.id;
    let main = b.func("main", &[], "void", vec![lumen_ast::Stmt::expr(call)]);

    let unit = b.unit(
        "main.lm",
        vec![Decl::Func(f_int), Decl::Func(f_float), Decl::Func(main)],
    );
    let analysis = analyze(&[unit]);
    assert!(analysis.succeeded(), "{:?}", analysis.diagnostics);

    let chosen = analysis.context.symbol_of(call_id).unwrap();
    match &analysis.table.symbol(chosen).kind {
        SymbolKind::Func { signature, .. } => {
            assert_eq!(signature.params, vec![TypeId::FLOAT64, TypeId::FLOAT64]);
        }
        other => panic!("expected a function symbol, got {other:?}"),
    }
}

/// Permuting the declaration order of non-conflicting overloads never
/// changes which one a call site selects.
#[test]
fn selection_is_independent_of_declaration_order() {
    let build = |flip: bool| {
        let mut b = Builder::new();
        let f_int = b.func("foo", &[("a", "int32")], "void", vec![]);
        let f_float = b.func("foo", &[("a", "float64")], "void", vec![]);
        let arg = b.int(3);
        let call = b.call("foo", vec![arg]);
        let call_id = call.id;
        let main = b.func("main", &[], "void", vec![lumen_ast::Stmt::expr(call)]);

        let mut decls = vec![Decl::Func(f_int), Decl::Func(f_float)];
        if flip {
            decls.reverse();
        }
        decls.push(Decl::Func(main));
        (analyze(&[b.unit("main.lm", decls)]), call_id)
    };

    let (first, first_call) = build(false);
    let (second, second_call) = build(true);
    assert!(first.succeeded() && second.succeeded());

    let params_of = |analysis: &lumen_semantic::Analysis, call| {
        let chosen = analysis.context.symbol_of(call).unwrap();
        match &analysis.table.symbol(chosen).kind {
            SymbolKind::Func { signature, .. } => signature.params.clone(),
            _ => panic!("expected a function symbol"),
        }
    };
    assert_eq!(
        params_of(&first, first_call),
        params_of(&second, second_call)
    );
    assert_eq!(params_of(&first, first_call), vec![TypeId::INT32]);
}

#[test]
fn no_viable_overload_is_reported() {
    let mut b = Builder::new();
    let f = b.func("f", &[("a", "int32")], "void", vec![]);
    let arg = b.string("nope");
    let call = b.call("f", vec![arg]);
    let main = b.func("main", &[], "void", vec![lumen_ast::Stmt::expr(call)]);
    let unit = b.unit("main.lm", vec![Decl::Func(f), Decl::Func(main)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "no overload"), 1);
}

#[test]
fn wrong_argument_count_finds_no_overload() {
    let mut b = Builder::new();
    let f = b.func("f", &[("a", "int32"), ("b", "int32")], "void", vec![]);
    let arg = b.int(1);
    let call = b.call("f", vec![arg]);
    let main = b.func("main", &[], "void", vec![lumen_ast::Stmt::expr(call)]);
    let unit = b.unit("main.lm", vec![Decl::Func(f), Decl::Func(main)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "no overload"), 1);
}

/// Two overloads the arguments convert into at the same total cost are
/// indistinguishable.
#[test]
fn equal_cost_candidates_are_ambiguous() {
    let mut b = Builder::new();
    let f1 = b.func("f", &[("a", "int64"), ("b", "int32")], "void", vec![]);
    let f2 = b.func("f", &[("a", "int32"), ("b", "int64")], "void", vec![]);
    let x = b.int(1);
    let y = b.int(2);
    let call = b.call("f", vec![x, y]);
    let main = b.func("main", &[], "void", vec![lumen_ast::Stmt::expr(call)]);
    let unit = b.unit("main.lm", vec![Decl::Func(f1), Decl::Func(f2), Decl::Func(main)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "ambiguous"), 1);
}

#[test]
fn exact_match_beats_widening() {
    let mut b = Builder::new();
    let f1 = b.func("f", &[("a", "int32")], "void", vec![]);
    let f2 = b.func("f", &[("a", "int64")], "void", vec![]);
    let arg = b.int(1);
    let call = b.call("f", vec![arg]);
    let call_id = call.id;
    let main = b.func("main", &[], "void", vec![lumen_ast::Stmt::expr(call)]);
    let unit = b.unit("main.lm", vec![Decl::Func(f1), Decl::Func(f2), Decl::Func(main)]);

    let analysis = analyze(&[unit]);
    assert!(analysis.succeeded(), "{:?}", analysis.diagnostics);

    let chosen = analysis.context.symbol_of(call_id).unwrap();
    match &analysis.table.symbol(chosen).kind {
        SymbolKind::Func { signature, .. } => {
            assert_eq!(signature.params, vec![TypeId::INT32]);
        }
        _ => panic!("expected a function symbol"),
    }
}

#[test]
fn calling_a_variable_is_not_a_function() {
    let mut b = Builder::new();
    let init = b.int(3);
    let var = b.var("v", Some("int32"), Some(init), false);
    let call = b.call("v", vec![]);
    let main = b.func("main", &[], "void", vec![lumen_ast::Stmt::expr(call)]);
    let unit = b.unit("main.lm", vec![Decl::Var(var), Decl::Func(main)]);

    let analysis = analyze(&[unit]);
    assert!(!analysis.succeeded());
    assert_eq!(errors_containing(&analysis, "not a function"), 1);
}
