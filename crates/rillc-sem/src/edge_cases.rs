//! Edge case tests for rillc-sem

use crate::Checker;
use rillc_ast::{BinOp, Decl, Expr, SymbolTable, Type, UnOp};
use rillc_util::{Handler, Span, Symbol};

fn sp() -> Span {
    Span::DUMMY
}

// ==================== INVALID POISONING ====================

/// EDGE CASE: a poisoned operand satisfies every enclosing context
#[test]
fn test_edge_poisoned_operand_absorbs_everywhere() {
    let mut syms = SymbolTable::new();
    let handler = Handler::new();
    let s = syms.declare(Decl::record(Symbol::intern("S")));

    // S is a struct tag used as a value: one root cause. Then the bad
    // value flows through arithmetic, comparison, deref, index, and call
    // without another classification diagnostic.
    let bad = || Expr::ident(s, sp());

    let mut checker = Checker::new(&mut syms, &handler);
    let mut e = Expr::unary(
        UnOp::Deref,
        Expr::binary(BinOp::Add, bad(), Expr::int(1, sp()), sp()),
        sp(),
    );
    checker.check_expr(&mut e);
    assert_eq!(handler.error_count(), 1);

    handler.clear();
    let mut checker = Checker::new(&mut syms, &handler);
    let mut e = Expr::call(bad(), vec![Expr::int(1, sp())], sp());
    checker.check_expr(&mut e);
    assert_eq!(handler.error_count(), 1);

    handler.clear();
    let mut checker = Checker::new(&mut syms, &handler);
    let mut e = Expr::index(bad(), Expr::int(0, sp()), sp());
    checker.check_expr(&mut e);
    assert_eq!(handler.error_count(), 1);
}

/// EDGE CASE: deref of an absorbed pointer stays an l-value
#[test]
fn test_edge_deref_of_invalid_is_lvalue() {
    let mut syms = SymbolTable::new();
    let handler = Handler::new();
    let s = syms.declare(Decl::record(Symbol::intern("S")));

    let mut checker = Checker::new(&mut syms, &handler);
    let mut e = Expr::binary(
        BinOp::Assign,
        Expr::unary(UnOp::Deref, Expr::ident(s, sp()), sp()),
        Expr::int(1, sp()),
        sp(),
    );
    checker.check_expr(&mut e);
    // Only the struct-tag root cause; the assignment target is a deref,
    // which names storage even when its type is absorbed.
    assert_eq!(handler.error_count(), 1);
}

// ==================== VALUE CATEGORIES ====================

/// EDGE CASE: assignment results are not l-values, so they cannot chain
/// into address-of
#[test]
fn test_edge_address_of_assignment() {
    let mut syms = SymbolTable::new();
    let handler = Handler::new();
    let ty = syms.ty_int();
    let x = syms.declare(Decl::var(Symbol::intern("x"), ty));

    let mut checker = Checker::new(&mut syms, &handler);
    let assign = Expr::binary(BinOp::Assign, Expr::ident(x, sp()), Expr::int(1, sp()), sp());
    let mut e = Expr::unary(UnOp::AddrOf, assign, sp());
    checker.check_expr(&mut e);

    assert_eq!(handler.error_count(), 1);
    assert!(handler.diagnostics()[0].message.contains("l-value required"));
}

/// EDGE CASE: dot access on a non-l-value record keeps the base's
/// category; arrow always produces an l-value
#[test]
fn test_edge_member_value_category_follows_base() {
    let mut syms = SymbolTable::new();
    let handler = Handler::new();
    let s = syms.declare(Decl::record(Symbol::intern("S")));
    let int = syms.ty_int();
    let a = syms.declare(Decl::var(Symbol::intern("a"), int.clone()));
    syms.add_field(s, a);
    let v = syms.declare(Decl::var(Symbol::intern("v"), Type::Basic(s)));
    let make_ty = Type::function(Type::Basic(s), vec![], false);
    let make = syms.declare(Decl::func(Symbol::intern("make"), make_ty));

    // make().a : the base is a transient record value, so the member is
    // not addressable either.
    let mut checker = Checker::new(&mut syms, &handler);
    let base = Expr::call(Expr::ident(make, sp()), vec![], sp());
    let mut e = Expr::member(rillc_ast::MemberOp::Dot, base, Symbol::intern("a"), sp());
    let r = checker.check_expr(&mut e);
    assert_eq!(handler.error_count(), 0);
    assert!(!r.lvalue);

    // (&v)->a is addressable.
    let mut checker = Checker::new(&mut syms, &handler);
    let base = Expr::unary(UnOp::AddrOf, Expr::ident(v, sp()), sp());
    let mut e = Expr::member(rillc_ast::MemberOp::Arrow, base, Symbol::intern("a"), sp());
    let r = checker.check_expr(&mut e);
    assert_eq!(handler.error_count(), 0);
    assert!(r.lvalue);
}

// ==================== FUNCTIONS ====================

/// EDGE CASE: zero-parameter functions accept only zero arguments
#[test]
fn test_edge_zero_parameter_call() {
    let mut syms = SymbolTable::new();
    let handler = Handler::new();
    let fn_ty = Type::function(syms.ty_int(), vec![], false);
    let f = syms.declare(Decl::func(Symbol::intern("f"), fn_ty));

    let mut checker = Checker::new(&mut syms, &handler);
    let mut e = Expr::call(Expr::ident(f, sp()), vec![], sp());
    checker.check_expr(&mut e);
    assert_eq!(handler.error_count(), 0);

    let mut checker = Checker::new(&mut syms, &handler);
    let mut e = Expr::call(Expr::ident(f, sp()), vec![Expr::int(1, sp())], sp());
    checker.check_expr(&mut e);
    assert_eq!(handler.error_count(), 1);
}

/// EDGE CASE: arity failure still types every argument subtree
#[test]
fn test_edge_arity_failure_still_visits_arguments() {
    let mut syms = SymbolTable::new();
    let handler = Handler::new();
    let s = syms.declare(Decl::record(Symbol::intern("S")));
    let fn_ty = Type::function(syms.ty_int(), vec![], false);
    let f = syms.declare(Decl::func(Symbol::intern("f"), fn_ty));

    // f(S): arity is wrong AND the argument misuses a struct tag; both
    // diagnostics surface.
    let mut checker = Checker::new(&mut syms, &handler);
    let mut e = Expr::call(Expr::ident(f, sp()), vec![Expr::ident(s, sp())], sp());
    checker.check_expr(&mut e);
    assert_eq!(handler.error_count(), 2);
}

/// EDGE CASE: address of a function, then a call through the pointer
#[test]
fn test_edge_function_pointer_round_trip() {
    let mut syms = SymbolTable::new();
    let handler = Handler::new();
    let param = syms.ty_int();
    let fn_ty = Type::function(syms.ty_int(), vec![param], false);
    let f = syms.declare(Decl::func(Symbol::intern("f"), fn_ty.clone()));

    let mut checker = Checker::new(&mut syms, &handler);
    let fp = Expr::unary(UnOp::AddrOf, Expr::ident(f, sp()), sp());
    let mut e = Expr::call(fp, vec![Expr::int(1, sp())], sp());
    let r = checker.check_expr(&mut e);

    assert_eq!(handler.error_count(), 0);
    assert_eq!(r.ty, syms.ty_int());
}

// ==================== ARRAYS ====================

/// EDGE CASE: unspecified array length matches any length, but distinct
/// specified lengths do not match
#[test]
fn test_edge_array_length_compatibility() {
    let syms = SymbolTable::new();
    let n3 = Type::array(syms.ty_int(), Some(3));
    let n5 = Type::array(syms.ty_int(), Some(5));
    let any = Type::array(syms.ty_int(), None);

    assert!(n3.compatible(&any, &syms));
    assert!(any.compatible(&n5, &syms));
    assert!(!n3.compatible(&n5, &syms));
}

/// EDGE CASE: `void *` accepts any pointer or array, including nested
/// pointer types
#[test]
fn test_edge_void_pointer_model() {
    let syms = SymbolTable::new();
    let void_p = Type::pointer(syms.ty_void());

    assert!(Type::pointer(syms.ty_int()).compatible(&void_p, &syms));
    assert!(Type::array(syms.ty_bool(), Some(2)).compatible(&void_p, &syms));
    assert!(Type::pointer(void_p.clone()).compatible(&void_p, &syms));
    // The absorption is one-way.
    assert!(!void_p.compatible(&Type::pointer(syms.ty_int()), &syms));
}

/// EDGE CASE: indexing a pointer inherits the pointer variable's own
/// category, so `p[0]` on a pointer variable is assignable
#[test]
fn test_edge_index_pointer_assignable() {
    let mut syms = SymbolTable::new();
    let handler = Handler::new();
    let ty = Type::pointer(syms.ty_int());
    let p = syms.declare(Decl::var(Symbol::intern("p"), ty));

    let mut checker = Checker::new(&mut syms, &handler);
    let target = Expr::index(Expr::ident(p, sp()), Expr::int(0, sp()), sp());
    let mut e = Expr::binary(BinOp::Assign, target, Expr::int(5, sp()), sp());
    checker.check_expr(&mut e);
    assert_eq!(handler.error_count(), 0);
}
