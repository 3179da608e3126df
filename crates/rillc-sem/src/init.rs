//! Initializer analysis.
//!
//! Recursive descent over brace initializers, matching element shape
//! against the initialized type: records pair elements with fields in
//! declaration order, arrays check their length bound, scalars take
//! exactly one element. Plain (non-brace) initializers are ordinary value
//! expressions checked for compatibility.
//!
//! The initializer node's type is set to the expected type even on error,
//! so downstream consumers always see a well-formed annotation. Bad
//! elements are reported one by one; a mismatch in element 2 does not
//! silence element 5.

use crate::expr::ValueResult;
use crate::Checker;
use rillc_ast::{Init, InitKind, SymId, Type};
use rillc_util::Span;

impl Checker<'_> {
    /// Analyze an initializer against the type it initializes
    pub fn check_init(&mut self, init: &mut Init, expected: &Type) -> ValueResult {
        init.ty = Some(expected.clone());

        match &mut init.kind {
            InitKind::Value(expr) => {
                let value = self.check_expr(expr);
                if !value.ty.compatible(expected, self.syms) {
                    self.reporter.type_expected_specific(
                        expr.span,
                        "variable initializer",
                        expected,
                        &value.ty,
                        self.syms,
                    );
                }
                ValueResult::rvalue(expected.clone())
            }
            InitKind::List(items) => {
                // An absorbed target initializes silently, no recursion.
                if expected.is_invalid() {
                    return ValueResult::invalid();
                }
                let span = init.span;
                if let Some(record) = expected.as_record(self.syms) {
                    self.check_record_init(items, record, span);
                } else if let Type::Array(element, len) = expected {
                    self.check_array_init(items, element, *len, span);
                } else {
                    self.check_scalar_init(items, expected, span);
                }
                ValueResult::rvalue(expected.clone())
            }
        }
    }

    /// Pair elements with record fields in declaration order
    fn check_record_init(&mut self, items: &mut [Init], record: SymId, span: Span) {
        let fields: Vec<SymId> = self.syms.decl(record).fields.values().copied().collect();
        if items.len() != fields.len() {
            self.reporter
                .degree(span, "fields", fields.len(), items.len());
        }
        for (item, &field) in items.iter_mut().zip(fields.iter()) {
            let field_ty = self.syms.decl(field).ty.clone();
            self.check_element(item, &field_ty, "field initializer");
        }
    }

    /// Elements against the array's element type; a specified length
    /// tolerates fewer elements but not more
    fn check_array_init(&mut self, items: &mut [Init], element: &Type, len: Option<u32>, span: Span) {
        if let Some(n) = len {
            if (n as usize) < items.len() {
                self.reporter.degree(span, "elements", n as usize, items.len());
            }
        }
        for item in items.iter_mut() {
            self.check_element(item, element, "array element initializer");
        }
    }

    /// A braced scalar takes exactly one element
    fn check_scalar_init(&mut self, items: &mut [Init], expected: &Type, span: Span) {
        if items.len() != 1 {
            self.reporter.degree(span, "elements", 1, items.len());
        }
        for item in items.iter_mut() {
            self.check_element(item, expected, "variable initializer");
        }
    }

    /// One element: nested braces recurse, values are analyzed and
    /// checked against the expected type
    fn check_element(&mut self, item: &mut Init, expected: &Type, context: &str) {
        if matches!(item.kind, InitKind::List(_)) {
            self.check_init(item, expected);
            return;
        }
        item.ty = Some(expected.clone());
        if let InitKind::Value(expr) = &mut item.kind {
            let value = self.check_expr(expr);
            if !value.ty.compatible(expected, self.syms) {
                self.reporter.type_expected_specific(
                    expr.span,
                    context,
                    expected,
                    &value.ty,
                    self.syms,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rillc_ast::{Decl, Expr, SymbolTable};
    use rillc_util::{Handler, Symbol};

    fn sp() -> Span {
        Span::DUMMY
    }

    fn value(n: i64) -> Init {
        Init::value(Expr::int(n, sp()), sp())
    }

    fn pair_table() -> (SymbolTable, Type) {
        let mut syms = SymbolTable::new();
        let s = syms.declare(Decl::record(Symbol::intern("Pair")));
        let int = syms.ty_int();
        let a = syms.declare(Decl::var(Symbol::intern("a"), int.clone()));
        let b = syms.declare(Decl::var(Symbol::intern("b"), int));
        syms.add_field(s, a);
        syms.add_field(s, b);
        (syms, Type::Basic(s))
    }

    #[test]
    fn test_record_init_ok() {
        let (mut syms, pair) = pair_table();
        let handler = Handler::new();
        let mut init = Init::list(vec![value(1), value(2)], sp());

        let mut checker = Checker::new(&mut syms, &handler);
        let r = checker.check_init(&mut init, &pair);

        assert_eq!(handler.error_count(), 0);
        assert_eq!(r.ty, pair);
        assert!(!r.lvalue);
        assert_eq!(init.ty, Some(pair));
    }

    #[test]
    fn test_record_init_field_count() {
        let (mut syms, pair) = pair_table();
        let handler = Handler::new();
        let mut init = Init::list(vec![value(1)], sp());

        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut init, &pair);

        assert_eq!(handler.error_count(), 1);
        assert!(handler.diagnostics()[0]
            .message
            .contains("wrong number of fields: expected 2, found 1"));
    }

    #[test]
    fn test_record_init_field_type() {
        let (mut syms, pair) = pair_table();
        let handler = Handler::new();
        let bad = Init::value(Expr::str_lit(Symbol::intern("x"), sp()), sp());
        let mut init = Init::list(vec![value(1), bad], sp());

        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut init, &pair);

        assert_eq!(handler.error_count(), 1);
        assert!(handler.diagnostics()[0].message.contains("field initializer"));
    }

    #[test]
    fn test_array_init_ok_and_short() {
        let mut syms = SymbolTable::new();
        let handler = Handler::new();
        let arr = Type::array(syms.ty_int(), Some(3));

        let mut full = Init::list(vec![value(1), value(2), value(3)], sp());
        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut full, &arr);
        assert_eq!(handler.error_count(), 0);

        // Fewer elements than the length is tolerated.
        let mut short = Init::list(vec![value(1)], sp());
        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut short, &arr);
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn test_array_init_too_many() {
        let mut syms = SymbolTable::new();
        let handler = Handler::new();
        let arr = Type::array(syms.ty_int(), Some(3));
        let mut init = Init::list(vec![value(1), value(2), value(3), value(4)], sp());

        let mut checker = Checker::new(&mut syms, &handler);
        let r = checker.check_init(&mut init, &arr);

        assert_eq!(handler.error_count(), 1);
        assert!(handler.diagnostics()[0]
            .message
            .contains("wrong number of elements: expected 3, found 4"));
        // Analysis continues; the initializer still takes the array type.
        assert_eq!(r.ty, arr);
    }

    #[test]
    fn test_array_unspecified_length_accepts_any_count() {
        let mut syms = SymbolTable::new();
        let handler = Handler::new();
        let arr = Type::array(syms.ty_int(), None);
        let mut init = Init::list(vec![value(1), value(2), value(3)], sp());

        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut init, &arr);
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn test_array_init_reports_every_bad_element() {
        let mut syms = SymbolTable::new();
        let handler = Handler::new();
        let arr = Type::array(syms.ty_int(), Some(3));
        let bad = |s: &str| Init::value(Expr::str_lit(Symbol::intern(s), sp()), sp());
        let mut init = Init::list(vec![bad("a"), value(2), bad("b")], sp());

        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut init, &arr);

        // One diagnostic per bad element, not one per aggregate.
        assert_eq!(handler.error_count(), 2);
    }

    #[test]
    fn test_nested_record_array_init() {
        let (mut syms, pair) = pair_table();
        let handler = Handler::new();
        let arr = Type::array(pair.clone(), Some(2));
        let mut init = Init::list(
            vec![
                Init::list(vec![value(1), value(2)], sp()),
                Init::list(vec![value(3), value(4)], sp()),
            ],
            sp(),
        );

        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut init, &arr);
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn test_scalar_brace_init() {
        let mut syms = SymbolTable::new();
        let handler = Handler::new();
        let int = syms.ty_int();

        let mut one = Init::list(vec![value(5)], sp());
        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut one, &int);
        assert_eq!(handler.error_count(), 0);

        let mut two = Init::list(vec![value(5), value(6)], sp());
        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut two, &int);
        assert_eq!(handler.error_count(), 1);
        assert!(handler.diagnostics()[0]
            .message
            .contains("wrong number of elements: expected 1, found 2"));
    }

    #[test]
    fn test_plain_value_init() {
        let mut syms = SymbolTable::new();
        let handler = Handler::new();
        let int = syms.ty_int();

        let mut ok = value(5);
        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut ok, &int);
        assert_eq!(handler.error_count(), 0);

        let mut bad = Init::value(Expr::str_lit(Symbol::intern("x"), sp()), sp());
        let mut checker = Checker::new(&mut syms, &handler);
        checker.check_init(&mut bad, &int);
        assert_eq!(handler.error_count(), 1);
        assert!(handler.diagnostics()[0].message.contains("variable initializer"));
    }

    #[test]
    fn test_invalid_target_is_silent() {
        let mut syms = SymbolTable::new();
        let handler = Handler::new();
        let mut init = Init::list(vec![value(1), value(2)], sp());

        let mut checker = Checker::new(&mut syms, &handler);
        let r = checker.check_init(&mut init, &Type::Invalid);

        assert_eq!(handler.error_count(), 0);
        assert_eq!(r.ty, Type::Invalid);
        assert_eq!(init.ty, Some(Type::Invalid));
    }
}
