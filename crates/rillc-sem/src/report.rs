//! The diagnostics sink.
//!
//! Thin typed layer between the analyzer and the [`Handler`]: one method
//! per diagnostic shape, each rendering the involved types in declarator
//! syntax and tagging a stable code. The handler keeps the counts.

use rillc_ast::{DeclKind, SymbolTable, Type};
use rillc_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span, Symbol};

/// Typed reporting primitives over a diagnostic handler
pub struct Reporter<'a> {
    handler: &'a Handler,
}

impl<'a> Reporter<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    fn error(&self, span: Span, code: DiagnosticCode, message: String) {
        DiagnosticBuilder::error(message)
            .span(span)
            .code(code)
            .emit(self.handler);
    }

    /// A context requires a class of types (numeric, pointer, condition, ...)
    pub fn type_expected(&self, span: Span, what: &str, found: &Type, syms: &SymbolTable) {
        self.error(
            span,
            DiagnosticCode::E_TYPE_EXPECTED,
            format!("expected a {what} type, found `{}`", found.render(syms)),
        );
    }

    /// A context requires a specific type (return value, initializer)
    pub fn type_expected_specific(
        &self,
        span: Span,
        context: &str,
        expected: &Type,
        found: &Type,
        syms: &SymbolTable,
    ) {
        self.error(
            span,
            DiagnosticCode::E_TYPE_EXPECTED_SPECIFIC,
            format!(
                "{context} expects `{}`, found `{}`",
                expected.render(syms),
                found.render(syms)
            ),
        );
    }

    /// An operator applied to a type outside its domain
    pub fn operator_type(&self, span: Span, op: &str, ty: &Type, syms: &SymbolTable) {
        self.error(
            span,
            DiagnosticCode::E_OPERATOR_TYPE,
            format!("operator `{op}` cannot be applied to `{}`", ty.render(syms)),
        );
    }

    /// The target of `=`, `++`, `--`, `&` must be addressable
    pub fn lvalue_required(&self, span: Span) {
        self.error(
            span,
            DiagnosticCode::E_LVALUE_REQUIRED,
            "l-value required".to_string(),
        );
    }

    /// Two expressions whose types must be compatible are not
    pub fn mismatch(&self, span: Span, left: &Type, right: &Type, syms: &SymbolTable) {
        self.error(
            span,
            DiagnosticCode::E_MISMATCH,
            format!(
                "incompatible types: `{}` and `{}`",
                left.render(syms),
                right.render(syms)
            ),
        );
    }

    /// Wrong number of arguments, fields, or initializer elements
    pub fn degree(&self, span: Span, what: &str, expected: usize, found: usize) {
        self.error(
            span,
            DiagnosticCode::E_DEGREE,
            format!("wrong number of {what}: expected {expected}, found {found}"),
        );
    }

    /// An argument does not fit its parameter type (1-based index)
    pub fn parameter_mismatch(
        &self,
        span: Span,
        index: usize,
        expected: &Type,
        found: &Type,
        syms: &SymbolTable,
    ) {
        self.error(
            span,
            DiagnosticCode::E_PARAMETER_MISMATCH,
            format!(
                "argument {index} has type `{}`, expected `{}`",
                found.render(syms),
                expected.render(syms)
            ),
        );
    }

    /// Like [`Reporter::parameter_mismatch`], naming the callee
    pub fn named_parameter_mismatch(
        &self,
        span: Span,
        callee: Symbol,
        index: usize,
        expected: &Type,
        found: &Type,
        syms: &SymbolTable,
    ) {
        self.error(
            span,
            DiagnosticCode::E_PARAMETER_MISMATCH,
            format!(
                "argument {index} to `{callee}` has type `{}`, expected `{}`",
                found.render(syms),
                expected.render(syms)
            ),
        );
    }

    /// The field name does not exist in the record
    pub fn unknown_member(&self, span: Span, record: Symbol, field: Symbol) {
        self.error(
            span,
            DiagnosticCode::E_UNKNOWN_MEMBER,
            format!("`{record}` has no member named `{field}`"),
        );
    }

    /// A definition conflicts with the symbol's declared type
    pub fn conflicting_declaration(&self, span: Span, name: Symbol) {
        self.error(
            span,
            DiagnosticCode::E_CONFLICTING_DECLARATION,
            format!("conflicting declaration of `{name}`"),
        );
    }

    /// A name declared twice in the same scope
    pub fn redeclaration(&self, span: Span, name: Symbol) {
        self.error(
            span,
            DiagnosticCode::E_REDECLARATION,
            format!("redeclaration of `{name}`"),
        );
    }

    /// A symbol that does not denote a value used in value position
    pub fn illegal_symbol_as_value(&self, span: Span, kind: DeclKind, name: Symbol) {
        self.error(
            span,
            DiagnosticCode::E_SYMBOL_AS_VALUE,
            format!("cannot use {} `{name}` as a value", kind.describe()),
        );
    }

    /// A node shape the analyzer cannot dispatch; a collaborator bug
    pub fn internal(&self, span: Span, what: &str) {
        self.error(
            span,
            DiagnosticCode::E_INTERNAL,
            format!("internal: cannot analyze this {what}"),
        );
    }

    /// Explicit conversion between pointer and integer
    pub fn pointer_int_cast(&self, span: Span, from: &Type, to: &Type, syms: &SymbolTable) {
        DiagnosticBuilder::warning(format!(
            "cast between pointer and integer: `{}` to `{}`",
            from.render(syms),
            to.render(syms)
        ))
        .span(span)
        .code(DiagnosticCode::W_POINTER_INT_CAST)
        .emit(self.handler);
    }
}
