//! Expression analysis.
//!
//! One post-order pass: children first, then the node. Every visit stores
//! the derived type on the node and returns a [`ValueResult`] for the
//! parent. The value category travels with the type because the two
//! interact at `&`, `*`, `++`/`--`, assignment, and member access.
//!
//! The single place the traversal is not uniform is member access: the
//! right-hand side of `.`/`->` is a field *name*, and is looked up in the
//! record instead of being visited as a value.

use crate::lower::lower;
use crate::Checker;
use rillc_ast::{BinOp, Expr, ExprKind, Lit, MemberOp, OpClass, SymId, Type, TypeExpr, UnOp};
use rillc_util::{Span, Symbol};

/// The outcome of analyzing one expression: its type and whether it
/// denotes addressable storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueResult {
    pub ty: Type,
    pub lvalue: bool,
}

impl ValueResult {
    /// A transient value of the given type
    pub fn rvalue(ty: Type) -> Self {
        Self { ty, lvalue: false }
    }

    /// The absorbed error result
    pub fn invalid() -> Self {
        Self::rvalue(Type::Invalid)
    }
}

/// One pointer operand, one numeric basic operand, in either order
fn pointer_numeric_mix(left: &Type, right: &Type, syms: &rillc_ast::SymbolTable) -> bool {
    let mix = |p: &Type, n: &Type| {
        matches!(p, Type::Pointer(_)) && matches!(n, Type::Basic(_)) && n.is_numeric(syms)
    };
    mix(left, right) || mix(right, left)
}

impl Checker<'_> {
    /// Analyze an expression, annotate the node, and return its verdict
    pub fn check_expr(&mut self, expr: &mut Expr) -> ValueResult {
        let span = expr.span;
        let mut resolved: Option<SymId> = None;

        let result = match &mut expr.kind {
            ExprKind::Binary { op, lhs, rhs } => {
                let op = *op;
                self.check_binary(op, lhs, rhs, span)
            }
            ExprKind::Unary { op, operand } => {
                let op = *op;
                self.check_unary(op, operand)
            }
            ExprKind::Ternary {
                cond,
                then_val,
                else_val,
            } => self.check_ternary(cond, then_val, else_val, span),
            ExprKind::Member { op, base, field } => {
                let (op, field) = (*op, *field);
                let (result, sym) = self.check_member(op, base, field, span);
                resolved = sym;
                result
            }
            ExprKind::Index { base, index } => self.check_index(base, index),
            ExprKind::Call { callee, args } => self.check_call(callee, args, span),
            ExprKind::Cast { target, operand } => self.check_cast(target, operand, span),
            ExprKind::SizeofExpr(operand) => {
                self.check_expr(operand);
                ValueResult::rvalue(self.syms.ty_int())
            }
            ExprKind::SizeofType(target) => {
                lower(target, self.syms);
                ValueResult::rvalue(self.syms.ty_int())
            }
            ExprKind::Lit(lit) => {
                let lit = *lit;
                if let Lit::Ident(id) = lit {
                    resolved = Some(id);
                }
                self.check_lit(lit, span)
            }
            ExprKind::CompoundLit {
                target,
                init,
                owner,
            } => {
                let owner = *owner;
                let ty = lower(target, self.syms);
                self.check_init(init, &ty);
                self.syms.set_type(owner, ty.clone());
                // Compound literals denote storage.
                ValueResult { ty, lvalue: true }
            }
            ExprKind::Invalid => ValueResult::invalid(),
        };

        if resolved.is_some() {
            expr.sym = resolved;
        }
        expr.ty = Some(result.ty.clone());
        result
    }

    fn check_binary(
        &mut self,
        op: BinOp,
        lhs: &mut Expr,
        rhs: &mut Expr,
        span: Span,
    ) -> ValueResult {
        match op.class() {
            OpClass::Arith => self.check_arith_binary(op, lhs, rhs, span),
            OpClass::Compare => self.check_comparison(op, lhs, rhs, span),
            OpClass::Logical => self.check_logical(lhs, rhs),
            OpClass::Comma => {
                // The left value is computed and discarded.
                self.check_expr(lhs);
                self.check_expr(rhs)
            }
        }
    }

    /// Arithmetic, bitwise, and all assignment forms
    fn check_arith_binary(
        &mut self,
        op: BinOp,
        lhs: &mut Expr,
        rhs: &mut Expr,
        span: Span,
    ) -> ValueResult {
        let left = self.check_expr(lhs);
        let right = self.check_expr(rhs);

        if op.is_arith() {
            if !left.ty.is_numeric(self.syms) {
                self.reporter
                    .type_expected(lhs.span, "numeric", &left.ty, self.syms);
            } else if !right.ty.is_numeric(self.syms) {
                self.reporter
                    .type_expected(rhs.span, "numeric", &right.ty, self.syms);
            }
        }

        if op.is_assignment() {
            if !left.ty.is_assignable(self.syms) {
                self.reporter
                    .type_expected(lhs.span, "assignable", &left.ty, self.syms);
            } else if !right.ty.is_assignable(self.syms) {
                self.reporter
                    .type_expected(rhs.span, "assignable", &right.ty, self.syms);
            }
            if !left.lvalue {
                self.reporter.lvalue_required(lhs.span);
            }
        }

        let ty = if left.ty.compatible(&right.ty, self.syms) {
            left.ty.derive_from_two(&right.ty, self.syms)
        } else if op.is_arith() && pointer_numeric_mix(&left.ty, &right.ty, self.syms) {
            // Pointer arithmetic: the numeric bit on a pointer admits a
            // numeric partner, and the pointer side carries the result.
            if left.ty.is_pointer() {
                left.ty.derive_from()
            } else {
                right.ty.derive_from()
            }
        } else {
            self.reporter.mismatch(span, &left.ty, &right.ty, self.syms);
            Type::Invalid
        };
        // Assignments and arithmetic both yield transient values.
        ValueResult::rvalue(ty)
    }

    fn check_comparison(
        &mut self,
        op: BinOp,
        lhs: &mut Expr,
        rhs: &mut Expr,
        span: Span,
    ) -> ValueResult {
        let left = self.check_expr(lhs);
        let right = self.check_expr(rhs);

        if op.is_ordinal_cmp() {
            if !left.ty.is_ordinal(self.syms) {
                self.reporter
                    .type_expected(lhs.span, "ordered", &left.ty, self.syms);
            } else if !right.ty.is_ordinal(self.syms) {
                self.reporter
                    .type_expected(rhs.span, "ordered", &right.ty, self.syms);
            }
        } else if !left.ty.is_equality(self.syms) {
            self.reporter
                .type_expected(lhs.span, "equality-comparable", &left.ty, self.syms);
        } else if !right.ty.is_equality(self.syms) {
            self.reporter
                .type_expected(rhs.span, "equality-comparable", &right.ty, self.syms);
        }

        if !left.ty.compatible(&right.ty, self.syms) {
            self.reporter.mismatch(span, &left.ty, &right.ty, self.syms);
        }
        ValueResult::rvalue(self.syms.ty_bool())
    }

    fn check_logical(&mut self, lhs: &mut Expr, rhs: &mut Expr) -> ValueResult {
        let left = self.check_expr(lhs);
        let right = self.check_expr(rhs);

        if !left.ty.is_condition(self.syms) {
            self.reporter
                .type_expected(lhs.span, "condition", &left.ty, self.syms);
        } else if !right.ty.is_condition(self.syms) {
            self.reporter
                .type_expected(rhs.span, "condition", &right.ty, self.syms);
        }
        ValueResult::rvalue(self.syms.ty_bool())
    }

    fn check_unary(&mut self, op: UnOp, operand: &mut Expr) -> ValueResult {
        let inner = self.check_expr(operand);
        match op {
            UnOp::Plus | UnOp::Neg | UnOp::PreInc | UnOp::PreDec | UnOp::BitNot => {
                let numeric = inner.ty.is_numeric(self.syms);
                if !numeric {
                    self.reporter
                        .type_expected(operand.span, "numeric", &inner.ty, self.syms);
                }
                if matches!(op, UnOp::PreInc | UnOp::PreDec) && !inner.lvalue {
                    self.reporter.lvalue_required(operand.span);
                }
                ValueResult::rvalue(if numeric {
                    inner.ty.derive_from()
                } else {
                    Type::Invalid
                })
            }
            UnOp::Not => {
                if !inner.ty.is_condition(self.syms) {
                    self.reporter
                        .type_expected(operand.span, "condition", &inner.ty, self.syms);
                }
                ValueResult::rvalue(self.syms.ty_bool())
            }
            UnOp::Deref => {
                if !inner.ty.is_pointer() {
                    self.reporter
                        .type_expected(operand.span, "pointer", &inner.ty, self.syms);
                    return ValueResult {
                        ty: Type::Invalid,
                        lvalue: true,
                    };
                }
                // Dereference names the pointed-to storage.
                ValueResult {
                    ty: inner.ty.derive_base(),
                    lvalue: true,
                }
            }
            UnOp::AddrOf => {
                if !inner.lvalue {
                    self.reporter.lvalue_required(operand.span);
                }
                ValueResult::rvalue(inner.ty.derive_pointer())
            }
        }
    }

    fn check_ternary(
        &mut self,
        cond: &mut Expr,
        then_val: &mut Expr,
        else_val: &mut Expr,
        span: Span,
    ) -> ValueResult {
        let c = self.check_expr(cond);
        if !c.ty.is_condition(self.syms) {
            self.reporter
                .type_expected(cond.span, "condition", &c.ty, self.syms);
        }

        let then_arm = self.check_expr(then_val);
        let else_arm = self.check_expr(else_val);

        if then_arm.ty.compatible(&else_arm.ty, self.syms) {
            ValueResult {
                ty: then_arm.ty.derive_unified(&else_arm.ty, self.syms),
                lvalue: then_arm.lvalue && else_arm.lvalue,
            }
        } else {
            self.reporter
                .mismatch(span, &then_arm.ty, &else_arm.ty, self.syms);
            ValueResult::invalid()
        }
    }

    fn check_member(
        &mut self,
        op: MemberOp,
        base: &mut Expr,
        field: Symbol,
        span: Span,
    ) -> (ValueResult, Option<SymId>) {
        let b = self.check_expr(base);

        let record = match op {
            MemberOp::Dot => {
                if b.ty.is_invalid() {
                    None
                } else if let Some(record) = b.ty.as_record(self.syms) {
                    Some(record)
                } else {
                    self.reporter
                        .type_expected(base.span, "structure", &b.ty, self.syms);
                    None
                }
            }
            MemberOp::Arrow => match &b.ty {
                Type::Invalid => None,
                Type::Pointer(pointee) if pointee.is_invalid() => None,
                Type::Pointer(pointee) => {
                    if let Some(record) = pointee.as_record(self.syms) {
                        Some(record)
                    } else {
                        self.reporter
                            .type_expected(base.span, "structure pointer", &b.ty, self.syms);
                        None
                    }
                }
                _ => {
                    self.reporter
                        .type_expected(base.span, "structure pointer", &b.ty, self.syms);
                    None
                }
            },
        };

        let Some(record) = record else {
            return (ValueResult::invalid(), None);
        };

        match self.syms.field(record, field) {
            Some(member) => {
                let ty = self.syms.decl(member).ty.clone();
                let lvalue = match op {
                    // Arrow always names storage behind the pointer.
                    MemberOp::Arrow => true,
                    MemberOp::Dot => b.lvalue,
                };
                (ValueResult { ty, lvalue }, Some(member))
            }
            None => {
                let record_name = self.syms.decl(record).ident;
                self.reporter.unknown_member(span, record_name, field);
                (ValueResult::invalid(), None)
            }
        }
    }

    fn check_index(&mut self, base: &mut Expr, index: &mut Expr) -> ValueResult {
        let b = self.check_expr(base);
        let i = self.check_expr(index);

        if !i.ty.is_numeric(self.syms) {
            self.reporter
                .type_expected(index.span, "numeric index", &i.ty, self.syms);
        }

        let ty = if b.ty.is_pointer() || matches!(b.ty, Type::Array(..)) {
            b.ty.derive_base()
        } else {
            self.reporter
                .type_expected(base.span, "array or pointer", &b.ty, self.syms);
            Type::Invalid
        };
        ValueResult {
            ty,
            lvalue: b.lvalue,
        }
    }

    fn check_call(&mut self, callee: &mut Expr, args: &mut [Expr], span: Span) -> ValueResult {
        let c = self.check_expr(callee);

        if !c.ty.is_callable() {
            self.reporter
                .type_expected(callee.span, "callable", &c.ty, self.syms);
            for arg in args.iter_mut() {
                self.check_expr(arg);
            }
            return ValueResult::invalid();
        }

        // The call's type is the return type even when the arguments are
        // wrong; the caller's context should not cascade.
        let ret = c.ty.derive_return();

        let sig = match &c.ty {
            Type::Function(sig) => Some(sig.as_ref().clone()),
            Type::Pointer(pointee) => match pointee.as_ref() {
                Type::Function(sig) => Some(sig.as_ref().clone()),
                _ => None,
            },
            _ => None,
        };
        let Some(sig) = sig else {
            // Absorbed callee; the arguments are still typed.
            for arg in args.iter_mut() {
                self.check_expr(arg);
            }
            return ValueResult::rvalue(ret);
        };

        let arity_ok = if sig.variadic {
            args.len() >= sig.params.len()
        } else {
            args.len() == sig.params.len()
        };
        if !arity_ok {
            self.reporter
                .degree(span, "arguments", sig.params.len(), args.len());
            for arg in args.iter_mut() {
                self.check_expr(arg);
            }
            return ValueResult::rvalue(ret);
        }

        let callee_name = callee.ident_sym().map(|id| self.syms.decl(id).ident);
        for (index, arg) in args.iter_mut().enumerate() {
            let a = self.check_expr(arg);
            // Arguments past the fixed parameters are the variadic tail.
            let Some(param) = sig.params.get(index) else {
                continue;
            };
            if !a.ty.compatible(param, self.syms) {
                match callee_name {
                    Some(name) => self.reporter.named_parameter_mismatch(
                        arg.span,
                        name,
                        index + 1,
                        param,
                        &a.ty,
                        self.syms,
                    ),
                    None => self.reporter.parameter_mismatch(
                        arg.span,
                        index + 1,
                        param,
                        &a.ty,
                        self.syms,
                    ),
                }
            }
        }
        ValueResult::rvalue(ret)
    }

    fn check_cast(&mut self, target: &TypeExpr, operand: &mut Expr, span: Span) -> ValueResult {
        let target_ty = lower(target, self.syms);
        let inner = self.check_expr(operand);
        self.check_cast_shape(&inner.ty, &target_ty, span);
        ValueResult {
            ty: target_ty,
            lvalue: inner.lvalue,
        }
    }

    // Cast policy: arithmetic types convert among themselves, pointers
    // among themselves (arrays decay), and pointer/integer conversions
    // are explicit-only and warned about. Records convert to nothing but
    // themselves; functions and array targets convert to nothing.
    fn check_cast_shape(&mut self, from: &Type, to: &Type, span: Span) {
        if from.is_invalid() || to.is_invalid() || to.is_void(self.syms) {
            return;
        }
        if from.as_record(self.syms).is_some() || to.as_record(self.syms).is_some() {
            if from != to {
                self.reporter.operator_type(span, "cast", from, self.syms);
            }
            return;
        }
        match (from, to) {
            (Type::Basic(_), Type::Basic(_)) => {}
            (Type::Pointer(_) | Type::Array(..), Type::Pointer(_)) => {}
            (Type::Basic(_), Type::Pointer(_)) if from.is_numeric(self.syms) => {
                self.reporter.pointer_int_cast(span, from, to, self.syms);
            }
            (Type::Pointer(_), Type::Basic(_)) if to.is_numeric(self.syms) => {
                self.reporter.pointer_int_cast(span, from, to, self.syms);
            }
            _ => self.reporter.operator_type(span, "cast", from, self.syms),
        }
    }

    fn check_lit(&mut self, lit: Lit, span: Span) -> ValueResult {
        match lit {
            Lit::Int(_) => ValueResult::rvalue(self.syms.ty_int()),
            Lit::Char(_) => ValueResult::rvalue(self.syms.ty_char()),
            Lit::Bool(_) => ValueResult::rvalue(self.syms.ty_bool()),
            // String literals are pointer-valued temporaries, not l-values.
            Lit::Str(_) => ValueResult::rvalue(Type::pointer(self.syms.ty_char())),
            Lit::Ident(id) => {
                let decl = self.syms.decl(id);
                if decl.kind.usable_as_value() {
                    ValueResult {
                        ty: decl.ty.clone(),
                        lvalue: true,
                    }
                } else {
                    let (kind, ident) = (decl.kind, decl.ident);
                    self.reporter.illegal_symbol_as_value(span, kind, ident);
                    ValueResult::invalid()
                }
            }
        }
    }
}
