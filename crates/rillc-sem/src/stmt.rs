//! Statement and declaration traversal.
//!
//! The driver walks statements depth-first, hands every value position to
//! the expression analyzer, routes initializers through the initializer
//! analyzer, and tracks the expected return type across function bodies.

use crate::Checker;
use rillc_ast::{Expr, Module, Stmt, StmtKind, Type};

impl Checker<'_> {
    /// Walk one translation unit
    pub fn check_module(&mut self, module: &mut Module) {
        for item in &mut module.items {
            self.check_stmt(item);
        }
    }

    /// Walk one statement
    pub fn check_stmt(&mut self, stmt: &mut Stmt) {
        let span = stmt.span;
        match &mut stmt.kind {
            StmtKind::Block(items) | StmtKind::Using(items) => {
                for item in items {
                    self.check_stmt(item);
                }
            }
            StmtKind::Func { sym, body } => {
                let decl = self.syms.decl(*sym);
                let ident = decl.ident;
                let ret = match &decl.ty {
                    Type::Function(sig) => sig.ret.clone(),
                    _ => {
                        self.reporter.conflicting_declaration(span, ident);
                        // Walk the body anyway; returns inside absorb.
                        Type::Invalid
                    }
                };
                let saved = self.ret_ty.replace(ret);
                self.check_stmt(body);
                self.ret_ty = saved;
            }
            StmtKind::Decl { sym, init } => {
                if let Some(init) = init {
                    let declared = self.syms.decl(*sym).ty.clone();
                    self.check_init(init, &declared);
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.check_condition(cond);
                self.check_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch);
                }
            }
            StmtKind::While {
                cond,
                body,
                do_first,
            } => {
                if *do_first {
                    self.check_stmt(body);
                    self.check_condition(cond);
                } else {
                    self.check_condition(cond);
                    self.check_stmt(body);
                }
            }
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                if let Some(init) = init {
                    self.check_stmt(init);
                }
                if let Some(cond) = cond {
                    self.check_condition(cond);
                }
                if let Some(step) = step {
                    self.check_expr(step);
                }
                self.check_stmt(body);
            }
            StmtKind::Return(value) => {
                let expected = self.ret_ty.clone();
                match (value, expected) {
                    (Some(value), Some(expected)) => {
                        let r = self.check_expr(value);
                        if !r.ty.compatible(&expected, self.syms) {
                            self.reporter.type_expected_specific(
                                value.span,
                                "return value",
                                &expected,
                                &r.ty,
                                self.syms,
                            );
                        }
                    }
                    (None, Some(expected)) => {
                        if !expected.is_invalid() && !expected.is_void(self.syms) {
                            let found = self.syms.ty_void();
                            self.reporter.type_expected_specific(
                                span,
                                "return value",
                                &expected,
                                &found,
                                self.syms,
                            );
                        }
                    }
                    // A return outside any function body is the parser's
                    // mistake; type the value and move on.
                    (Some(value), None) => {
                        self.check_expr(value);
                    }
                    (None, None) => {}
                }
            }
            // The parser guarantees break appears inside a breakable
            // construct.
            StmtKind::Break => {}
            StmtKind::Expr(expr) => {
                self.check_expr(expr);
            }
        }
    }

    fn check_condition(&mut self, cond: &mut Expr) {
        let r = self.check_expr(cond);
        if !r.ty.is_condition(self.syms) {
            self.reporter
                .type_expected(cond.span, "condition", &r.ty, self.syms);
        }
    }
}
