//! AST node definitions.
//!
//! The parser produces these trees; structural validity is its job, and
//! nothing downstream re-parses. Expression nodes carry two slots the
//! semantic phase writes: `ty` (the derived type) and `sym` (the resolved
//! symbol for identifier and member nodes). Identifier literals arrive
//! with their symbol already resolved by the declaration collector.

use crate::op::{BinOp, MemberOp, UnOp};
use crate::symtab::SymId;
use crate::types::Type;
use rillc_util::{Span, Symbol};

static INVALID: Type = Type::Invalid;

/// One translation unit
#[derive(Debug, Clone)]
pub struct Module {
    pub items: Vec<Stmt>,
}

impl Module {
    pub fn new(items: Vec<Stmt>) -> Self {
        Self { items }
    }
}

/// An expression node
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Derived type, written by the analyzer
    pub ty: Option<Type>,
    /// Resolved symbol for identifier and member nodes, written by the
    /// analyzer
    pub sym: Option<SymId>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span,
            ty: None,
            sym: None,
        }
    }

    /// The derived type; `Invalid` until the analyzer has visited the node
    pub fn ty(&self) -> &Type {
        self.ty.as_ref().unwrap_or(&INVALID)
    }

    /// The symbol behind a plain identifier expression, if any
    pub fn ident_sym(&self) -> Option<SymId> {
        match &self.kind {
            ExprKind::Lit(Lit::Ident(id)) => Some(*id),
            _ => None,
        }
    }

    // Convenience constructors; the parser builds nodes through these.

    pub fn int(value: i64, span: Span) -> Self {
        Self::new(ExprKind::Lit(Lit::Int(value)), span)
    }

    pub fn char_lit(value: u8, span: Span) -> Self {
        Self::new(ExprKind::Lit(Lit::Char(value)), span)
    }

    pub fn bool_lit(value: bool, span: Span) -> Self {
        Self::new(ExprKind::Lit(Lit::Bool(value)), span)
    }

    pub fn str_lit(value: Symbol, span: Span) -> Self {
        Self::new(ExprKind::Lit(Lit::Str(value)), span)
    }

    pub fn ident(sym: SymId, span: Span) -> Self {
        Self::new(ExprKind::Lit(Lit::Ident(sym)), span)
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    }

    pub fn unary(op: UnOp, operand: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    pub fn ternary(cond: Expr, then_val: Expr, else_val: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Ternary {
                cond: Box::new(cond),
                then_val: Box::new(then_val),
                else_val: Box::new(else_val),
            },
            span,
        )
    }

    pub fn member(op: MemberOp, base: Expr, field: Symbol, span: Span) -> Self {
        Self::new(
            ExprKind::Member {
                op,
                base: Box::new(base),
                field,
            },
            span,
        )
    }

    pub fn index(base: Expr, index: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Index {
                base: Box::new(base),
                index: Box::new(index),
            },
            span,
        )
    }

    pub fn call(callee: Expr, args: Vec<Expr>, span: Span) -> Self {
        Self::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        )
    }

    pub fn cast(target: TypeExpr, operand: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Cast {
                target,
                operand: Box::new(operand),
            },
            span,
        )
    }

    pub fn compound_lit(target: TypeExpr, init: Init, owner: SymId, span: Span) -> Self {
        Self::new(
            ExprKind::CompoundLit {
                target,
                init: Box::new(init),
                owner,
            },
            span,
        )
    }
}

/// Expression shapes
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Binary operator application
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Unary operator application
    Unary { op: UnOp, operand: Box<Expr> },
    /// `cond ? then_val : else_val`
    Ternary {
        cond: Box<Expr>,
        then_val: Box<Expr>,
        else_val: Box<Expr>,
    },
    /// Member access. The field is a bare name, never a value; the
    /// analyzer must not visit it as an expression.
    Member {
        op: MemberOp,
        base: Box<Expr>,
        field: Symbol,
    },
    /// `base[index]`
    Index { base: Box<Expr>, index: Box<Expr> },
    /// `callee(args...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// `(T)operand`
    Cast { target: TypeExpr, operand: Box<Expr> },
    /// `sizeof expr`
    SizeofExpr(Box<Expr>),
    /// `sizeof(T)`
    SizeofType(TypeExpr),
    /// A literal
    Lit(Lit),
    /// `(T){...}`; `owner` is the anonymous symbol the parser attached
    CompoundLit {
        target: TypeExpr,
        init: Box<Init>,
        owner: SymId,
    },
    /// A node the parser already gave up on; propagates silently
    Invalid,
}

/// Literal classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lit {
    Int(i64),
    Char(u8),
    Bool(bool),
    Str(Symbol),
    /// Identifier reference, pre-resolved by the declaration collector
    Ident(SymId),
}

/// An initializer: either a brace-enclosed list or a plain value
#[derive(Debug, Clone)]
pub struct Init {
    pub kind: InitKind,
    pub span: Span,
    /// The expected type, written by the analyzer (even on error)
    pub ty: Option<Type>,
}

impl Init {
    pub fn list(items: Vec<Init>, span: Span) -> Self {
        Self {
            kind: InitKind::List(items),
            span,
            ty: None,
        }
    }

    pub fn value(expr: Expr, span: Span) -> Self {
        Self {
            kind: InitKind::Value(expr),
            span,
            ty: None,
        }
    }
}

/// Initializer shapes
#[derive(Debug, Clone)]
pub enum InitKind {
    /// `{ e0, e1, ... }`
    List(Vec<Init>),
    /// A plain expression
    Value(Expr),
}

/// A type expression, as written in source
///
/// Lowered to a [`Type`] by the type analyzer before use.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    /// A type name
    Named(SymId),
    /// `T *`
    Pointer(Box<TypeExpr>),
    /// `T [n]` or `T []`
    Array(Box<TypeExpr>, Option<u32>),
    /// A function declarator
    Function {
        ret: Box<TypeExpr>,
        params: Vec<TypeExpr>,
        variadic: bool,
    },
}

/// A statement node
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement shapes
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `{ ... }`
    Block(Vec<Stmt>),
    /// An imported declaration list
    Using(Vec<Stmt>),
    /// A function implementation: the declared symbol and its body
    Func { sym: SymId, body: Box<Stmt> },
    /// A declaration with an optional initializer
    Decl { sym: SymId, init: Option<Init> },
    /// `if (cond) then_branch [else else_branch]`
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// `while (cond) body`, or `do body while (cond)` when `do_first`
    While {
        cond: Expr,
        body: Box<Stmt>,
        do_first: bool,
    },
    /// `for (init; cond; step) body`; any header slot may be absent
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    /// `return [value]`
    Return(Option<Expr>),
    /// `break`
    Break,
    /// An expression at statement position
    Expr(Expr),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_ty_defaults_to_invalid() {
        let e = Expr::int(1, Span::DUMMY);
        assert!(e.ty.is_none());
        assert_eq!(*e.ty(), Type::Invalid);
    }

    #[test]
    fn test_expr_ty_after_write() {
        let mut e = Expr::int(1, Span::DUMMY);
        e.ty = Some(Type::pointer(Type::Invalid));
        assert_eq!(*e.ty(), Type::pointer(Type::Invalid));
    }

    #[test]
    fn test_ident_sym() {
        let e = Expr::ident(SymId(7), Span::DUMMY);
        assert_eq!(e.ident_sym(), Some(SymId(7)));

        let e = Expr::int(1, Span::DUMMY);
        assert_eq!(e.ident_sym(), None);
    }

    #[test]
    fn test_binary_builder() {
        let span = Span::point(1, 1);
        let e = Expr::binary(
            BinOp::Add,
            Expr::int(1, span),
            Expr::int(2, span),
            span,
        );
        match e.kind {
            ExprKind::Binary { op, .. } => assert_eq!(op, BinOp::Add),
            _ => panic!("expected a binary node"),
        }
    }
}
