//! Type expression lowering.
//!
//! Turns the parser's written-out type expressions into algebra types.
//! Invoked from casts, `sizeof(T)`, and compound literals, and by
//! declaration analysis.

use rillc_ast::{DeclKind, SymbolTable, Type, TypeExpr};

/// Lower a type expression to a type
///
/// A name that does not denote a type lowers to `Invalid`; the symbol
/// collector has already reported it.
pub fn lower(expr: &TypeExpr, syms: &SymbolTable) -> Type {
    match expr {
        TypeExpr::Named(id) => match syms.decl(*id).kind {
            DeclKind::Type | DeclKind::Struct => Type::Basic(*id),
            _ => Type::Invalid,
        },
        TypeExpr::Pointer(inner) => Type::pointer(lower(inner, syms)),
        TypeExpr::Array(inner, len) => Type::array(lower(inner, syms), *len),
        TypeExpr::Function {
            ret,
            params,
            variadic,
        } => Type::function(
            lower(ret, syms),
            params.iter().map(|p| lower(p, syms)).collect(),
            *variadic,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rillc_ast::{Decl, SymbolTable};
    use rillc_util::Symbol;

    #[test]
    fn test_lower_named() {
        let syms = SymbolTable::new();
        let int_name = syms.builtins().int;
        assert_eq!(lower(&TypeExpr::Named(int_name), &syms), syms.ty_int());
    }

    #[test]
    fn test_lower_non_type_name() {
        let mut syms = SymbolTable::new();
        let ty = syms.ty_int();
        let x = syms.declare(Decl::var(Symbol::intern("x"), ty));
        assert_eq!(lower(&TypeExpr::Named(x), &syms), Type::Invalid);
    }

    #[test]
    fn test_lower_compound() {
        let syms = SymbolTable::new();
        let int_name = syms.builtins().int;
        let expr = TypeExpr::Pointer(Box::new(TypeExpr::Array(
            Box::new(TypeExpr::Named(int_name)),
            Some(3),
        )));
        assert_eq!(
            lower(&expr, &syms),
            Type::pointer(Type::array(syms.ty_int(), Some(3)))
        );
    }

    #[test]
    fn test_lower_function() {
        let syms = SymbolTable::new();
        let b = syms.builtins();
        let expr = TypeExpr::Function {
            ret: Box::new(TypeExpr::Named(b.void)),
            params: vec![TypeExpr::Named(b.int)],
            variadic: true,
        };
        assert_eq!(
            lower(&expr, &syms),
            Type::function(syms.ty_void(), vec![syms.ty_int()], true)
        );
    }
}
