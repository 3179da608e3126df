//! The type algebra.
//!
//! Types are owned trees: every payload belongs exclusively to its parent,
//! and `Clone` is the explicit deep duplicate. Node-attached types can
//! therefore be dropped with their node, with no sharing to account for.
//!
//! [`Type::Invalid`] is the error-absorbing bottom of the algebra. Every
//! classification predicate answers `true` on it and every derivation
//! produces it again, so a subexpression that already produced a
//! diagnostic satisfies any enclosing context silently. That single rule
//! is what keeps one root cause at one diagnostic.

use crate::symtab::{DeclKind, SymId, SymbolTable, TypeClass};

/// Pointer and function designator size in bytes
pub const WORD_SIZE: usize = 8;

/// A type in the algebra
///
/// Structural equality is derived: two `Basic`s are equal iff they name
/// the same symbol, and function equality is component-wise (which is
/// exactly what the compatibility relation demands of function models).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// The error-absorbing bottom
    Invalid,
    /// A builtin or named type, by its symbol
    Basic(SymId),
    /// Pointer to a pointee
    Pointer(Box<Type>),
    /// Array of an element type; `None` length means unspecified
    Array(Box<Type>, Option<u32>),
    /// Function signature
    Function(Box<FnSig>),
}

/// A function type's components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnSig {
    /// Return type
    pub ret: Type,
    /// Parameter types, in order
    pub params: Vec<Type>,
    /// Accepts extra arguments past the fixed parameters
    pub variadic: bool,
}

impl Type {
    /// Construct a pointer type
    pub fn pointer(pointee: Type) -> Type {
        Type::Pointer(Box::new(pointee))
    }

    /// Construct an array type
    pub fn array(element: Type, len: Option<u32>) -> Type {
        Type::Array(Box::new(element), len)
    }

    /// Construct a function type
    pub fn function(ret: Type, params: Vec<Type>, variadic: bool) -> Type {
        Type::Function(Box::new(FnSig {
            ret,
            params,
            variadic,
        }))
    }

    /// True for the bottom type
    pub fn is_invalid(&self) -> bool {
        matches!(self, Type::Invalid)
    }

    /// True for the builtin `void`
    pub fn is_void(&self, syms: &SymbolTable) -> bool {
        matches!(self, Type::Basic(id) if *id == syms.builtins().void)
    }

    /// The record symbol, if this is a direct structure type
    pub fn as_record(&self, syms: &SymbolTable) -> Option<SymId> {
        match self {
            Type::Basic(id) if syms.decl(*id).kind == DeclKind::Struct => Some(*id),
            _ => None,
        }
    }

    fn has_class(&self, class: TypeClass, syms: &SymbolTable) -> bool {
        match self {
            Type::Invalid | Type::Pointer(_) => true,
            Type::Basic(id) => syms.decl(*id).classes.contains(class),
            Type::Array(..) | Type::Function(_) => false,
        }
    }

    /// Acceptable to arithmetic operators
    pub fn is_numeric(&self, syms: &SymbolTable) -> bool {
        self.has_class(TypeClass::NUMERIC, syms)
    }

    /// Acceptable to ordering comparisons
    pub fn is_ordinal(&self, syms: &SymbolTable) -> bool {
        self.has_class(TypeClass::ORDINAL, syms)
    }

    /// Acceptable to equality comparisons
    pub fn is_equality(&self, syms: &SymbolTable) -> bool {
        self.has_class(TypeClass::EQUALITY, syms)
    }

    /// Acceptable as an assignment operand
    pub fn is_assignable(&self, syms: &SymbolTable) -> bool {
        self.has_class(TypeClass::ASSIGN, syms)
    }

    /// Acceptable as a branch or loop condition
    pub fn is_condition(&self, syms: &SymbolTable) -> bool {
        self.has_class(TypeClass::CONDITION, syms)
    }

    /// Acceptable to `*` and `[]`; arrays do not count, they only decay
    /// inside compatibility checks
    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Invalid | Type::Pointer(_))
    }

    /// Acceptable as a call target: a function, or a pointer to one
    pub fn is_callable(&self) -> bool {
        match self {
            Type::Invalid | Type::Function(_) => true,
            Type::Pointer(p) => matches!(p.as_ref(), Type::Function(_) | Type::Invalid),
            _ => false,
        }
    }

    /// Duplicate for a type-preserving unary operation
    pub fn derive_from(&self) -> Type {
        self.clone()
    }

    /// Unify two operand types, left-biased.
    ///
    /// Requires `self` compatible with `other`; yields `Invalid` when the
    /// precondition fails or either input is already `Invalid`.
    pub fn derive_from_two(&self, other: &Type, syms: &SymbolTable) -> Type {
        if self.is_invalid() || other.is_invalid() {
            return Type::Invalid;
        }
        if self.compatible(other, syms) {
            self.clone()
        } else {
            Type::Invalid
        }
    }

    /// A single type standing for two arms: structural equality wins,
    /// otherwise fall back to [`Type::derive_from_two`]
    pub fn derive_unified(&self, other: &Type, syms: &SymbolTable) -> Type {
        if self == other {
            self.clone()
        } else {
            self.derive_from_two(other, syms)
        }
    }

    /// The element behind a pointer or array
    pub fn derive_base(&self) -> Type {
        match self {
            Type::Pointer(inner) | Type::Array(inner, _) => (**inner).clone(),
            _ => Type::Invalid,
        }
    }

    /// Pointer to a duplicate of this type
    pub fn derive_pointer(&self) -> Type {
        if self.is_invalid() {
            Type::Invalid
        } else {
            Type::pointer(self.clone())
        }
    }

    /// The return type of a function, looking through one level of
    /// pointer so function pointers are transparently callable
    pub fn derive_return(&self) -> Type {
        match self {
            Type::Function(sig) => sig.ret.clone(),
            Type::Pointer(p) => match p.as_ref() {
                Type::Function(sig) => sig.ret.clone(),
                _ => Type::Invalid,
            },
            _ => Type::Invalid,
        }
    }

    /// The compatibility relation: will a value of type `self` do where
    /// `model` is expected?
    ///
    /// Weaker than equality for pointers (`void` pointee absorbs, arrays
    /// decay) and arrays (unspecified lengths match anything); exactly
    /// equality for function models.
    pub fn compatible(&self, model: &Type, syms: &SymbolTable) -> bool {
        if self.is_invalid() || model.is_invalid() {
            return true;
        }
        match model {
            Type::Invalid => true,
            Type::Function(m) => match self {
                Type::Function(a) => {
                    a.params.len() == m.params.len()
                        && a.variadic == m.variadic
                        && a.ret == m.ret
                        && a.params == m.params
                }
                _ => false,
            },
            Type::Pointer(pointee) => match self {
                Type::Pointer(elem) | Type::Array(elem, _) => {
                    pointee.is_void(syms) || elem.compatible(pointee, syms)
                }
                _ => false,
            },
            Type::Array(m_elem, m_len) => match self {
                Type::Array(a_elem, a_len) => {
                    (m_len.is_none() || a_len.is_none() || a_len == m_len)
                        && a_elem.compatible(m_elem, syms)
                }
                _ => false,
            },
            Type::Basic(m_id) => matches!(self, Type::Basic(a_id) if a_id == m_id),
        }
    }

    /// Storage size in bytes
    pub fn size_of(&self, syms: &SymbolTable) -> usize {
        match self {
            Type::Invalid => 0,
            Type::Basic(id) => syms.decl(*id).size,
            Type::Pointer(_) | Type::Function(_) => WORD_SIZE,
            Type::Array(elem, len) => len.unwrap_or(0) as usize * elem.size_of(syms),
        }
    }

    /// Render in C declarator syntax
    pub fn render(&self, syms: &SymbolTable) -> String {
        self.render_embedded("", syms)
    }

    /// Render with a declarator fragment threaded through the derivations:
    /// pointers prepend `*`, arrays append `[n]` or `[]`, functions wrap
    /// `(embedded)(params)` and recurse on the return type
    pub fn render_embedded(&self, embedded: &str, syms: &SymbolTable) -> String {
        match self {
            Type::Invalid => {
                if embedded.is_empty() {
                    "<invalid>".to_string()
                } else {
                    format!("<invalid> {embedded}")
                }
            }
            Type::Basic(id) => {
                let name = syms.decl(*id).ident.as_str();
                if embedded.is_empty() {
                    name.to_string()
                } else {
                    format!("{name} {embedded}")
                }
            }
            Type::Pointer(inner) => inner.render_embedded(&format!("*{embedded}"), syms),
            Type::Array(inner, len) => {
                let dim = match len {
                    Some(n) => format!("[{n}]"),
                    None => "[]".to_string(),
                };
                // A pointer declarator binds looser than `[]`.
                let fragment = if embedded.starts_with('*') {
                    format!("({embedded}){dim}")
                } else {
                    format!("{embedded}{dim}")
                };
                inner.render_embedded(&fragment, syms)
            }
            Type::Function(sig) => {
                let mut params: Vec<String> =
                    sig.params.iter().map(|p| p.render(syms)).collect();
                if sig.variadic {
                    params.push("...".to_string());
                }
                let fragment = format!("({embedded})({})", params.join(", "));
                sig.ret.render_embedded(&fragment, syms)
            }
        }
    }
}
