//! Symbol table - declarations and their classification.
//!
//! The declaration collector runs before semantic analysis and fills this
//! table; the analyzer reads it through [`SymId`] handles. Record fields
//! are kept in an [`IndexMap`] so declaration order and by-name lookup are
//! both O(1) - initializer matching walks fields in declaration order.

use crate::types::Type;
use bitflags::bitflags;
use indexmap::IndexMap;
use rillc_util::{symbol, FxHashMap, Idx, IndexVec, Symbol};

/// Opaque handle to a declaration in the symbol table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymId(pub u32);

impl Idx for SymId {
    fn from_usize(idx: usize) -> Self {
        assert!(idx <= u32::MAX as usize);
        SymId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Classification mask for basic types.
    ///
    /// A basic type's mask says which operator contexts accept it.
    /// Pointers satisfy every class; arrays satisfy none (they only decay
    /// inside compatibility checks).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypeClass: u8 {
        /// Operand of arithmetic operators
        const NUMERIC = 1 << 0;
        /// Operand of ordering comparisons
        const ORDINAL = 1 << 1;
        /// Operand of equality comparisons
        const EQUALITY = 1 << 2;
        /// Target of assignment
        const ASSIGN = 1 << 3;
        /// Usable as a branch/loop condition
        const CONDITION = 1 << 4;

        /// Full arithmetic type (all five classes)
        const ARITH = Self::NUMERIC.bits()
            | Self::ORDINAL.bits()
            | Self::EQUALITY.bits()
            | Self::ASSIGN.bits()
            | Self::CONDITION.bits();
        /// Scalar but not arithmetic (bool)
        const SCALAR = Self::EQUALITY.bits() | Self::ASSIGN.bits() | Self::CONDITION.bits();
    }
}

/// What a declaration names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// A builtin or aliased type name
    Type,
    /// A structure tag
    Struct,
    /// A variable; functions are variables of function type
    Var,
    /// A function parameter
    Param,
    /// An enumeration constant
    EnumConst,
}

impl DeclKind {
    /// Human noun for diagnostics
    pub fn describe(self) -> &'static str {
        match self {
            DeclKind::Type => "type",
            DeclKind::Struct => "structure",
            DeclKind::Var => "variable",
            DeclKind::Param => "parameter",
            DeclKind::EnumConst => "enumeration constant",
        }
    }

    /// True if an identifier of this kind may appear in value position
    pub fn usable_as_value(self) -> bool {
        matches!(self, DeclKind::Var | DeclKind::Param | DeclKind::EnumConst)
    }
}

/// A declaration record
#[derive(Debug, Clone)]
pub struct Decl {
    /// Declared name
    pub ident: Symbol,
    /// What the name denotes
    pub kind: DeclKind,
    /// Declared type
    pub ty: Type,
    /// Record fields, in declaration order (empty unless `kind` is `Struct`)
    pub fields: IndexMap<Symbol, SymId>,
    /// Storage size in bytes (meaningful for basic types)
    pub size: usize,
    /// Classification mask (meaningful for basic types)
    pub classes: TypeClass,
}

impl Decl {
    /// A variable declaration
    pub fn var(ident: Symbol, ty: Type) -> Self {
        Self {
            ident,
            kind: DeclKind::Var,
            ty,
            fields: IndexMap::new(),
            size: 0,
            classes: TypeClass::empty(),
        }
    }

    /// A function parameter declaration
    pub fn param(ident: Symbol, ty: Type) -> Self {
        Self {
            kind: DeclKind::Param,
            ..Self::var(ident, ty)
        }
    }

    /// A function declaration; a function is an identifier whose declared
    /// type is a function type
    pub fn func(ident: Symbol, ty: Type) -> Self {
        Self::var(ident, ty)
    }

    /// An enumeration constant declaration
    pub fn enum_const(ident: Symbol, ty: Type) -> Self {
        Self {
            kind: DeclKind::EnumConst,
            ..Self::var(ident, ty)
        }
    }

    /// A basic type declaration with its classification mask
    pub fn basic(ident: Symbol, size: usize, classes: TypeClass) -> Self {
        Self {
            ident,
            kind: DeclKind::Type,
            ty: Type::Invalid,
            fields: IndexMap::new(),
            size,
            classes,
        }
    }

    /// A structure tag declaration; fields are attached afterwards
    pub fn record(ident: Symbol) -> Self {
        Self {
            ident,
            kind: DeclKind::Struct,
            ty: Type::Invalid,
            fields: IndexMap::new(),
            size: 0,
            classes: TypeClass::empty(),
        }
    }
}

/// Handles of the builtin type symbols
#[derive(Debug, Clone, Copy)]
pub struct Builtins {
    pub void: SymId,
    pub bool_: SymId,
    pub char_: SymId,
    pub int: SymId,
}

/// The symbol table
///
/// Declarations live in an [`IndexVec`] and are addressed by [`SymId`].
/// Top-level names are additionally indexed by identifier for the
/// declaration collector's benefit; the analyzer never resolves names
/// itself (identifier literals arrive pre-resolved).
pub struct SymbolTable {
    decls: IndexVec<SymId, Decl>,
    by_name: FxHashMap<Symbol, SymId>,
    builtins: Builtins,
}

impl SymbolTable {
    /// Create a table seeded with the builtin types
    pub fn new() -> Self {
        let mut decls = IndexVec::new();
        let void = decls.push(Decl::basic(symbol::TY_VOID, 0, TypeClass::empty()));
        let bool_ = decls.push(Decl::basic(symbol::TY_BOOL, 1, TypeClass::SCALAR));
        let char_ = decls.push(Decl::basic(symbol::TY_CHAR, 1, TypeClass::ARITH));
        let int = decls.push(Decl::basic(symbol::TY_INT, 4, TypeClass::ARITH));

        let mut by_name = FxHashMap::default();
        for (id, decl) in decls.iter_enumerated() {
            by_name.insert(decl.ident, id);
        }

        Self {
            decls,
            by_name,
            builtins: Builtins {
                void,
                bool_,
                char_,
                int,
            },
        }
    }

    /// The builtin type handles
    pub fn builtins(&self) -> Builtins {
        self.builtins
    }

    /// Add a declaration, returning its handle
    pub fn declare(&mut self, decl: Decl) -> SymId {
        let ident = decl.ident;
        let id = self.decls.push(decl);
        self.by_name.insert(ident, id);
        id
    }

    /// Look up a top-level name
    pub fn lookup(&self, ident: Symbol) -> Option<SymId> {
        self.by_name.get(&ident).copied()
    }

    /// Read a declaration
    pub fn decl(&self, id: SymId) -> &Decl {
        &self.decls[id]
    }

    /// Number of declarations, builtins included
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Always false; the builtins are seeded at construction
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Replace a declaration's type.
    ///
    /// Used by the declaration collector, and by the analyzer to attach
    /// the derived type of a compound literal to its owning symbol.
    pub fn set_type(&mut self, id: SymId, ty: Type) {
        self.decls[id].ty = ty;
    }

    /// Attach a field to a record, keyed by the field's identifier
    pub fn add_field(&mut self, record: SymId, field: SymId) {
        let ident = self.decls[field].ident;
        self.decls[record].fields.insert(ident, field);
    }

    /// Find a record's field by name
    pub fn field(&self, record: SymId, name: Symbol) -> Option<SymId> {
        self.decls[record].fields.get(&name).copied()
    }

    // Convenience constructors for the builtin types.

    /// The `void` type
    pub fn ty_void(&self) -> Type {
        Type::Basic(self.builtins.void)
    }

    /// The `bool` type
    pub fn ty_bool(&self) -> Type {
        Type::Basic(self.builtins.bool_)
    }

    /// The `char` type
    pub fn ty_char(&self) -> Type {
        Type::Basic(self.builtins.char_)
    }

    /// The `int` type
    pub fn ty_int(&self) -> Type {
        Type::Basic(self.builtins.int)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
