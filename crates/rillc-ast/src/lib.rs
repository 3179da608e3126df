//! rillc-ast - Front-end tree model for the Rill compiler.
//!
//! This crate defines the data the front end trades in:
//!
//! - [`ast`]: the abstract syntax tree the parser produces. Expression
//!   nodes carry two slots the semantic phase fills in: the derived type
//!   and, for identifier and member nodes, the resolved symbol.
//! - [`op`]: operator kinds. The parser resolves operator spellings once;
//!   everything downstream dispatches on the enum, never on strings.
//! - [`types`]: the type algebra - owned type trees, derivation
//!   operations, the compatibility relation, sizes, and C-style rendering.
//! - [`symtab`]: the symbol table - declarations keyed by typed [`SymId`]
//!   handles, with the builtin types pre-seeded.
//!
//! The symbol table is built by the declaration collector before semantic
//! analysis runs; the analyzer treats it as read-only except for the
//! compound-literal write-back.

pub mod ast;
pub mod op;
pub mod symtab;
pub mod types;

pub use ast::{Expr, ExprKind, Init, InitKind, Lit, Module, Stmt, StmtKind, TypeExpr};
pub use op::{BinOp, MemberOp, OpClass, UnOp};
pub use symtab::{Builtins, Decl, DeclKind, SymId, SymbolTable, TypeClass};
pub use types::{FnSig, Type, WORD_SIZE};
