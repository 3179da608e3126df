//! rillc-util - Foundation types for the Rill compiler.
//!
//! This crate carries the infrastructure every phase of `rillc` leans on:
//!
//! - [`span`]: source locations (`Span`), threaded through every tree node
//!   and diagnostic.
//! - [`symbol`]: interned identifiers (`Symbol`), 4-byte handles into a
//!   global string table.
//! - [`diagnostic`]: the error/warning sink (`Handler`), the fluent
//!   [`diagnostic::DiagnosticBuilder`], and stable diagnostic codes.
//! - [`index_vec`]: typed indices (`Idx`, `IndexVec`) so that handles from
//!   different tables cannot be mixed up.
//! - [`error`]: phase-level error types.
//!
//! Everything here is a zero-cost convention rather than a framework: a
//! `Span` is a few plain words, a `Symbol` is a `u32`, and a typed index
//! compiles to the raw integer it wraps.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use error::PhaseError;
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;

// Re-export the hash map flavor used across the compiler.
pub use rustc_hash::{FxHashMap, FxHashSet};
