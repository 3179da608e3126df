//! rillc-sem - Semantic Analyzer & Type Checker
//!
//! ============================================================================
//! WHAT THIS PHASE DOES
//! ============================================================================
//!
//! The parser guarantees shape; this phase derives meaning. In one
//! post-order pass over each translation unit it:
//!
//! 1. Computes a type for every expression node and stores it on the node.
//! 2. Classifies every expression as an l-value (it names storage) or a
//!    transient value, because the two interact: `&x` demands an l-value,
//!    `*p` produces one, an assignment's target must be one.
//! 3. Matches brace initializers against the shape of the initialized
//!    type, field by field and element by element.
//! 4. Reports every type-level mistake through the diagnostic handler,
//!    with the offending types rendered in declarator syntax.
//!
//! ============================================================================
//! ERROR CONTAINMENT
//! ============================================================================
//!
//! Errors are absorbed, never thrown. When a subexpression is wrong, its
//! type becomes `Invalid`, and `Invalid` satisfies every classification
//! predicate and every compatibility check. The enclosing expression
//! proceeds as if its operand were fine, so one root cause produces one
//! diagnostic, not a storm. No traversal ever aborts; the caller reads
//! the error count afterwards to decide whether later phases run.
//!
//! Diagnostic order is observable: failures that need child types are
//! reported post-order, outer failures pre-order, exactly as the
//! traversal encounters them.
//!
//! ============================================================================
//! OWNERSHIP
//! ============================================================================
//!
//! Type trees are owned: each node's derived type belongs to that node
//! alone, and every derivation that reuses a type duplicates it. The one
//! transient the analyzer itself owns is the expected return type of the
//! function body being walked, saved and restored around each body.

pub mod expr;
pub mod init;
pub mod lower;
pub mod report;
pub mod stmt;

#[cfg(test)]
mod edge_cases;

pub use expr::ValueResult;
pub use lower::lower;
pub use report::Reporter;

use rillc_ast::{Module, SymbolTable, Type};
use rillc_util::{Handler, PhaseError};

/// Summary of one analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    /// Errors reported to the handler
    pub errors: usize,
    /// Warnings reported to the handler
    pub warnings: usize,
}

impl Analysis {
    /// Gate for downstream phases: `Err` when any error was reported
    pub fn into_result(self) -> Result<(), PhaseError> {
        if self.errors == 0 {
            Ok(())
        } else {
            Err(PhaseError::Failed {
                errors: self.errors,
            })
        }
    }
}

/// The analyzer's traversal state
///
/// One `Checker` walks one translation unit. It owns nothing shared: the
/// symbol table is borrowed (mutated only for the compound-literal
/// write-back), diagnostics go to the borrowed handler, and the expected
/// return type tracks the function body currently being walked.
pub struct Checker<'a> {
    pub(crate) syms: &'a mut SymbolTable,
    pub(crate) reporter: Reporter<'a>,
    pub(crate) ret_ty: Option<Type>,
}

impl<'a> Checker<'a> {
    /// Create a checker over the given table and diagnostic handler
    pub fn new(syms: &'a mut SymbolTable, handler: &'a Handler) -> Self {
        Self {
            syms,
            reporter: Reporter::new(handler),
            ret_ty: None,
        }
    }
}

/// Analyze one translation unit.
///
/// The module's expression nodes come back annotated with derived types
/// and resolved symbols; diagnostics accumulate in `handler`.
pub fn analyze(module: &mut Module, syms: &mut SymbolTable, handler: &Handler) -> Analysis {
    let mut checker = Checker::new(syms, handler);
    checker.check_module(module);
    Analysis {
        errors: handler.error_count(),
        warnings: handler.warning_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_into_result() {
        assert_eq!(
            Analysis {
                errors: 0,
                warnings: 2
            }
            .into_result(),
            Ok(())
        );
        assert_eq!(
            Analysis {
                errors: 3,
                warnings: 0
            }
            .into_result(),
            Err(PhaseError::Failed { errors: 3 })
        );
    }

    #[test]
    fn test_analyze_empty_module() {
        let mut module = Module::new(Vec::new());
        let mut syms = SymbolTable::new();
        let handler = Handler::new();

        let analysis = analyze(&mut module, &mut syms, &handler);
        assert_eq!(
            analysis,
            Analysis {
                errors: 0,
                warnings: 0
            }
        );
    }
}
