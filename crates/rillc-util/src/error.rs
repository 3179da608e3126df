//! Core error types shared by compiler phases.

use thiserror::Error;

/// Failure of a whole compiler phase.
///
/// Phases report individual problems through the diagnostic [`Handler`]
/// and never abort mid-traversal; this type is the summary a caller gets
/// when it asks whether downstream phases may run.
///
/// [`Handler`]: crate::diagnostic::Handler
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhaseError {
    /// The phase completed but reported errors.
    #[error("analysis failed with {errors} error(s)")]
    Failed {
        /// Number of errors the phase reported
        errors: usize,
    },
}
