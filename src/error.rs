//! Error types for normalization and proof search.
//!
//! This module defines [`ProverError`], which captures the two failure
//! modes that are real errors rather than routine negative signals (a
//! failed unification or an empty proof search are not errors; see the
//! crate-level docs).

use std::fmt;

use crate::clause::Clause;

/// Errors that can occur while normalizing a clause or searching for a proof.
#[derive(Debug, Clone, PartialEq)]
pub enum ProverError {
    /// An unrecognized clause shape was encountered during normalization.
    ///
    /// The normalization pipeline operates over a closed enum, so this is
    /// unreachable through the public constructors; it exists because the
    /// internal stages are partial functions over a narrowing subset of
    /// [`Clause`] and a future variant added to that enum without updating
    /// every stage should fail loudly instead of miscompiling a proof.
    Normalization { clause: Clause, stage: &'static str },

    /// An internal invariant was violated: a resolvent was unexpectedly
    /// missing, a variable was unbound where the algorithm guarantees a
    /// binding, or a generated Skolem/rename name collided with an
    /// existing one. Any of these indicates a bug in this crate.
    Invariant(String),
}

impl fmt::Display for ProverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProverError::Normalization { clause, stage } => write!(
                f,
                "normalization bug: unrecognized clause shape in stage '{}': {}",
                stage, clause
            ),
            ProverError::Invariant(msg) => write!(f, "invariant violation: {}", msg),
        }
    }
}

impl std::error::Error for ProverError {}

/// Result type for fallible prover operations.
pub type ProverResult<T> = Result<T, ProverError>;
