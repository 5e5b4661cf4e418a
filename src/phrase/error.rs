//! Phrase validation error types.

use serde::Serialize;
use thiserror::Error;

/// A single rejected entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidPhrase {
    /// Position in the submitted list (blank entries included).
    pub index: usize,
    /// Number of words actually found.
    pub actual: usize,
}

/// Structural errors raised before any derivation or scoring happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Phrase does not contain the required number of words.
    #[error("phrase must contain exactly {expected} words (found {actual})")]
    WordCount { expected: usize, actual: usize },

    /// Batch contained no non-blank phrases.
    #[error("no phrases provided")]
    EmptyBatch,

    /// One or more batch entries failed structural validation; the whole batch is rejected.
    #[error("{} of {total} phrases do not have exactly {expected} words", .invalid.len())]
    InvalidBatch {
        expected: usize,
        total: usize,
        invalid: Vec<InvalidPhrase>,
    },
}
