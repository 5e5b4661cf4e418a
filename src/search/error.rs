use std::time::Duration;

use thiserror::Error;

use crate::derive::DerivationError;
use crate::phrase::ValidationError;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Derivation(#[from] DerivationError),

    #[error("derivation exceeded its budget of {} ms", .budget.as_millis())]
    Timeout { budget: Duration },

    #[error("a search session is already running")]
    AlreadyRunning,

    #[error("evaluation task failed: {0}")]
    TaskFailed(String),
}

pub type SearchResult<T> = Result<T, SearchError>;
