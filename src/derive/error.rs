use thiserror::Error;

/// Failures raised by an [`AddressDeriver`](super::AddressDeriver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("derivation failed: {reason}")]
    Failed { reason: String },
}

impl DerivationError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}
