//! Address derivation boundary.
//!
//! The search pipeline only needs a deterministic `phrase → address` function plus a self-test.
//! Real key derivation plugs in by implementing [`AddressDeriver`]; the crate ships
//! [`FingerprintDeriver`] as the default implementation and a [`MockDeriver`] for tests.
//!
//! Derivation may be slow (hashing, curve arithmetic), so callers run it off the async runtime
//! (see [`Evaluator`](crate::search::Evaluator)).

pub mod error;
pub mod fingerprint;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::DerivationError;
pub use fingerprint::FingerprintDeriver;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockDeriver;

use serde::Serialize;

use crate::phrase::Phrase;

/// Result of a deriver self-test, shaped for the `verify-crypto` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfTestReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SelfTestReport {
    pub fn passed(address: impl Into<String>) -> Self {
        Self {
            success: true,
            test_address: Some(address.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            test_address: None,
            error: Some(error.into()),
        }
    }
}

/// Deterministic passphrase → address function.
///
/// Implementations must return the same address for the same phrase on every call and must not
/// have side effects visible to the search pipeline.
pub trait AddressDeriver: Send + Sync {
    /// Derives the address for `phrase`.
    fn derive(&self, phrase: &Phrase) -> Result<String, DerivationError>;

    /// Verifies the environment can derive addresses.
    fn self_test(&self) -> SelfTestReport;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "deriver"
    }
}

impl<D: AddressDeriver + ?Sized> AddressDeriver for std::sync::Arc<D> {
    fn derive(&self, phrase: &Phrase) -> Result<String, DerivationError> {
        (**self).derive(phrase)
    }

    fn self_test(&self) -> SelfTestReport {
        (**self).self_test()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
