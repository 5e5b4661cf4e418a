//! BLAKE3 phrase fingerprints.
//!
//! Produces a stable, address-shaped identifier (`fp` + 32 hex chars, 34 chars total) for each
//! phrase. It satisfies the [`AddressDeriver`] contract so the server runs end to end without a
//! key-derivation backend.

use super::{AddressDeriver, DerivationError, SelfTestReport};
use crate::phrase::{Phrase, validate_single};

/// Prefix of every fingerprint address.
pub const FINGERPRINT_PREFIX: &str = "fp";

/// Number of digest bytes kept (hex-encoded).
pub const FINGERPRINT_BYTES: usize = 16;

const SELF_TEST_PHRASE: &str =
    "abandon ability able about above absent absorb abstract absurd abuse access accident";

/// Domain-separated BLAKE3 fingerprint deriver.
#[derive(Debug, Clone)]
pub struct FingerprintDeriver {
    context: String,
}

impl Default for FingerprintDeriver {
    fn default() -> Self {
        Self::new("qig-recovery fingerprint v1")
    }
}

impl FingerprintDeriver {
    /// Creates a deriver whose output is separated by `context`.
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }

    /// Fingerprints raw text.
    pub fn fingerprint(&self, text: &str) -> String {
        let mut hasher = blake3::Hasher::new_derive_key(&self.context);
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();

        let mut out = String::with_capacity(FINGERPRINT_PREFIX.len() + FINGERPRINT_BYTES * 2);
        out.push_str(FINGERPRINT_PREFIX);
        for byte in &digest.as_bytes()[..FINGERPRINT_BYTES] {
            out.push_str(&format!("{:02x}", byte));
        }
        out
    }
}

impl AddressDeriver for FingerprintDeriver {
    fn derive(&self, phrase: &Phrase) -> Result<String, DerivationError> {
        Ok(self.fingerprint(phrase.as_str()))
    }

    fn self_test(&self) -> SelfTestReport {
        let phrase = match validate_single(SELF_TEST_PHRASE) {
            Ok(p) => p,
            Err(e) => return SelfTestReport::failed(e.to_string()),
        };

        let first = self.derive(&phrase);
        let second = self.derive(&phrase);
        match (first, second) {
            (Ok(a), Ok(b)) if a == b && a.len() == FINGERPRINT_PREFIX.len() + FINGERPRINT_BYTES * 2 => {
                SelfTestReport::passed(a)
            }
            (Ok(_), Ok(_)) => SelfTestReport::failed("derivation is not stable"),
            (Err(e), _) | (_, Err(e)) => SelfTestReport::failed(e.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        "fingerprint"
    }
}
