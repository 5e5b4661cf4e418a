//! Scriptable deriver for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{AddressDeriver, DerivationError, SelfTestReport};
use crate::phrase::Phrase;

type CallHook = Box<dyn Fn(usize, &Phrase) + Send + Sync>;

/// Deriver with per-phrase overrides, injected failures, optional latency and a call counter.
///
/// Phrases without an override derive to `mock` followed by a BLAKE3-based suffix, so unrelated
/// phrases never collide with a configured target.
#[derive(Default)]
pub struct MockDeriver {
    overrides: HashMap<String, String>,
    failures: HashSet<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    on_call: Option<CallHook>,
}

impl std::fmt::Debug for MockDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDeriver")
            .field("overrides", &self.overrides.len())
            .field("failures", &self.failures.len())
            .field("delay", &self.delay)
            .field("calls", &self.calls())
            .finish()
    }
}

impl MockDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `phrase` derive to `address`.
    pub fn with_address(mut self, phrase: &str, address: &str) -> Self {
        self.overrides
            .insert(phrase.trim().to_string(), address.to_string());
        self
    }

    /// Makes derivation of `phrase` fail.
    pub fn failing_on(mut self, phrase: &str) -> Self {
        self.failures.insert(phrase.trim().to_string());
        self
    }

    /// Blocks the calling thread for `delay` on every derivation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Runs `hook` with the 1-based call number before each derivation.
    pub fn on_call<F>(mut self, hook: F) -> Self
    where
        F: Fn(usize, &Phrase) + Send + Sync + 'static,
    {
        self.on_call = Some(Box::new(hook));
        self
    }

    /// Number of `derive` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The address a phrase without an override derives to.
    pub fn default_address(text: &str) -> String {
        let hex = blake3::hash(text.trim().as_bytes()).to_hex();
        format!("mock{}", &hex.as_str()[..28])
    }
}

impl AddressDeriver for MockDeriver {
    fn derive(&self, phrase: &Phrase) -> Result<String, DerivationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(hook) = &self.on_call {
            hook(call, phrase);
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let text = phrase.as_str();
        if self.failures.contains(text) {
            return Err(DerivationError::failed(format!("injected failure #{call}")));
        }

        Ok(self
            .overrides
            .get(text)
            .cloned()
            .unwrap_or_else(|| Self::default_address(text)))
    }

    fn self_test(&self) -> SelfTestReport {
        SelfTestReport::passed(Self::default_address("self test"))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
