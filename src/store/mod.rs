//! Bounded, score-ordered candidate retention.
//!
//! The store is constructed explicitly and shared through [`CandidateStoreHandle`]; there is no
//! process-wide instance. One writer (the active evaluation path) appends; any number of readers
//! take snapshots. Each `add` pushes, re-sorts and truncates under a single write lock, so a
//! reader never sees a partially sorted list.
//!
//! Ordering is descending by `score`. The sort is stable: among equal scores, earlier insertions
//! stay ahead, and when the store is over capacity the newest of the tied entries is evicted.

pub mod types;


pub use types::Candidate;

use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::constants::DEFAULT_CANDIDATE_CAPACITY;

/// In-memory top-K candidate list.
pub struct CandidateStore {
    capacity: usize,
    entries: RwLock<Vec<Candidate>>,
}

impl CandidateStore {
    /// Creates a store with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CANDIDATE_CAPACITY)
    }

    /// Creates a store holding at most `capacity` candidates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(Vec::with_capacity(capacity + 1)),
        }
    }

    /// Maximum number of retained candidates.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Inserts a candidate and evicts the lowest scores beyond capacity.
    ///
    /// Returns `true` if the candidate is still present afterwards. A candidate whose id is
    /// already stored is rejected and leaves the store unchanged.
    pub fn add(&self, candidate: Candidate) -> bool {
        let id = candidate.id;
        let mut entries = self.entries.write();

        if entries.iter().any(|c| c.id == id) {
            debug!(%id, "Rejected candidate with duplicate id");
            return false;
        }

        entries.push(candidate);
        entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        if entries.len() > self.capacity {
            let evicted = entries.len() - self.capacity;
            entries.truncate(self.capacity);
            debug!(evicted, capacity = self.capacity, "Evicted lowest-scoring candidates");
        }

        entries.iter().any(|c| c.id == id)
    }

    /// Snapshot of all candidates, highest score first.
    pub fn list(&self) -> Vec<Candidate> {
        self.entries.read().clone()
    }

    /// Snapshot of the `n` best candidates.
    pub fn top(&self, n: usize) -> Vec<Candidate> {
        self.entries.read().iter().take(n).cloned().collect()
    }

    /// Removes every candidate.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for CandidateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CandidateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateStore")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

#[derive(Clone, Debug)]
/// Shared handle to a [`CandidateStore`].
pub struct CandidateStoreHandle {
    inner: Arc<CandidateStore>,
}

impl CandidateStoreHandle {
    /// Creates a handle to a new store with the default capacity.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CandidateStore::new()),
        }
    }

    /// Creates a handle to a new store with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(CandidateStore::with_capacity(capacity)),
        }
    }

    /// Wraps an existing store.
    pub fn from_store(store: CandidateStore) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }
}

impl Default for CandidateStoreHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for CandidateStoreHandle {
    type Target = CandidateStore;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
