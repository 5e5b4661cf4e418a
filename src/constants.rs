//! Cross-cutting, shared constants.
//!
//! Runtime-tunable values (chunk size, capacity, delays) start from these defaults and can be
//! overridden through [`Config`](crate::config::Config).

use std::time::Duration;

/// Exact number of words a phrase must contain.
pub const PHRASE_WORD_COUNT: usize = 12;

/// Maximum number of candidates retained by the store.
pub const DEFAULT_CANDIDATE_CAPACITY: usize = 100;

/// Minimum `totalScore` for a phrase to be admitted as a high-Φ candidate.
pub const HIGH_PHI_THRESHOLD: f64 = 75.0;

/// Phrases evaluated between cancellation checks.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Pause between chunks of a batch.
pub const DEFAULT_CHUNK_DELAY_MS: u64 = 100;

/// Minimum wall time between two throughput samples.
pub const RATE_WINDOW: Duration = Duration::from_secs(1);

/// Maximum number of events kept in a session's event log.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 500;

/// Accepted length range for a configured target address.
pub const TARGET_ADDRESS_MIN_LEN: usize = 26;
pub const TARGET_ADDRESS_MAX_LEN: usize = 35;

/// Target registered at startup when no `QIG_TARGET_ADDRESSES` override is given.
pub const DEFAULT_TARGET_ADDRESS: &str = "fp00000000000000000000000000000000";

/// Label attached to [`DEFAULT_TARGET_ADDRESS`].
pub const DEFAULT_TARGET_LABEL: &str = "default";

/// Header carrying a short machine-readable status on every gateway response.
pub const QIG_STATUS_HEADER: &str = "X-Qig-Status";
