//! QIG recovery library crate (used by the server and integration tests).
//!
//! Evaluates 12-word passphrases against a set of target addresses and ranks them with a
//! deterministic heuristic.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`validate_single`], [`validate_batch`] - Structural phrase validation
//! - [`HeuristicScorer`], [`QigScore`] - Context / elegance / typing scoring
//! - [`AddressDeriver`], [`FingerprintDeriver`] - Phrase to address boundary
//! - [`CandidateStore`] - Bounded, score-ordered high-Φ candidates
//! - [`TargetRegistry`] - Addresses a derived address is compared against
//! - [`Evaluator`], [`SearchController`] - Single units, batches and search sessions
//!
//! ## Server
//! - [`Config`] - Environment configuration
//! - [`gateway`] - Axum router and handlers
//!
//! ## Test/Mock Support
//! [`MockDeriver`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod derive;
pub mod export;
pub mod gateway;
pub mod known;
pub mod phrase;
pub mod scoring;
pub mod search;
pub mod store;
pub mod targets;

pub use config::{Config, ConfigError};
pub use constants::{HIGH_PHI_THRESHOLD, PHRASE_WORD_COUNT, QIG_STATUS_HEADER};
#[cfg(any(test, feature = "mock"))]
pub use derive::MockDeriver;
pub use derive::{AddressDeriver, DerivationError, FingerprintDeriver, SelfTestReport};
pub use export::{CSV_HEADER, candidates_to_csv};
pub use gateway::{AppState, GatewayError, create_router_with_state};
pub use known::{KNOWN_PHRASES, known_phrases};
pub use phrase::{
    BatchValidation, InvalidPhrase, Phrase, ValidationError, validate_batch, validate_lines,
    validate_single,
};
pub use scoring::{HeuristicScorer, KeywordSets, QigScore};
pub use search::{
    BatchReport, CancellationToken, EventLevel, EventLog, Evaluator, EvaluatorSettings,
    FoundPhrase, SearchController, SearchError, SearchEvent, SearchOutcome, SearchResult,
    SearchSettings, SearchState, SearchStats, SearchStatus, SearchStrategy, UnitResult,
};
pub use store::{Candidate, CandidateStore, CandidateStoreHandle};
pub use targets::{TargetAddress, TargetError, TargetRegistry, TargetRegistryHandle};
