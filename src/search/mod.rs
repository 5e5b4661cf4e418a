//! Candidate evaluation and search sessions.
//!
//! - [`Evaluator`] runs a single unit of work, or a session-less batch with early exit.
//! - [`SearchController`] owns the session state machine
//!   (`Idle → Running → {Stopped | Found | Completed}`), chunked batch execution with
//!   cooperative cancellation, and on-demand telemetry.
//!
//! Structural validation happens before any of this runs (see [`crate::phrase`]); failures here
//! are per-unit runtime errors that never abort a batch.

pub mod cancel;
pub mod controller;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod stats;
pub mod types;


pub use cancel::CancellationToken;
pub use controller::{SearchController, SearchSettings, SessionTicket};
pub use error::{SearchError, SearchResult};
pub use evaluator::{Evaluator, EvaluatorSettings};
pub use events::{EventLevel, EventLog, SearchEvent};
pub use stats::{RateSampler, SearchStats, format_runtime};
pub use types::{
    BatchReport, FoundPhrase, SearchOutcome, SearchState, SearchStatus, SearchStrategy, UnitResult,
};
