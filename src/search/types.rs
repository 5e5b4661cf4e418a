use serde::{Deserialize, Serialize};

use super::events::SearchEvent;
use super::stats::SearchStats;
use crate::scoring::QigScore;
use crate::store::Candidate;
use crate::targets::TargetAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Session lifecycle. `Stopped`, `Found` and `Completed` are terminal until the next start.
pub enum SearchState {
    Idle,
    Running,
    Stopped,
    Found,
    Completed,
}

impl SearchState {
    pub fn is_running(&self) -> bool {
        matches!(self, SearchState::Running)
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SearchState::Idle => "idle",
            SearchState::Running => "running",
            SearchState::Stopped => "stopped",
            SearchState::Found => "found",
            SearchState::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Where a session's phrases come from.
pub enum SearchStrategy {
    /// A single caller-supplied phrase.
    Custom,
    /// The curated known-phrase list.
    Known,
    /// A caller-supplied list.
    Batch,
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SearchStrategy::Custom => "custom",
            SearchStrategy::Known => "known",
            SearchStrategy::Batch => "batch",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Result of one evaluation unit (derive → match → score → conditional insert).
pub struct UnitResult {
    pub phrase: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<TargetAddress>,
    pub score: QigScore,
    /// Set when the phrase was admitted to the candidate store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Candidate>,
}

impl UnitResult {
    #[inline]
    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }

    #[inline]
    pub fn is_high_phi(&self) -> bool {
        self.candidate.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A phrase whose derived address equals a configured target.
pub struct FoundPhrase {
    pub phrase: String,
    pub address: String,
    pub score: QigScore,
    pub target: TargetAddress,
}

impl FoundPhrase {
    pub(crate) fn from_unit(unit: &UnitResult) -> Option<Self> {
        unit.matched.as_ref().map(|target| Self {
            phrase: unit.phrase.clone(),
            address: unit.address.clone(),
            score: unit.score,
            target: target.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Aggregate of a batch evaluated without a session.
pub struct BatchReport {
    /// Units that completed (a matching unit counts).
    pub tested: u64,
    pub high_phi_candidates: u64,
    /// Units whose derivation failed.
    pub failed: u64,
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<FoundPhrase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Terminal summary of a session.
pub struct SearchOutcome {
    pub state: SearchState,
    pub strategy: SearchStrategy,
    pub tested: u64,
    pub high_phi_count: u64,
    pub failed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<FoundPhrase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Everything a status poller needs in one read.
pub struct SearchStatus {
    pub state: SearchState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<SearchStrategy>,
    pub stats: SearchStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SearchOutcome>,
    pub events: Vec<SearchEvent>,
}
