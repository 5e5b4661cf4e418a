use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::QigScore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A high-scoring phrase retained by the [`CandidateStore`](super::CandidateStore).
///
/// Candidates are immutable once created.
pub struct Candidate {
    pub id: Uuid,
    pub phrase: String,
    pub address: String,
    /// Copy of `qig_score.total_score`; the store orders by this.
    pub score: f64,
    pub qig_score: QigScore,
    pub tested_at: DateTime<Utc>,
}

impl Candidate {
    /// Creates a candidate with a fresh id and the current timestamp.
    pub fn new(phrase: impl Into<String>, address: impl Into<String>, qig_score: QigScore) -> Self {
        Self {
            id: Uuid::new_v4(),
            phrase: phrase.into(),
            address: address.into(),
            score: qig_score.total_score,
            qig_score,
            tested_at: Utc::now(),
        }
    }

    /// Creates a candidate only if `qig_score` reaches `threshold`.
    pub fn admit(
        phrase: impl Into<String>,
        address: impl Into<String>,
        qig_score: QigScore,
        threshold: f64,
    ) -> Option<Self> {
        qig_score
            .meets(threshold)
            .then(|| Self::new(phrase, address, qig_score))
    }

    /// `tested_at` as RFC 3339 with millisecond precision.
    pub fn tested_at_rfc3339(&self) -> String {
        self.tested_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
