use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::error::{SearchError, SearchResult};
use super::types::{BatchReport, FoundPhrase, UnitResult};
use crate::constants::HIGH_PHI_THRESHOLD;
use crate::derive::AddressDeriver;
use crate::phrase::Phrase;
use crate::scoring::HeuristicScorer;
use crate::store::{Candidate, CandidateStoreHandle};
use crate::targets::TargetRegistryHandle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatorSettings {
    /// Minimum total score for store admission.
    pub threshold: f64,
    /// Optional per-derivation budget. `None` waits indefinitely.
    pub derive_timeout: Option<Duration>,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            threshold: HIGH_PHI_THRESHOLD,
            derive_timeout: None,
        }
    }
}

/// Runs evaluation units: derive the address, compare it with every target, score the phrase,
/// and admit it to the candidate store when it scores high enough and did not match.
pub struct Evaluator<D> {
    deriver: Arc<D>,
    scorer: Arc<HeuristicScorer>,
    store: CandidateStoreHandle,
    targets: TargetRegistryHandle,
    settings: EvaluatorSettings,
}

impl<D> std::fmt::Debug for Evaluator<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("store", &*self.store)
            .field("targets", &self.targets.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl<D> Evaluator<D>
where
    D: AddressDeriver + 'static,
{
    pub fn new(deriver: Arc<D>, store: CandidateStoreHandle, targets: TargetRegistryHandle) -> Self {
        Self {
            deriver,
            scorer: Arc::new(HeuristicScorer::default()),
            store,
            targets,
            settings: EvaluatorSettings::default(),
        }
    }

    pub fn with_scorer(mut self, scorer: HeuristicScorer) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    pub fn with_settings(mut self, settings: EvaluatorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn deriver(&self) -> &Arc<D> {
        &self.deriver
    }

    pub fn scorer(&self) -> &HeuristicScorer {
        &self.scorer
    }

    pub fn store(&self) -> &CandidateStoreHandle {
        &self.store
    }

    pub fn targets(&self) -> &TargetRegistryHandle {
        &self.targets
    }

    pub fn settings(&self) -> &EvaluatorSettings {
        &self.settings
    }

    /// Derives `phrase` on the blocking pool, honouring the configured budget.
    ///
    /// On timeout the blocking call is abandoned, not interrupted; its result is discarded.
    pub async fn derive(&self, phrase: &Phrase) -> SearchResult<String> {
        let deriver = Arc::clone(&self.deriver);
        let owned = phrase.clone();
        let task = tokio::task::spawn_blocking(move || deriver.derive(&owned));

        let joined = match self.settings.derive_timeout {
            Some(budget) => tokio::time::timeout(budget, task)
                .await
                .map_err(|_| SearchError::Timeout { budget })?,
            None => task.await,
        };

        joined
            .map_err(|e| SearchError::TaskFailed(e.to_string()))?
            .map_err(SearchError::from)
    }

    /// Runs one evaluation unit.
    pub async fn evaluate(&self, phrase: &Phrase) -> SearchResult<UnitResult> {
        let address = self.derive(phrase).await?;
        let matched = self.targets.find_match(&address);
        let score = self.scorer.score(phrase);

        let candidate = if matched.is_none() {
            Candidate::admit(phrase.as_str(), address.as_str(), score, self.settings.threshold)
        } else {
            None
        };

        if let Some(candidate) = &candidate {
            let retained = self.store.add(candidate.clone());
            debug!(
                score = candidate.score,
                retained,
                "High-Φ candidate admitted"
            );
        }

        if let Some(target) = &matched {
            info!(address = %address, target_id = %target.id, "Derived address matches target");
        } else {
            debug!(score = score.total_score, "Evaluated phrase");
        }

        Ok(UnitResult {
            phrase: phrase.as_str().to_string(),
            address,
            matched,
            score,
            candidate,
        })
    }

    /// Evaluates `phrases` in order, stopping at the first match.
    ///
    /// A unit that fails (derivation error, timeout) is logged, counted in `failed`, and skipped;
    /// the remaining phrases are still evaluated.
    pub async fn evaluate_batch(&self, phrases: &[Phrase]) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, phrase) in phrases.iter().enumerate() {
            match self.evaluate(phrase).await {
                Ok(unit) => {
                    report.tested += 1;
                    if let Some(found) = FoundPhrase::from_unit(&unit) {
                        report.found = Some(found);
                        return report;
                    }
                    if let Some(candidate) = unit.candidate {
                        report.high_phi_candidates += 1;
                        report.candidates.push(candidate);
                    }
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(index, error = %e, "Evaluation unit failed; continuing batch");
                }
            }
        }

        report
    }
}
