//! Library-level tests of the validate → derive → score → rank pipeline.

mod common;

use std::sync::Arc;
use std::time::Duration;

use qig::{
    CandidateStoreHandle, Evaluator, EvaluatorSettings, FingerprintDeriver, HeuristicScorer,
    KeywordSets, MockDeriver, SearchController, SearchSettings, SearchState, SearchStrategy,
    TargetRegistry, ValidationError, validate_batch, validate_lines,
};

use common::twelve;

const TARGET: &str = "fpaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

fn registry() -> Arc<TargetRegistry> {
    Arc::new(TargetRegistry::from_addresses([TARGET]).unwrap())
}

#[tokio::test]
async fn test_store_stays_bounded_and_sorted_across_sessions() {
    let store = CandidateStoreHandle::with_capacity(5);
    let evaluator = Evaluator::new(Arc::new(MockDeriver::new()), store.clone(), registry())
        .with_settings(EvaluatorSettings {
            threshold: 0.0,
            derive_timeout: None,
        });
    let controller = SearchController::new(
        evaluator,
        SearchSettings {
            chunk_size: 4,
            chunk_delay: Duration::ZERO,
            event_log_capacity: 50,
        },
    );

    let phrases = validate_batch(&(0..12).map(|i| twelve(&format!("w{i}"))).collect::<Vec<_>>())
        .into_phrases()
        .unwrap();
    let outcome = controller
        .search(SearchStrategy::Batch, phrases)
        .await
        .unwrap();

    assert_eq!(outcome.state, SearchState::Completed);
    assert_eq!(outcome.high_phi_count, 12);

    let list = store.list();
    assert_eq!(list.len(), 5);
    assert!(list.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_fingerprint_deriver_matches_registered_fingerprint() {
    let deriver = FingerprintDeriver::default();
    let text = twelve("fingerprint");
    let address = deriver.fingerprint(&text);

    let targets = Arc::new(TargetRegistry::from_addresses([address.as_str()]).unwrap());
    let evaluator = Evaluator::new(Arc::new(deriver), CandidateStoreHandle::new(), targets);

    let phrases = validate_lines(&format!("{}\n{}\n{}", twelve("a"), text, twelve("b")))
        .into_phrases()
        .unwrap();
    let report = evaluator.evaluate_batch(&phrases).await;

    let found = report.found.expect("fingerprint should match");
    assert_eq!(found.phrase, text);
    assert_eq!(report.tested, 2);
}

#[test]
fn test_batch_rejection_reports_positions() {
    let input = format!("{}\n\nshort phrase\n{}", twelve("a"), twelve("b"));
    let err = validate_lines(&input).into_phrases().unwrap_err();

    match err {
        ValidationError::InvalidBatch { total, invalid, .. } => {
            assert_eq!(total, 3);
            assert_eq!(invalid.len(), 1);
            assert_eq!(invalid[0].index, 2);
            assert_eq!(invalid[0].actual, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_substituted_keywords_change_context_only() {
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu";
    let default_score = HeuristicScorer::default().score_text(text);
    let custom = HeuristicScorer::new(KeywordSets::default().with_context(["alpha", "beta"]));
    let custom_score = custom.score_text(text);

    assert_eq!(default_score.context_score, 0.0);
    assert!(custom_score.context_score > 0.0);
    assert_eq!(custom_score.elegance_score, default_score.elegance_score);
    assert_eq!(custom_score.typing_score, default_score.typing_score);
}
