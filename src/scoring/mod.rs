//! Heuristic multi-factor phrase scoring.
//!
//! A phrase gets three independent scores, each clamped to `[0, 100]`:
//!
//! - **context**: era vocabulary matches plus date and crypto-operation bonuses
//! - **elegance**: style/philosophy vocabulary, word-length shape, character set, repeats
//! - **typing**: easy/hard bigram mix, home-row share, overall length
//!
//! The total is `round2(0.4 * context + 0.3 * elegance + 0.3 * typing)`. Phrases whose total
//! reaches [`HIGH_PHI_THRESHOLD`](crate::constants::HIGH_PHI_THRESHOLD) become candidates.

pub mod keywords;
pub mod scorer;
pub mod types;


pub use keywords::KeywordSets;
pub use scorer::HeuristicScorer;
pub use types::{
    CONTEXT_WEIGHT, ELEGANCE_WEIGHT, QigScore, TYPING_WEIGHT, round2, weighted_total,
};
