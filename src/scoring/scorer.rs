use std::collections::HashSet;

use tracing::trace;

use super::keywords::KeywordSets;
use super::types::QigScore;
use crate::phrase::Phrase;

const CONTEXT_WORD_POINTS: f64 = 10.0;
const DATE_BONUS: f64 = 15.0;
const CRYPTO_OPERATION_BONUS: f64 = 10.0;

const ELEGANCE_BASE: f64 = 50.0;
const STYLE_WORD_POINTS: f64 = 8.0;
const WORD_LENGTH_BONUS: f64 = 10.0;
const WORD_LENGTH_PENALTY: f64 = 10.0;
const LETTERS_ONLY_BONUS: f64 = 10.0;
const REPEAT_PENALTY: f64 = 20.0;

const TYPING_BASE: f64 = 50.0;
const EASY_BIGRAM_WEIGHT: f64 = 30.0;
const HARD_BIGRAM_PENALTY: f64 = 5.0;
const HOME_ROW_WEIGHT: f64 = 20.0;
const COMFORT_LENGTH_BONUS: f64 = 10.0;
const LONG_TEXT_PENALTY: f64 = 15.0;

/// Pure, deterministic three-factor scorer.
///
/// All vocabulary comes from the [`KeywordSets`] supplied at construction; the same input text
/// always yields a bit-identical [`QigScore`].
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    keywords: KeywordSets,
}

impl HeuristicScorer {
    pub fn new(keywords: KeywordSets) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &KeywordSets {
        &self.keywords
    }

    /// Scores a validated phrase.
    pub fn score(&self, phrase: &Phrase) -> QigScore {
        self.score_text(phrase.as_str())
    }

    /// Scores arbitrary text. Degenerate input never panics; empty ratios contribute nothing.
    pub fn score_text(&self, text: &str) -> QigScore {
        let normalized = text.trim().to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let context = self.context_score(&words);
        let elegance = self.elegance_score(&words, &normalized);
        let typing = self.typing_score(&normalized);

        let score = QigScore::from_components(context, elegance, typing);
        trace!(
            context = score.context_score,
            elegance = score.elegance_score,
            typing = score.typing_score,
            total = score.total_score,
            "Scored phrase"
        );
        score
    }

    fn context_score(&self, words: &[&str]) -> f64 {
        let kw = &self.keywords;

        let matches = words.iter().filter(|w| kw.context.contains(**w)).count();
        let mut score = matches as f64 * CONTEXT_WORD_POINTS;

        if contains_any(words, &kw.date_tokens) {
            score += DATE_BONUS;
        }
        if contains_any(words, &kw.crypto_operations) {
            score += CRYPTO_OPERATION_BONUS;
        }

        score.min(100.0)
    }

    fn elegance_score(&self, words: &[&str], text: &str) -> f64 {
        let kw = &self.keywords;
        let mut score = ELEGANCE_BASE;

        let style_matches: usize = words
            .iter()
            .map(|w| usize::from(kw.aesthetic.contains(*w)) + usize::from(kw.philosophy.contains(*w)))
            .sum();
        score += style_matches as f64 * STYLE_WORD_POINTS;

        if !words.is_empty() {
            let total_len: usize = words.iter().map(|w| w.chars().count()).sum();
            let mean = total_len as f64 / words.len() as f64;
            if (5.0..=8.0).contains(&mean) {
                score += WORD_LENGTH_BONUS;
            } else if !(3.0..=12.0).contains(&mean) {
                score -= WORD_LENGTH_PENALTY;
            }
        }

        let letters_only = !text.is_empty()
            && text
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c.is_whitespace());
        if letters_only {
            score += LETTERS_ONLY_BONUS;
        }

        let distinct: HashSet<&str> = words.iter().copied().collect();
        if distinct.len() != words.len() {
            score -= REPEAT_PENALTY;
        }

        score.clamp(0.0, 100.0)
    }

    fn typing_score(&self, text: &str) -> f64 {
        let kw = &self.keywords;
        let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        let mut score = TYPING_BASE;

        let bigrams: Vec<String> = chars.windows(2).map(|pair| pair.iter().collect()).collect();
        if !bigrams.is_empty() {
            let easy = bigrams.iter().filter(|b| kw.easy_bigrams.contains(*b)).count();
            score += ratio(easy, bigrams.len()) * EASY_BIGRAM_WEIGHT;
        }

        let hard = bigrams.iter().filter(|b| kw.hard_bigrams.contains(*b)).count();
        score -= hard as f64 * HARD_BIGRAM_PENALTY;

        let home = chars.iter().filter(|c| kw.home_row.contains(*c)).count();
        score += ratio(home, chars.len()) * HOME_ROW_WEIGHT;

        let length = chars.len();
        if (40..=80).contains(&length) {
            score += COMFORT_LENGTH_BONUS;
        } else if length > 120 {
            score -= LONG_TEXT_PENALTY;
        }

        score.clamp(0.0, 100.0)
    }
}

fn contains_any(words: &[&str], needles: &[String]) -> bool {
    words
        .iter()
        .any(|w| needles.iter().any(|n| w.contains(n.as_str())))
}

/// `numerator / denominator`, or `0.0` for an empty denominator.
#[inline]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
