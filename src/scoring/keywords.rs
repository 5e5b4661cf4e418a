//! Keyword and bigram tables used by the heuristic scorer.
//!
//! These are plain data: the scorer takes a [`KeywordSets`] at construction time and never
//! refers to the literal lists directly, so tests can substitute their own tables.

use std::collections::HashSet;

const CONTEXT_KEYWORDS_2009: &[&str] = &[
    "bitcoin", "satoshi", "nakamoto", "proof", "work", "chain", "block", "peer",
    "cash", "electronic", "transaction", "digital", "crypto", "hash", "mining",
    "double", "spending", "trust", "decentralized", "network", "node", "consensus",
    "chancellor", "brink", "bailout", "banks", "crisis", "currency", "money",
    "freedom", "privacy", "cypherpunk", "encryption", "signature", "key", "address",
    "genesis", "timestamp", "merkle", "difficulty", "reward", "halving", "wallet",
];

const DATE_TOKENS: &[&str] = &["2009", "2008", "january", "february"];

const CRYPTO_OPERATION_TOKENS: &[&str] = &["encrypt", "decrypt", "signature"];

const AESTHETIC_WORDS: &[&str] = &[
    "simple", "elegant", "beautiful", "clean", "minimalist", "design", "think",
    "different", "sophistication", "ultimate", "clarity", "focus", "intuitive",
    "seamless", "refined", "crafted", "artisan", "quality", "excellence", "innovation",
];

const PHILOSOPHY_WORDS: &[&str] = &[
    "philosophy", "principle", "truth", "wisdom", "knowledge", "enlightenment",
    "consciousness", "awareness", "reality", "existence", "meaning", "purpose",
    "vision", "ideal", "values", "ethics", "virtue", "integrity", "honor",
];

const EASY_BIGRAMS: &[&str] = &[
    "th", "he", "in", "er", "an", "re", "nd", "at", "on", "nt",
    "ha", "es", "st", "en", "ed", "to", "it", "ou", "ea", "hi",
];

const HARD_BIGRAMS: &[&str] = &["zx", "qz", "pq", "iu", "nm", "vb"];

const HOME_ROW: &str = "asdfghjkl";

/// Category → word/bigram tables consumed by [`HeuristicScorer`](super::HeuristicScorer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSets {
    /// Era vocabulary; each exact word match adds to the context score.
    pub context: HashSet<String>,
    /// Substrings that earn the one-off date bonus.
    pub date_tokens: Vec<String>,
    /// Substrings that earn the one-off crypto-operation bonus.
    pub crypto_operations: Vec<String>,
    pub aesthetic: HashSet<String>,
    pub philosophy: HashSet<String>,
    pub easy_bigrams: HashSet<String>,
    pub hard_bigrams: HashSet<String>,
    pub home_row: HashSet<char>,
}

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn to_vec(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            context: to_set(CONTEXT_KEYWORDS_2009),
            date_tokens: to_vec(DATE_TOKENS),
            crypto_operations: to_vec(CRYPTO_OPERATION_TOKENS),
            aesthetic: to_set(AESTHETIC_WORDS),
            philosophy: to_set(PHILOSOPHY_WORDS),
            easy_bigrams: to_set(EASY_BIGRAMS),
            hard_bigrams: to_set(HARD_BIGRAMS),
            home_row: HOME_ROW.chars().collect(),
        }
    }
}

impl KeywordSets {
    /// Tables with every category empty. Useful as a base for targeted tests.
    pub fn empty() -> Self {
        Self {
            context: HashSet::new(),
            date_tokens: Vec::new(),
            crypto_operations: Vec::new(),
            aesthetic: HashSet::new(),
            philosophy: HashSet::new(),
            easy_bigrams: HashSet::new(),
            hard_bigrams: HashSet::new(),
            home_row: HashSet::new(),
        }
    }

    /// Replaces the context vocabulary.
    pub fn with_context<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context = words.into_iter().map(Into::into).collect();
        self
    }

    /// Context vocabulary in a stable (sorted) order.
    pub fn context_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.context.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}
