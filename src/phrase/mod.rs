//! Phrase parsing and structural validation.
//!
//! A [`Phrase`] is only ever constructed through [`validate_single`] (or a batch helper), so
//! holding one proves the word-count contract. Batches follow a validate-all-then-reject policy:
//! every entry is checked, and a single failure rejects the whole batch before any work starts.

pub mod error;


pub use error::{InvalidPhrase, ValidationError};

use std::fmt;

use crate::constants::PHRASE_WORD_COUNT;

/// A structurally valid passphrase of exactly [`PHRASE_WORD_COUNT`] words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phrase {
    text: String,
    words: Vec<String>,
}

impl Phrase {
    /// The trimmed text as submitted (case preserved). This is what gets derived.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lower-cased words, in order.
    #[inline]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Lower-cased words joined by single spaces.
    pub fn normalized(&self) -> String {
        self.words.join(" ")
    }

    /// Consumes the phrase and returns the submitted text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Phrase {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Number of whitespace-separated tokens after trimming.
#[inline]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Validates a single phrase.
pub fn validate_single(text: &str) -> Result<Phrase, ValidationError> {
    let trimmed = text.trim();
    let actual = word_count(trimmed);
    if actual != PHRASE_WORD_COUNT {
        return Err(ValidationError::WordCount {
            expected: PHRASE_WORD_COUNT,
            actual,
        });
    }

    Ok(Phrase {
        text: trimmed.to_string(),
        words: trimmed
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect(),
    })
}

/// Per-entry validation report for a batch.
///
/// Blank entries are skipped but keep their index, so reported positions always refer to the
/// list the caller submitted.
#[derive(Debug, Clone)]
pub struct BatchValidation {
    entries: Vec<(usize, String, Result<Phrase, ValidationError>)>,
}

impl BatchValidation {
    /// Every non-blank entry as `(index, text, result)`.
    pub fn entries(&self) -> &[(usize, String, Result<Phrase, ValidationError>)] {
        &self.entries
    }

    /// Number of non-blank entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no non-blank entry was submitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that failed structural validation.
    pub fn invalid(&self) -> Vec<InvalidPhrase> {
        self.entries
            .iter()
            .filter_map(|(index, text, result)| {
                result.as_ref().err().map(|_| InvalidPhrase {
                    index: *index,
                    actual: word_count(text),
                })
            })
            .collect()
    }

    /// Accepts the batch only if it is non-empty and every entry is valid.
    pub fn into_phrases(self) -> Result<Vec<Phrase>, ValidationError> {
        if self.entries.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        let invalid = self.invalid();
        if !invalid.is_empty() {
            return Err(ValidationError::InvalidBatch {
                expected: PHRASE_WORD_COUNT,
                total: self.entries.len(),
                invalid,
            });
        }

        self.entries
            .into_iter()
            .map(|(_, _, result)| result)
            .collect()
    }
}

/// Validates every entry of a batch independently (no short-circuit).
pub fn validate_batch<S: AsRef<str>>(texts: &[S]) -> BatchValidation {
    let entries = texts
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.as_ref().trim().is_empty())
        .map(|(index, text)| {
            let text = text.as_ref();
            (index, text.to_string(), validate_single(text))
        })
        .collect();

    BatchValidation { entries }
}

/// Splits newline-separated input into a batch, then validates it.
pub fn validate_lines(input: &str) -> BatchValidation {
    let lines: Vec<&str> = input.lines().collect();
    validate_batch(&lines)
}
