use serde::{Deserialize, Serialize};

/// Weight of the context score in the total.
pub const CONTEXT_WEIGHT: f64 = 0.4;
/// Weight of the elegance score in the total.
pub const ELEGANCE_WEIGHT: f64 = 0.3;
/// Weight of the typing score in the total.
pub const TYPING_WEIGHT: f64 = 0.3;

/// Rounds to two decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Three-factor heuristic score. Every field lies in `[0, 100]` and is rounded to 2 decimals.
pub struct QigScore {
    pub context_score: f64,
    pub elegance_score: f64,
    pub typing_score: f64,
    pub total_score: f64,
}

impl QigScore {
    /// Builds a score from its components; the total is the weighted sum of the rounded parts.
    pub fn from_components(context: f64, elegance: f64, typing: f64) -> Self {
        let context_score = round2(context);
        let elegance_score = round2(elegance);
        let typing_score = round2(typing);

        Self {
            context_score,
            elegance_score,
            typing_score,
            total_score: weighted_total(context_score, elegance_score, typing_score),
        }
    }

    /// Returns `true` if the total reaches `threshold`.
    #[inline]
    pub fn meets(&self, threshold: f64) -> bool {
        self.total_score >= threshold
    }
}

/// `round2(0.4 * context + 0.3 * elegance + 0.3 * typing)`.
#[inline]
pub fn weighted_total(context: f64, elegance: f64, typing: f64) -> f64 {
    round2(context * CONTEXT_WEIGHT + elegance * ELEGANCE_WEIGHT + typing * TYPING_WEIGHT)
}

impl std::fmt::Display for QigScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} (context {:.2}, elegance {:.2}, typing {:.2})",
            self.total_score, self.context_score, self.elegance_score, self.typing_score
        )
    }
}
