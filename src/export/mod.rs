//! CSV export of the candidate list.

use std::fmt::Write;

use crate::store::Candidate;

pub const CSV_HEADER: &str =
    "Score,Phrase,Address,Context Score,Elegance Score,Typing Score,Tested At";

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub const CSV_FILENAME: &str = "qig-candidates.csv";

/// Renders candidates (already in rank order) as CSV, one row per candidate.
pub fn candidates_to_csv(candidates: &[Candidate]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + candidates.len() * 160);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for c in candidates {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{:.2},{},{},{:.2},{:.2},{:.2},{}",
            c.score,
            quote(&c.phrase),
            c.address,
            c.qig_score.context_score,
            c.qig_score.elegance_score,
            c.qig_score.typing_score,
            c.tested_at_rfc3339(),
        );
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
