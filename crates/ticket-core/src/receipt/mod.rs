//! Line heuristics for raw OCR receipt text.

pub mod patterns;
pub mod tokenizer;
pub mod total;

pub use tokenizer::{extract_candidates, CandidateExtractor};
pub use total::{extract_total, parse_leading_float};

/// Marker some OCR engines print as the final page line.
pub const FORM_FEED: &str = "\u{000C}";

/// Normalize one raw line: drop a trailing carriage return and trim.
pub fn normalize_line(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line).trim()
}

/// Whether a normalized line carries no content.
pub fn is_blank(line: &str) -> bool {
    line.is_empty() || line == FORM_FEED
}

/// Iterate over normalized, non-blank lines in input order.
pub fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(normalize_line).filter(|l| !is_blank(l))
}
