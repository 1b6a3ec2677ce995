//! Noise filtering that turns receipt lines into candidate product names.

use tracing::trace;

use super::content_lines;
use super::patterns::{PARENTHETICAL, UNIT_NOISE, WHITESPACE_RUN};

/// Lines containing any of these are totals, never products.
const TOTAL_MARKERS: [&str; 2] = ["TOTAL", "SUBTOT."];

const DEFAULT_MIN_LINE_LENGTH: usize = 7;

/// Candidate item extractor.
#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    min_line_length: usize,
}

impl CandidateExtractor {
    pub fn new() -> Self {
        Self {
            min_line_length: DEFAULT_MIN_LINE_LENGTH,
        }
    }

    /// Set the length at or below which a line is discarded.
    pub fn with_min_line_length(mut self, min_line_length: usize) -> Self {
        self.min_line_length = min_line_length;
        self
    }

    /// Whether a normalized line may describe a product.
    pub fn is_candidate_line(&self, line: &str) -> bool {
        if line.starts_with(|c: char| c.is_ascii_digit()) || line.starts_with('(') {
            return false;
        }
        if TOTAL_MARKERS.iter().any(|marker| line.contains(marker)) {
            return false;
        }
        line.chars().count() > self.min_line_length
    }

    /// Extract candidate items lazily, in receipt order.
    pub fn candidates<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        content_lines(text)
            .filter(|line| self.is_candidate_line(line))
            .filter_map(|line| {
                let item = clean_line(line);
                trace!("Candidate {:?} -> {:?}", line, item);
                // cleaning can shorten a name or expose a leading digit or parenthesis
                self.is_candidate_line(&item).then_some(item)
            })
    }
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip unit, quantity and discount noise from a product line.
pub fn clean_line(line: &str) -> String {
    let stripped = UNIT_NOISE.replace_all(line, "");
    let stripped = PARENTHETICAL.replace_all(&stripped, "");
    WHITESPACE_RUN.replace_all(stripped.trim(), " ").into_owned()
}

/// Extract candidate items with the default heuristics.
pub fn extract_candidates(text: &str) -> Vec<String> {
    CandidateExtractor::new().candidates(text).collect()
}
