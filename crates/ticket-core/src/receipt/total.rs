//! Total amount extraction for grocery receipts.
//!
//! Receipts print the cumulative total as the last value, so the last content
//! line is taken as the total line even when OCR reorders the lines above it.

use tracing::debug;

use super::content_lines;
use super::patterns::LEADING_NUMBER;

const TOTAL_MARKER: &str = "TOTAL";

/// Extract the total amount from the last content line of a receipt.
///
/// Returns NaN when the line does not start with a number; never fails.
pub fn extract_total(text: &str) -> f64 {
    let Some(last) = content_lines(text).last() else {
        debug!("No content lines, total not found");
        return f64::NAN;
    };

    let candidate = match last.split_once(TOTAL_MARKER) {
        Some((_, after)) => after,
        None => last,
    };

    let candidate = candidate.trim();
    let candidate = candidate.strip_prefix('.').unwrap_or(candidate);

    // OCR splits digit groups ("139. 34")
    let compact: String = candidate.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = compact.replacen(',', ".", 1);

    let total = parse_leading_float(&normalized);
    debug!("Total line {:?} -> {:?} -> {}", last, normalized, total);
    total
}

/// Parse the longest leading decimal literal of `s`, NaN if there is none.
pub fn parse_leading_float(s: &str) -> f64 {
    LEADING_NUMBER
        .find(s.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
