//! Candidate generation: every plausible plate-like substring, with
//! position, shape, and provenance.
//!
//! Rules run in a fixed order over the normalized text: formatted
//! triplets, label-anchored runs (document mode only), then standalone
//! 8- and 7-digit runs. A run already covered by an earlier rule's span
//! is not re-emitted by the plain rules; the same physical number may
//! still surface once per rule, which the disambiguator resolves.

use std::ops::Range;

use regex::Regex;
use tracing::trace;

use super::patterns::{FORMATTED_TRIPLET, LABEL_AFTER, LABEL_BEFORE, VEHICLE_LABEL};
use crate::models::config::ExtractionConfig;
use crate::models::plate::{Candidate, CandidateShape, DocumentKind};

/// Produces plate candidates from normalized text.
///
/// Pure: recomputed per call, no iterator state retained between calls.
pub struct CandidateGenerator {
    formatted: Regex,
    label: Regex,
    label_after: Regex,
    label_before: Regex,
    label_window: usize,
}

impl CandidateGenerator {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            formatted: FORMATTED_TRIPLET.clone(),
            label: VEHICLE_LABEL.clone(),
            label_after: LABEL_AFTER.clone(),
            label_before: LABEL_BEFORE.clone(),
            label_window: config.label_window,
        }
    }

    /// Generate all candidates in rule order.
    pub fn generate(&self, text: &str, kind: DocumentKind) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let mut covered: Vec<Range<usize>> = Vec::new();

        // Rule 1: formatted triplets
        for caps in self.formatted.captures_iter(text) {
            let digits = format!("{}{}{}", &caps[1], &caps[2], &caps[3]);
            if digits.len() == 7 || digits.len() == 8 {
                let m = caps.get(0).unwrap();
                covered.push(m.range());
                candidates.push(Candidate::new(
                    digits,
                    m.start(),
                    CandidateShape::FormattedTriplet,
                ));
            }
        }

        // Rule 2: label-anchored runs (documents only)
        if kind == DocumentKind::RegistrationDocument {
            for candidate in self.label_candidates(text) {
                covered.push(candidate.position..candidate.position + candidate.value.len());
                candidates.push(candidate);
            }
        }

        // Rules 3 and 4: standalone digit runs not already captured
        let runs = digit_runs(text);
        for wanted_len in [8usize, 7] {
            for &(start, run) in &runs {
                if run.len() != wanted_len {
                    continue;
                }
                let span = start..start + run.len();
                if covered.iter().any(|r| r.start < span.end && span.start < r.end) {
                    continue;
                }
                let shape = if wanted_len == 8 {
                    CandidateShape::Plain8
                } else {
                    CandidateShape::Plain7
                };
                candidates.push(Candidate::new(run, start, shape));
            }
        }

        trace!(count = candidates.len(), "generated plate candidates");
        candidates
    }

    /// Label-anchored matches only, in sub-pattern fallback order:
    /// after the label, before the label, anywhere in a bounded window
    /// around it. One candidate per physical occurrence.
    pub fn label_candidates(&self, text: &str) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = Vec::new();

        for caps in self.label_after.captures_iter(text) {
            let m = caps.get(1).unwrap();
            out.push(
                Candidate::new(m.as_str(), m.start(), CandidateShape::ContextAnchored)
                    .with_pattern(0),
            );
        }

        for caps in self.label_before.captures_iter(text) {
            let m = caps.get(1).unwrap();
            if out.iter().any(|c| c.position == m.start()) {
                continue;
            }
            out.push(
                Candidate::new(m.as_str(), m.start(), CandidateShape::ContextAnchored)
                    .with_pattern(1),
            );
        }

        // Runs come from the full text so a long ID number straddling
        // the window boundary is never truncated into a fake 7-8 digit
        // candidate; the window only bounds which runs qualify.
        let runs = digit_runs(text);
        for label in self.label.find_iter(text) {
            let start = back_chars(text, label.start(), self.label_window);
            let end = forward_chars(text, label.end(), self.label_window);
            for &(run_start, run) in &runs {
                if run.len() != 7 && run.len() != 8 {
                    continue;
                }
                if run_start + run.len() <= start || run_start >= end {
                    continue;
                }
                if out.iter().any(|c| c.position == run_start) {
                    continue;
                }
                out.push(
                    Candidate::new(run, run_start, CandidateShape::ContextAnchored)
                        .with_pattern(2),
                );
            }
        }

        out
    }
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// Maximal ASCII-digit runs with their byte offsets. A run bounded by
/// non-digits is "standalone" - substrings of longer runs never appear.
fn digit_runs(text: &str) -> Vec<(usize, &str)> {
    let bytes = text.as_bytes();
    let mut runs = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            runs.push((start, &text[start..i]));
        } else {
            i += 1;
        }
    }
    runs
}

/// Byte offset `n` characters before `from`, clamped to the text start.
/// The window is specified in characters, and Hebrew text is two bytes
/// per character.
fn back_chars(text: &str, from: usize, n: usize) -> usize {
    if n == 0 {
        return from;
    }
    text[..from]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset `n` characters after `from`, clamped to the text end.
fn forward_chars(text: &str, from: usize, n: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn photo(text: &str) -> Vec<Candidate> {
        CandidateGenerator::default().generate(text, DocumentKind::Photo)
    }

    fn document(text: &str) -> Vec<Candidate> {
        CandidateGenerator::default().generate(text, DocumentKind::RegistrationDocument)
    }

    #[test]
    fn test_formatted_triplet_eight_digits() {
        let candidates = photo("123-45-678");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].value, "12345678");
        assert_eq!(candidates[0].shape, CandidateShape::FormattedTriplet);
        assert_eq!(candidates[0].position, 0);
    }

    #[test]
    fn test_formatted_triplet_seven_digits() {
        let candidates = photo("12-345-67");
        assert_eq!(candidates[0].value, "1234567");
        assert_eq!(candidates[0].shape, CandidateShape::FormattedTriplet);
    }

    #[test]
    fn test_triplet_with_wrong_total_length_is_skipped() {
        // 2+2+2 digits - not a plate layout
        assert!(photo("12-34-56").is_empty());
    }

    #[test]
    fn test_plain_runs_in_scan_order_per_rule() {
        let candidates = photo("12345678 and 9999999");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].value, "12345678");
        assert_eq!(candidates[0].shape, CandidateShape::Plain8);
        assert_eq!(candidates[1].value, "9999999");
        assert_eq!(candidates[1].shape, CandidateShape::Plain7);
        assert_eq!(candidates[1].position, 13);
    }

    #[test]
    fn test_longer_runs_yield_nothing() {
        assert!(photo("123456789").is_empty());
        assert!(photo("123456").is_empty());
    }

    #[test]
    fn test_label_after_is_context_anchored() {
        let candidates = document("מספר רכב: 87654321");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].value, "87654321");
        assert_eq!(candidates[0].shape, CandidateShape::ContextAnchored);
        assert_eq!(candidates[0].pattern, 0);
    }

    #[test]
    fn test_label_before_fallback() {
        let generator = CandidateGenerator::default();
        let found = generator.label_candidates("87654321 1M מספר רכב");
        assert_eq!(found[0].value, "87654321");
        assert_eq!(found[0].pattern, 1);
    }

    #[test]
    fn test_label_window_fallback() {
        let generator = CandidateGenerator::default();
        let found = generator.label_candidates("מספר רכב (בטופס) 7654321 בהמשך");
        assert_eq!(found[0].value, "7654321");
        assert_eq!(found[0].pattern, 2);
    }

    #[test]
    fn test_window_never_truncates_longer_digit_runs() {
        // A 12-digit account/ID number straddling the window boundary
        // must not surface as a fake 8-digit candidate.
        let generator = CandidateGenerator::default();
        let text = format!("מספר רכב {} 123456789012", "x".repeat(40));
        assert_eq!(generator.label_candidates(&text), vec![]);
    }

    #[test]
    fn test_window_is_measured_in_chars() {
        // 40 Hebrew characters are 80 bytes; the run is still inside
        // the 50-character window.
        let generator = CandidateGenerator::default();
        let text = format!("מספר רכב {} 7654321", "א".repeat(40));
        let found = generator.label_candidates(&text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "7654321");
        assert_eq!(found[0].pattern, 2);
    }

    #[test]
    fn test_context_suppresses_duplicate_plain_run() {
        // The labeled run must not reappear as a Plain8 candidate.
        let candidates = document("מספר רכב: 87654321");
        assert!(candidates.iter().all(|c| c.shape == CandidateShape::ContextAnchored));
    }

    #[test]
    fn test_photo_mode_ignores_label() {
        let candidates = photo("מספר רכב: 87654321");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].shape, CandidateShape::Plain8);
    }

    #[test]
    fn test_all_values_are_seven_or_eight_digits() {
        let text = "123-45-678 call 9999999 or 12345678 מספר רכב 7654321";
        for candidate in document(text) {
            assert!(candidate.value.len() == 7 || candidate.value.len() == 8);
            assert!(candidate.value.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_digit_runs_are_maximal() {
        let runs = digit_runs("12 345abc6789");
        assert_eq!(runs, vec![(0, "12"), (3, "345"), (8, "6789")]);
    }
}
