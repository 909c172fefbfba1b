//! Candidate disambiguation.
//!
//! Encodes the empirical rule set: formatted groupings are near-certain,
//! label context is strong secondary evidence, raw digit runs are the
//! weakest and the only ones prone to the IL-prefix artifact (the "IL"
//! country marker misread as a leading digit "1" fused onto the plate).

use tracing::debug;

use crate::models::config::EpochRules;
use crate::models::plate::{Candidate, CandidateShape};

/// Selects at most one plate from the generated candidates.
///
/// Pure and deterministic: equally-ranked candidates resolve by
/// position, never by error.
pub struct Disambiguator {
    epoch: EpochRules,
}

impl Disambiguator {
    pub fn new(epoch: EpochRules) -> Self {
        Self { epoch }
    }

    /// Resolve `candidates` to a single plate, or `None` when nothing
    /// was generated. Never fabricates digits that no candidate carries.
    pub fn select(&self, candidates: &[Candidate]) -> Option<String> {
        let tier = candidates.iter().map(|c| c.shape.priority()).max()?;

        // Leftmost occurrence within the winning tier: the OCR/PDF text
        // stream surfaces the most visually prominent plate first.
        let winner = candidates
            .iter()
            .filter(|c| c.shape.priority() == tier)
            .min_by_key(|c| c.position)?;

        debug!(
            value = %winner.value,
            shape = ?winner.shape,
            position = winner.position,
            "selected plate candidate"
        );

        if winner.shape == CandidateShape::Plain8 {
            if let Some(corrected) = self.correct_il_prefix(winner, candidates) {
                return Some(corrected);
            }
        }

        Some(winner.value.clone())
    }

    /// IL-prefix artifact correction for a raw 8-digit run whose leading
    /// digit falls outside the current numbering epoch.
    ///
    /// A corroborating standalone 7-digit candidate equal to the last
    /// seven digits wins outright. Without corroboration the leading
    /// digit is stripped, unless doing so would leave a 7-digit value
    /// with a lost leading zero, in which case the 8-digit reading
    /// stands.
    fn correct_il_prefix(&self, winner: &Candidate, candidates: &[Candidate]) -> Option<String> {
        if !self.epoch.leading_digit_reserved(&winner.value) {
            return None;
        }
        let stripped = &winner.value[1..];

        let corroborated = candidates
            .iter()
            .any(|c| c.value.len() == 7 && c.value == stripped && c.position != winner.position);
        if corroborated {
            debug!(plate = stripped, "IL-prefix artifact corroborated by independent 7-digit run");
            return Some(stripped.to_string());
        }

        if stripped.starts_with('0') {
            debug!("IL-prefix correction rejected: would drop a leading zero");
            return None;
        }

        debug!(plate = stripped, "stripped suspected IL-prefix artifact");
        Some(stripped.to_string())
    }
}

impl Default for Disambiguator {
    fn default() -> Self {
        Self::new(EpochRules::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::plate::CandidateShape::*;

    fn cand(value: &str, position: usize, shape: CandidateShape) -> Candidate {
        Candidate::new(value, position, shape)
    }

    fn select(candidates: &[Candidate]) -> Option<String> {
        Disambiguator::default().select(candidates)
    }

    #[test]
    fn test_empty_input_is_none() {
        assert_eq!(select(&[]), None);
    }

    #[test]
    fn test_formatted_beats_later_tiers() {
        let candidates = [
            cand("9999999", 0, Plain7),
            cand("12345678", 30, FormattedTriplet),
            cand("88888888", 5, Plain8),
        ];
        assert_eq!(select(&candidates), Some("12345678".to_string()));
    }

    #[test]
    fn test_context_beats_plain_runs() {
        let candidates = [
            cand("88888888", 0, Plain8),
            cand("7654321", 40, ContextAnchored),
        ];
        assert_eq!(select(&candidates), Some("7654321".to_string()));
    }

    #[test]
    fn test_leftmost_wins_within_tier() {
        let candidates = [
            cand("22222222", 50, Plain8),
            cand("33333333", 8, Plain8),
        ];
        assert_eq!(select(&candidates), Some("33333333".to_string()));
    }

    #[test]
    fn test_il_prefix_stripped_without_corroboration() {
        let candidates = [cand("15552222", 3, Plain8)];
        assert_eq!(select(&candidates), Some("5552222".to_string()));
    }

    #[test]
    fn test_il_prefix_corroborated_by_independent_run() {
        let candidates = [
            cand("15552222", 3, Plain8),
            cand("5552222", 40, Plain7),
        ];
        assert_eq!(select(&candidates), Some("5552222".to_string()));
    }

    #[test]
    fn test_il_prefix_correction_rejected_on_leading_zero() {
        let candidates = [cand("10001234", 0, Plain8)];
        assert_eq!(select(&candidates), Some("10001234".to_string()));
    }

    #[test]
    fn test_formatted_eight_starting_with_one_is_left_alone() {
        // Formatted groupings are near-certain; no artifact correction.
        let candidates = [cand("12345678", 0, FormattedTriplet)];
        assert_eq!(select(&candidates), Some("12345678".to_string()));
    }

    #[test]
    fn test_epoch_config_disables_correction() {
        let selector = Disambiguator::new(EpochRules {
            reserved_leading_digits: vec![],
        });
        let candidates = [cand("15552222", 0, Plain8)];
        assert_eq!(selector.select(&candidates), Some("15552222".to_string()));
    }
}
