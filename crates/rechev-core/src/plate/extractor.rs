//! The extraction pipeline and its document-aware strategy selector.

use tracing::{debug, info};

use super::candidates::CandidateGenerator;
use super::normalize::Normalizer;
use super::select::Disambiguator;
use crate::models::config::ExtractionConfig;
use crate::models::plate::{DocumentKind, ExtractionResult};

/// Israeli license plate extractor.
///
/// One-way, synchronous pipeline over an immutable text buffer:
/// normalizer, candidate generator, disambiguator. Holds only compiled
/// patterns and configuration; no state survives a call, so a single
/// extractor may serve concurrent requests.
pub struct PlateExtractor {
    normalizer: Normalizer,
    generator: CandidateGenerator,
    selector: Disambiguator,
}

impl PlateExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config),
            generator: CandidateGenerator::new(config),
            selector: Disambiguator::new(config.epoch.clone()),
        }
    }

    /// Extract a plate number from `text`.
    ///
    /// Infallible: absence of a match is a normal `plate: None` result.
    /// Registration documents try the label-anchored strategy first,
    /// then fall back to the generic pipeline; photos have no label to
    /// exploit and run the generic pipeline directly.
    pub fn extract(&self, text: &str, kind: DocumentKind) -> ExtractionResult {
        let normalized = self.normalizer.normalize(text, kind);

        if kind == DocumentKind::RegistrationDocument {
            if let Some(plate) = self.label_anchored(&normalized) {
                info!(%plate, "plate found via document label");
                return ExtractionResult::found(plate, text);
            }
            debug!("label-anchored search found nothing, running generic pipeline");
        }

        match self.generic(&normalized, kind) {
            Some(plate) => {
                info!(%plate, "plate found via generic pipeline");
                ExtractionResult::found(plate, text)
            }
            None => {
                debug!("no plate candidate survived disambiguation");
                ExtractionResult::not_found(text)
            }
        }
    }

    /// Dedicated label-anchored search: the three sub-patterns in
    /// fallback order, first hit wins.
    fn label_anchored(&self, normalized: &str) -> Option<String> {
        self.generator
            .label_candidates(normalized)
            .into_iter()
            .next()
            .map(|c| c.value)
    }

    fn generic(&self, normalized: &str, kind: DocumentKind) -> Option<String> {
        let candidates = self.generator.generate(normalized, kind);
        self.selector.select(&candidates)
    }
}

impl Default for PlateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a plate with the default configuration.
pub fn extract_plate(text: &str, kind: DocumentKind) -> ExtractionResult {
    PlateExtractor::new().extract(text, kind)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn photo(text: &str) -> Option<String> {
        extract_plate(text, DocumentKind::Photo).plate
    }

    fn document(text: &str) -> Option<String> {
        extract_plate(text, DocumentKind::RegistrationDocument).plate
    }

    #[test]
    fn test_formatted_wins_over_unrelated_seven_digit_run() {
        assert_eq!(
            photo("123-45-678 some other text 9999999"),
            Some("12345678".to_string())
        );
    }

    #[test]
    fn test_il_prefix_with_corroborating_run() {
        assert_eq!(
            photo("IL 15552222 rear sticker 5552222"),
            Some("5552222".to_string())
        );
    }

    #[test]
    fn test_il_prefix_stripped_without_corroboration() {
        assert_eq!(photo("IL 15552222"), Some("5552222".to_string()));
    }

    #[test]
    fn test_leading_zero_loss_keeps_eight_digit_reading() {
        assert_eq!(photo("ISRAEL 10001234"), Some("10001234".to_string()));
    }

    #[test]
    fn test_phone_number_alone_yields_nothing() {
        assert_eq!(photo("call us at 1-700-123-456 or visit"), None);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert_eq!(photo(""), None);
        assert_eq!(photo("no digits here at all"), None);
        assert_eq!(photo("123456"), None);
    }

    #[test]
    fn test_label_anchored_document() {
        assert_eq!(
            document("רישיון רכב מספר רכב: 87654321 שם בעלים"),
            Some("87654321".to_string())
        );
    }

    #[test]
    fn test_label_survives_line_wrap() {
        assert_eq!(
            document("מספר\nרכב:\n87654321"),
            Some("87654321".to_string())
        );
    }

    #[test]
    fn test_document_falls_back_to_generic_pipeline() {
        // No label anywhere, but a formatted plate is present.
        assert_eq!(document("רכב פרטי 123-45-678"), Some("12345678".to_string()));
    }

    #[test]
    fn test_document_ignores_long_id_numbers_near_label() {
        // A 12-digit reference number near the label is not a plate.
        assert_eq!(document("מספר רכב בנק 123456789012"), None);
    }

    #[test]
    fn test_document_label_beats_earlier_plain_run() {
        // The labeled number wins even when another 8-digit run comes first.
        assert_eq!(
            document("22334455 טסט מספר רכב: 87654321"),
            Some("87654321".to_string())
        );
    }

    #[test]
    fn test_plain_eight_preferred_over_plain_seven() {
        assert_eq!(
            photo("9999999 then 88888888"),
            Some("88888888".to_string())
        );
    }

    #[test]
    fn test_leftmost_formatted_wins() {
        assert_eq!(
            photo("123-45-678 and 876-54-321"),
            Some("12345678".to_string())
        );
    }

    #[test]
    fn test_idempotent() {
        let text = "IL 15552222 rear sticker 5552222";
        let first = extract_plate(text, DocumentKind::Photo);
        let second = extract_plate(text, DocumentKind::Photo);
        assert_eq!(first, second);
        assert_eq!(first.raw_text, text);
    }

    #[test]
    fn test_raw_text_is_untouched_input() {
        let text = "ISRAEL 123-45-678\nsecond line";
        let result = extract_plate(text, DocumentKind::Photo);
        assert_eq!(result.raw_text, text);
        assert_eq!(result.plate, Some("12345678".to_string()));
    }
}
