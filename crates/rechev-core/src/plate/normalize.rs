//! Text normalization ahead of candidate generation.
//!
//! OCR output for a photographed plate routinely contains the country
//! marker ("IL", misread as "1L") and, for dealership stickers, phone
//! numbers whose digit counts overlap the plate formats. Both are
//! stripped before any pattern matching. Removed spans are replaced
//! with a single space so digit runs on either side never fuse into a
//! false candidate.

use regex::Regex;

use super::patterns::{COUNTRY_MARKER, LOCAL_PHONE, TOLL_FREE_PHONE, WHITESPACE_RUN};
use crate::models::config::ExtractionConfig;
use crate::models::plate::DocumentKind;

/// Strips extraction artifacts known to corrupt plate detection.
///
/// Pure and total: never fails, never alters true plate digits.
pub struct Normalizer {
    strip: Vec<Regex>,
    whitespace: Regex,
}

impl Normalizer {
    pub fn new(config: &ExtractionConfig) -> Self {
        let mut strip = Vec::new();
        if config.strip_country_markers {
            strip.push(COUNTRY_MARKER.clone());
        }
        if config.strip_phone_numbers {
            strip.push(TOLL_FREE_PHONE.clone());
            strip.push(LOCAL_PHONE.clone());
        }
        Self {
            strip,
            whitespace: WHITESPACE_RUN.clone(),
        }
    }

    /// Normalize `text` for the given source kind.
    ///
    /// Document text additionally folds newline/whitespace runs to
    /// single spaces so label-anchored patterns survive page-layout
    /// line wraps.
    pub fn normalize(&self, text: &str, kind: DocumentKind) -> String {
        let mut out = text.to_string();
        for pattern in &self.strip {
            out = pattern.replace_all(&out, " ").into_owned();
        }
        if kind == DocumentKind::RegistrationDocument {
            out = self.whitespace.replace_all(&out, " ").into_owned();
        }
        out
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn normalize(text: &str) -> String {
        Normalizer::default().normalize(text, DocumentKind::Photo)
    }

    #[test]
    fn test_strips_country_markers() {
        assert_eq!(normalize("IL 15552222"), "  15552222");
        assert_eq!(normalize("1L 5552222"), "  5552222");
        assert_eq!(normalize("ישראל 8765432"), "  8765432");
        assert_eq!(normalize("ISRAEL 8765432"), "  8765432");
    }

    #[test]
    fn test_strips_phone_numbers() {
        assert_eq!(normalize("call 1-700-123-456 now"), "call   now");
        assert_eq!(normalize("tel 03-1234567"), "tel  ");
        assert_eq!(normalize("tel 021234567"), "tel  ");
    }

    #[test]
    fn test_never_fuses_digit_runs() {
        // Stripping must not join the runs on either side of a marker.
        let out = normalize("1234 IL 5678");
        assert!(!out.contains("12345678"));
        assert_eq!(out, "1234   5678");
    }

    #[test]
    fn test_preserves_plate_digits() {
        assert_eq!(normalize("12345678"), "12345678");
        assert_eq!(normalize("123-45-678"), "123-45-678");
    }

    #[test]
    fn test_document_mode_folds_whitespace() {
        let normalizer = Normalizer::default();
        let out = normalizer.normalize("מספר\n רכב:\n87654321", DocumentKind::RegistrationDocument);
        assert_eq!(out, "מספר רכב: 87654321");
    }

    #[test]
    fn test_photo_mode_keeps_newlines() {
        let normalizer = Normalizer::default();
        let out = normalizer.normalize("a\nb", DocumentKind::Photo);
        assert_eq!(out, "a\nb");
    }

    #[test]
    fn test_disabled_rules_leave_text_alone() {
        let config = ExtractionConfig {
            strip_country_markers: false,
            strip_phone_numbers: false,
            ..ExtractionConfig::default()
        };
        let normalizer = Normalizer::new(&config);
        assert_eq!(normalizer.normalize("IL 1-700-123-456", DocumentKind::Photo), "IL 1-700-123-456");
    }
}
