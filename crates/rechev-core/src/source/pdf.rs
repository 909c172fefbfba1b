//! Embedded-text extraction from PDF registration documents, using
//! lopdf for structure and pdf-extract for the text stream.

use lopdf::Document;
use tracing::debug;

use super::{Result, TextSource};
use crate::error::SourceError;

/// Text source for digitally produced PDFs (רישיון רכב downloads).
///
/// Scanned PDFs with no embedded text fail with [`SourceError::NoText`];
/// those belong to an OCR-backed source instead.
pub struct PdfTextSource {
    min_text_length: usize,
}

impl PdfTextSource {
    pub fn new() -> Self {
        Self { min_text_length: 1 }
    }

    /// Require at least `len` characters of embedded text before the
    /// extraction counts as successful.
    pub fn with_min_text_length(mut self, len: usize) -> Self {
        self.min_text_length = len;
        self
    }
}

impl Default for PdfTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfTextSource {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let mut doc = Document::load_mem(data).map_err(|e| SourceError::PdfParse(e.to_string()))?;

        // PDFs with empty-password encryption are common for government
        // document downloads; anything stronger is rejected.
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(SourceError::PdfParse("PDF is encrypted".to_string()));
            }
            debug!("decrypted PDF with empty password");
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| SourceError::PdfParse(e.to_string()))?;
            decrypted
        } else {
            data.to_vec()
        };

        if doc.get_pages().is_empty() {
            return Err(SourceError::NoPages);
        }

        let text = pdf_extract::extract_text_from_mem(&raw_data)
            .map_err(|e| SourceError::PdfParse(e.to_string()))?;

        if text.trim().len() < self.min_text_length {
            return Err(SourceError::NoText);
        }

        debug!(chars = text.len(), "extracted embedded PDF text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_is_a_parse_error() {
        let source = PdfTextSource::new();
        let result = source.extract_text(b"not a pdf");
        assert!(matches!(result, Err(SourceError::PdfParse(_))));
    }

    #[test]
    fn test_builder_sets_threshold() {
        let source = PdfTextSource::new().with_min_text_length(50);
        assert_eq!(source.min_text_length, 50);
    }
}
