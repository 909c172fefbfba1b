//! Text acquisition collaborators.
//!
//! The extraction engine works on a fully materialized text buffer; how
//! that text is obtained (embedded PDF text, a cloud OCR provider) is a
//! collaborator concern behind the [`TextSource`] trait. Callers resolve
//! the source before invoking the engine - the engine itself never
//! performs I/O.

mod pdf;

pub use pdf::PdfTextSource;

use crate::error::SourceError;

/// Result type for text acquisition.
pub type Result<T> = std::result::Result<T, SourceError>;

/// A capability that turns binary image/document content into text.
pub trait TextSource {
    /// Extract text from `data`, failing with a provider error when no
    /// text can be obtained at all.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}
