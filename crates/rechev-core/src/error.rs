//! Error types for the rechev-core library.
//!
//! The extraction engine itself is infallible: a plate that cannot be
//! found is a normal `None` result, not an error. Errors exist only at
//! the collaborator boundaries (text acquisition, dataset lookup,
//! configuration).

use thiserror::Error;

/// Main error type for the rechev library.
#[derive(Error, Debug)]
pub enum RechevError {
    /// Text acquisition error (PDF parsing, OCR collaborator).
    #[error("text source error: {0}")]
    Source(#[from] SourceError),

    /// Government dataset lookup error.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while obtaining text from an upstream collaborator.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    PdfParse(String),

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The document parsed but contained no extractable text.
    #[error("no text could be extracted")]
    NoText,

    /// The OCR provider rejected the request or returned an error.
    #[error("OCR provider error: {0}")]
    Provider(String),
}

/// Errors raised by the data.gov.il datastore client.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Transport-level failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The datastore answered but flagged the query as unsuccessful.
    #[error("datastore query unsuccessful for resource {0}")]
    Unsuccessful(String),

    /// No registration record exists for the plate.
    #[error("no vehicle registered under plate {0}")]
    NotRegistered(String),
}

/// Result type for the rechev library.
pub type Result<T> = std::result::Result<T, RechevError>;
