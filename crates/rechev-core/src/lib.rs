//! Core library for Israeli vehicle lookup.
//!
//! This crate provides:
//! - License plate extraction from noisy OCR and document text
//!   (normalization, candidate generation, disambiguation)
//! - A `TextSource` contract for the upstream OCR/PDF collaborators,
//!   with a PDF-backed implementation
//! - Configuration and data models for the extraction pipeline

pub mod error;
pub mod models;
pub mod plate;
pub mod source;

pub use error::{RechevError, Result};
pub use models::config::{EpochRules, ExtractionConfig, RechevConfig};
pub use models::plate::{Candidate, CandidateShape, DocumentKind, ExtractionResult};
pub use plate::{PlateExtractor, extract_plate};
pub use source::{PdfTextSource, TextSource};
