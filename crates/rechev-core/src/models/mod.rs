//! Data models for plate extraction.

pub mod config;
pub mod plate;

pub use config::{EpochRules, ExtractionConfig, RechevConfig};
pub use plate::{Candidate, CandidateShape, DocumentKind, ExtractionResult};
