//! License plate extraction engine.
//!
//! Three stages run in sequence for every call: the [`normalize::Normalizer`]
//! strips known false-positive generators, the
//! [`candidates::CandidateGenerator`] produces every plausible plate-like
//! substring, and the [`select::Disambiguator`] applies a total ordering
//! plus the IL-prefix artifact correction to yield at most one plate.
//! [`PlateExtractor`] wires the stages together and picks the strategy
//! per document kind.

mod extractor;
pub mod candidates;
pub mod normalize;
pub mod patterns;
pub mod select;

pub use candidates::CandidateGenerator;
pub use extractor::{PlateExtractor, extract_plate};
pub use normalize::Normalizer;
pub use select::Disambiguator;
