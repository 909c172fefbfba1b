//! Plate candidate and extraction result models.

use serde::{Deserialize, Serialize};

/// What kind of source produced the text being scanned.
///
/// Registration documents carry an explicit vehicle-number label that
/// photographed plates do not, so the extractor runs a label-anchored
/// strategy first for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Free-form text from a photographed plate.
    #[default]
    Photo,
    /// Text extracted from a vehicle registration document (רישיון רכב).
    RegistrationDocument,
}

/// How a candidate was matched. Tier comparison during disambiguation
/// goes through [`CandidateShape::priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateShape {
    /// Three punctuation-separated digit groups (XXX-XX-XXX or XX-XXX-XX).
    FormattedTriplet,
    /// Digit run found near the "מספר רכב" label (documents only).
    ContextAnchored,
    /// Standalone 8-digit run (current plate format).
    Plain8,
    /// Standalone 7-digit run (legacy plate format).
    Plain7,
}

impl CandidateShape {
    /// Numeric tier, higher wins during disambiguation.
    pub fn priority(self) -> u8 {
        match self {
            Self::FormattedTriplet => 3,
            Self::ContextAnchored => 2,
            Self::Plain8 => 1,
            Self::Plain7 => 0,
        }
    }
}

/// A plate-like digit string found in the normalized text.
///
/// Invariant: `value` is 7 or 8 ASCII digits, nothing else. Candidates
/// live only for the duration of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The concatenated digits (length 7 or 8).
    pub value: String,
    /// Byte offset of the first matched character in the normalized text.
    pub position: usize,
    /// Which rule matched this candidate.
    pub shape: CandidateShape,
    /// Index of the sub-pattern within the rule that produced the match
    /// (0 for single-pattern rules).
    pub pattern: usize,
}

impl Candidate {
    pub fn new(value: impl Into<String>, position: usize, shape: CandidateShape) -> Self {
        Self {
            value: value.into(),
            position,
            shape,
            pattern: 0,
        }
    }

    pub fn with_pattern(mut self, pattern: usize) -> Self {
        self.pattern = pattern;
        self
    }
}

/// Outcome of one extraction call.
///
/// `plate = None` means "no plate visible" - an expected, recoverable
/// outcome, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The recovered plate digits, separators stripped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,
    /// The full text the engine was handed, untouched.
    pub raw_text: String,
}

impl ExtractionResult {
    pub fn found(plate: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            plate: Some(plate.into()),
            raw_text: raw_text.into(),
        }
    }

    pub fn not_found(raw_text: impl Into<String>) -> Self {
        Self {
            plate: None,
            raw_text: raw_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_priority_ordering() {
        assert!(CandidateShape::FormattedTriplet.priority() > CandidateShape::ContextAnchored.priority());
        assert!(CandidateShape::ContextAnchored.priority() > CandidateShape::Plain8.priority());
        assert!(CandidateShape::Plain8.priority() > CandidateShape::Plain7.priority());
    }

    #[test]
    fn test_document_kind_default() {
        assert_eq!(DocumentKind::default(), DocumentKind::Photo);
    }
}
