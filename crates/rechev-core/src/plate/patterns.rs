//! Compiled regex patterns for Israeli plate extraction.
//!
//! The statics are compiled once; the normalizer and generator clone
//! what they need into constructor-owned pattern sets (`Regex` clones
//! share the compiled program).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Three digit groups separated by plate punctuation. Israeli layouts
    // are XXX-XX-XXX (8 digits) and XX-XXX-XX (7 digits); the 7/8 total
    // length check happens in the generator.
    pub static ref FORMATTED_TRIPLET: Regex = Regex::new(
        r"(\d{2,3})[-\u{2013}\u{2014}:.\s]+(\d{2,3})[-\u{2013}\u{2014}:.\s]+(\d{2,3})"
    ).unwrap();

    // Country/unit markers the OCR layer reads off the plate itself.
    // "1L" is the common I->1 confusion of the IL marker.
    pub static ref COUNTRY_MARKER: Regex = Regex::new(
        r"(?i)(?:\b(?:israel|il|1l)\b|ישראל)"
    ).unwrap();

    // National toll-free numbers: 1-700/1-800 followed by a 3-3 group.
    pub static ref TOLL_FREE_PHONE: Regex = Regex::new(
        r"\b1[-\s]?[78]00[-\s]?\d{3}[-\s]?\d{3}\b"
    ).unwrap();

    // Local numbers: two-digit area code (leading 0) plus 7 digits.
    pub static ref LOCAL_PHONE: Regex = Regex::new(
        r"\b0\d[-\s]?\d{7}\b"
    ).unwrap();

    // Page-layout whitespace runs folded to single spaces in document mode.
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // The vehicle-number label on registration documents.
    pub static ref VEHICLE_LABEL: Regex = Regex::new(r"מספר\s*רכב").unwrap();

    // Digit run immediately after the label.
    pub static ref LABEL_AFTER: Regex = Regex::new(
        r"מספר\s*רכב[:\s]*(\d{7,8})"
    ).unwrap();

    // Digit run shortly before the label (right-to-left layouts put the
    // value first in the extracted stream). "1M"/"M1" is a misread of
    // the document's unit glyph between value and label.
    pub static ref LABEL_BEFORE: Regex = Regex::new(
        r"(\d{7,8})\s*(?:1M|M1)?[^\d]{0,40}מספר\s*רכב"
    ).unwrap();
}
