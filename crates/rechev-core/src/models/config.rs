//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the rechev pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RechevConfig {
    /// Plate extraction configuration.
    pub extraction: ExtractionConfig,

    /// Text source configuration.
    pub source: SourceConfig,
}

/// Plate extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Strip country-marker tokens (IL, 1L, ישראל) before matching.
    pub strip_country_markers: bool,

    /// Strip phone-number shapes that overlap plate digit counts.
    pub strip_phone_numbers: bool,

    /// Window size in characters around the vehicle-number label inside
    /// which a digit run still counts as label-anchored.
    pub label_window: usize,

    /// Numbering-epoch rules for the IL-prefix artifact correction.
    pub epoch: EpochRules,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strip_country_markers: true,
            strip_phone_numbers: true,
            label_window: 50,
            epoch: EpochRules::default(),
        }
    }
}

/// Plate numbering-epoch assumptions.
///
/// The artifact correction relies on real plates not starting with a
/// given digit in the current numbering epoch. Kept as configuration so
/// a future allocation of 1xxxxxxx plates is a config change, not a
/// code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EpochRules {
    /// Leading digits never allocated to real 8-digit plates. An
    /// 8-digit run starting with one of these is suspected to carry a
    /// misread country-code glyph.
    pub reserved_leading_digits: Vec<char>,
}

impl Default for EpochRules {
    fn default() -> Self {
        Self {
            reserved_leading_digits: vec!['1'],
        }
    }
}

impl EpochRules {
    /// Whether an 8-digit value's leading digit is outside the current
    /// numbering space.
    pub fn leading_digit_reserved(&self, value: &str) -> bool {
        value
            .chars()
            .next()
            .is_some_and(|d| self.reserved_leading_digits.contains(&d))
    }
}

/// Text source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Minimum text length for a PDF to count as text-based.
    pub min_text_length: usize,

    /// OCR provider API key (environment variable name, not the key).
    pub api_key_env: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            min_text_length: 10,
            api_key_env: "GOOGLE_API_KEY".to_string(),
        }
    }
}

impl RechevConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_epoch_reserves_one() {
        let epoch = EpochRules::default();
        assert!(epoch.leading_digit_reserved("15552222"));
        assert!(!epoch.leading_digit_reserved("85552222"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = RechevConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: RechevConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.extraction.label_window, 50);
        assert_eq!(back.extraction.epoch.reserved_leading_digits, vec!['1']);
    }
}
