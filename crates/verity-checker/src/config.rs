//! Configuration for the FactChecker

use serde::{Deserialize, Serialize};

/// Configuration for claim verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Token-overlap ratio above which a source supports a claim
    pub overlap_threshold: f64,

    /// Confidence contributed by each supporting source
    pub per_source_confidence: f64,

    /// Confidence below which a supported claim still gets a
    /// more-sources suggestion
    pub low_confidence_threshold: f64,

    /// Tokens must be strictly longer than this to count for overlap
    pub min_token_len: usize,

    /// Characters of claim text quoted in an add-citation suggestion
    pub fix_excerpt_chars: usize,

    /// Significant tokens used to build a supplemental evidence query
    pub supplemental_query_tokens: usize,

    /// Supplemental search results considered per unsupported claim
    pub supplemental_results_limit: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: 0.3,
            per_source_confidence: 0.3,
            low_confidence_threshold: 0.5,
            min_token_len: 3,
            fix_excerpt_chars: 50,
            supplemental_query_tokens: 8,
            supplemental_results_limit: 3,
        }
    }
}

impl CheckerConfig {
    /// Strict preset: higher overlap bar, smaller per-source credit
    pub fn strict() -> Self {
        Self {
            overlap_threshold: 0.5,
            per_source_confidence: 0.2,
            ..Self::default()
        }
    }

    /// Lenient preset: lower overlap bar, larger per-source credit
    pub fn lenient() -> Self {
        Self {
            overlap_threshold: 0.2,
            per_source_confidence: 0.4,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.overlap_threshold) {
            return Err("overlap_threshold must be within [0.0, 1.0]".to_string());
        }
        if !(0.0..=1.0).contains(&self.per_source_confidence) {
            return Err("per_source_confidence must be within [0.0, 1.0]".to_string());
        }
        if !(0.0..=1.0).contains(&self.low_confidence_threshold) {
            return Err("low_confidence_threshold must be within [0.0, 1.0]".to_string());
        }
        if self.fix_excerpt_chars == 0 {
            return Err("fix_excerpt_chars must be greater than 0".to_string());
        }
        if self.supplemental_query_tokens == 0 {
            return Err("supplemental_query_tokens must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CheckerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(CheckerConfig::strict().validate().is_ok());
        assert!(CheckerConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_invalid_overlap_threshold() {
        let mut config = CheckerConfig::default();
        config.overlap_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_excerpt_length() {
        let mut config = CheckerConfig::default();
        config.fix_excerpt_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CheckerConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = CheckerConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.overlap_threshold, parsed.overlap_threshold);
        assert_eq!(config.per_source_confidence, parsed.per_source_confidence);
        assert_eq!(config.min_token_len, parsed.min_token_len);
    }
}
