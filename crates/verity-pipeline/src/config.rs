//! Configuration for the research pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for pipeline orchestration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Seconds allowed for the single generation call
    pub generator_timeout_secs: u64,

    /// Seconds allowed for each per-term source search
    pub retrieval_timeout_secs: u64,

    /// Key terms searched per run; extraction stops at this many
    pub max_search_terms: usize,

    /// Estimated dollar cost attributed to each generator call
    pub cost_per_call: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            generator_timeout_secs: 120,
            retrieval_timeout_secs: 30,
            max_search_terms: 5,
            cost_per_call: 0.03,
        }
    }
}

impl PipelineConfig {
    /// Fast preset: tight timeouts for local or mocked providers
    pub fn fast() -> Self {
        Self {
            generator_timeout_secs: 10,
            retrieval_timeout_secs: 5,
            ..Self::default()
        }
    }

    /// Patient preset: generous timeouts for slow remote backends
    pub fn patient() -> Self {
        Self {
            generator_timeout_secs: 600,
            retrieval_timeout_secs: 120,
            ..Self::default()
        }
    }

    /// Generation timeout as a [`Duration`]
    pub fn generator_timeout(&self) -> Duration {
        Duration::from_secs(self.generator_timeout_secs)
    }

    /// Per-search timeout as a [`Duration`]
    pub fn retrieval_timeout(&self) -> Duration {
        Duration::from_secs(self.retrieval_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.generator_timeout_secs == 0 {
            return Err("generator_timeout_secs must be greater than 0".to_string());
        }
        if self.retrieval_timeout_secs == 0 {
            return Err("retrieval_timeout_secs must be greater than 0".to_string());
        }
        if self.max_search_terms == 0 {
            return Err("max_search_terms must be greater than 0".to_string());
        }
        if self.cost_per_call < 0.0 {
            return Err("cost_per_call must not be negative".to_string());
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
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(PipelineConfig::fast().validate().is_ok());
        assert!(PipelineConfig::patient().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let mut config = PipelineConfig::default();
        config.generator_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_cost_is_invalid() {
        let mut config = PipelineConfig::default();
        config.cost_per_call = -0.01;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_accessors() {
        let config = PipelineConfig::default();
        assert_eq!(config.generator_timeout(), Duration::from_secs(120));
        assert_eq!(config.retrieval_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.generator_timeout_secs, parsed.generator_timeout_secs);
        assert_eq!(config.max_search_terms, parsed.max_search_terms);
        assert_eq!(config.cost_per_call, parsed.cost_per_call);
    }
}
