//! Run metrics for a pipeline execution

use serde::{Deserialize, Serialize};

/// Measurements collected over one research run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Wall-clock time for the whole run, in seconds
    pub total_time_secs: f64,

    /// Generator calls made (one for the draft, one more if repaired)
    pub api_calls: u32,

    /// Estimated dollar cost: api_calls times the configured per-call cost
    pub estimated_cost: f64,

    /// Claims that went through verification
    pub claims_verified: usize,

    /// Fraction of verified claims that came back error severity
    pub error_rate: f64,

    /// Distinct evidence sources gathered for verification
    pub sources_used: usize,
}

impl RunMetrics {
    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{:.1}s, {} API calls (${:.2}), {} claims verified, {:.0}% error rate, {} sources",
            self.total_time_secs,
            self.api_calls,
            self.estimated_cost,
            self.claims_verified,
            self.error_rate * 100.0,
            self.sources_used
        )
    }
}
