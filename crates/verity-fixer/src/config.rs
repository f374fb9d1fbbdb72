//! Configuration for the TargetedFixer

use serde::{Deserialize, Serialize};

/// Configuration for targeted repair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixerConfig {
    /// Warnings are bulk-repaired only when strictly more than this many
    /// exist; a handful of minor issues is not worth editing over
    pub warning_fix_threshold: usize,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            warning_fix_threshold: 3,
        }
    }
}

impl FixerConfig {
    /// Eager preset: repair warnings as soon as there is more than one
    pub fn eager() -> Self {
        Self {
            warning_fix_threshold: 1,
        }
    }

    /// Conservative preset: only repair warnings in bulk
    pub fn conservative() -> Self {
        Self {
            warning_fix_threshold: 10,
        }
    }
}
