//! Configuration types.
//!
//! Loaded from `config.toml` by the infrastructure layer; every field has a
//! default so a missing file or table yields a working configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default fallback window before suppression is lowered without an
/// acknowledgment.
pub const DEFAULT_SUPPRESSION_WINDOW_MS: u64 = 1500;

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifConfig {
    #[serde(default)]
    pub save: SaveConfig,
}

/// Tuning for the save sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Milliseconds after which the suppression flag is lowered even if the
    /// environment never acknowledged the save.
    pub suppression_window_ms: u64,
    /// Lower suppression as soon as the matching save attempt is
    /// acknowledged. When `false`, only the fixed window applies.
    pub release_on_acknowledgment: bool,
    /// Restore the pre-save `original` when the submit fails.
    pub rollback_on_failure: bool,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            suppression_window_ms: DEFAULT_SUPPRESSION_WINDOW_MS,
            release_on_acknowledgment: true,
            rollback_on_failure: false,
        }
    }
}

impl SaveConfig {
    pub fn suppression_window(&self) -> Duration {
        Duration::from_millis(self.suppression_window_ms)
    }
}
