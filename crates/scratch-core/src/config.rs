//! Scratch surface configuration
//!
//! Every tunable the surface consults is carried here and handed to
//! [`ScratchSurface`](crate::surface::ScratchSurface) at construction.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default erasure radius in CSS pixels
pub const DEFAULT_SCRATCH_RADIUS_PX: f64 = 24.0;

/// Default erased fraction above which the card counts as scratched off
pub const DEFAULT_COMPLETION_THRESHOLD: f64 = 0.85;

/// Default minimum interval between non-forced completion checks
pub const DEFAULT_THROTTLE_MS: u64 = 300;

/// Durable keys used by the persistence adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    /// Key holding the assigned prize identifier
    pub prize_id: String,
    /// Key holding the completion flag
    pub scratch_done: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            prize_id: "mme_scratch_prize_id".to_string(),
            scratch_done: "mme_scratch_done".to_string(),
        }
    }
}

/// Scratch card configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    /// Remember the assigned prize and completion across sessions
    pub enable_persistence: bool,
    /// Erasure radius in CSS pixels (scaled by device pixel ratio)
    pub scratch_radius_px: f64,
    /// Erased fraction that must be exceeded to complete, in (0, 1)
    pub completion_threshold: f64,
    /// Throttle window for non-forced completion checks.
    ///
    /// Larger windows sample the full buffer less often during fast strokes;
    /// the forced check on pointer release still evaluates the final state.
    pub throttle_ms: u64,
    /// Persisted key names
    pub storage_keys: StorageKeys,
}

impl ScratchConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With persistence enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_persistence(mut self, enabled: bool) -> Self {
        self.enable_persistence = enabled;
        self
    }

    /// With erasure radius
    #[inline]
    #[must_use]
    pub fn with_radius(mut self, radius_px: f64) -> Self {
        self.scratch_radius_px = radius_px;
        self
    }

    /// With completion threshold
    #[inline]
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.completion_threshold = threshold;
        self
    }

    /// With throttle window in milliseconds
    #[inline]
    #[must_use]
    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    /// With persisted key names
    #[inline]
    #[must_use]
    pub fn with_storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }

    /// Throttle window as a duration
    #[inline]
    #[must_use]
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Validate ranges
    ///
    /// # Errors
    /// - `ConfigError::InvalidRadius` if the radius is not positive and finite
    /// - `ConfigError::InvalidThreshold` if the threshold is outside (0, 1)
    /// - `ConfigError::EmptyStorageKey` if a storage key is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scratch_radius_px.is_finite() || self.scratch_radius_px <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.scratch_radius_px));
        }
        // NaN fails both comparisons, hence the negated form
        if !(self.completion_threshold > 0.0 && self.completion_threshold < 1.0) {
            return Err(ConfigError::InvalidThreshold(self.completion_threshold));
        }
        if self.storage_keys.prize_id.is_empty() {
            return Err(ConfigError::EmptyStorageKey("prize_id"));
        }
        if self.storage_keys.scratch_done.is_empty() {
            return Err(ConfigError::EmptyStorageKey("scratch_done"));
        }
        Ok(())
    }
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            enable_persistence: true,
            scratch_radius_px: DEFAULT_SCRATCH_RADIUS_PX,
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            throttle_ms: DEFAULT_THROTTLE_MS,
            storage_keys: StorageKeys::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ScratchConfig::new();
        assert!(config.validate().is_ok());
        assert!(config.enable_persistence);
        assert_eq!(config.throttle(), Duration::from_millis(300));
        assert_eq!(config.storage_keys.scratch_done, "mme_scratch_done");
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        for bad in [0.0, 1.0, -0.2, 1.3, f64::NAN] {
            let config = ScratchConfig::new().with_threshold(bad);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_radius_and_keys() {
        assert!(matches!(
            ScratchConfig::new().with_radius(0.0).validate(),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            ScratchConfig::new().with_radius(f64::INFINITY).validate(),
            Err(ConfigError::InvalidRadius(_))
        ));

        let keys = StorageKeys {
            prize_id: String::new(),
            ..StorageKeys::default()
        };
        assert_eq!(
            ScratchConfig::new().with_storage_keys(keys).validate(),
            Err(ConfigError::EmptyStorageKey("prize_id"))
        );
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config: ScratchConfig =
            serde_json::from_str(r#"{"completion_threshold": 0.5}"#).unwrap();
        assert!((config.completion_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.throttle_ms, DEFAULT_THROTTLE_MS);
        assert_eq!(config.storage_keys, StorageKeys::default());
    }
}
