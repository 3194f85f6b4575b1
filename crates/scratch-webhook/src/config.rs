//! Webhook configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default whole-request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Where and how to deliver redemptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Redemption endpoint; `None` disables delivery
    pub endpoint: Option<Url>,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl WebhookConfig {
    /// Create default configuration (no endpoint)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With endpoint
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// With timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Timeout as a duration
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}
