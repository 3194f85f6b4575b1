//! Configuration file loading
//!
//! ```toml
//! [scratch]
//! enable_persistence = true
//! completion_threshold = 0.85
//!
//! [webhook]
//! endpoint = "https://hooks.example.com/redeem"
//! timeout_ms = 10000
//! ```
//!
//! Both sections are optional. `SCRATCH_WEBHOOK_URL` overrides
//! `webhook.endpoint`.

use anyhow::Context;
use scratch_core::ScratchConfig;
use scratch_webhook::WebhookConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

/// Environment variable overriding the webhook endpoint
pub(crate) const WEBHOOK_URL_ENV: &str = "SCRATCH_WEBHOOK_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AppConfig {
    pub(crate) scratch: ScratchConfig,
    pub(crate) webhook: WebhookConfig,
}

impl AppConfig {
    /// Load from `path` (defaults when `None`), apply the environment
    /// override and validate
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let endpoint = std::env::var(WEBHOOK_URL_ENV).ok();
        config.override_endpoint(endpoint.as_deref())?;
        config
            .scratch
            .validate()
            .context("invalid [scratch] configuration")?;
        Ok(config)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Replace the endpoint with `value` when it is set and non-blank
    pub(crate) fn override_endpoint(&mut self, value: Option<&str>) -> anyhow::Result<()> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        let endpoint: Url = value
            .parse()
            .with_context(|| format!("{WEBHOOK_URL_ENV} is not a valid URL: {value}"))?;
        self.webhook.endpoint = Some(endpoint);
        Ok(())
    }
}
