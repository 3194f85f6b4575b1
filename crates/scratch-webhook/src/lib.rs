//! Scratch Webhook - HTTP redemption delivery
//!
//! [`WebhookSink`] implements the fire-and-forget
//! [`NotificationSink`](scratch_core::NotificationSink) contract: each
//! redemption is POSTed as JSON on a spawned tokio task, failures are logged
//! and dropped, nothing is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use scratch_webhook::{WebhookConfig, WebhookSink};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WebhookConfig::new().with_endpoint("https://hooks.example.com/redeem".parse()?);
//! let sink = WebhookSink::new(&config)?;
//! // hand `Arc::new(sink)` to the session builder
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod sink;

pub use config::WebhookConfig;
pub use error::NotifyError;
pub use sink::{build_sink, WebhookSink};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
