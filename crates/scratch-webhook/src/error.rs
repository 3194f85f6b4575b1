//! Webhook delivery errors
//!
//! These never reach the scratch surface; the sink logs them.

/// Webhook error type
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// No endpoint configured
    #[error("no webhook endpoint configured")]
    MissingEndpoint,

    /// Sink created outside a tokio runtime
    #[error("no tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// HTTP client could not be built
    #[error("http client initialisation failed: {0}")]
    Client(#[source] reqwest::Error),

    /// Request failed before a response arrived (connect, timeout, ...)
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

impl NotifyError {
    /// Whether a retry could plausibly succeed (not acted on: delivery is one-shot)
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Status(status) => status.is_server_error(),
            _ => false,
        }
    }
}
