//! Fire-and-forget webhook sink

use crate::config::WebhookConfig;
use crate::error::NotifyError;
use futures::future::join_all;
use parking_lot::Mutex;
use scratch_core::{LogSink, NotificationSink, RedemptionPayload};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use url::Url;

/// POSTs redemptions to a fixed endpoint on background tasks
#[derive(Debug)]
pub struct WebhookSink {
    client: reqwest::Client,
    endpoint: Url,
    runtime: Handle,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl WebhookSink {
    /// Create sink on the current tokio runtime
    ///
    /// # Errors
    /// - `NotifyError::MissingEndpoint` if no endpoint is configured
    /// - `NotifyError::NoRuntime` if called outside a tokio runtime
    /// - `NotifyError::Client` if the HTTP client cannot be built
    pub fn new(config: &WebhookConfig) -> Result<Self, NotifyError> {
        if config.endpoint.is_none() {
            return Err(NotifyError::MissingEndpoint);
        }
        Self::with_runtime(config, Handle::try_current()?)
    }

    /// Create sink spawning onto `runtime`
    ///
    /// # Errors
    /// - `NotifyError::MissingEndpoint` if no endpoint is configured
    /// - `NotifyError::Client` if the HTTP client cannot be built
    pub fn with_runtime(config: &WebhookConfig, runtime: Handle) -> Result<Self, NotifyError> {
        let endpoint = config.endpoint.clone().ok_or(NotifyError::MissingEndpoint)?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(NotifyError::Client)?;

        Ok(Self {
            client,
            endpoint,
            runtime,
            in_flight: Mutex::new(Vec::new()),
        })
    }

    /// Target endpoint
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Deliver one payload and report the outcome
    ///
    /// # Errors
    /// - `NotifyError::Request` on transport failure or timeout
    /// - `NotifyError::Status` on a non-success response
    pub async fn deliver(&self, payload: &RedemptionPayload) -> Result<(), NotifyError> {
        post(&self.client, self.endpoint.clone(), payload).await
    }

    /// Wait for every delivery started so far
    ///
    /// Only for process shutdown; scratch state never waits on delivery.
    pub async fn flush(&self) {
        let pending: Vec<_> = std::mem::take(&mut *self.in_flight.lock());
        if pending.is_empty() {
            return;
        }
        tracing::debug!(count = pending.len(), "waiting for webhook deliveries");
        for result in join_all(pending).await {
            if let Err(error) = result {
                tracing::error!(%error, "webhook task aborted");
            }
        }
    }

    /// Deliveries started and not yet collected by `flush`
    #[must_use]
    pub fn pending(&self) -> usize {
        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|task| !task.is_finished());
        in_flight.len()
    }
}

impl NotificationSink for WebhookSink {
    fn notify(&self, payload: RedemptionPayload) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        let task = self.runtime.spawn(async move {
            match post(&client, endpoint, &payload).await {
                Ok(()) => tracing::info!(promo = %payload.promo, "redemption delivered"),
                Err(error) => tracing::error!(
                    promo = %payload.promo,
                    %error,
                    transient = error.is_transient(),
                    "failed to send promo redemption"
                ),
            }
        });

        let mut in_flight = self.in_flight.lock();
        in_flight.retain(|task| !task.is_finished());
        in_flight.push(task);
    }
}

async fn post(
    client: &reqwest::Client,
    endpoint: Url,
    payload: &RedemptionPayload,
) -> Result<(), NotifyError> {
    let response = client
        .post(endpoint)
        .json(payload)
        .send()
        .await
        .map_err(NotifyError::Request)?;

    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(NotifyError::Status(status))
    }
}

/// Sink for `config`: a [`WebhookSink`] when an endpoint is set, otherwise
/// a [`LogSink`]
///
/// # Errors
/// Same as [`WebhookSink::new`], except that a missing endpoint is not an error
pub fn build_sink(config: &WebhookConfig) -> Result<Arc<dyn NotificationSink>, NotifyError> {
    if config.endpoint.is_none() {
        tracing::warn!("no webhook endpoint configured, redemptions will only be logged");
        return Ok(Arc::new(LogSink));
    }
    Ok(Arc::new(WebhookSink::new(config)?))
}
