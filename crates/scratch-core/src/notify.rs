//! Redemption notification and celebration hooks
//!
//! Both fire once, at the moment the card is scratched off, and neither may
//! block or roll back the reveal.

use crate::contact::ContactInfo;
use crate::prize::PrizeCard;
use serde::{Deserialize, Serialize};

/// Body delivered to the redemption endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionPayload {
    /// Visitor email, `null` when absent
    pub email: Option<String>,
    /// Visitor first name, `null` when absent
    pub first_name: Option<String>,
    /// Visitor last name, `null` when absent
    pub last_name: Option<String>,
    /// Promo code of the revealed prize
    pub promo: String,
}

impl RedemptionPayload {
    /// Combine a promo code with the visitor's contact fields
    #[must_use]
    pub fn new(promo: impl Into<String>, contact: &ContactInfo) -> Self {
        Self {
            email: contact.email.clone(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            promo: promo.into(),
        }
    }
}

/// Fire-and-forget delivery of a redemption
///
/// `notify` must return promptly and never report failure to the caller;
/// delivery problems are the sink's to log.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    /// Hand off a redemption for delivery
    fn notify(&self, payload: RedemptionPayload);
}

/// Sink that only logs, for deployments without an endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, payload: RedemptionPayload) {
        tracing::info!(
            promo = %payload.promo,
            email = payload.email.as_deref().unwrap_or("-"),
            "redemption (no endpoint configured)"
        );
    }
}

/// Celebratory visual effect shown on completion
#[cfg_attr(test, mockall::automock)]
pub trait Celebration: Send + Sync {
    /// Play the effect for `prize`
    fn celebrate(&self, prize: &PrizeCard);
}

/// No visual effect
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCelebration;

impl Celebration for NoCelebration {
    fn celebrate(&self, _prize: &PrizeCard) {}
}
