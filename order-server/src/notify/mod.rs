//! Customer notifications
//!
//! Status changes are pushed to the customer's WhatsApp through an external
//! messaging API. Delivery is best-effort: callers spawn the send and only
//! log the outcome.
//!
//! - [`Notifier`] - delivery seam
//! - [`BuilderBotNotifier`] - BuilderBot Cloud implementation
//! - [`messages`] - per-status message templates

pub mod builderbot;
pub mod messages;

pub use builderbot::BuilderBotNotifier;

use async_trait::async_trait;
use thiserror::Error;

/// Notification failures
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Bot id or api key missing; no request was attempted
    #[error("messaging credentials not configured")]
    MissingCredentials,

    /// Upstream answered with a non-success status
    #[error("messaging API error: {status} - {body}")]
    Rejected { status: u16, body: String },

    /// Network failure, timeout, undecodable body
    #[error("messaging API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl NotifyError {
    /// HTTP status reported by the upstream, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::MissingCredentials => None,
        }
    }
}

/// Successful hand-off to the messaging API
#[derive(Debug, Clone)]
pub struct Delivery {
    pub status: u16,
    /// Raw upstream response body
    pub body: serde_json::Value,
}

/// Sends a free-text message to a contact number
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, number: &str, message: &str) -> Result<Delivery, NotifyError>;
}
