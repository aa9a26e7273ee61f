//! Delivery outcomes and the dispatcher seam.
//!
//! Non-delivery is data, not an exception: a client that navigated away or
//! dropped its socket produces a [`DeliveryResult`] with `success = false`
//! and a short reason string the conversational layer can speak back to the
//! user. Only registry-store outages surface as a hard [`DispatchError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::GuideCommand;
use crate::ids::ClientId;

/// Reason string for a dispatch whose target has no live mapping.
pub const REASON_NOT_CONNECTED: &str = "client not connected";
/// Reason string for a dispatch whose mapping pointed at a dead socket.
pub const REASON_STALE_CONNECTION: &str = "stale connection";

/// Outcome of one targeted delivery attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Whether the command reached the client's live connection.
    pub success: bool,
    /// Reason for non-delivery (present when `success == false`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DeliveryResult {
    /// The command was pushed to the client's connection.
    #[must_use]
    pub fn delivered() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// The command could not be delivered (soft failure).
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }

    /// Reason string, or `"unknown"` when none was recorded.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown")
    }
}

/// Hard failures of the dispatch path.
///
/// These abort the caller's operation; soft failures (unreachable client)
/// never take this path.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The connection registry backend is unavailable.
    #[error("connection registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// The command could not be serialized to the wire format.
    #[error("failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Anything that can deliver a command to the named client's live connection.
///
/// Implemented by the server's targeted dispatcher; consumed by the agent
/// tools. The client identity is an explicit parameter on every call — there
/// is no ambient "current client" anywhere in the system.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Deliver `command` to the connection currently mapped to `client_id`.
    async fn deliver(
        &self,
        client_id: &ClientId,
        command: &GuideCommand,
    ) -> Result<DeliveryResult, DispatchError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
