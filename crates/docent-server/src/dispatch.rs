//! Targeted command dispatch — resolves a client to its live socket and
//! pushes one serialized command frame.
//!
//! The dispatcher is a pure reader of the connection registry: unreachable
//! clients become soft [`DeliveryResult`] failures and never trigger a
//! registry write or a retry. Stale rows are cleaned up by the lifecycle
//! handler alone.

use std::sync::Arc;

use async_trait::async_trait;
use docent_core::{ClientId, CommandSink, ConnectionId, DeliveryResult, DispatchError};
use docent_core::{GuideCommand, REASON_NOT_CONNECTED, REASON_STALE_CONNECTION};
use docent_registry::ConnectionRegistry;
use metrics::counter;
use tracing::{debug, warn};

/// Outcome of pushing a frame to a live socket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushOutcome {
    /// Frame was queued on the connection's send channel.
    Delivered,
    /// The connection is unknown, or its channel is closed or full.
    ConnectionGone,
}

/// Transport seam between the dispatcher and the live-socket layer.
#[async_trait]
pub trait SocketPush: Send + Sync {
    /// Push a serialized frame to the identified connection.
    async fn push(&self, connection_id: &ConnectionId, payload: Arc<String>) -> PushOutcome;
}

/// Looks up a client's newest connection and delivers one command to it.
pub struct Dispatcher {
    registry: Arc<ConnectionRegistry>,
    transport: Arc<dyn SocketPush>,
}

impl Dispatcher {
    /// Create a dispatcher over the given registry and transport.
    pub fn new(registry: Arc<ConnectionRegistry>, transport: Arc<dyn SocketPush>) -> Self {
        Self {
            registry,
            transport,
        }
    }
}

#[async_trait]
impl CommandSink for Dispatcher {
    async fn deliver(
        &self,
        client_id: &ClientId,
        command: &GuideCommand,
    ) -> Result<DeliveryResult, DispatchError> {
        let tool = command.tool_name();
        counter!("dispatch_total", "tool" => tool).increment(1);

        let found = self
            .registry
            .find_by_client(client_id)
            .map_err(|e| DispatchError::RegistryUnavailable(e.to_string()))?;

        let Some(connection_id) = found else {
            debug!(client_id = %client_id, tool, "no connection on record");
            counter!("dispatch_failures_total", "tool" => tool, "reason" => "not_connected")
                .increment(1);
            return Ok(DeliveryResult::failed(REASON_NOT_CONNECTED));
        };

        // Serialize once; the frame is shared with the socket write task.
        let payload = Arc::new(serde_json::to_string(command)?);

        match self.transport.push(&connection_id, payload).await {
            PushOutcome::Delivered => {
                debug!(client_id = %client_id, connection_id = %connection_id, tool, "command delivered");
                Ok(DeliveryResult::delivered())
            }
            PushOutcome::ConnectionGone => {
                warn!(client_id = %client_id, connection_id = %connection_id, tool, "stale connection record");
                counter!("dispatch_failures_total", "tool" => tool, "reason" => "stale")
                    .increment(1);
                Ok(DeliveryResult::failed(REASON_STALE_CONNECTION))
            }
        }
    }
}
