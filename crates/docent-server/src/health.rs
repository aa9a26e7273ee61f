//! `/health` endpoint.

use std::time::Instant;

use serde::Serialize;

/// Liveness snapshot returned by `GET /health`.
///
/// `connections` counts live sockets held by the manager; `registered`
/// counts rows in the durable registry. The two drift apart when a
/// crashed session orphans its row, which makes the pair a cheap
/// consistency probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is answering at all.
    pub status: &'static str,
    /// Server crate version.
    pub version: &'static str,
    /// Seconds since startup.
    pub uptime_secs: u64,
    /// Live WebSocket connections.
    pub connections: usize,
    /// Rows in the durable connection registry.
    pub registered: u64,
}

impl HealthResponse {
    /// Snapshot the live counters.
    #[must_use]
    pub fn gather(start_time: Instant, connections: usize, registered: u64) -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs: start_time.elapsed().as_secs(),
            connections,
            registered,
        }
    }
}
