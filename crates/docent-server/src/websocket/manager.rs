//! Live-socket bookkeeping.
//!
//! The manager is the in-memory view of connected sockets, keyed by
//! connection ID. It never touches the durable registry; the lifecycle
//! handler keeps the two in step.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use docent_core::ConnectionId;
use metrics::counter;
use tokio::sync::RwLock;
use tracing::warn;

use crate::dispatch::{PushOutcome, SocketPush};

use super::connection::ClientConnection;

/// Tracks connected WebSocket clients.
pub struct ConnectionManager {
    /// Connected clients indexed by connection ID.
    connections: RwLock<HashMap<ConnectionId, Arc<ClientConnection>>>,
}

impl ConnectionManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Add a connection.
    pub async fn add(&self, connection: Arc<ClientConnection>) {
        let mut conns = self.connections.write().await;
        let _ = conns.insert(connection.id.clone(), connection);
    }

    /// Remove a connection by ID. No-op when already gone.
    pub async fn remove(&self, connection_id: &ConnectionId) {
        let mut conns = self.connections.write().await;
        let _ = conns.remove(connection_id);
    }

    /// Look up a connection by ID.
    pub async fn get(&self, connection_id: &ConnectionId) -> Option<Arc<ClientConnection>> {
        self.connections.read().await.get(connection_id).cloned()
    }

    /// Number of live connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SocketPush for ConnectionManager {
    async fn push(&self, connection_id: &ConnectionId, payload: Arc<String>) -> PushOutcome {
        let Some(connection) = self.get(connection_id).await else {
            return PushOutcome::ConnectionGone;
        };
        if connection.send(payload) {
            PushOutcome::Delivered
        } else {
            warn!(connection_id = %connection_id, drops = connection.drop_count(), "frame dropped");
            counter!("ws_dropped_frames_total").increment(1);
            PushOutcome::ConnectionGone
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn make_connection(
        id: &str,
        client: &str,
    ) -> (Arc<ClientConnection>, mpsc::Receiver<Arc<String>>) {
        let (tx, rx) = mpsc::channel(32);
        let conn = ClientConnection::new(id.into(), client.into(), tx);
        (Arc::new(conn), rx)
    }

    #[tokio::test]
    async fn add_and_count() {
        let manager = ConnectionManager::new();
        let (conn, _rx) = make_connection("c1", "u1");
        manager.add(conn).await;
        assert_eq!(manager.connection_count().await, 1);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let manager = ConnectionManager::new();
        let (conn, _rx) = make_connection("c1", "u1");
        manager.add(conn).await;
        manager.remove(&"c1".into()).await;
        manager.remove(&"c1".into()).await;
        assert_eq!(manager.connection_count().await, 0);
    }

    #[tokio::test]
    async fn push_to_live_connection() {
        let manager = ConnectionManager::new();
        let (conn, mut rx) = make_connection("c1", "u1");
        manager.add(conn).await;

        let outcome = manager.push(&"c1".into(), Arc::new("frame".into())).await;
        assert_eq!(outcome, PushOutcome::Delivered);
        assert_eq!(&*rx.recv().await.unwrap(), "frame");
    }

    #[tokio::test]
    async fn push_to_unknown_connection_is_gone() {
        let manager = ConnectionManager::new();
        let outcome = manager
            .push(&"no_such".into(), Arc::new("frame".into()))
            .await;
        assert_eq!(outcome, PushOutcome::ConnectionGone);
    }

    #[tokio::test]
    async fn push_to_closed_channel_is_gone() {
        let manager = ConnectionManager::new();
        let (conn, rx) = make_connection("c1", "u1");
        manager.add(conn).await;
        drop(rx);

        let outcome = manager.push(&"c1".into(), Arc::new("frame".into())).await;
        assert_eq!(outcome, PushOutcome::ConnectionGone);
    }

    #[tokio::test]
    async fn add_same_id_overwrites() {
        let manager = ConnectionManager::new();
        let (c1, _rx1) = make_connection("c1", "u1");
        let (c2, mut rx2) = make_connection("c1", "u2");
        manager.add(c1).await;
        manager.add(c2).await;
        assert_eq!(manager.connection_count().await, 1);

        let outcome = manager.push(&"c1".into(), Arc::new("frame".into())).await;
        assert_eq!(outcome, PushOutcome::Delivered);
        assert!(rx2.try_recv().is_ok());
    }

    #[tokio::test]
    async fn get_returns_connection() {
        let manager = ConnectionManager::new();
        let (conn, _rx) = make_connection("c1", "u1");
        manager.add(conn).await;
        let found = manager.get(&"c1".into()).await.unwrap();
        assert_eq!(found.client_id.as_str(), "u1");
        assert!(manager.get(&"c2".into()).await.is_none());
    }
}
