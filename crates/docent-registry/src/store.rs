//! Pool-owning facade over the connection repository.
//!
//! This is the surface the server sees. Any error coming out of here means
//! the store itself is unavailable — callers treat that as a hard failure
//! and propagate it, never paper over it.

use chrono::{DateTime, Utc};
use docent_core::{ClientId, ConnectionId};
use tracing::debug;

use crate::connection::RegistryPool;
use crate::errors::Result;
use crate::repository::{ConnectionRecord, ConnectionRepo};

/// Durable registry of live connections, backed by a pooled `SQLite` database.
#[derive(Clone)]
pub struct ConnectionRegistry {
    pool: RegistryPool,
}

impl ConnectionRegistry {
    /// Create a registry over an already-migrated pool.
    #[must_use]
    pub fn new(pool: RegistryPool) -> Self {
        Self { pool }
    }

    /// Record (or overwrite) the mapping for `connection_id`. Idempotent.
    pub fn upsert(
        &self,
        connection_id: &ConnectionId,
        client_id: &ClientId,
        connected_at: DateTime<Utc>,
    ) -> Result<()> {
        let conn = self.pool.get()?;
        ConnectionRepo::upsert(&conn, connection_id, client_id, connected_at)?;
        debug!(%connection_id, %client_id, "connection registered");
        Ok(())
    }

    /// Remove the mapping for `connection_id`, returning the old record.
    ///
    /// Returns `Ok(None)` when no record existed (duplicate disconnect, or
    /// a disconnect racing ahead of the connect's visibility).
    pub fn remove(&self, connection_id: &ConnectionId) -> Result<Option<ConnectionRecord>> {
        let conn = self.pool.get()?;
        let removed = ConnectionRepo::remove(&conn, connection_id)?;
        match &removed {
            Some(record) => {
                debug!(%connection_id, client_id = %record.client_id, "connection removed");
            }
            None => debug!(%connection_id, "remove of unknown connection (no-op)"),
        }
        Ok(removed)
    }

    /// The live connection currently mapped to `client_id`, if any.
    pub fn find_by_client(&self, client_id: &ClientId) -> Result<Option<ConnectionId>> {
        let conn = self.pool.get()?;
        ConnectionRepo::find_by_client(&conn, client_id)
    }

    /// Total number of registered connections.
    pub fn count(&self) -> Result<u64> {
        let conn = self.pool.get()?;
        ConnectionRepo::count(&conn)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{ConnectionConfig, new_in_memory};
    use crate::migrations::run_migrations;

    fn make_registry() -> ConnectionRegistry {
        let pool = new_in_memory(&ConnectionConfig::default()).unwrap();
        {
            let conn = pool.get().unwrap();
            let _ = run_migrations(&conn).unwrap();
        }
        ConnectionRegistry::new(pool)
    }

    #[test]
    fn connect_then_lookup() {
        let registry = make_registry();
        registry.upsert(&"c1".into(), &"u1".into(), Utc::now()).unwrap();
        assert_eq!(
            registry.find_by_client(&"u1".into()).unwrap(),
            Some("c1".into())
        );
    }

    #[test]
    fn remove_then_lookup_is_none() {
        let registry = make_registry();
        registry.upsert(&"c1".into(), &"u1".into(), Utc::now()).unwrap();
        let removed = registry.remove(&"c1".into()).unwrap();
        assert!(removed.is_some());
        assert!(registry.find_by_client(&"u1".into()).unwrap().is_none());
    }

    #[test]
    fn duplicate_remove_reports_not_found() {
        let registry = make_registry();
        registry.upsert(&"c1".into(), &"u1".into(), Utc::now()).unwrap();
        assert!(registry.remove(&"c1".into()).unwrap().is_some());
        assert!(registry.remove(&"c1".into()).unwrap().is_none());
    }

    #[test]
    fn count_tracks_connections() {
        let registry = make_registry();
        assert_eq!(registry.count().unwrap(), 0);
        registry.upsert(&"c1".into(), &"u1".into(), Utc::now()).unwrap();
        registry.upsert(&"c2".into(), &"u2".into(), Utc::now()).unwrap();
        assert_eq!(registry.count().unwrap(), 2);
    }
}
