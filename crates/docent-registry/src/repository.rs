//! Connection repository — row operations on the `connections` table.
//!
//! Stateless, every method takes `&Connection`. Ownership rules are enforced
//! by convention at the call sites: the lifecycle handler is the only writer
//! (`upsert`/`remove`), the dispatcher only calls `find_by_client`.

use chrono::{DateTime, Utc};
use docent_core::{ClientId, ConnectionId};
use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::{RegistryError, Result};

/// One registered connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionRecord {
    /// Transport-assigned connection identity (primary key).
    pub connection_id: ConnectionId,
    /// Client-supplied stable identity (indexed, non-unique).
    pub client_id: ClientId,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
}

/// Connection repository — stateless, every method takes `&Connection`.
pub struct ConnectionRepo;

impl ConnectionRepo {
    /// Insert or overwrite the record keyed by `connection_id`. Idempotent.
    pub fn upsert(
        conn: &Connection,
        connection_id: &ConnectionId,
        client_id: &ClientId,
        connected_at: DateTime<Utc>,
    ) -> Result<()> {
        let _ = conn.execute(
            "INSERT INTO connections (connection_id, client_id, connected_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(connection_id) DO UPDATE SET
                 client_id = excluded.client_id,
                 connected_at = excluded.connected_at",
            params![
                connection_id.as_str(),
                client_id.as_str(),
                connected_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// Delete the record for `connection_id`, returning the removed row.
    ///
    /// `None` when no row existed — disconnect may race with delivery or
    /// arrive twice, so absence is an expected outcome, not an error.
    pub fn remove(
        conn: &Connection,
        connection_id: &ConnectionId,
    ) -> Result<Option<ConnectionRecord>> {
        let raw = conn
            .query_row(
                "DELETE FROM connections WHERE connection_id = ?1
                 RETURNING connection_id, client_id, connected_at",
                params![connection_id.as_str()],
                Self::map_raw,
            )
            .optional()?;
        raw.map(Self::parse_record).transpose()
    }

    /// Return the live connection for `client_id`, if any.
    ///
    /// When several records share the client (stale rows from crashed
    /// connections), the most recently connected one wins; timestamp ties
    /// break on the lexicographically largest `connection_id`. The same
    /// inputs always produce the same answer.
    pub fn find_by_client(conn: &Connection, client_id: &ClientId) -> Result<Option<ConnectionId>> {
        let id: Option<String> = conn
            .query_row(
                "SELECT connection_id FROM connections
                 WHERE client_id = ?1
                 ORDER BY connected_at DESC, connection_id DESC
                 LIMIT 1",
                params![client_id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(ConnectionId::from_string))
    }

    /// All records for a client, newest first. Diagnostics only.
    pub fn list_by_client(
        conn: &Connection,
        client_id: &ClientId,
    ) -> Result<Vec<ConnectionRecord>> {
        let mut stmt = conn.prepare(
            "SELECT connection_id, client_id, connected_at FROM connections
             WHERE client_id = ?1
             ORDER BY connected_at DESC, connection_id DESC",
        )?;
        let raw = stmt
            .query_map(params![client_id.as_str()], Self::map_raw)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        raw.into_iter().map(Self::parse_record).collect()
    }

    /// Total number of registered connections.
    pub fn count(conn: &Connection) -> Result<u64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM connections", [], |row| row.get(0))?;
        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }

    fn map_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, String, String)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
    }

    fn parse_record(
        (connection_id, client_id, connected_at): (String, String, String),
    ) -> Result<ConnectionRecord> {
        let connected_at = DateTime::parse_from_rfc3339(&connected_at)
            .map_err(|_| RegistryError::InvalidTimestamp(connected_at))?
            .with_timezone(&Utc);
        Ok(ConnectionRecord {
            connection_id: ConnectionId::from_string(connection_id),
            client_id: ClientId::from_string(client_id),
            connected_at,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
