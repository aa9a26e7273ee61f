//! Error types for the connection registry.
//!
//! Every variant is a *hard* failure: the backing store is unavailable or
//! corrupted. Expected outcomes (no row for a client, duplicate delete) are
//! expressed as `Option` in the repository API, never as errors.

use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// `SQLite` database error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Schema migration failed.
    #[error("migration error: {message}")]
    Migration {
        /// Describes which migration failed and why.
        message: String,
    },

    /// A stored timestamp could not be parsed.
    #[error("invalid stored timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Convenience type alias for registry results.
pub type Result<T> = std::result::Result<T, RegistryError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
