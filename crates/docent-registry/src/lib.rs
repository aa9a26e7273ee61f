//! # docent-registry
//!
//! Durable connection registry: the key-value store mapping a stable client
//! identifier to its current live connection.
//!
//! - `SQLite` storage via an `r2d2` pool with WAL mode
//! - Versioned, idempotent schema migrations
//! - [`ConnectionRepo`]: stateless row operations (upsert, delete-with-return,
//!   indexed lookup by client)
//! - [`ConnectionRegistry`]: pool-owning facade used by the server
//!
//! Write access is reserved for the connection lifecycle handler; the
//! dispatcher only ever reads.

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repository;
pub mod store;

pub use connection::{ConnectionConfig, PooledConnection, RegistryPool, new_file, new_in_memory};
pub use errors::{RegistryError, Result};
pub use migrations::run_migrations;
pub use repository::{ConnectionRecord, ConnectionRepo};
pub use store::ConnectionRegistry;
