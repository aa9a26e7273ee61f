//! WebSocket connection state, live-socket bookkeeping, and the per-socket
//! lifecycle from upgrade through teardown.

pub mod connection;
pub mod lifecycle;
pub mod manager;
