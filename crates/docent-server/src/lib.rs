//! # docent-server
//!
//! Axum HTTP + `WebSocket` server for the website guide.
//!
//! - `WebSocket` lifecycle: `GET /ws?client_id=...` upgrades, records the
//!   connection in the durable registry, and tears both down on disconnect
//! - Targeted dispatch: [`dispatch::Dispatcher`] resolves a client to its
//!   live socket and pushes one serialized command frame
//! - Query gateway: `POST /query` forwards the visitor's question to the
//!   external agent runtime and returns the cleaned reply
//! - Agent adapter surface: `GET /tools` and `POST /tools/invoke` let the
//!   agent runtime discover and execute guide tools
//! - Graceful shutdown via `tokio::signal` + `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod gateway;
pub mod health;
pub mod metrics;
pub mod server;
pub mod shutdown;
pub mod tools_api;
pub mod websocket;

pub use config::{GatewayConfig, ServerConfig};
pub use dispatch::{Dispatcher, PushOutcome, SocketPush};
pub use gateway::{AgentRuntime, AgentRuntimeError, HttpAgentRuntime};
pub use server::{AppState, DocentServer};
pub use shutdown::ShutdownCoordinator;
