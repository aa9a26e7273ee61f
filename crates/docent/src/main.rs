//! # docent
//!
//! Website guide server binary — wires the connection registry, live-socket
//! manager, dispatcher, tools, and query gateway into one HTTP/WebSocket
//! server.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use docent_registry::{ConnectionConfig, ConnectionRegistry};
use docent_server::websocket::manager::ConnectionManager;
use docent_server::{Dispatcher, DocentServer, GatewayConfig, HttpAgentRuntime, ServerConfig};
use tracing_subscriber::EnvFilter;

/// Website guide server.
#[derive(Parser, Debug)]
#[command(name = "docent", about = "Website guide server")]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind (0 for auto-assign).
    #[arg(long, default_value = "8800")]
    port: u16,

    /// Path to the `SQLite` connection registry database.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Base URL of the external agent runtime.
    #[arg(long, default_value = "http://127.0.0.1:8700")]
    agent_endpoint: String,

    /// Keep the connection registry in memory (local runs, no persistence).
    #[arg(long)]
    in_memory: bool,
}

impl Cli {
    fn default_db_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home).join(".docent").join("registry.db")
    }
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let metrics_handle = docent_server::metrics::install_recorder();

    // Connection registry (durable SQLite, or ephemeral for local runs)
    let pool = if args.in_memory {
        docent_registry::new_in_memory(&ConnectionConfig::default())
            .context("Failed to open in-memory registry")?
    } else {
        let db_path = args.db_path.unwrap_or_else(Cli::default_db_path);
        ensure_parent_dir(&db_path)?;
        docent_registry::new_file(&db_path.to_string_lossy(), &ConnectionConfig::default())
            .context("Failed to open registry database")?
    };
    {
        let conn = pool.get().context("Failed to get registry connection")?;
        let applied = docent_registry::run_migrations(&conn)
            .context("Failed to run registry migrations")?;
        if applied > 0 {
            tracing::info!(applied, "registry migrations applied");
        }
    }
    let registry = Arc::new(ConnectionRegistry::new(pool));

    // Live sockets + targeted dispatch
    let manager = Arc::new(ConnectionManager::new());
    let dispatcher = Arc::new(Dispatcher::new(registry.clone(), manager.clone()));

    // Guide tools, driven by the external agent through /tools
    let tools = Arc::new(docent_tools::builtin_registry(dispatcher));

    // Query gateway to the external agent runtime
    let gateway_config = GatewayConfig {
        agent_endpoint: args.agent_endpoint,
        ..GatewayConfig::default()
    };
    let agent = Arc::new(HttpAgentRuntime::new(&gateway_config));

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        ..ServerConfig::default()
    };

    let server = DocentServer::new(config, registry, manager, tools, agent, metrics_handle);

    let (addr, handle) = server.listen().await.context("Failed to bind server")?;
    tracing::info!("docent listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().shutdown();
    let _ = handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["docent"]);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 8800);
        assert_eq!(cli.agent_endpoint, "http://127.0.0.1:8700");
        assert!(!cli.in_memory);
        assert_eq!(cli.db_path, None);
    }

    #[test]
    fn cli_custom_values() {
        let cli = Cli::parse_from([
            "docent",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--db-path",
            "/tmp/registry.db",
            "--in-memory",
        ]);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 9000);
        assert_eq!(cli.db_path, Some(PathBuf::from("/tmp/registry.db")));
        assert!(cli.in_memory);
    }

    #[test]
    fn default_db_path_under_home() {
        let path = Cli::default_db_path();
        assert!(path.ends_with(".docent/registry.db"));
    }

    #[test]
    fn ensure_parent_dir_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("registry.db");
        ensure_parent_dir(&nested).unwrap();
        assert!(nested.parent().unwrap().is_dir());
    }
}
