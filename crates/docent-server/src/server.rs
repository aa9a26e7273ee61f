//! `DocentServer` — Axum HTTP + WebSocket server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use docent_registry::ConnectionRegistry;
use docent_tools::ToolRegistry;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::gateway::{AgentRuntime, query_handler};
use crate::health::HealthResponse;
use crate::shutdown::ShutdownCoordinator;
use crate::tools_api::{invoke_tool, list_tools};
use crate::websocket::lifecycle::ws_handler;
use crate::websocket::manager::ConnectionManager;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Durable connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Live-socket manager.
    pub manager: Arc<ConnectionManager>,
    /// Registered guide tools.
    pub tools: Arc<ToolRegistry>,
    /// Boundary to the external agent runtime.
    pub agent: Arc<dyn AgentRuntime>,
    /// Server configuration.
    pub config: ServerConfig,
    /// Shutdown coordinator.
    pub shutdown: Arc<ShutdownCoordinator>,
    /// When the server started.
    pub start_time: Instant,
    /// Prometheus render handle.
    pub metrics_handle: PrometheusHandle,
}

/// The main docent server.
pub struct DocentServer {
    state: AppState,
}

impl DocentServer {
    /// Create a new server over already-wired components.
    pub fn new(
        config: ServerConfig,
        registry: Arc<ConnectionRegistry>,
        manager: Arc<ConnectionManager>,
        tools: Arc<ToolRegistry>,
        agent: Arc<dyn AgentRuntime>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            state: AppState {
                registry,
                manager,
                tools,
                agent,
                config,
                shutdown: Arc::new(ShutdownCoordinator::new()),
                start_time: Instant::now(),
                metrics_handle,
            },
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .route("/ws", get(ws_handler))
            .route("/query", post(query_handler))
            .route("/tools", get(list_tools))
            .route("/tools/invoke", post(invoke_tool))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve in a background task.
    ///
    /// Returns the bound address (useful with port `0`) and the join handle
    /// of the serving task. Serving stops when the shutdown coordinator
    /// fires.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let addr = format!("{}:{}", self.state.config.host, self.state.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "server listening");

        let app = self.router();
        let shutdown = self.state.shutdown.clone();
        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await });
            if let Err(e) = serve.await {
                tracing::error!(error = %e, "server error");
            }
        });

        Ok((local_addr, handle))
    }

    /// Bind and serve until the shutdown coordinator fires.
    pub async fn serve(&self) -> std::io::Result<()> {
        let (_, handle) = self.listen().await?;
        let _ = handle.await;
        Ok(())
    }

    /// Get the connection manager.
    pub fn manager(&self) -> &Arc<ConnectionManager> {
        &self.state.manager
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.state.shutdown
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let connections = state.manager.connection_count().await;
    let registered = state.registry.count().unwrap_or(0);
    Json(HealthResponse::gather(state.start_time, connections, registered))
}

/// GET /metrics
async fn metrics_handler(State(state): State<AppState>) -> String {
    crate::metrics::render(&state.metrics_handle)
}
