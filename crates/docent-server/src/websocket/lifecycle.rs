//! WebSocket lifecycle — validates the connect request, records the
//! connection in the durable registry, runs the session, and tears both
//! down on disconnect.
//!
//! The registry row is written before the upgrade completes, so a store
//! outage rejects the connect outright instead of leaving a live socket
//! with no record. Teardown is idempotent: every disconnect path (client
//! close, socket error, heartbeat timeout, server shutdown) funnels into
//! the same cleanup, and a missing row is a debug-level no-op.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docent_core::{ClientId, ConnectionId};
use futures::{SinkExt, StreamExt};
use metrics::{counter, gauge, histogram};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::server::AppState;

use super::connection::ClientConnection;

/// Query parameters accepted on `GET /ws`.
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Stable client identity; required and non-blank.
    #[serde(default)]
    pub client_id: Option<String>,
}

/// `GET /ws` — validate, register, then upgrade.
///
/// The `client_id` check runs before the upgrade requirement so a bad
/// connect is answered with a plain 400 whether or not the caller sent
/// upgrade headers.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<ConnectParams>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let client_id = params.client_id.map(ClientId::from_string).filter(ClientId::is_valid);
    let Some(client_id) = client_id else {
        return (StatusCode::BAD_REQUEST, "client_id query parameter is required").into_response();
    };
    if state.manager.connection_count().await >= state.config.max_connections {
        warn!(client_id = %client_id, limit = state.config.max_connections, "connection limit reached");
        return (StatusCode::SERVICE_UNAVAILABLE, "connection limit reached").into_response();
    }
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return rejection.into_response(),
    };

    let connection_id = ConnectionId::generate();
    if let Err(e) = state
        .registry
        .upsert(&connection_id, &client_id, chrono::Utc::now())
    {
        error!(error = %e, client_id = %client_id, "registry write failed, rejecting connect");
        return (StatusCode::INTERNAL_SERVER_ERROR, "connection registry unavailable")
            .into_response();
    }

    ws.max_message_size(state.config.max_message_size)
        .on_upgrade(move |socket| run_session(socket, connection_id, client_id, state))
}

/// Run a WebSocket session for a registered connection.
///
/// 1. Registers the socket with the connection manager
/// 2. Sends a `connection.established` frame
/// 3. Forwards dispatched command frames from the send channel
/// 4. Sends periodic Ping frames and disconnects unresponsive clients
/// 5. Removes the socket from the manager and the registry on disconnect
#[instrument(skip_all, fields(connection_id = %connection_id, client_id = %client_id))]
pub async fn run_session(
    ws: WebSocket,
    connection_id: ConnectionId,
    client_id: ClientId,
    state: AppState,
) {
    let (mut ws_tx, mut ws_rx) = ws.split();

    let (send_tx, mut send_rx) = mpsc::channel::<Arc<String>>(state.config.send_buffer);
    let connection = Arc::new(ClientConnection::new(
        connection_id.clone(),
        client_id.clone(),
        send_tx,
    ));

    let connection_start = std::time::Instant::now();
    info!("client connected");
    counter!("ws_connections_total").increment(1);
    gauge!("ws_connections_active").increment(1.0);

    state.manager.add(connection.clone()).await;

    let established = serde_json::json!({
        "type": "connection.established",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "data": {
            "clientId": client_id.as_str(),
            "connectionId": connection_id.as_str(),
        },
    });
    if let Ok(json) = serde_json::to_string(&established) {
        let _ = ws_tx.send(Message::Text(json.into())).await;
    }

    let ping_interval = Duration::from_secs(state.config.heartbeat_interval_secs);
    let pong_timeout = Duration::from_secs(state.config.heartbeat_timeout_secs);

    // Cancelled by server shutdown (parent token) or when the outbound half
    // gives up (send error, dead heartbeat). The inbound loop listens on it,
    // so teardown never waits for a client that stopped reading.
    let session_token = state.shutdown.token().child_token();

    // Outbound forwarder with periodic Ping frames.
    let outbound_conn = connection.clone();
    let outbound_token = session_token.clone();
    let outbound = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ping_interval);
        // Skip the immediate first tick
        let _ = ticker.tick().await;

        loop {
            tokio::select! {
                frame = send_rx.recv() => {
                    match frame {
                        Some(text) => {
                            if ws_tx.send(Message::Text((*text).clone().into())).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    if !outbound_conn.check_alive()
                        && outbound_conn.last_pong_elapsed() > pong_timeout
                    {
                        warn!("client unresponsive for {pong_timeout:?}, disconnecting");
                        break;
                    }
                    if ws_tx.send(Message::Ping(vec![].into())).await.is_err() {
                        break;
                    }
                }
                () = outbound_token.cancelled() => {
                    let _ = ws_tx.send(Message::Close(None)).await;
                    break;
                }
            }
        }
        outbound_token.cancel();
    });

    // Inbound loop. The guide protocol is one-way (server pushes commands),
    // so text frames from the client only count as liveness.
    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Close(_) => {
                        info!("client sent close frame");
                        break;
                    }
                    Message::Ping(_) | Message::Pong(_) => connection.mark_alive(),
                    Message::Text(text) => {
                        connection.mark_alive();
                        debug!(len = text.len(), "ignoring inbound text frame");
                    }
                    Message::Binary(data) => {
                        connection.mark_alive();
                        debug!(len = data.len(), "ignoring inbound binary frame");
                    }
                }
            }
            () = session_token.cancelled() => {
                info!("session cancelled");
                break;
            }
        }
    }

    info!(drops = connection.drop_count(), "client disconnected");
    counter!("ws_disconnections_total").increment(1);
    gauge!("ws_connections_active").decrement(1.0);
    histogram!("ws_connection_duration_seconds").record(connection_start.elapsed().as_secs_f64());
    outbound.abort();

    state.manager.remove(&connection_id).await;
    match state.registry.remove(&connection_id) {
        Ok(Some(_)) => {}
        Ok(None) => debug!("registry row already gone"),
        // The row is orphaned until the client reconnects; newest-connection
        // selection shadows it after that.
        Err(e) => error!(error = %e, "registry cleanup failed"),
    }
}
