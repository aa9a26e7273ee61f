//! Query gateway — forwards visitor questions to the external agent runtime
//! and returns the cleaned reply.
//!
//! The agent sees one prompt per question, carrying the visitor's current
//! location so navigation tools have context. Whatever the agent emits
//! inside `<thinking>` blocks is stripped before the reply leaves the
//! server.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docent_core::ClientId;
use metrics::counter;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::config::GatewayConfig;
use crate::server::AppState;

/// Errors from the agent runtime boundary.
#[derive(Debug, Error)]
pub enum AgentRuntimeError {
    /// The runtime could not be reached or returned a transport error.
    #[error("agent request failed: {0}")]
    Request(String),
    /// The runtime answered with a non-success status.
    #[error("agent returned status {status}")]
    Status {
        /// HTTP status code from the runtime.
        status: u16,
    },
    /// The runtime's response body had no usable reply text.
    #[error("agent response had no content")]
    EmptyResponse,
}

/// Boundary to the external conversational agent.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Run one reasoning turn and return the agent's raw reply text.
    async fn invoke(&self, prompt: &str, client_id: &ClientId)
    -> Result<String, AgentRuntimeError>;
}

/// Production [`AgentRuntime`] speaking HTTP to the configured endpoint.
pub struct HttpAgentRuntime {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAgentRuntime {
    /// Build a runtime client from gateway config.
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .user_agent("docent/0.1")
                .build()
                .unwrap_or_default(),
            endpoint: config.agent_endpoint.trim_end_matches('/').to_owned(),
        }
    }

    /// Pull the reply text out of the runtime's response body.
    ///
    /// Accepts either a bare `{"content": "..."}` or the structured
    /// `{"result": {"content": [{"text": "..."}]}}` shape.
    fn extract_text(body: &Value) -> Option<String> {
        if let Some(text) = body.get("content").and_then(Value::as_str) {
            return Some(text.to_owned());
        }
        body.get("result")
            .and_then(|r| r.get("content"))
            .and_then(Value::as_array)
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|b| b.get("text").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|s| !s.is_empty())
    }
}

#[async_trait]
impl AgentRuntime for HttpAgentRuntime {
    async fn invoke(
        &self,
        prompt: &str,
        client_id: &ClientId,
    ) -> Result<String, AgentRuntimeError> {
        let response = self
            .client
            .post(format!("{}/invoke", self.endpoint))
            .json(&serde_json::json!({
                "prompt": prompt,
                "client_id": client_id.as_str(),
            }))
            .send()
            .await
            .map_err(|e| AgentRuntimeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentRuntimeError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AgentRuntimeError::Request(e.to_string()))?;
        Self::extract_text(&body).ok_or(AgentRuntimeError::EmptyResponse)
    }
}

static THINKING_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<thinking>.*?</thinking>").expect("thinking regex is valid")
});

/// Strip `<thinking>` blocks from an agent reply and trim whitespace.
#[must_use]
pub fn clean_reply(raw: &str) -> String {
    THINKING_BLOCK.replace_all(raw, "").trim().to_owned()
}

/// `POST /query` request body.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The visitor's question.
    #[serde(default)]
    pub query: Option<String>,
    /// Which client's browser the answer may steer.
    #[serde(default)]
    pub client_id: Option<String>,
    /// Current page location, e.g. `"/pricing"`.
    #[serde(default)]
    pub location: Option<String>,
}

/// `POST /query` response body.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// The agent's cleaned reply.
    pub content: String,
}

/// `POST /query` — one visitor question, one agent turn.
#[instrument(skip_all, fields(client_id))]
pub async fn query_handler(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Response {
    counter!("query_requests_total").increment(1);

    // The frontend only reads `content`, so errors use the same envelope.
    let Some(query) = request.query.filter(|q| !q.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(QueryResponse {
                content: "Missing query in request body".into(),
            }),
        )
            .into_response();
    };

    let client_id = ClientId::from(request.client_id.unwrap_or_default());
    let _ = tracing::Span::current().record("client_id", client_id.as_str());
    let location = request.location.unwrap_or_else(|| "/".into());
    let prompt = format!("User's query: {query}. Location: {location}");

    match state.agent.invoke(&prompt, &client_id).await {
        Ok(raw) => {
            let content = clean_reply(&raw);
            debug!(chars = content.len(), "agent reply");
            (StatusCode::OK, Json(QueryResponse { content })).into_response()
        }
        Err(e) => {
            error!(error = %e, "agent invocation failed");
            counter!("query_failures_total").increment(1);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(QueryResponse {
                    content: "Internal server error".into(),
                }),
            )
                .into_response()
        }
    }
}
