//! HTTP surface the external agent runtime drives the tools through.
//!
//! `GET /tools` hands the runtime the schemas for its reasoning loop;
//! `POST /tools/invoke` executes one tool against one client's browser.
//! Delivery soft-failures (client offline, stale socket) come back inside
//! a 200 as descriptive text so the agent can speak them, never as HTTP
//! errors.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docent_core::{ClientId, ToolSpec};
use docent_tools::{ToolContext, ToolError};
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, instrument, warn};

use crate::server::AppState;

/// `GET /tools` — schemas of every registered tool.
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSpec>> {
    Json(state.tools.specs())
}

/// `POST /tools/invoke` request body.
#[derive(Debug, Deserialize)]
pub struct InvokeRequest {
    /// Name of the tool to run.
    pub tool: String,
    /// Tool arguments (defaults to an empty object).
    #[serde(default)]
    pub args: Value,
    /// Which client's browser the tool steers.
    #[serde(default)]
    pub client_id: Option<String>,
}

/// `POST /tools/invoke` response body.
#[derive(Debug, Serialize)]
pub struct InvokeResponse {
    /// Human-readable outcome for the agent to speak.
    pub content: String,
}

/// `POST /tools/invoke` — run one tool for one client.
#[instrument(skip_all, fields(tool = %request.tool))]
pub async fn invoke_tool(
    State(state): State<AppState>,
    Json(request): Json<InvokeRequest>,
) -> Response {
    counter!("tool_invocations_total", "tool" => request.tool.clone()).increment(1);

    let client_id = ClientId::from(request.client_id.unwrap_or_default());
    if !client_id.is_valid() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "client_id is required"})),
        )
            .into_response();
    }

    let ctx = ToolContext::for_client(client_id);
    match state.tools.invoke(&request.tool, request.args, &ctx).await {
        Ok(content) => (StatusCode::OK, Json(InvokeResponse { content })).into_response(),
        Err(ToolError::UnknownTool { name }) => {
            warn!(tool = %name, "unknown tool requested");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": format!("unknown tool: {name}")})),
            )
                .into_response()
        }
        Err(ToolError::Validation { message }) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": message})),
        )
            .into_response(),
        Err(ToolError::Delivery(e)) => {
            error!(error = %e, "tool delivery failed hard");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "dispatch unavailable"})),
            )
                .into_response()
        }
    }
}
