//! Core trait for the guide tool system.

use async_trait::async_trait;
use docent_core::{ClientId, ToolSpec};
use serde_json::Value;

use crate::errors::ToolError;

/// Execution context passed to every tool invocation.
///
/// The target client is an explicit field, set per call by whoever bridges
/// the agent runtime — tools never consult ambient state to find out which
/// browser they are steering.
#[derive(Clone, Debug)]
pub struct ToolContext {
    /// Stable identity of the browser this invocation targets.
    pub client_id: ClientId,
}

impl ToolContext {
    /// Context for the given client.
    #[must_use]
    pub fn for_client(client_id: impl Into<ClientId>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }
}

/// The trait every guide tool implements.
///
/// - **Schema** via [`definition()`](GuideTool::definition) — surfaced to the
///   agent runtime
/// - **Execution** via [`execute()`](GuideTool::execute) — invoked with JSON
///   arguments, returns the string spoken back through the agent
#[async_trait]
pub trait GuideTool: Send + Sync {
    /// Tool name — the exact string the agent uses to invoke it.
    fn name(&self) -> &str;

    /// Generate the [`ToolSpec`] schema for the agent runtime.
    fn definition(&self) -> ToolSpec;

    /// Execute the tool with JSON arguments.
    ///
    /// Delivery soft-failures come back as `Ok` with a descriptive string;
    /// `Err` is reserved for invalid arguments and store outages.
    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<String, ToolError>;
}

/// Extract a required string argument from a params object.
pub(crate) fn require_str(params: &Value, key: &str) -> Result<String, ToolError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ToolError::validation(format!("missing or empty string argument '{key}'")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
