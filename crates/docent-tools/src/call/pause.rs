//! `pause_call` — pause the active call on the client.

use std::sync::Arc;

use async_trait::async_trait;
use docent_core::{CommandSink, GuideCommand, ToolSpec};
use serde_json::Value;

use crate::errors::ToolError;
use crate::traits::{GuideTool, ToolContext};

/// Pauses the call on the connected browser. Takes no arguments.
pub struct PauseCallTool {
    sink: Arc<dyn CommandSink>,
}

impl PauseCallTool {
    /// Create the tool with the given command sink.
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl GuideTool for PauseCallTool {
    fn name(&self) -> &str {
        "pause_call"
    }

    fn definition(&self) -> ToolSpec {
        ToolSpec::with_properties("pause_call", "Pause the current call.", &[])
    }

    async fn execute(&self, _params: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let result = self
            .sink
            .deliver(&ctx.client_id, &GuideCommand::PauseCall)
            .await?;
        Ok(if result.success {
            "Call paused successfully".to_owned()
        } else {
            format!("Error pausing call: {}", result.reason())
        })
    }
}
