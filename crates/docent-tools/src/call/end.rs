//! `end_call` — terminate the active call on the client.

use std::sync::Arc;

use async_trait::async_trait;
use docent_core::{CommandSink, GuideCommand, ToolSpec};
use serde_json::Value;

use crate::errors::ToolError;
use crate::traits::{GuideTool, ToolContext};

/// Ends the call on the connected browser. Takes no arguments.
pub struct EndCallTool {
    sink: Arc<dyn CommandSink>,
}

impl EndCallTool {
    /// Create the tool with the given command sink.
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl GuideTool for EndCallTool {
    fn name(&self) -> &str {
        "end_call"
    }

    fn definition(&self) -> ToolSpec {
        ToolSpec::with_properties("end_call", "End the current call.", &[])
    }

    async fn execute(&self, _params: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let result = self
            .sink
            .deliver(&ctx.client_id, &GuideCommand::EndCall)
            .await?;
        Ok(if result.success {
            "Call ended successfully".to_owned()
        } else {
            format!("Error ending call: {}", result.reason())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingSink;
    use serde_json::json;

    #[tokio::test]
    async fn delivers_end_call() {
        let sink = RecordingSink::delivering();
        let tool = EndCallTool::new(sink.clone());
        let ctx = ToolContext::for_client("u1");

        let reply = tool.execute(json!({}), &ctx).await.unwrap();

        assert_eq!(reply, "Call ended successfully");
        let (_, command) = sink.only_delivery();
        assert_eq!(command, GuideCommand::EndCall);
    }

    #[tokio::test]
    async fn soft_failure_reported() {
        let sink = RecordingSink::failing("client not connected");
        let tool = EndCallTool::new(sink);
        let ctx = ToolContext::for_client("u1");

        let reply = tool.execute(json!({}), &ctx).await.unwrap();
        assert_eq!(reply, "Error ending call: client not connected");
    }
}
