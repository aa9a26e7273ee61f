//! `navigate_to_page` — move the browser to a specific page.

use std::sync::Arc;

use async_trait::async_trait;
use docent_core::{CommandSink, GuideCommand, ToolSpec};
use serde_json::Value;

use crate::errors::ToolError;
use crate::traits::{GuideTool, ToolContext, require_str};

/// Navigates the connected browser to a page path.
pub struct NavigateToPageTool {
    sink: Arc<dyn CommandSink>,
}

impl NavigateToPageTool {
    /// Create the tool with the given command sink.
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl GuideTool for NavigateToPageTool {
    fn name(&self) -> &str {
        "navigate_to_page"
    }

    fn definition(&self) -> ToolSpec {
        ToolSpec::with_properties(
            "navigate_to_page",
            "Navigate to a specified page.",
            &[("path", "string", "Path to navigate to")],
        )
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let path = require_str(&params, "path")?;
        let command = GuideCommand::NavigateToPage { path: path.clone() };
        let result = self.sink.deliver(&ctx.client_id, &command).await?;
        Ok(if result.success {
            format!("Navigating to {path}")
        } else {
            format!("Error navigating to {path}: {}", result.reason())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingSink;
    use serde_json::json;

    #[tokio::test]
    async fn delivers_navigate_command() {
        let sink = RecordingSink::delivering();
        let tool = NavigateToPageTool::new(sink.clone());
        let ctx = ToolContext::for_client("u1");

        let reply = tool.execute(json!({"path": "/about"}), &ctx).await.unwrap();

        assert_eq!(reply, "Navigating to /about");
        let (client, command) = sink.only_delivery();
        assert_eq!(client.as_str(), "u1");
        assert_eq!(
            command,
            GuideCommand::NavigateToPage {
                path: "/about".into()
            }
        );
    }

    #[tokio::test]
    async fn soft_failure_becomes_spoken_error() {
        let sink = RecordingSink::failing("client not connected");
        let tool = NavigateToPageTool::new(sink);
        let ctx = ToolContext::for_client("u1");

        let reply = tool.execute(json!({"path": "/about"}), &ctx).await.unwrap();
        assert_eq!(reply, "Error navigating to /about: client not connected");
    }

    #[tokio::test]
    async fn missing_path_is_validation_error() {
        let sink = RecordingSink::delivering();
        let tool = NavigateToPageTool::new(sink.clone());
        let ctx = ToolContext::for_client("u1");

        let err = tool.execute(json!({}), &ctx).await.unwrap_err();
        assert!(matches!(err, ToolError::Validation { .. }));
        assert!(sink.deliveries.lock().is_empty());
    }

    #[tokio::test]
    async fn store_outage_propagates() {
        let sink = RecordingSink::unavailable();
        let tool = NavigateToPageTool::new(sink);
        let ctx = ToolContext::for_client("u1");

        let err = tool.execute(json!({"path": "/"}), &ctx).await.unwrap_err();
        assert!(matches!(err, ToolError::Delivery(_)));
    }
}
