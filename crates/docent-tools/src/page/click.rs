//! `click_element` — click an element on the page.

use std::sync::Arc;

use async_trait::async_trait;
use docent_core::{CommandSink, GuideCommand, ToolSpec};
use serde_json::Value;

use crate::errors::ToolError;
use crate::traits::{GuideTool, ToolContext, require_str};

/// Clicks an element on the connected browser.
pub struct ClickElementTool {
    sink: Arc<dyn CommandSink>,
}

impl ClickElementTool {
    /// Create the tool with the given command sink.
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl GuideTool for ClickElementTool {
    fn name(&self) -> &str {
        "click_element"
    }

    fn definition(&self) -> ToolSpec {
        ToolSpec::with_properties(
            "click_element",
            "Click an element on the current page.",
            &[("selector", "string", "CSS selector of the element to click")],
        )
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let selector = require_str(&params, "selector")?;
        let command = GuideCommand::ClickElement {
            selector: selector.clone(),
        };
        let result = self.sink.deliver(&ctx.client_id, &command).await?;
        Ok(if result.success {
            format!("Clicking element {selector}")
        } else {
            format!("Error clicking element {selector}: {}", result.reason())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingSink;
    use serde_json::json;

    #[tokio::test]
    async fn delivers_click_command() {
        let sink = RecordingSink::delivering();
        let tool = ClickElementTool::new(sink.clone());
        let ctx = ToolContext::for_client("u1");

        let reply = tool
            .execute(json!({"selector": ".cta-button"}), &ctx)
            .await
            .unwrap();

        assert_eq!(reply, "Clicking element .cta-button");
        let (client, command) = sink.only_delivery();
        assert_eq!(client.as_str(), "u1");
        assert_eq!(
            command,
            GuideCommand::ClickElement {
                selector: ".cta-button".into()
            }
        );
    }

    #[tokio::test]
    async fn disconnected_client_reported_in_reply() {
        let sink = RecordingSink::failing("client not connected");
        let tool = ClickElementTool::new(sink);
        let ctx = ToolContext::for_client("u1");

        let reply = tool
            .execute(json!({"selector": ".cta-button"}), &ctx)
            .await
            .unwrap();
        assert_eq!(reply, "Error clicking element .cta-button: client not connected");
    }
}
