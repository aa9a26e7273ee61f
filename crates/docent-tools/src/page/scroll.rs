//! `scroll_to_section` — scroll the page to a specific section.

use std::sync::Arc;

use async_trait::async_trait;
use docent_core::{CommandSink, GuideCommand, ToolSpec};
use serde_json::Value;

use crate::errors::ToolError;
use crate::traits::{GuideTool, ToolContext, require_str};

/// Scrolls the connected browser to a section by element id.
pub struct ScrollToSectionTool {
    sink: Arc<dyn CommandSink>,
}

impl ScrollToSectionTool {
    /// Create the tool with the given command sink.
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl GuideTool for ScrollToSectionTool {
    fn name(&self) -> &str {
        "scroll_to_section"
    }

    fn definition(&self) -> ToolSpec {
        ToolSpec::with_properties(
            "scroll_to_section",
            "Scroll to a specific section on the current page.",
            &[("selector_id", "string", "Element id of the section to scroll to")],
        )
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let selector_id = require_str(&params, "selector_id")?;
        let command = GuideCommand::ScrollToSection {
            selector_id: selector_id.clone(),
        };
        let result = self.sink.deliver(&ctx.client_id, &command).await?;
        Ok(if result.success {
            format!("Scrolling to section {selector_id}")
        } else {
            format!("Error scrolling to section {selector_id}: {}", result.reason())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingSink;
    use serde_json::json;

    #[tokio::test]
    async fn delivers_scroll_command() {
        let sink = RecordingSink::delivering();
        let tool = ScrollToSectionTool::new(sink.clone());
        let ctx = ToolContext::for_client("u1");

        let reply = tool
            .execute(json!({"selector_id": "pricing"}), &ctx)
            .await
            .unwrap();

        assert_eq!(reply, "Scrolling to section pricing");
        let (_, command) = sink.only_delivery();
        assert_eq!(
            command,
            GuideCommand::ScrollToSection {
                selector_id: "pricing".into()
            }
        );
    }

    #[tokio::test]
    async fn stale_connection_reported_in_reply() {
        let sink = RecordingSink::failing("stale connection");
        let tool = ScrollToSectionTool::new(sink);
        let ctx = ToolContext::for_client("u1");

        let reply = tool
            .execute(json!({"selector_id": "pricing"}), &ctx)
            .await
            .unwrap();
        assert_eq!(reply, "Error scrolling to section pricing: stale connection");
    }
}
