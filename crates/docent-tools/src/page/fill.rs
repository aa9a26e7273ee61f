//! `fill_input` — type a value into a form field.

use std::sync::Arc;

use async_trait::async_trait;
use docent_core::{CommandSink, GuideCommand, ToolSpec};
use serde_json::Value;

use crate::errors::ToolError;
use crate::traits::{GuideTool, ToolContext, require_str};

/// Fills a form input on the connected browser.
pub struct FillInputTool {
    sink: Arc<dyn CommandSink>,
}

impl FillInputTool {
    /// Create the tool with the given command sink.
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl GuideTool for FillInputTool {
    fn name(&self) -> &str {
        "fill_input"
    }

    fn definition(&self) -> ToolSpec {
        ToolSpec::with_properties(
            "fill_input",
            "Fill an input field with a value.",
            &[
                ("selector", "string", "CSS selector of the input to fill"),
                ("value", "string", "Value to type into the input"),
            ],
        )
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<String, ToolError> {
        let selector = require_str(&params, "selector")?;
        let value = require_str(&params, "value")?;
        let command = GuideCommand::FillInput {
            selector: selector.clone(),
            value: value.clone(),
        };
        let result = self.sink.deliver(&ctx.client_id, &command).await?;
        Ok(if result.success {
            format!("Filling input {selector} with value '{value}'")
        } else {
            format!("Error filling input {selector}: {}", result.reason())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingSink;
    use serde_json::json;

    #[tokio::test]
    async fn delivers_fill_command() {
        let sink = RecordingSink::delivering();
        let tool = FillInputTool::new(sink.clone());
        let ctx = ToolContext::for_client("u1");

        let reply = tool
            .execute(json!({"selector": "#email", "value": "a@b.co"}), &ctx)
            .await
            .unwrap();

        assert_eq!(reply, "Filling input #email with value 'a@b.co'");
        let (_, command) = sink.only_delivery();
        assert_eq!(
            command,
            GuideCommand::FillInput {
                selector: "#email".into(),
                value: "a@b.co".into()
            }
        );
    }

    #[tokio::test]
    async fn requires_both_arguments() {
        let sink = RecordingSink::delivering();
        let tool = FillInputTool::new(sink.clone());
        let ctx = ToolContext::for_client("u1");

        let err = tool
            .execute(json!({"selector": "#email"}), &ctx)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'value'"));
        assert!(sink.deliveries.lock().is_empty());
    }
}
