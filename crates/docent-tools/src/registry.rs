//! Tool registry — central index of all registered tools.
//!
//! The [`ToolRegistry`] maps tool names to their [`GuideTool`] implementations.
//! The server registers the builtin tools at startup, serves their schemas to
//! the agent runtime, and routes invocations by name.

use std::collections::HashMap;
use std::sync::Arc;

use docent_core::ToolSpec;
use serde_json::Value;
use tracing::debug;

use crate::errors::ToolError;
use crate::traits::{GuideTool, ToolContext};

/// Central registry mapping tool names to their implementations.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn GuideTool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Overwrites any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn GuideTool>) {
        debug!(tool_name = tool.name(), "tool registered");
        let _ = self.tools.insert(tool.name().to_owned(), tool);
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn GuideTool>> {
        self.tools.get(name).cloned()
    }

    /// Return all tool schemas for the agent runtime, sorted by name.
    #[must_use]
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|t| t.definition()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Return all tool names, sorted alphabetically.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Whether a tool with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Invoke a tool by name with the given arguments.
    pub async fn invoke(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<String, ToolError> {
        let tool = self.get(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_owned(),
        })?;
        tool.execute(args, ctx).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::builtin_registry;
    use crate::testutil::RecordingSink;

    /// Minimal stub tool for registry tests.
    struct StubTool {
        tool_name: String,
    }

    impl StubTool {
        fn new(name: &str) -> Self {
            Self {
                tool_name: name.into(),
            }
        }
    }

    #[async_trait]
    impl GuideTool for StubTool {
        fn name(&self) -> &str {
            &self.tool_name
        }

        fn definition(&self) -> ToolSpec {
            ToolSpec::with_properties(&self.tool_name, "stub", &[])
        }

        async fn execute(&self, _params: Value, _ctx: &ToolContext) -> Result<String, ToolError> {
            Ok("ok".into())
        }
    }

    #[test]
    fn new_creates_empty_registry() {
        let reg = ToolRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn register_and_get() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(StubTool::new("navigate_to_page")));
        let tool = reg.get("navigate_to_page");
        assert!(tool.is_some());
        assert_eq!(tool.unwrap().name(), "navigate_to_page");
    }

    #[test]
    fn get_unknown_returns_none() {
        let reg = ToolRegistry::new();
        assert!(reg.get("open_popup").is_none());
    }

    #[test]
    fn register_duplicate_overwrites() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(StubTool::new("end_call")));
        reg.register(Arc::new(StubTool::new("end_call")));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn names_returns_sorted() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(StubTool::new("scroll_to_section")));
        reg.register(Arc::new(StubTool::new("click_element")));
        reg.register(Arc::new(StubTool::new("fill_input")));
        assert_eq!(
            reg.names(),
            vec!["click_element", "fill_input", "scroll_to_section"]
        );
    }

    #[tokio::test]
    async fn invoke_unknown_tool_errors() {
        let reg = ToolRegistry::new();
        let ctx = ToolContext::for_client("u1");
        let err = reg.invoke("open_popup", json!({}), &ctx).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool { .. }));
    }

    #[tokio::test]
    async fn invoke_routes_to_tool() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(StubTool::new("end_call")));
        let ctx = ToolContext::for_client("u1");
        let reply = reg.invoke("end_call", json!({}), &ctx).await.unwrap();
        assert_eq!(reply, "ok");
    }

    #[test]
    fn builtin_registry_carries_all_six_tools() {
        let reg = builtin_registry(RecordingSink::delivering());
        assert_eq!(
            reg.names(),
            vec![
                "click_element",
                "end_call",
                "fill_input",
                "navigate_to_page",
                "pause_call",
                "scroll_to_section"
            ]
        );
        assert_eq!(reg.specs().len(), 6);
    }
}
