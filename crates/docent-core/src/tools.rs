//! Tool schema types surfaced to the agent runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-schema definition of one callable tool.
///
/// Sent to the agent runtime so its reasoning loop knows the tool's name,
/// purpose, and argument shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name — the exact string the agent uses to invoke it.
    pub name: String,
    /// Human-readable description for the reasoning loop.
    pub description: String,
    /// JSON schema of the argument object.
    pub input_schema: Value,
}

impl ToolSpec {
    /// Build a spec with an object schema from `(name, type, description)`
    /// property triples; every listed property is required.
    #[must_use]
    pub fn with_properties(
        name: &str,
        description: &str,
        properties: &[(&str, &str, &str)],
    ) -> Self {
        let mut props = serde_json::Map::new();
        let mut required = Vec::new();
        for (prop, ty, desc) in properties {
            let _ = props.insert(
                (*prop).to_string(),
                serde_json::json!({"type": ty, "description": desc}),
            );
            required.push((*prop).to_string());
        }
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": props,
                "required": required,
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_properties_builds_object_schema() {
        let spec = ToolSpec::with_properties(
            "fill_input",
            "Fill an input field",
            &[
                ("selector", "string", "CSS selector"),
                ("value", "string", "Value to fill"),
            ],
        );
        assert_eq!(spec.name, "fill_input");
        assert_eq!(spec.input_schema["type"], "object");
        assert_eq!(
            spec.input_schema["properties"]["selector"]["type"],
            "string"
        );
        assert_eq!(spec.input_schema["required"][1], "value");
    }

    #[test]
    fn no_properties_means_empty_required() {
        let spec = ToolSpec::with_properties("end_call", "End the call", &[]);
        assert!(spec.input_schema["required"].as_array().unwrap().is_empty());
    }
}
