//! Tool error types.

use docent_core::DispatchError;
use thiserror::Error;

/// Errors that can occur during tool execution.
///
/// Soft delivery failures are *not* errors — they come back as `Ok` strings
/// describing the failure. These variants cover caller mistakes and
/// infrastructure outages only.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Argument validation failed.
    #[error("validation error: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// No tool registered under the requested name.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The requested tool name.
        name: String,
    },

    /// The dispatch path failed hard (registry store outage).
    #[error("dispatch failed: {0}")]
    Delivery(#[from] DispatchError),
}

impl ToolError {
    /// Shorthand for a validation failure.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
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
    fn validation_display() {
        let err = ToolError::validation("missing 'path'");
        assert_eq!(err.to_string(), "validation error: missing 'path'");
    }

    #[test]
    fn unknown_tool_display() {
        let err = ToolError::UnknownTool {
            name: "open_popup".into(),
        };
        assert_eq!(err.to_string(), "unknown tool: open_popup");
    }

    #[test]
    fn delivery_wraps_dispatch_error() {
        let err: ToolError = DispatchError::RegistryUnavailable("down".into()).into();
        assert!(err.to_string().contains("dispatch failed"));
    }
}
