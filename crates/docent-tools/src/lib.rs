//! # docent-tools
//!
//! The agent adapter: callable "tools" the conversational agent invokes to
//! steer the connected browser.
//!
//! Each tool is a thin wrapper with one job — validate arguments, build the
//! matching [`docent_core::GuideCommand`], hand it to the [`CommandSink`],
//! and translate the delivery outcome into a short human-readable string the
//! agent can speak back to the user. Unreachable clients are reported, never
//! raised.
//!
//! [`CommandSink`]: docent_core::CommandSink

#![deny(unsafe_code)]

pub mod call;
pub mod errors;
pub mod page;
pub mod registry;
#[cfg(test)]
pub(crate) mod testutil;
pub mod traits;

pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use traits::{GuideTool, ToolContext};

use std::sync::Arc;

use docent_core::CommandSink;

/// Build the standard registry with all six guide tools wired to `sink`.
#[must_use]
pub fn builtin_registry(sink: Arc<dyn CommandSink>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(page::NavigateToPageTool::new(sink.clone())));
    registry.register(Arc::new(page::ScrollToSectionTool::new(sink.clone())));
    registry.register(Arc::new(page::FillInputTool::new(sink.clone())));
    registry.register(Arc::new(page::ClickElementTool::new(sink.clone())));
    registry.register(Arc::new(call::EndCallTool::new(sink.clone())));
    registry.register(Arc::new(call::PauseCallTool::new(sink)));
    registry
}
