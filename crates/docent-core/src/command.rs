//! The command vocabulary — the closed set of structured commands the
//! dispatcher can deliver to a browser.
//!
//! Each command serializes to the wire form expected by the frontend:
//! `{"tool": "<name>", "args": {...}}`. Commands without arguments
//! (`end_call`, `pause_call`) omit the `args` key entirely.
//!
//! The dispatcher treats commands as opaque serializable values; argument
//! validation happens in the tool wrappers before construction.

use serde::{Deserialize, Serialize};

/// A structured command pushed to a connected browser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "args", rename_all = "snake_case")]
pub enum GuideCommand {
    /// Navigate the browser to a page path.
    NavigateToPage {
        /// Path to navigate to (e.g. `/about`).
        path: String,
    },
    /// Scroll the current page to a section.
    ScrollToSection {
        /// Section ID to scroll to.
        selector_id: String,
    },
    /// Fill an input field with a value.
    FillInput {
        /// CSS selector for the input element.
        selector: String,
        /// Value to fill in.
        value: String,
    },
    /// Click an element on the page.
    ClickElement {
        /// CSS selector for the element to click.
        selector: String,
    },
    /// End the current call/conversation.
    EndCall,
    /// Pause the current call/conversation.
    PauseCall,
}

impl GuideCommand {
    /// The wire tag for this command (used in logs and metric labels).
    #[must_use]
    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::NavigateToPage { .. } => "navigate_to_page",
            Self::ScrollToSection { .. } => "scroll_to_section",
            Self::FillInput { .. } => "fill_input",
            Self::ClickElement { .. } => "click_element",
            Self::EndCall => "end_call",
            Self::PauseCall => "pause_call",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
