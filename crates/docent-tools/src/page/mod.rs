//! Page-steering tools: navigation, scrolling, form filling, clicking.

mod click;
mod fill;
mod navigate;
mod scroll;

pub use click::ClickElementTool;
pub use fill::FillInputTool;
pub use navigate::NavigateToPageTool;
pub use scroll::ScrollToSectionTool;
