//! Call-control tools (end and pause the voice session).

mod end;
mod pause;

pub use end::EndCallTool;
pub use pause::PauseCallTool;
