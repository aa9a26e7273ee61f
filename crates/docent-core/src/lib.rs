//! # docent-core
//!
//! Foundation types for the docent command-routing service.
//!
//! This crate provides the shared vocabulary the other docent crates depend on:
//!
//! - **Branded IDs**: [`ClientId`] and [`ConnectionId`] newtypes for type safety
//! - **Command vocabulary**: [`GuideCommand`] — the closed set of browser
//!   commands the dispatcher can carry
//! - **Delivery results**: [`DeliveryResult`] for soft failures,
//!   [`DispatchError`] for hard ones
//! - **Seams**: the [`CommandSink`] trait connecting agent tools to the
//!   dispatcher, and [`ToolSpec`] schemas surfaced to the agent runtime

#![deny(unsafe_code)]

pub mod command;
pub mod dispatch;
pub mod ids;
pub mod tools;

pub use command::GuideCommand;
pub use dispatch::{
    CommandSink, DeliveryResult, DispatchError, REASON_NOT_CONNECTED, REASON_STALE_CONNECTION,
};
pub use ids::{ClientId, ConnectionId};
pub use tools::ToolSpec;
