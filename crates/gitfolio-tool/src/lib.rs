//! Tools the agent may invoke during a chat turn.

pub mod content;
pub mod generate;
pub mod profile;
pub mod registry;
pub mod repair_tool;
pub mod structure;
pub mod tool;

pub use registry::{create_default_registry, ToolRegistry, ToolSchema};
pub use tool::{Tool, ToolContext, ToolError, ToolResult};
