//! Built-in tools for the taskboard assistant
//!
//! This crate provides the agent-facing tools of the demo:
//!
//! - `todo`: the todo collection write/read pair (`manage_todos`,
//!   `get_todos`), bound to a session store
//! - `data`: the CSV dataset query tool (`query_data`)
//! - `registry`: dynamic tool registration and execution by name
//!
//! ## Design Principles
//!
//! Tools return structured JSON strings and never format data for a specific
//! LLM API - the agent environment owns that translation. Tool inputs are
//! validated at this boundary by typed deserialization: a record missing a
//! required field is rejected before it reaches the session store.

pub mod data;
pub mod registry;
pub mod todo;

pub use taskboard_core::agent::{Tool, ToolExecutorFn, ToolResult};

// Re-export commonly used types
pub use registry::ToolRegistry;
