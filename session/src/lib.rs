//! # Taskboard Session
//!
//! Per-session todo state for the taskboard assistant.
//!
//! Each conversation session owns exactly one [`SessionState`] holding an
//! ordered todo collection. The collection is only ever written through one
//! operation: [`SessionAction::ReplaceTodos`], which substitutes the entire
//! collection - there is no partial patching or merging. Two callers share
//! that write path:
//!
//! - the agent's `manage_todos` tool, and
//! - the UI via [`TodoBridge`].
//!
//! Because both sides go through the same command on the same store, the most
//! recent write wins and every reader observes a complete collection.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskboard_core::environment::UuidGenerator;
//! use taskboard_runtime::Store;
//! use taskboard_session::{SessionEnvironment, SessionReducer, SessionState};
//!
//! let env = SessionEnvironment::new(Arc::new(UuidGenerator));
//! let store = Store::new(SessionState::new(), SessionReducer::new(), env);
//! ```

pub mod bridge;
pub mod reducer;
pub mod types;

pub use bridge::{BridgeError, SessionStore, TodoBridge};
pub use reducer::{SessionEnvironment, SessionReducer};
pub use types::{
    CorrelationToken, SessionAction, SessionState, Todo, TodoDraft, TodoId, TodoStatus,
};
