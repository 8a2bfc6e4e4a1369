//! Agent types for the taskboard assistant
//!
//! This module provides core types and traits for building the tool-calling
//! agent on top of the reducer architecture and the Anthropic Claude API.
//!
//! ## Architecture
//!
//! Agents are implemented as reducers with:
//! - **State**: Conversation history, pending tool results, configuration
//! - **Actions**: User messages, Claude responses, tool results, errors
//! - **Environment**: Claude API client, tool executors, configuration
//! - **Effects**: API calls and tool executions returned as effect values

use crate::effect::Effect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

// Re-export Claude API types for convenience
pub use taskboard_anthropic::{
    ContentBlock, Message, MessagesRequest, MessagesResponse, Role, StopReason, Tool, Usage,
};

/// Basic agent state for conversational agents
///
/// This state manages:
/// - Conversation message history
/// - Pending tool results (for parallel tool execution)
/// - Agent configuration
#[derive(Clone, Debug)]
pub struct BasicAgentState {
    /// Conversation message history
    pub messages: Vec<Message>,

    /// Pending tool results (for parallel tool execution)
    ///
    /// When Claude requests multiple tools in parallel, we track which results
    /// we're still waiting for. Once all results are received, we continue the
    /// conversation with Claude.
    pub pending_tool_results: HashMap<String, Option<ToolResult>>,

    /// Agent configuration
    pub config: AgentConfig,
}

impl BasicAgentState {
    /// Create new agent state with config
    #[must_use]
    pub fn new(config: AgentConfig) -> Self {
        Self {
            messages: Vec::new(),
            pending_tool_results: HashMap::new(),
            config,
        }
    }

    /// Add message to conversation history
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Check if all pending tool results are received
    #[must_use]
    pub fn all_tool_results_received(&self) -> bool {
        self.pending_tool_results.values().all(Option::is_some)
    }
}

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Model to use (e.g., "claude-sonnet-4-5-20250929")
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// System prompt (optional)
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-5-20250929".to_string(),
            max_tokens: 4096,
            system_prompt: None,
        }
    }
}

impl AgentConfig {
    /// Builder: Set model
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Builder: Set max tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Builder: Set system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = Some(prompt);
        self
    }
}

/// Result from tool execution
pub type ToolResult = Result<String, ToolError>;

/// Tool execution errors
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolError {
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ToolError {}

/// Boxed executor function backing a [`Tool`]
///
/// Executors receive the raw JSON input string plus the invocation context
/// supplied by the calling framework, and resolve to a [`ToolResult`].
pub type ToolExecutorFn = Arc<
    dyn Fn(String, InvocationContext) -> Pin<Box<dyn Future<Output = ToolResult> + Send>>
        + Send
        + Sync,
>;

/// Context supplied with each tool invocation
///
/// The invoking framework attaches loosely-typed metadata to every tool call.
/// The correlation token for acknowledgements lives in one of two named
/// sources; [`InvocationContext::tool_call_id`] checks them in order.
#[derive(Clone, Debug, Default)]
pub struct InvocationContext {
    /// Per-invocation configuration values
    pub configurable: HashMap<String, serde_json::Value>,
    /// Auxiliary invocation metadata
    pub metadata: HashMap<String, serde_json::Value>,
}

impl InvocationContext {
    /// Key under which the correlation token is stored in either source
    pub const TOOL_CALL_ID: &'static str = "tool_call_id";

    /// Create an empty context (no correlation token resolvable)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context carrying the given tool-call id in the primary source
    #[must_use]
    pub fn for_tool_call(tool_call_id: impl Into<String>) -> Self {
        Self::new().with_configurable(Self::TOOL_CALL_ID, tool_call_id.into())
    }

    /// Builder: attach a per-invocation configuration value
    #[must_use]
    pub fn with_configurable(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.configurable.insert(key.into(), value.into());
        self
    }

    /// Builder: attach an auxiliary metadata value
    #[must_use]
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Resolve the correlation token for this invocation
    ///
    /// Checks `configurable` first, then `metadata`; the first populated
    /// string wins. Returns `None` when neither source carries the token -
    /// callers substitute their sentinel value for that case.
    #[must_use]
    pub fn tool_call_id(&self) -> Option<&str> {
        self.configurable
            .get(Self::TOOL_CALL_ID)
            .and_then(serde_json::Value::as_str)
            .or_else(|| {
                self.metadata
                    .get(Self::TOOL_CALL_ID)
                    .and_then(serde_json::Value::as_str)
            })
    }
}

/// Agent actions - unified input type for all agent events
#[derive(Clone, Debug)]
pub enum AgentAction {
    /// User sends a message
    UserMessage {
        /// Message content
        content: String,
    },

    /// Claude responds
    ClaudeResponse {
        /// Response ID from Claude
        response_id: String,
        /// Content blocks in the response
        content: Vec<ContentBlock>,
        /// Why Claude stopped generating
        stop_reason: StopReason,
        /// Token usage statistics
        usage: Usage,
    },

    /// Tool result received
    ToolResult {
        /// ID of the tool use this responds to
        tool_use_id: String,
        /// Result from tool execution
        result: ToolResult,
    },

    /// Error occurred
    Error {
        /// Error message
        error: String,
    },
}

/// Agent environment trait
///
/// Environments provide:
/// - Access to available tools
/// - Agent configuration
/// - Methods that return effects (not direct API access)
///
/// **Key pattern**: Environment methods return `Effect` values, not futures.
/// This keeps reducers pure and sidesteps borrowing issues.
pub trait AgentEnvironment: Send + Sync {
    /// Get available tools for this agent
    fn tools(&self) -> &[Tool];

    /// Get agent configuration
    fn config(&self) -> &AgentConfig;

    /// Create effect to call Claude
    ///
    /// Returns an `Effect::Future` that will yield a `ClaudeResponse` action
    /// when the API call completes.
    fn call_claude(&self, request: MessagesRequest) -> Effect<AgentAction>;

    /// Create effect to execute a tool
    ///
    /// The implementation builds the [`InvocationContext`] for the call - the
    /// tool-use id from the model is placed in the primary lookup source so
    /// tools can correlate their acknowledgements.
    ///
    /// Returns an `Effect::Future` that will yield a `ToolResult` action when
    /// the tool execution completes.
    fn execute_tool(
        &self,
        tool_use_id: String,
        tool_name: String,
        tool_input: String,
    ) -> Effect<AgentAction>;
}
