//! # Taskboard Assistant
//!
//! The demo agent: a conversational assistant whose tools manage the
//! session's todo collection and query the bundled spending dataset.
//!
//! This crate provides:
//! - [`AssistantReducer`]: the agent loop (user message → Claude → parallel
//!   tool execution → tool-result collection → continuation)
//! - [`environment::ProductionEnvironment`]: the real wiring (Anthropic
//!   client + tool registry)
//!
//! ## Architecture
//!
//! - **State**: `BasicAgentState` (from core)
//! - **Actions**: `AgentAction` (from core)
//! - **Reducer**: `AssistantReducer` (generic over environment)
//! - **Environment**: `ProductionEnvironment` or a mock in tests

pub mod environment;

use smallvec::{smallvec, SmallVec};
use taskboard_core::{
    agent::{AgentAction, AgentEnvironment, BasicAgentState, ContentBlock, Message, MessagesRequest, Role},
    effect::Effect,
    reducer::Reducer,
};

/// System prompt for the demo assistant
pub const SYSTEM_PROMPT: &str = "\
You are a helpful assistant that manages the user's todo list and answers \
questions about their spending data.

When working with todos:
1. Use get_todos to read the current list before changing it.
2. Use manage_todos to update the list - always send the complete new list, \
   it replaces the old one entirely.

When asked about spending or numbers, call query_data first and ground your \
answer in the returned records.";

/// Assistant reducer
///
/// Handles the core agent loop:
/// 1. User sends message
/// 2. Call Claude
/// 3. Claude responds (possibly with tool use requests)
/// 4. Execute tools in parallel
/// 5. Collect all tool results
/// 6. Continue conversation with Claude
#[derive(Clone)]
pub struct AssistantReducer<E> {
    _phantom: std::marker::PhantomData<E>,
}

impl<E> AssistantReducer<E> {
    /// Create a new assistant reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    /// Build the next request to Claude from the current conversation
    fn next_request(state: &BasicAgentState, env: &E) -> MessagesRequest
    where
        E: AgentEnvironment,
    {
        let mut request = MessagesRequest::new(state.messages.clone())
            .with_model(state.config.model.clone())
            .with_max_tokens(state.config.max_tokens);

        if let Some(system) = state.config.system_prompt.clone() {
            request = request.with_system(system);
        }

        let tools = env.tools();
        if !tools.is_empty() {
            request = request.with_tools(tools.to_vec());
        }

        request
    }
}

impl<E> Default for AssistantReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Reducer for AssistantReducer<E>
where
    E: AgentEnvironment,
{
    type State = BasicAgentState;
    type Action = AgentAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AgentAction::UserMessage { content } => {
                // Add user message to history
                state.add_message(Message::user(content));

                // Call Claude with the full conversation
                smallvec![env.call_claude(Self::next_request(state, env))]
            },

            AgentAction::ClaudeResponse { content, .. } => {
                // Add assistant message to history
                state.add_message(Message {
                    role: Role::Assistant,
                    content: content.clone(),
                });

                // Check if tool use is requested
                let tool_uses: Vec<_> = content
                    .iter()
                    .filter_map(|block| match block {
                        ContentBlock::ToolUse { id, name, input } => {
                            // Convert JSON Value to string for tool execution
                            let input_str = serde_json::to_string(input).ok()?;
                            Some((id.clone(), name.clone(), input_str))
                        },
                        _ => None,
                    })
                    .collect();

                if tool_uses.is_empty() {
                    // Conversation turn complete
                    smallvec![Effect::None]
                } else {
                    // Initialize pending tool results (collector pattern)
                    state.pending_tool_results = tool_uses
                        .iter()
                        .map(|(id, _, _)| (id.clone(), None))
                        .collect();

                    // Execute tools in parallel
                    tool_uses
                        .into_iter()
                        .map(|(id, name, input)| env.execute_tool(id, name, input))
                        .collect()
                }
            },

            AgentAction::ToolResult {
                tool_use_id,
                result,
            } => {
                // Store result in collector
                state
                    .pending_tool_results
                    .insert(tool_use_id.clone(), Some(result.clone()));

                // Still waiting for more results?
                if !state.all_tool_results_received() {
                    return smallvec![Effect::None];
                }

                // Collect tool result messages first (to avoid borrow issues)
                let tool_messages: Vec<_> = state
                    .pending_tool_results
                    .iter()
                    .filter_map(|(tool_use_id, result_opt)| {
                        let (content, is_error) = match result_opt {
                            Some(Ok(output)) => (output.clone(), false),
                            Some(Err(err)) => (err.message.clone(), true),
                            None => return None,
                        };
                        Some(Message::tool_result(tool_use_id.clone(), content, is_error))
                    })
                    .collect();

                // Add all tool results to message history
                for message in tool_messages {
                    state.add_message(message);
                }

                // Clear pending results
                state.pending_tool_results.clear();

                // Continue conversation with Claude
                smallvec![env.call_claude(Self::next_request(state, env))]
            },

            AgentAction::Error { error } => {
                tracing::warn!(%error, "agent error");
                smallvec![Effect::None]
            },
        }
    }
}
