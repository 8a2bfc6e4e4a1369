//! Production environment for the assistant
//!
//! Wires the real Anthropic client to the tool registry. Environment methods
//! return effects; the store runtime executes them and feeds the resulting
//! actions back into the reducer.

use std::sync::Arc;
use taskboard_anthropic::AnthropicClient;
use taskboard_core::{
    agent::{AgentAction, AgentConfig, AgentEnvironment, InvocationContext, MessagesRequest, Tool},
    effect::Effect,
};
use taskboard_tools::ToolRegistry;

/// Production agent environment backed by the real Anthropic API
#[derive(Clone)]
pub struct ProductionEnvironment {
    /// Claude API client
    client: Arc<AnthropicClient>,
    /// Tool registry executing tool calls by name
    registry: ToolRegistry,
    /// Tool definitions, cached from the registry at wiring time
    tools: Vec<Tool>,
    /// Agent configuration
    config: AgentConfig,
}

impl ProductionEnvironment {
    /// Create a new production environment
    ///
    /// # Errors
    ///
    /// Returns an error if the Claude client cannot be created (e.g. missing
    /// API key)
    pub fn new(
        config: AgentConfig,
        registry: ToolRegistry,
    ) -> Result<Self, taskboard_anthropic::ClaudeError> {
        let tools = registry.get_tools();
        Ok(Self {
            client: Arc::new(AnthropicClient::from_env()?),
            registry,
            tools,
            config,
        })
    }
}

impl AgentEnvironment for ProductionEnvironment {
    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn call_claude(&self, request: MessagesRequest) -> Effect<AgentAction> {
        let client = Arc::clone(&self.client);

        Effect::Future(Box::pin(async move {
            match client.messages(request).await {
                Ok(response) => Some(AgentAction::ClaudeResponse {
                    response_id: response.id,
                    content: response.content,
                    stop_reason: response.stop_reason,
                    usage: response.usage,
                }),
                Err(e) => Some(AgentAction::Error {
                    error: format!("Claude API error: {e}"),
                }),
            }
        }))
    }

    fn execute_tool(
        &self,
        tool_use_id: String,
        tool_name: String,
        tool_input: String,
    ) -> Effect<AgentAction> {
        let registry = self.registry.clone();

        Effect::Future(Box::pin(async move {
            // The model's tool-use id is the correlation token; it rides in
            // the primary lookup source of the invocation context.
            let ctx = InvocationContext::for_tool_call(tool_use_id.clone());
            let result = registry.execute(&tool_name, tool_input, ctx).await;

            Some(AgentAction::ToolResult {
                tool_use_id,
                result,
            })
        }))
    }
}
