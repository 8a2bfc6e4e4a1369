//! Tool registry for dynamic tool management
//!
//! The registry stores tools and their executors, allowing registration at
//! wiring time and execution by name when the model requests a tool.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use taskboard_core::agent::{InvocationContext, Tool, ToolError, ToolExecutorFn, ToolResult};

/// Thread-safe tool registry
///
/// ## Example
///
/// ```ignore
/// use taskboard_tools::registry::ToolRegistry;
/// use taskboard_tools::todo::get_todos_tool;
///
/// let registry = ToolRegistry::new();
/// let (tool, executor) = get_todos_tool(store);
/// registry.register(tool, executor);
///
/// let result = registry.execute("get_todos", "{}".to_string(), ctx).await;
/// ```
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<RwLock<HashMap<String, (Tool, ToolExecutorFn)>>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a tool with its executor
    ///
    /// If a tool with the same name already exists it is replaced, and this
    /// method returns `true`. Otherwise, returns `false`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[allow(clippy::expect_used)]
    pub fn register(&self, tool: Tool, executor: ToolExecutorFn) -> bool {
        let mut tools = self
            .tools
            .write()
            .expect("Tool registry lock poisoned - indicates a panic in another thread");
        tools.insert(tool.name.clone(), (tool, executor)).is_some()
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if the tool is not registered or its execution
    /// fails
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[allow(clippy::expect_used)]
    pub async fn execute(&self, name: &str, input: String, ctx: InvocationContext) -> ToolResult {
        // Get executor (release lock before awaiting)
        let executor = {
            let tools = self
                .tools
                .read()
                .expect("Tool registry lock poisoned - indicates a panic in another thread");
            tools.get(name).map(|(_, executor)| executor.clone())
        };

        match executor {
            Some(executor) => executor(input, ctx).await,
            None => Err(ToolError {
                message: format!("Tool not found: {name}"),
            }),
        }
    }

    /// Get all registered tool definitions, sorted by name (for the LLM API)
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn get_tools(&self) -> Vec<Tool> {
        let tools = self
            .tools
            .read()
            .expect("Tool registry lock poisoned - indicates a panic in another thread");
        let mut tool_list: Vec<Tool> = tools.values().map(|(tool, _)| tool.clone()).collect();
        tool_list.sort_by(|a, b| a.name.cmp(&b.name));
        tool_list
    }

    /// Get a specific tool definition by name
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn get_tool(&self, name: &str) -> Option<Tool> {
        let tools = self
            .tools
            .read()
            .expect("Tool registry lock poisoned - indicates a panic in another thread");
        tools.get(name).map(|(tool, _)| tool.clone())
    }

    /// Get the number of registered tools
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another
    /// thread)
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn count(&self) -> usize {
        let tools = self
            .tools
            .read()
            .expect("Tool registry lock poisoned - indicates a panic in another thread");
        tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)] // Test code
mod tests {
    use super::*;
    use crate::todo::get_todos_tool;
    use serde_json::json;
    use taskboard_runtime::Store;
    use taskboard_session::{SessionEnvironment, SessionReducer, SessionState, SessionStore};
    use taskboard_testing::sequential_ids;

    fn session_store() -> Arc<SessionStore> {
        let env = SessionEnvironment::new(sequential_ids());
        Arc::new(Store::new(SessionState::new(), SessionReducer::new(), env))
    }

    #[test]
    fn test_registry_new() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_registry_register_and_replace() {
        let registry = ToolRegistry::new();
        let store = session_store();

        let (tool1, executor1) = get_todos_tool(Arc::clone(&store));
        let (tool2, executor2) = get_todos_tool(store);

        assert!(!registry.register(tool1, executor1)); // First registration
        assert!(registry.register(tool2, executor2)); // Replacement
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_registry_get_tools_sorted() {
        let registry = ToolRegistry::new();
        let store = session_store();

        let (get_tool, get_exec) = get_todos_tool(Arc::clone(&store));
        let (manage_tool, manage_exec) = crate::todo::manage_todos_tool(store);

        registry.register(manage_tool, manage_exec);
        registry.register(get_tool, get_exec);

        let tools = registry.get_tools();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "get_todos"); // Sorted alphabetically
        assert_eq!(tools[1].name, "manage_todos");
    }

    #[test]
    fn test_registry_get_tool() {
        let registry = ToolRegistry::new();
        let (tool, executor) = get_todos_tool(session_store());

        registry.register(tool, executor);

        assert!(registry.get_tool("get_todos").is_some());
        assert!(registry.get_tool("nonexistent").is_none());
    }

    #[tokio::test]
    async fn test_registry_execute() {
        let registry = ToolRegistry::new();
        let (tool, executor) = get_todos_tool(session_store());

        registry.register(tool, executor);

        let result = registry
            .execute("get_todos", json!({}).to_string(), InvocationContext::new())
            .await;

        assert_eq!(result.expect("should succeed"), "[]");
    }

    #[tokio::test]
    async fn test_registry_execute_not_found() {
        let registry = ToolRegistry::new();

        let result = registry
            .execute(
                "nonexistent",
                json!({}).to_string(),
                InvocationContext::new(),
            )
            .await;

        assert!(result
            .expect_err("should fail")
            .message
            .contains("Tool not found"));
    }
}
