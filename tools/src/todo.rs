//! Todo management tools for the assistant
//!
//! The write/read pair over the session todo collection. Both tools close
//! over the session's store - the single owner of the collection - so every
//! mutation goes through the store's full-replace command and every read is a
//! snapshot of committed state.

use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use taskboard_core::agent::{InvocationContext, Tool, ToolError, ToolExecutorFn, ToolResult};
use taskboard_session::{CorrelationToken, SessionAction, SessionStore, TodoDraft};

/// Acknowledgement text returned by a committed `manage_todos` write
pub const REPLACE_ACK_MESSAGE: &str = "Successfully updated todos";

/// How long a write waits for its acknowledgement
const ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Typed input of the `manage_todos` tool
///
/// Deserialization is the boundary validation: every record must carry
/// title, description, emoji and status; only the id is optional.
#[derive(Debug, Deserialize)]
struct ManageTodosInput {
    todos: Vec<TodoDraft>,
}

/// Create the `manage_todos` tool
///
/// Replaces the entire todo collection with the supplied list. Records
/// without an `id` get a generated one. The acknowledgement is tagged with
/// the correlation token resolved from the invocation context; when no token
/// is resolvable the `"unknown"` sentinel is used and the write still
/// proceeds.
///
/// Returns JSON:
/// ```json
/// {
///   "message": "Successfully updated todos",
///   "tool_call_id": "toolu_123"
/// }
/// ```
#[must_use]
pub fn manage_todos_tool(store: Arc<SessionStore>) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "manage_todos".to_string(),
        description: "Manage the current todos.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "todos": {
                    "type": "array",
                    "description": "The list of todos to manage",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Unique identifier for the todo"
                            },
                            "title": {
                                "type": "string",
                                "description": "Title of the todo"
                            },
                            "description": {
                                "type": "string",
                                "description": "Description of the todo"
                            },
                            "emoji": {
                                "type": "string",
                                "description": "Emoji representing the todo"
                            },
                            "status": {
                                "type": "string",
                                "enum": ["pending", "completed"],
                                "description": "Status of the todo"
                            }
                        },
                        "required": ["title", "description", "emoji", "status"]
                    }
                }
            },
            "required": ["todos"]
        }),
    };

    let executor = Arc::new(move |input: String, ctx: InvocationContext| {
        let store = Arc::clone(&store);
        Box::pin(async move {
            let parsed: ManageTodosInput =
                serde_json::from_str(&input).map_err(|e| ToolError {
                    message: format!("Invalid input JSON: {e}"),
                })?;

            let token = CorrelationToken::from_context(&ctx);
            tracing::debug!(%token, count = parsed.todos.len(), "manage_todos invoked");

            let wanted = token.clone();
            let ack = store
                .send_and_wait_for(
                    SessionAction::ReplaceTodos {
                        drafts: parsed.todos,
                        token: token.clone(),
                    },
                    move |action| match action {
                        SessionAction::TodosReplaced { token, .. }
                        | SessionAction::ReplaceRejected { token, .. } => *token == wanted,
                        SessionAction::ReplaceTodos { .. } => false,
                    },
                    ACK_TIMEOUT,
                )
                .await
                .map_err(|e| ToolError {
                    message: format!("Todo update not acknowledged: {e}"),
                })?;

            match ack {
                SessionAction::TodosReplaced { .. } => Ok(json!({
                    "message": REPLACE_ACK_MESSAGE,
                    "tool_call_id": token,
                })
                .to_string()),
                SessionAction::ReplaceRejected { error, .. } => Err(ToolError { message: error }),
                SessionAction::ReplaceTodos { .. } => {
                    unreachable!("predicate only matches acknowledgements")
                },
            }
        }) as Pin<Box<dyn Future<Output = ToolResult> + Send>>
    }) as ToolExecutorFn;

    (tool, executor)
}

/// Create the `get_todos` tool
///
/// Returns the current todo collection with no side effects. A session that
/// has never been written yields an empty array.
///
/// Returns JSON:
/// ```json
/// [
///   {"id": "...", "title": "Buy milk", "description": "...", "emoji": "🥛", "status": "pending"}
/// ]
/// ```
#[must_use]
pub fn get_todos_tool(store: Arc<SessionStore>) -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "get_todos".to_string(),
        description: "Get the current todos.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    };

    let executor = Arc::new(move |_input: String, _ctx: InvocationContext| {
        let store = Arc::clone(&store);
        Box::pin(async move {
            let todos = store.state(|s| s.todos.clone()).await;

            serde_json::to_string(&todos).map_err(|e| ToolError {
                message: format!("Failed to serialize todos: {e}"),
            })
        }) as Pin<Box<dyn Future<Output = ToolResult> + Send>>
    }) as ToolExecutorFn;

    (tool, executor)
}
