//! Terminal demo for the taskboard assistant.
//!
//! Wires one session together: the agent store, the session todo store its
//! tools write through, and the bridge a UI host would hold. After every
//! agent turn the current todo collection is rendered the way the UI sees it.
//!
//! ## Usage
//!
//! Set your API key:
//! ```bash
//! export ANTHROPIC_API_KEY="your-key-here"
//! ```
//!
//! Run the demo:
//! ```bash
//! cargo run -p taskboard-assistant
//! ```
//!
//! Try: "Plan my Saturday as three todos" or "How much did I spend on food?"

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use taskboard_assistant::{environment::ProductionEnvironment, AssistantReducer, SYSTEM_PROMPT};
use taskboard_core::{
    agent::{AgentAction, AgentConfig, BasicAgentState, ContentBlock, StopReason},
    environment::UuidGenerator,
};
use taskboard_runtime::Store;
use taskboard_session::{SessionEnvironment, SessionReducer, SessionState, Todo, TodoBridge};
use taskboard_tools::{
    data::query_data_tool,
    todo::{get_todos_tool, manage_todos_tool},
    ToolRegistry,
};

/// How long to wait for one full agent turn (model calls + tools)
const TURN_TIMEOUT: Duration = Duration::from_secs(120);

fn render_todos(todos: &[Todo]) {
    if todos.is_empty() {
        return;
    }
    println!("── Todos ──");
    for todo in todos {
        let mark = if todo.status.is_completed() { "✓" } else { " " };
        println!("  [{mark}] {} {} - {}", todo.emoji, todo.title, todo.description);
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== Taskboard Assistant ===");
    println!("I can manage your todos and answer questions about your spending.");
    println!("Type 'quit' to exit.\n");

    // Each run is one session: one todo store, one agent store
    let session_env = SessionEnvironment::new(Arc::new(UuidGenerator));
    let session_store = Arc::new(Store::new(
        SessionState::new(),
        SessionReducer::new(),
        session_env,
    ));
    let bridge = TodoBridge::new(Arc::clone(&session_store));

    // Register the tools over the session store and the bundled dataset
    let data_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/spending.csv");
    let registry = ToolRegistry::new();
    let (tool, executor) = manage_todos_tool(Arc::clone(&session_store));
    registry.register(tool, executor);
    let (tool, executor) = get_todos_tool(Arc::clone(&session_store));
    registry.register(tool, executor);
    let (tool, executor) = query_data_tool(data_path);
    registry.register(tool, executor);

    // Create the agent store
    let config = AgentConfig::default().with_system_prompt(SYSTEM_PROMPT.to_string());
    let environment = ProductionEnvironment::new(config.clone(), registry)?;
    let agent_store = Store::new(
        BasicAgentState::new(config),
        AssistantReducer::new(),
        environment,
    );

    // Main conversation loop
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            println!("\nGoodbye!");
            break;
        }

        if input.is_empty() {
            continue;
        }

        // A turn ends when Claude stops without requesting tools, or errors
        let terminal = agent_store
            .send_and_wait_for(
                AgentAction::UserMessage {
                    content: input.to_string(),
                },
                |action| match action {
                    AgentAction::ClaudeResponse { stop_reason, .. } => {
                        *stop_reason != StopReason::ToolUse
                    },
                    AgentAction::Error { .. } => true,
                    _ => false,
                },
                TURN_TIMEOUT,
            )
            .await;

        match terminal {
            Ok(AgentAction::ClaudeResponse { content, .. }) => {
                for block in content {
                    if let ContentBlock::Text { text } = block {
                        println!("\nAssistant: {text}\n");
                    }
                }
            },
            Ok(AgentAction::Error { error }) => {
                eprintln!("\nError: {error}\n");
            },
            Ok(_) => {},
            Err(e) => {
                eprintln!("\nError: {e}\n");
            },
        }

        // Render the todo collection the way the UI sees it
        render_todos(&bridge.snapshot().await);
    }

    Ok(())
}
