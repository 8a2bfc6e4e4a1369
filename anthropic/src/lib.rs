//! # Anthropic Claude API Client
//!
//! Minimal Rust client for the Anthropic Claude Messages API with tool use
//! support. Only the non-streaming surface is implemented - the taskboard
//! assistant drives complete request/response turns.
//!
//! ## Example
//!
//! ```no_run
//! use taskboard_anthropic::{AnthropicClient, Message, MessagesRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from ANTHROPIC_API_KEY environment variable
//!     let client = AnthropicClient::from_env()?;
//!
//!     let request = MessagesRequest::new(vec![Message::user("Hello, Claude!")]);
//!     let response = client.messages(request).await?;
//!
//!     println!("Response: {response:?}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::AnthropicClient;
pub use error::ClaudeError;
pub use types::{
    ContentBlock, Message, MessagesRequest, MessagesResponse, Role, StopReason, Tool, Usage,
};
