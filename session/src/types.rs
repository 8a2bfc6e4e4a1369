//! Domain types for the session todo collection.

use serde::{Deserialize, Serialize};
use taskboard_core::agent::InvocationContext;
use uuid::Uuid;

/// Unique identifier for a todo item
///
/// Opaque to callers; generated server-side when a write omits it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion status of a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    /// Not yet done
    Pending,
    /// Done
    Completed,
}

impl TodoStatus {
    /// Whether this status is [`TodoStatus::Completed`]
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Short title
    pub title: String,
    /// Longer description
    pub description: String,
    /// Decorative emoji glyph
    pub emoji: String,
    /// Completion status
    pub status: TodoStatus,
}

/// An incoming todo record for a replace write
///
/// All fields except `id` are required; records that omit the `id` get a
/// freshly generated one when the write commits. Typed deserialization is the
/// boundary validation: a record missing a required field never reaches the
/// reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    /// Existing identifier to keep, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    /// Short title
    pub title: String,
    /// Longer description
    pub description: String,
    /// Decorative emoji glyph
    pub emoji: String,
    /// Completion status
    pub status: TodoStatus,
}

impl TodoDraft {
    /// Create a draft without an identifier
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        emoji: impl Into<String>,
        status: TodoStatus,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            emoji: emoji.into(),
            status,
        }
    }

    /// Builder: keep an existing identifier
    #[must_use]
    pub fn with_id(mut self, id: TodoId) -> Self {
        self.id = Some(id);
        self
    }

    /// Turn this draft into a [`Todo`], generating an id only when the draft
    /// has none
    #[must_use]
    pub fn into_todo(self, generate: impl FnOnce() -> TodoId) -> Todo {
        Todo {
            id: self.id.unwrap_or_else(generate),
            title: self.title,
            description: self.description,
            emoji: self.emoji,
            status: self.status,
        }
    }
}

impl From<Todo> for TodoDraft {
    fn from(todo: Todo) -> Self {
        Self {
            id: Some(todo.id),
            title: todo.title,
            description: todo.description,
            emoji: todo.emoji,
            status: todo.status,
        }
    }
}

/// Token tying a write's acknowledgement back to the invocation that
/// triggered it
///
/// Resolved from the invocation context's ordered lookup chain; when no
/// source carries a token the explicit `"unknown"` sentinel is used - a
/// degraded but non-fatal path, the write still proceeds and is acknowledged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationToken(String);

impl CorrelationToken {
    /// Sentinel value used when no token can be resolved
    pub const UNKNOWN: &'static str = "unknown";

    /// Create a token from an explicit value
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The `"unknown"` sentinel token
    #[must_use]
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// Generate a fresh token for writes that originate outside a tool
    /// invocation (e.g. UI synchronization)
    #[must_use]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Resolve the token from an invocation context
    ///
    /// Walks the context's lookup chain; falls back to the sentinel when no
    /// source is populated.
    #[must_use]
    pub fn from_context(ctx: &InvocationContext) -> Self {
        ctx.tool_call_id().map_or_else(Self::unknown, Self::new)
    }

    /// Whether this token is the sentinel
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    /// The token as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CorrelationToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// State of one session's todo collection
///
/// Owned by exactly one session; initialized empty; only written through
/// [`SessionAction::ReplaceTodos`]. Order is whatever the last writer
/// supplied - no implicit sorting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// The ordered todo collection
    pub todos: Vec<Todo>,
    /// Last rejected write's error (if any)
    pub last_error: Option<String>,
}

impl SessionState {
    /// Creates a new empty session state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: Vec::new(),
            last_error: None,
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == *id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// Actions on the session todo collection
///
/// `ReplaceTodos` is the only command; the remaining variants are
/// notifications produced by it, observable through the store's action
/// broadcast for acknowledgement correlation. Notifications never modify
/// state - a stale one arriving after a newer write cannot overwrite it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    /// Command: replace the entire todo collection
    ///
    /// The previous collection is discarded wholesale; drafts without an id
    /// get a generated one.
    ReplaceTodos {
        /// The replacement records, in caller-supplied order
        drafts: Vec<TodoDraft>,
        /// Correlation token for the acknowledgement
        token: CorrelationToken,
    },

    /// Notification: the collection was replaced
    TodosReplaced {
        /// The committed collection, ids assigned
        todos: Vec<Todo>,
        /// Token of the write being acknowledged
        token: CorrelationToken,
    },

    /// Notification: a replace write violated the collection invariant
    ReplaceRejected {
        /// What was wrong with the write
        error: String,
        /// Token of the rejected write
        token: CorrelationToken,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_display() {
        let id = TodoId::new();
        assert!(!format!("{id}").is_empty());
    }

    #[test]
    fn todo_status_serializes_lowercase() {
        #[allow(clippy::unwrap_used)] // Test code
        let json = serde_json::to_string(&TodoStatus::Pending).unwrap();
        assert_eq!(json, r#""pending""#);
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn draft_deserializes_without_id() {
        let draft: TodoDraft = serde_json::from_str(
            r#"{"title":"Ship it","description":"Release the demo","emoji":"🚀","status":"pending"}"#,
        )
        .unwrap();

        assert_eq!(draft.id, None);
        assert_eq!(draft.title, "Ship it");
        assert_eq!(draft.status, TodoStatus::Pending);
    }

    #[test]
    fn draft_missing_required_field_is_rejected() {
        // Boundary validation: no emoji field
        let result: Result<TodoDraft, _> = serde_json::from_str(
            r#"{"title":"Ship it","description":"Release the demo","status":"pending"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn draft_keeps_supplied_id() {
        let id = TodoId::new();
        let draft = TodoDraft::new("Walk", "Around the block", "🚶", TodoStatus::Pending)
            .with_id(id.clone());

        let todo = draft.into_todo(TodoId::new);
        assert_eq!(todo.id, id);
    }

    #[test]
    fn draft_uses_fallback_id_when_missing() {
        let fallback = TodoId::new();
        let draft = TodoDraft::new("Walk", "Around the block", "🚶", TodoStatus::Pending);

        let expected = fallback.clone();
        let todo = draft.into_todo(move || fallback);
        assert_eq!(todo.id, expected);
    }

    #[test]
    fn correlation_token_sentinel() {
        let token = CorrelationToken::unknown();
        assert!(token.is_unknown());
        assert_eq!(token.as_str(), "unknown");
    }

    #[test]
    fn correlation_token_from_empty_context_is_sentinel() {
        use taskboard_core::agent::InvocationContext;

        let token = CorrelationToken::from_context(&InvocationContext::new());
        assert!(token.is_unknown());
    }

    #[test]
    fn correlation_token_from_populated_context() {
        use taskboard_core::agent::InvocationContext;

        let ctx = InvocationContext::for_tool_call("toolu_42");
        let token = CorrelationToken::from_context(&ctx);
        assert_eq!(token.as_str(), "toolu_42");
    }

    #[test]
    fn session_state_lookup() {
        let todo = Todo {
            id: TodoId::new(),
            title: "Water plants".to_string(),
            description: "The ones on the balcony".to_string(),
            emoji: "🪴".to_string(),
            status: TodoStatus::Pending,
        };
        let state = SessionState {
            todos: vec![todo.clone()],
            last_error: None,
        };

        assert_eq!(state.count(), 1);
        assert!(state.contains(&todo.id));
        assert_eq!(state.get(&todo.id), Some(&todo));
    }

    #[test]
    fn empty_state_has_no_todos() {
        let state = SessionState::new();
        assert_eq!(state.count(), 0);
        assert_eq!(state.last_error, None);
    }
}
