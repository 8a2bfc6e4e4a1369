//! Backend/UI synchronization for the todo collection.
//!
//! The UI renders its own copy of the collection and edits it locally
//! (toggling status, adding, deleting). [`TodoBridge`] is the contract object
//! a UI host holds to keep that copy consistent with the session store:
//! reads snapshot the authoritative collection, writes push the entire edited
//! collection back through the same full-replace command the agent's tool
//! uses. Whichever side wrote last is what both sides read next.

use crate::reducer::{SessionEnvironment, SessionReducer};
use crate::types::{CorrelationToken, SessionAction, SessionState, Todo, TodoDraft};
use std::sync::Arc;
use std::time::Duration;
use taskboard_runtime::{Store, StoreError};
use thiserror::Error;

/// The store type holding one session's todo collection
pub type SessionStore = Store<SessionState, SessionAction, SessionEnvironment, SessionReducer>;

/// Errors surfaced to the UI side of the bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The write violated the collection invariant and was not committed
    #[error("Replace rejected: {0}")]
    Rejected(String),

    /// The store did not acknowledge the write
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// UI-side accessor pair for one session's todo collection
///
/// Cheap to clone; every clone talks to the same session store.
#[derive(Clone)]
pub struct TodoBridge {
    store: Arc<SessionStore>,
    ack_timeout: Duration,
}

impl TodoBridge {
    /// Default time to wait for a write acknowledgement
    const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a bridge over the given session store
    #[must_use]
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            ack_timeout: Self::DEFAULT_ACK_TIMEOUT,
        }
    }

    /// Builder: override the acknowledgement timeout
    #[must_use]
    pub const fn with_ack_timeout(mut self, ack_timeout: Duration) -> Self {
        self.ack_timeout = ack_timeout;
        self
    }

    /// Read side: the current collection, in committed order
    ///
    /// Never mutates state; an uninitialized session yields an empty
    /// collection.
    pub async fn snapshot(&self) -> Vec<Todo> {
        self.store.state(|s| s.todos.clone()).await
    }

    /// Write side: push an edited collection back as one atomic replace
    ///
    /// Mirrors the agent tool's write path exactly - the entire collection is
    /// substituted, never patched. Returns the committed collection with any
    /// generated ids filled in.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Rejected`] if the write violated the collection
    ///   invariant (state is left unchanged)
    /// - [`BridgeError::Store`] if no acknowledgement arrived in time
    pub async fn replace(&self, drafts: Vec<TodoDraft>) -> Result<Vec<Todo>, BridgeError> {
        let token = CorrelationToken::fresh();
        tracing::debug!(%token, count = drafts.len(), "UI pushing todo collection");

        let wanted = token.clone();
        let ack = self
            .store
            .send_and_wait_for(
                SessionAction::ReplaceTodos { drafts, token },
                move |action| match action {
                    SessionAction::TodosReplaced { token, .. }
                    | SessionAction::ReplaceRejected { token, .. } => *token == wanted,
                    SessionAction::ReplaceTodos { .. } => false,
                },
                self.ack_timeout,
            )
            .await?;

        match ack {
            SessionAction::TodosReplaced { todos, .. } => Ok(todos),
            SessionAction::ReplaceRejected { error, .. } => Err(BridgeError::Rejected(error)),
            SessionAction::ReplaceTodos { .. } => {
                unreachable!("predicate only matches acknowledgements")
            },
        }
    }

    /// Convenience: push already-committed todos (e.g. a locally edited
    /// snapshot) back through the write path
    ///
    /// # Errors
    ///
    /// Same as [`TodoBridge::replace`].
    pub async fn replace_with(&self, todos: Vec<Todo>) -> Result<Vec<Todo>, BridgeError> {
        self.replace(todos.into_iter().map(TodoDraft::from).collect())
            .await
    }
}
