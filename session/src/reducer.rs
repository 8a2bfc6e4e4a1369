//! Reducer logic for the session todo collection.
//!
//! The write path is a single command with full-replacement semantics:
//! validate the incoming records, assign identifiers to records that omit
//! them, and substitute the whole collection. Reads never go through the
//! reducer at all - callers use the store's state accessor.

use crate::types::{SessionAction, SessionState, Todo, TodoDraft, TodoId};
use smallvec::{smallvec, SmallVec};
use std::collections::HashSet;
use std::sync::Arc;
use taskboard_core::{effect::Effect, environment::IdGenerator, reducer::Reducer};

/// Environment dependencies for the session reducer
#[derive(Clone)]
pub struct SessionEnvironment {
    /// Generator for identifiers assigned to records that omit one
    ids: Arc<dyn IdGenerator>,
}

impl SessionEnvironment {
    /// Creates a new `SessionEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// The injected identifier generator
    #[must_use]
    pub fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }
}

/// Reducer for the session todo collection
#[derive(Clone, Debug)]
pub struct SessionReducer;

impl SessionReducer {
    /// Creates a new `SessionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolve drafts into todos, generating ids where missing
    fn resolve_drafts(drafts: Vec<TodoDraft>, env: &SessionEnvironment) -> Vec<Todo> {
        drafts
            .into_iter()
            .map(|draft| draft.into_todo(|| TodoId::from_uuid(env.ids().next_id())))
            .collect()
    }

    /// Check the collection invariant: ids unique within the write
    fn validate_unique_ids(todos: &[Todo]) -> Result<(), String> {
        let mut seen = HashSet::new();
        for todo in todos {
            if !seen.insert(&todo.id) {
                return Err(format!("Duplicate todo id: {}", todo.id));
            }
        }
        Ok(())
    }
}

impl Default for SessionReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SessionAction::ReplaceTodos { drafts, token } => {
                let todos = Self::resolve_drafts(drafts, env);

                if let Err(error) = Self::validate_unique_ids(&todos) {
                    state.last_error = Some(error.clone());
                    return smallvec![Effect::emit(SessionAction::ReplaceRejected {
                        error,
                        token,
                    })];
                }

                // Full replacement: the previous collection is discarded, not
                // merged into.
                state.todos = todos.clone();
                state.last_error = None;

                smallvec![Effect::emit(SessionAction::TodosReplaced { todos, token })]
            },

            // Notifications: state already reflects the write that produced
            // them. Re-applying would let a stale notification overwrite a
            // newer write, breaking last-writer-wins.
            SessionAction::TodosReplaced { .. } | SessionAction::ReplaceRejected { .. } => {
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CorrelationToken, TodoStatus};
    use taskboard_testing::{assertions, sequential_ids, ReducerTest, SequentialIds};

    fn test_env() -> SessionEnvironment {
        SessionEnvironment::new(sequential_ids())
    }

    fn draft(title: &str) -> TodoDraft {
        TodoDraft::new(title, format!("{title} - details"), "📝", TodoStatus::Pending)
    }

    fn committed(title: &str, id: TodoId) -> Todo {
        draft(title).with_id(id).into_todo(TodoId::new)
    }

    #[test]
    fn test_replace_assigns_generated_ids() {
        ReducerTest::new(SessionReducer::new())
            .with_env(test_env())
            .given_state(SessionState::new())
            .when_action(SessionAction::ReplaceTodos {
                drafts: vec![draft("Buy milk"), draft("Write docs")],
                token: CorrelationToken::new("toolu_1"),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 2);
                assert_eq!(state.todos[0].id, TodoId::from_uuid(SequentialIds::nth(1)));
                assert_eq!(state.todos[1].id, TodoId::from_uuid(SequentialIds::nth(2)));
                assert_eq!(state.last_error, None);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn test_replace_keeps_supplied_ids() {
        let id = TodoId::new();
        let expected = id.clone();

        ReducerTest::new(SessionReducer::new())
            .with_env(test_env())
            .given_state(SessionState::new())
            .when_action(SessionAction::ReplaceTodos {
                drafts: vec![draft("Buy milk").with_id(id)],
                token: CorrelationToken::new("toolu_1"),
            })
            .then_state(move |state| {
                assert_eq!(state.todos[0].id, expected);
            })
            .run();
    }

    #[test]
    fn test_replace_discards_previous_collection() {
        let old_a = committed("Old A", TodoId::new());
        let old_b = committed("Old B", TodoId::new());

        ReducerTest::new(SessionReducer::new())
            .with_env(test_env())
            .given_state(SessionState {
                todos: vec![old_a, old_b],
                last_error: None,
            })
            .when_action(SessionAction::ReplaceTodos {
                drafts: vec![draft("New only")],
                token: CorrelationToken::new("toolu_2"),
            })
            .then_state(|state| {
                // Exactly the new collection, not a merge
                assert_eq!(state.count(), 1);
                assert_eq!(state.todos[0].title, "New only");
            })
            .run();
    }

    #[test]
    fn test_replace_preserves_caller_order() {
        ReducerTest::new(SessionReducer::new())
            .with_env(test_env())
            .given_state(SessionState::new())
            .when_action(SessionAction::ReplaceTodos {
                drafts: vec![draft("Zebra"), draft("Apple"), draft("Mango")],
                token: CorrelationToken::new("toolu_3"),
            })
            .then_state(|state| {
                let titles: Vec<_> = state.todos.iter().map(|t| t.title.as_str()).collect();
                assert_eq!(titles, vec!["Zebra", "Apple", "Mango"]);
            })
            .run();
    }

    #[test]
    fn test_replace_empty_collection_clears_state() {
        let old = committed("Old", TodoId::new());

        ReducerTest::new(SessionReducer::new())
            .with_env(test_env())
            .given_state(SessionState {
                todos: vec![old],
                last_error: None,
            })
            .when_action(SessionAction::ReplaceTodos {
                drafts: vec![],
                token: CorrelationToken::new("toolu_4"),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
            })
            .run();
    }

    #[test]
    fn test_duplicate_supplied_ids_rejected() {
        let id = TodoId::new();
        let previous = committed("Survivor", TodoId::new());
        let expected = previous.clone();

        ReducerTest::new(SessionReducer::new())
            .with_env(test_env())
            .given_state(SessionState {
                todos: vec![previous],
                last_error: None,
            })
            .when_action(SessionAction::ReplaceTodos {
                drafts: vec![
                    draft("First").with_id(id.clone()),
                    draft("Second").with_id(id),
                ],
                token: CorrelationToken::new("toolu_5"),
            })
            .then_state(move |state| {
                // Rejected write leaves the previous collection untouched
                assert_eq!(state.todos, vec![expected]);
                assert!(state
                    .last_error
                    .as_ref()
                    .is_some_and(|e| e.contains("Duplicate todo id")));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
            })
            .run();
    }

    #[test]
    fn test_unknown_token_still_commits() {
        ReducerTest::new(SessionReducer::new())
            .with_env(test_env())
            .given_state(SessionState::new())
            .when_action(SessionAction::ReplaceTodos {
                drafts: vec![draft("Degraded but fine")],
                token: CorrelationToken::unknown(),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
            })
            .run();
    }

    #[test]
    fn test_notifications_do_not_touch_state() {
        let current = committed("Current", TodoId::new());
        let stale = committed("Stale", TodoId::new());
        let expected = current.clone();

        ReducerTest::new(SessionReducer::new())
            .with_env(test_env())
            .given_state(SessionState {
                todos: vec![current],
                last_error: None,
            })
            .when_action(SessionAction::TodosReplaced {
                todos: vec![stale],
                token: CorrelationToken::new("toolu_0"),
            })
            .then_state(move |state| {
                // A stale notification must not overwrite a newer write
                assert_eq!(state.todos, vec![expected]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
