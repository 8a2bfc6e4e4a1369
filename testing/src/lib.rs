//! # Taskboard Testing
//!
//! Testing utilities and helpers for the taskboard architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then builder for reducer tests
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use taskboard_testing::{sequential_ids, ReducerTest};
//!
//! ReducerTest::new(SessionReducer::new())
//!     .with_env(SessionEnvironment::new(sequential_ids()))
//!     .given_state(SessionState::new())
//!     .when_action(SessionAction::ReplaceTodos { drafts, token })
//!     .then_state(|state| assert_eq!(state.todos.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use taskboard_core::environment::{Clock, IdGenerator};

mod reducer_test;

pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use taskboard_testing::mocks::FixedClock;
    /// use taskboard_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Deterministic identifier generator for tests
    ///
    /// Produces UUIDs derived from an incrementing counter, so assigned
    /// identifiers are predictable and never collide with each other.
    #[derive(Debug)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Create a generator starting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(1)
        }

        /// Create a generator starting at the given counter value
        #[must_use]
        pub const fn starting_at(next: u64) -> Self {
            Self {
                next: AtomicU64::new(next),
            }
        }

        /// The UUID the generator will produce for a given counter value
        #[must_use]
        #[allow(clippy::cast_lossless)] // u128::from is not const
        pub const fn nth(n: u64) -> Uuid {
            Uuid::from_u128(n as u128)
        }
    }

    impl Default for SequentialIds {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> Uuid {
            Self::nth(self.next.fetch_add(1, Ordering::SeqCst))
        }
    }

    /// Create a shareable sequential id generator starting at 1
    #[must_use]
    pub fn sequential_ids() -> Arc<SequentialIds> {
        Arc::new(SequentialIds::new())
    }
}

// Re-export commonly used items
pub use mocks::{sequential_ids, test_clock, FixedClock, SequentialIds};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_sequential_ids_are_predictable() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), SequentialIds::nth(1));
        assert_eq!(ids.next_id(), SequentialIds::nth(2));
    }

    #[test]
    fn test_sequential_ids_starting_at() {
        let ids = SequentialIds::starting_at(42);
        assert_eq!(ids.next_id(), SequentialIds::nth(42));
    }
}
