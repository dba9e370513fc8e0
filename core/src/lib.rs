//! # Storefront Core
//!
//! Core traits and types shared by the storefront client and server.
//!
//! The client keeps its UI-facing domain state (orders, cart, auth, products)
//! in reducers: pure functions that compute the next state from the current
//! state and an action, and describe any asynchronous work as [`Effect`]
//! values instead of performing it.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for one slice of the storefront
//! - **Action**: Tagged intent or outcome (request started, succeeded, failed)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Example
//!
//! ```ignore
//! use storefront_core::*;
//!
//! impl Reducer for CartReducer {
//!     type State = CartState;
//!     type Action = Action;
//!     type Environment = ClientEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CartState,
//!         action: Action,
//!         env: &ClientEnvironment,
//!     ) -> SmallVec<[Effect<Action>; 4]> {
//!         *state = cart_transition(state, &action);
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub use effect::Effect;
pub use reducer::Reducer;

/// Reducer composition (`combine_reducers`, `scope_reducer`)
pub mod composition;

/// Declarative macros for building effects (`async_effect!`)
pub mod effect_macros;

pub mod model;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all state-transition logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for NewOrderReducer {
    ///     type State = NewOrderState;
    ///     type Action = Action;
    ///     type Environment = ClientEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut NewOrderState,
    ///         action: Action,
    ///         env: &ClientEnvironment,
    ///     ) -> SmallVec<[Effect<Action>; 4]> {
    ///         match action {
    ///             Action::CreateOrderRequest(order) => {
    ///                 state.loading = true;
    ///                 smallvec![create_order_effect(env, order)]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// Slice of state this reducer owns
        type State;

        /// Actions it reacts to (usually the app-wide action enum)
        type Action;

        /// Dependencies its effects call into
        type Environment;

        /// Apply `action` to `state` in place and describe follow-up work.
        ///
        /// Must not perform I/O: anything asynchronous goes into the returned
        /// effects, which the runtime executes and whose resulting actions it
        /// feeds back. Actions the reducer does not handle leave `state`
        /// untouched.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - descriptions of asynchronous work
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Work requested by a reducer, run later by the store.
    ///
    /// A request action typically yields one [`Effect::Future`] that calls
    /// the API and resolves to the matching success or fail action.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Async computation; a `Some` result is dispatched back into the store
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, SystemClock};

    #[test]
    fn merge_wraps_effects_in_parallel() {
        let merged: Effect<u8> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(matches!(merged, Effect::Parallel(ref inner) if inner.len() == 2));
        assert!(!merged.is_none());
    }

    #[test]
    fn future_effect_debug_hides_future() {
        let effect: Effect<u8> = Effect::Future(Box::pin(async { Some(1) }));
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
