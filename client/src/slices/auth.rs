//! Auth slice: login, registration, session reload and logout.

use crate::actions::Action;
use crate::environment::ClientEnvironment;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_core::model::User;
use storefront_core::{Effect, Reducer, SmallVec, async_effect, smallvec};

/// Who is logged in, if anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    /// An auth request is in flight.
    pub loading: bool,
    /// A user session is active.
    pub is_authenticated: bool,
    /// The logged-in user.
    pub user: Option<User>,
    /// Last failure message.
    pub error: Option<String>,
}

/// Next auth state for an action.
#[must_use]
pub fn reduce(state: &AuthState, action: &Action) -> AuthState {
    match action {
        Action::LoginRequest(_) | Action::RegisterUserRequest(_) | Action::LoadUserRequest => {
            AuthState {
                loading: true,
                is_authenticated: false,
                ..AuthState::default()
            }
        },
        Action::LoginSuccess(user)
        | Action::RegisterUserSuccess(user)
        | Action::LoadUserSuccess(user) => AuthState {
            loading: false,
            is_authenticated: true,
            user: Some(user.clone()),
            ..state.clone()
        },
        Action::LogoutSuccess => AuthState {
            loading: false,
            is_authenticated: false,
            user: None,
            ..state.clone()
        },
        Action::LoginFail(message)
        | Action::RegisterUserFail(message)
        | Action::LoadUserFail(message) => AuthState {
            loading: false,
            is_authenticated: false,
            user: None,
            error: Some(message.clone()),
        },
        Action::LogoutFail(message) => AuthState {
            error: Some(message.clone()),
            ..state.clone()
        },
        Action::ClearErrors => AuthState {
            error: None,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// Reducer for [`AuthState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = Action;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut AuthState,
        action: Action,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<Action>; 4]> {
        *state = reduce(state, &action);

        let api = Arc::clone(&env.api);
        let effect = match action {
            Action::LoginRequest(credentials) => async_effect! {
                call: api.login(credentials),
                on_success: |user| Some(Action::LoginSuccess(user)),
                on_error: |error| Some(Action::LoginFail(error.to_string()))
            },
            Action::RegisterUserRequest(user) => async_effect! {
                call: api.register(user),
                on_success: |user| Some(Action::RegisterUserSuccess(user)),
                on_error: |error| Some(Action::RegisterUserFail(error.to_string()))
            },
            Action::LoadUserRequest => async_effect! {
                call: api.load_user(),
                on_success: |user| Some(Action::LoadUserSuccess(user)),
                on_error: |error| Some(Action::LoadUserFail(error.to_string()))
            },
            Action::LogoutRequest => async_effect! {
                call: api.logout(),
                on_success: |_done| Some(Action::LogoutSuccess),
                on_error: |error| Some(Action::LogoutFail(error.to_string()))
            },
            _ => Effect::None,
        };

        smallvec![effect]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::MockStorefrontApi;
    use storefront_core::{DateTime, Utc};
    use storefront_core::model::{Credentials, NewUser};
    use storefront_testing::{ReducerTest, assertions, run_effects};
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::from_u128(1),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "user".to_string(),
            created_at: DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap(),
        }
    }

    fn credentials(password: &str) -> Credentials {
        Credentials {
            email: "ada@example.com".to_string(),
            password: password.to_string(),
        }
    }

    fn env_with_user() -> ClientEnvironment {
        ClientEnvironment::new(Arc::new(MockStorefrontApi::new().with_user(user(), "secret123")))
    }

    #[test]
    fn requests_reset_to_loading_anonymous() {
        let state = AuthState {
            is_authenticated: true,
            user: Some(user()),
            ..AuthState::default()
        };

        for action in [
            Action::LoginRequest(credentials("x")),
            Action::RegisterUserRequest(NewUser::default()),
            Action::LoadUserRequest,
        ] {
            let next = reduce(&state, &action);
            assert!(next.loading);
            assert!(!next.is_authenticated);
            assert!(next.user.is_none());
        }
    }

    #[test]
    fn success_authenticates() {
        let next = reduce(&AuthState::default(), &Action::LoginSuccess(user()));
        assert!(!next.loading);
        assert!(next.is_authenticated);
        assert_eq!(next.user, Some(user()));
    }

    #[test]
    fn fail_clears_user_and_records_error() {
        let state = AuthState {
            loading: true,
            ..AuthState::default()
        };
        let next = reduce(&state, &Action::LoadUserFail("Login first".to_string()));
        assert_eq!(
            next,
            AuthState {
                error: Some("Login first".to_string()),
                ..AuthState::default()
            }
        );
    }

    #[test]
    fn logout_fail_keeps_session() {
        let state = reduce(&AuthState::default(), &Action::LoginSuccess(user()));
        let next = reduce(&state, &Action::LogoutFail("offline".to_string()));
        assert!(next.is_authenticated);
        assert_eq!(next.error.as_deref(), Some("offline"));
    }

    #[test]
    fn logout_and_clear_errors() {
        ReducerTest::new(AuthReducer)
            .with_env(env_with_user())
            .given_state(AuthState::default())
            .when_action(Action::LoginSuccess(user()))
            .when_action(Action::LogoutFail("offline".to_string()))
            .when_action(Action::ClearErrors)
            .when_action(Action::LogoutSuccess)
            .then_state(|state| {
                assert!(!state.is_authenticated);
                assert!(state.user.is_none());
                assert!(state.error.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn login_effect_feeds_back_success() {
        let mut state = AuthState::default();
        let effects = AuthReducer.reduce(
            &mut state,
            Action::LoginRequest(credentials("secret123")),
            &env_with_user(),
        );

        let actions = run_effects(effects).await;
        assert_eq!(actions, vec![Action::LoginSuccess(user())]);
    }

    #[tokio::test]
    async fn login_effect_feeds_back_server_message() {
        let mut state = AuthState::default();
        let effects = AuthReducer.reduce(
            &mut state,
            Action::LoginRequest(credentials("wrong")),
            &env_with_user(),
        );

        let actions = run_effects(effects).await;
        assert_eq!(
            actions,
            vec![Action::LoginFail("Invalid Email or Password".to_string())]
        );
    }
}
