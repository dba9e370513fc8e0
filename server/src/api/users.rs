//! Account endpoints.
//!
//! - POST /api/v1/register - Create an account and start a session
//! - POST /api/v1/login - Start a session
//! - GET /api/v1/logout - End the session
//! - GET /api/v1/me - Profile of the session's user (requires auth)

use crate::auth::{AuthUser, PasswordHash};
use crate::repositories::UserRecord;
use crate::server::state::AppState;
use axum::{Json, extract::State};
use serde::Serialize;
use storefront_core::model::{Credentials, NewUser, User};
use storefront_web::{ApiError, ValidJson};
use uuid::Uuid;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Longest accepted name.
pub const MAX_NAME_LEN: usize = 30;

/// Response carrying a fresh session token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Always `true`.
    pub success: bool,
    /// Bearer token for later requests.
    pub token: String,
    /// The account.
    pub user: User,
}

/// Profile response.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// Always `true`.
    pub success: bool,
    /// The account.
    pub user: User,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Always `true`.
    pub success: bool,
    /// What happened.
    pub message: String,
}

/// Field messages for a registration, empty when it is acceptable.
fn registration_errors(user: &NewUser) -> Vec<String> {
    let mut errors = Vec::new();

    let name = user.name.trim();
    if name.is_empty() {
        errors.push("Please enter your name".to_string());
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push(format!("Your name cannot exceed {MAX_NAME_LEN} characters"));
    }

    let email = user.email.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if email.is_empty() {
        errors.push("Please enter your email".to_string());
    } else if !well_formed {
        errors.push("Please enter valid email address".to_string());
    }

    if user.password.is_empty() {
        errors.push("Please enter your password".to_string());
    } else if user.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Your password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }

    errors
}

/// Register an account.
///
/// # Errors
///
/// - Validation fault listing every rejected field.
/// - Duplicate fault when the email is taken.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(new_user): ValidJson<NewUser>,
) -> Result<Json<AuthResponse>, ApiError> {
    let errors = registration_errors(&new_user);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let user = User {
        id: Uuid::new_v4(),
        name: new_user.name.trim().to_string(),
        email: new_user.email.trim().to_string(),
        role: "user".to_string(),
        created_at: state.clock.now(),
    };

    state
        .users
        .insert(UserRecord {
            user: user.clone(),
            password: PasswordHash::new(&new_user.password)?,
        })
        .await?;

    let token = state.tokens.issue(user.id, state.clock.now())?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(AuthResponse {
        success: true,
        token,
        user,
    }))
}

/// Log in.
///
/// # Errors
///
/// - 400 when email or password is missing.
/// - 401 when they do not match an account.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(credentials): ValidJson<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(ApiError::bad_request("Please enter email & password"));
    }

    let record = state
        .users
        .find_by_email(credentials.email.trim())
        .await
        .filter(|record| record.password.verify(&credentials.password))
        .ok_or_else(|| ApiError::unauthorized("Invalid Email or Password"))?;

    let token = state.tokens.issue(record.user.id, state.clock.now())?;
    tracing::info!(user_id = %record.user.id, "User logged in");

    Ok(Json(AuthResponse {
        success: true,
        token,
        user: record.user,
    }))
}

/// Log out.
///
/// Tokens are stateless, so this only acknowledges; the client drops its
/// token.
#[allow(clippy::unused_async)]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        success: true,
        message: "Logged out".to_string(),
    })
}

/// Profile of the session's user.
#[allow(clippy::unused_async)]
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        success: true,
        user,
    })
}
