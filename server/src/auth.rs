//! Bearer-token sessions and password storage.
//!
//! Tokens are HS256 JWTs carrying the user id and an expiry. Expiry is
//! checked against the injected [`Clock`] rather than wall time so tests can
//! move time forward.
//!
//! Passwords are stored as Argon2id PHC strings with a random salt.

use crate::server::state::AppState;
use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{PasswordHash as PhcString, SaltString, rand_core::OsRng},
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use storefront_core::model::User;
use storefront_core::{DateTime, Utc};
use storefront_web::ApiError;
use uuid::Uuid;

/// Message for requests that need a session but carry no token.
pub const LOGIN_REQUIRED: &str = "Login first to access this resource.";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: Uuid,
    exp: i64,
}

/// Issues and verifies session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Service signing with `secret`, tokens valid for `ttl_secs`.
    #[must_use]
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    /// Sign a token for `user` issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Internal`] if signing fails.
    pub fn issue(&self, user: Uuid, now: DateTime<Utc>) -> Result<String, ApiError> {
        let claims = Claims {
            id: user,
            exp: now.timestamp() + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(e.into()))
    }

    /// User id carried by a valid, unexpired token.
    ///
    /// # Errors
    ///
    /// - [`ApiError::ExpiredToken`] when the token is past its expiry at `now`.
    /// - [`ApiError::InvalidToken`] for any malformed or badly signed token.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, ApiError> {
        let claims = match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => data.claims,
            Err(error) => match error.kind() {
                ErrorKind::ExpiredSignature => return Err(ApiError::ExpiredToken),
                _ => return Err(ApiError::InvalidToken),
            },
        };

        if claims.exp <= now.timestamp() {
            return Err(ApiError::ExpiredToken);
        }
        Ok(claims.id)
    }
}

/// A salted Argon2id password hash in PHC string form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    phc: String,
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

impl PasswordHash {
    /// Hash `password` under a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns an internal fault if hashing fails.
    pub fn new(password: &str) -> Result<Self, ApiError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?
            .to_string();
        Ok(Self { phc })
    }

    /// Whether `password` matches this hash.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        PhcString::new(&self.phc).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

/// Token from an `Authorization: Bearer <token>` header, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The user owning the request's bearer token.
///
/// Rejects with 401 when no token is sent or its user no longer exists, and
/// with the token faults when the token does not verify.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| ApiError::unauthorized(LOGIN_REQUIRED))?;
        let id = state.tokens.verify(token, state.clock.now())?;

        let user = state
            .users
            .find(id)
            .await
            .ok_or_else(|| ApiError::unauthorized(LOGIN_REQUIRED))?;

        tracing::debug!(user_id = %user.id, "Request authenticated");
        Ok(Self(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;
    use chrono::Duration;
    use storefront_core::environment::Clock;
    use storefront_testing::test_clock;

    fn service() -> TokenService {
        TokenService::new("test-secret", 3600)
    }

    #[test]
    fn issued_token_verifies_to_its_user() {
        let clock = test_clock();
        let user = Uuid::from_u128(42);
        let token = service().issue(user, clock.now()).unwrap();
        assert_eq!(service().verify(&token, clock.now()).unwrap(), user);
    }

    #[test]
    fn token_expires_after_ttl() {
        let clock = test_clock();
        let token = service().issue(Uuid::from_u128(1), clock.now()).unwrap();
        clock.advance(Duration::seconds(3600));
        assert!(matches!(
            service().verify(&token, clock.now()),
            Err(ApiError::ExpiredToken)
        ));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let clock = test_clock();
        let token = TokenService::new("other-secret", 3600)
            .issue(Uuid::from_u128(1), clock.now())
            .unwrap();
        assert!(matches!(
            service().verify(&token, clock.now()),
            Err(ApiError::InvalidToken)
        ));
        assert!(matches!(
            service().verify("not.a.jwt", clock.now()),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = PasswordHash::new("secret123").unwrap();
        assert!(hash.verify("secret123"));
        assert!(!hash.verify("secret124"));
        assert!(hash.phc.starts_with("$argon2id$"));
        assert_ne!(hash, PasswordHash::new("secret123").unwrap());
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }

    #[test]
    fn bearer_token_parsing() {
        let (parts, ()) = Request::builder()
            .header(AUTHORIZATION, "Bearer abc.def")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts), Some("abc.def"));

        let (parts, ()) = Request::builder()
            .header(AUTHORIZATION, "Basic abc")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts), None);

        let (parts, ()) = Request::builder().body(()).unwrap().into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}
