//! Error normalization pipeline for the storefront API.
//!
//! Every fault raised while handling a request is an [`ApiError`], built at
//! the source of the fault with its kind already known. Handlers return
//! `Result<_, ApiError>`, so all faults funnel into the single
//! [`IntoResponse`] implementation below, which classifies the fault,
//! resolves status and message, and emits:
//!
//! ```json
//! { "success": false, "message": "Resource not found. Invalid: _id" }
//! ```
//!
//! # Classification
//!
//! | Kind                 | Status | Message                                   |
//! |----------------------|--------|-------------------------------------------|
//! | `Cast`               | 400    | `Resource not found. Invalid: <path>`     |
//! | `InvalidToken`       | 400    | `Json Web Token is invalid, Try again`    |
//! | `ExpiredToken`       | 400    | `Json Web Token is expired, Try again`    |
//! | `Validation`         | 400    | field messages joined with `, `           |
//! | `Duplicate`          | 400    | `Duplicate <field> entered`               |
//! | `Handler`            | given, default 500 | given, default `Internal Server Error` |
//! | `Internal`           | 500    | `Internal Server Error`                   |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Message used when a fault carries no message of its own.
pub const DEFAULT_MESSAGE: &str = "Internal Server Error";

/// A fault raised while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A path or body identifier could not be parsed into a resource id.
    #[error("invalid {path}: {value}")]
    Cast {
        /// Name of the offending field.
        path: String,
        /// Raw value that failed to parse.
        value: String,
    },

    /// A bearer token failed signature or format validation.
    #[error("json web token is invalid")]
    InvalidToken,

    /// A bearer token was well-formed but past its expiry.
    #[error("json web token is expired")]
    ExpiredToken,

    /// One or more request fields failed validation.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// A unique field collided with an existing record.
    #[error("duplicate {field}")]
    Duplicate {
        /// Name of the unique field.
        field: String,
    },

    /// A handler-raised fault with an optional status and message.
    #[error("{}", .message.as_deref().unwrap_or(DEFAULT_MESSAGE))]
    Handler {
        /// HTTP status, 500 when absent.
        status: Option<StatusCode>,
        /// User-facing message, [`DEFAULT_MESSAGE`] when absent.
        message: Option<String>,
    },

    /// Unexpected failure; details are logged, never sent to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// The uniform error shape every fault is rewritten into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    /// HTTP status code.
    pub status_code: u16,
    /// User-facing message.
    pub message: String,
    /// Always `false`.
    pub success: bool,
}

impl NormalizedError {
    /// Status as a [`StatusCode`], falling back to 500 for out-of-range codes.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// JSON body sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// User-facing message.
    pub message: String,
}

impl ApiError {
    /// A handler fault with explicit status and message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler {
            status: Some(status),
            message: Some(message.into()),
        }
    }

    /// A handler fault with neither status nor message.
    #[must_use]
    pub const fn bare() -> Self {
        Self::Handler {
            status: None,
            message: None,
        }
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 404 Not Found.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Cast fault for a field that failed to parse as an identifier.
    #[must_use]
    pub fn cast(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Cast {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Validation fault with a single message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Classify the fault and resolve its status and message.
    #[must_use]
    pub fn normalize(&self) -> NormalizedError {
        let (status, message) = match self {
            Self::Cast { path, .. } => (
                StatusCode::BAD_REQUEST,
                format!("Resource not found. Invalid: {path}"),
            ),
            Self::InvalidToken => (
                StatusCode::BAD_REQUEST,
                "Json Web Token is invalid, Try again".to_string(),
            ),
            Self::ExpiredToken => (
                StatusCode::BAD_REQUEST,
                "Json Web Token is expired, Try again".to_string(),
            ),
            Self::Validation(messages) => (StatusCode::BAD_REQUEST, messages.join(", ")),
            Self::Duplicate { field } => (
                StatusCode::BAD_REQUEST,
                format!("Duplicate {field} entered"),
            ),
            Self::Handler { status, message } => (
                status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message.clone().unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            ),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, DEFAULT_MESSAGE.to_string()),
        };

        NormalizedError {
            status_code: status.as_u16(),
            message,
            success: false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let normalized = self.normalize();
        let status = normalized.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        let body = ErrorBody {
            success: false,
            message: normalized.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_fault_names_the_field() {
        let normalized = ApiError::cast("id", "abc").normalize();
        assert_eq!(normalized.status_code, 400);
        assert_eq!(normalized.message, "Resource not found. Invalid: id");
        assert!(!normalized.success);
    }

    #[test]
    fn invalid_token_has_fixed_message() {
        let normalized = ApiError::InvalidToken.normalize();
        assert_eq!(normalized.status_code, 400);
        assert_eq!(normalized.message, "Json Web Token is invalid, Try again");
    }

    #[test]
    fn expired_token_has_fixed_message() {
        let normalized = ApiError::ExpiredToken.normalize();
        assert_eq!(normalized.status_code, 400);
        assert_eq!(normalized.message, "Json Web Token is expired, Try again");
    }

    #[test]
    fn bare_fault_defaults_to_internal_server_error() {
        let normalized = ApiError::bare().normalize();
        assert_eq!(normalized.status_code, 500);
        assert_eq!(normalized.message, "Internal Server Error");
    }

    #[test]
    fn partial_faults_fill_in_the_missing_half() {
        let only_status = ApiError::Handler {
            status: Some(StatusCode::NOT_FOUND),
            message: None,
        };
        assert_eq!(only_status.normalize().status_code, 404);
        assert_eq!(only_status.normalize().message, DEFAULT_MESSAGE);

        let only_message = ApiError::Handler {
            status: None,
            message: Some("disk full".to_string()),
        };
        assert_eq!(only_message.normalize().status_code, 500);
        assert_eq!(only_message.normalize().message, "disk full");
    }

    #[test]
    fn handler_fault_passes_through() {
        let normalized = ApiError::not_found("Product not found").normalize();
        assert_eq!(normalized.status_code, 404);
        assert_eq!(normalized.message, "Product not found");
    }

    #[test]
    fn validation_messages_are_joined() {
        let err = ApiError::Validation(vec![
            "Please enter your name".to_string(),
            "Please enter your email".to_string(),
        ]);
        assert_eq!(
            err.normalize().message,
            "Please enter your name, Please enter your email"
        );
    }

    #[test]
    fn duplicate_names_the_field() {
        let err = ApiError::Duplicate {
            field: "email".to_string(),
        };
        assert_eq!(err.normalize().message, "Duplicate email entered");
        assert_eq!(err.normalize().status_code, 400);
    }

    #[test]
    fn internal_error_hides_details() {
        let err = ApiError::from(anyhow::anyhow!("connection refused"));
        let normalized = err.normalize();
        assert_eq!(normalized.status_code, 500);
        assert_eq!(normalized.message, DEFAULT_MESSAGE);
    }

    #[test]
    fn normalized_error_serializes_camel_case() {
        let json = serde_json::to_value(ApiError::InvalidToken.normalize()).unwrap_or_default();
        assert_eq!(json["statusCode"], 400);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn response_carries_status_and_body() {
        let response = ApiError::cast("_id", "zzz").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap_or(ErrorBody {
            success: true,
            message: String::new(),
        });
        assert_eq!(
            body,
            ErrorBody {
                success: false,
                message: "Resource not found. Invalid: _id".to_string(),
            }
        );
    }
}
