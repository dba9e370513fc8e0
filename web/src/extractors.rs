//! Custom Axum extractors.
//!
//! Extractors whose rejections are [`ApiError`]s, so malformed input takes
//! the same normalization path as any other fault:
//! - `ResourceId`: parse a `:id` path segment, rejecting with a cast fault
//! - `ValidJson`: JSON body, rejecting with a validation fault
//! - `CorrelationId`: request correlation ID set by the middleware
//!
//! # Example
//!
//! ```ignore
//! async fn get_product(
//!     State(state): State<AppState>,
//!     ResourceId(id): ResourceId,
//! ) -> Result<Json<ProductResponse>, ApiError> {
//!     let product = state.products.find(id).await?
//!         .ok_or_else(|| ApiError::not_found("Product not found"))?;
//!     Ok(Json(ProductResponse::new(product)))
//! }
//! ```

use crate::error::ApiError;
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Field name reported by cast faults on resource identifiers.
pub const ID_FIELD: &str = "_id";

/// Resource identifier taken from the `:id` path segment.
///
/// A segment that is not a UUID is rejected with
/// [`ApiError::Cast`] on the `_id` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::cast(ID_FIELD, rejection.body_text()))?;

        Uuid::parse_str(&raw)
            .map(Self)
            .map_err(|_| ApiError::cast(ID_FIELD, raw))
    }
}

/// JSON request body whose parse failures become validation faults.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(&rejection)),
        }
    }
}

fn json_rejection(rejection: &JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::validation("Expected request with `Content-Type: application/json`")
        },
        other => ApiError::validation(other.body_text()),
    }
}

/// Correlation ID for request tracing.
///
/// Read from the request extensions populated by
/// [`crate::middleware::correlation_id`], falling back to the
/// `X-Correlation-ID` header, or a fresh UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<CorrelationId>() {
            return Ok(*id);
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorBody;
    use axum::{Router, body::Body, http::StatusCode, routing::get, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    async fn body_of(response: axum::response::Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn id_router() -> Router {
        Router::new().route(
            "/product/:id",
            get(|ResourceId(id): ResourceId| async move { id.to_string() }),
        )
    }

    #[tokio::test]
    async fn resource_id_accepts_uuid() {
        let id = Uuid::new_v4();
        let response = id_router()
            .oneshot(
                axum::http::Request::builder()
                    .uri(format!("/product/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn resource_id_rejects_malformed_id_with_cast_fault() {
        let response = id_router()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/product/not-an-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await.message, "Resource not found. Invalid: _id");
    }

    #[derive(Deserialize)]
    struct Login {
        #[allow(dead_code)]
        email: String,
    }

    #[tokio::test]
    async fn valid_json_rejects_malformed_body_as_validation_fault() {
        let app = Router::new().route("/login", post(|ValidJson(_): ValidJson<Login>| async { "ok" }));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/json")
                    .body(Body::from("{\"email\":"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert!(!body.success);
        assert!(!body.message.is_empty());
    }

    #[tokio::test]
    async fn valid_json_requires_content_type() {
        let app = Router::new().route("/login", post(|ValidJson(_): ValidJson<Login>| async { "ok" }));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/login")
                    .body(Body::from("{\"email\":\"a@b.c\"}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await.message,
            "Expected request with `Content-Type: application/json`"
        );
    }

    #[tokio::test]
    async fn correlation_id_falls_back_to_header() {
        let id = Uuid::new_v4();
        let app = Router::new().route(
            "/",
            get(|CorrelationId(id): CorrelationId| async move { id.to_string() }),
        );

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .header(CORRELATION_ID_HEADER, id.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes, id.to_string().as_bytes());
    }
}
