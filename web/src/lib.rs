//! Axum integration for the storefront API.
//!
//! Handlers stay thin: they extract input, call into repositories and
//! return `Result<_, ApiError>`. Every fault, whether raised by a handler,
//! an extractor rejection, an unknown route or a panic, is rewritten by the
//! same pipeline into one response shape:
//!
//! ```json
//! { "success": false, "message": "..." }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use storefront_web::{ApiError, ResourceId};
//! use axum::{Router, routing::get, Json};
//!
//! async fn get_product(
//!     State(state): State<AppState>,
//!     ResourceId(id): ResourceId,
//! ) -> Result<Json<ProductResponse>, ApiError> {
//!     let product = state.products.find(id).await?
//!         .ok_or_else(|| ApiError::not_found("Product not found"))?;
//!     Ok(Json(ProductResponse { success: true, product }))
//! }
//!
//! let app = Router::new()
//!     .route("/api/v1/product/:id", get(get_product))
//!     .fallback(storefront_web::middleware::route_not_found)
//!     .with_state(app_state);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::{ApiError, DEFAULT_MESSAGE, ErrorBody, NormalizedError};
pub use extractors::{CorrelationId, ResourceId, ValidJson};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer, panic_response, route_not_found};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, ApiError>;
