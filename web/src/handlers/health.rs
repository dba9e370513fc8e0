//! Liveness endpoint for load balancers and monitoring.

use axum::http::StatusCode;

/// Simple health check endpoint.
///
/// Returns 200 OK while the process is serving; dependencies are not
/// checked.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
