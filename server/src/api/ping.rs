//! Uptime ping.
//!
//! `GET /ping` fetches the configured server URL and reports the outcome.
//! An external pinger hits this route to keep the deployment awake.

use crate::server::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body returned when the downstream answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingSuccess {
    /// `Ping successful`.
    pub message: String,
    /// Downstream body, as JSON when it parses, otherwise as a string.
    pub data: Value,
}

/// Body returned when the downstream could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingFailure {
    /// `Ping failed`.
    pub message: String,
    /// Why the request failed.
    pub error: String,
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<Value, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    let text = response.text().await?;
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// Ping the configured server URL.
pub async fn ping(State(state): State<AppState>) -> Response {
    match fetch(&state.http, &state.server_url).await {
        Ok(data) => (
            StatusCode::OK,
            Json(PingSuccess {
                message: "Ping successful".to_string(),
                data,
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::warn!(url = %state.server_url, error = %error, "Ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PingFailure {
                    message: "Ping failed".to_string(),
                    error: error.to_string(),
                }),
            )
                .into_response()
        },
    }
}
