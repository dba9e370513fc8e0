//! HTTP server module for the storefront.
//!
//! This module provides the Axum-based HTTP server with:
//! - Application state management
//! - Router configuration

pub mod routes;
pub mod state;

pub use routes::{API_PREFIX, build_router};
pub use state::{AppState, AppStateBuilder};
