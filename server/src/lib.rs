//! Storefront REST API server.
//!
//! Catalogue browsing, accounts with bearer-token sessions, and order
//! placement over in-memory repositories. Every fault a handler raises is an
//! [`storefront_web::ApiError`] and reaches the client as
//! `{success:false, message}`.
//!
//! # Example
//!
//! ```ignore
//! use storefront_server::{config::Config, server::{AppState, build_router}};
//!
//! let config = Config::from_env();
//! let app = build_router(AppState::in_memory(&config)?);
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod auth;
pub mod config;
pub mod repositories;
pub mod server;
