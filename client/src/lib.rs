//! # Storefront Client
//!
//! Client-side state for the storefront: products, cart, session and
//! orders, held in one [`StorefrontStore`] and updated only by reducers.
//!
//! UI code sends [`Action`]s. Request actions mark their slice as loading
//! and return an effect that calls the [`StorefrontApi`]; the runtime feeds
//! the outcome back as the matching `*_SUCCESS` or `*_FAIL` action, whose
//! payload for failures is the server's normalized error message.
//!
//! ## Example
//!
//! ```ignore
//! use storefront_client::{Action, ClientConfig, HttpStorefrontApi, storefront_store};
//!
//! let api = HttpStorefrontApi::from_config(&ClientConfig::from_env())?;
//! let store = storefront_store(Arc::new(api));
//!
//! store.send(Action::AllProductsRequest { keyword: None, page: 1 }).await?;
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod environment;
pub mod mock;
pub mod slices;
pub mod store;

pub use actions::Action;
pub use api::{ClientError, HttpStorefrontApi, StorefrontApi};
pub use config::ClientConfig;
pub use environment::ClientEnvironment;
pub use mock::MockStorefrontApi;
pub use store::{StorefrontReducer, StorefrontState, StorefrontStore, storefront_reducer, storefront_store};
