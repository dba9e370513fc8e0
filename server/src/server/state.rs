//! Application state shared by all handlers.

use crate::auth::TokenService;
use crate::config::Config;
use crate::repositories::{
    InMemoryOrders, InMemoryProducts, InMemoryUsers, OrderRepository, ProductRepository,
    UserRepository, seed_products,
};
use std::sync::Arc;
use std::time::Duration;
use storefront_core::environment::{Clock, SystemClock};

/// Dependencies injected into every handler.
///
/// Cheap to clone: everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Product catalogue.
    pub products: Arc<dyn ProductRepository>,
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Placed orders.
    pub orders: Arc<dyn OrderRepository>,
    /// Session tokens.
    pub tokens: Arc<TokenService>,
    /// Time source for tokens and order timestamps.
    pub clock: Arc<dyn Clock>,
    /// Client used by `GET /ping`.
    pub http: reqwest::Client,
    /// URL fetched by `GET /ping`.
    pub server_url: Arc<str>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("server_url", &self.server_url)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// State over in-memory repositories seeded with the starter catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if the ping HTTP client cannot be built.
    pub fn in_memory(config: &Config) -> Result<Self, reqwest::Error> {
        Self::builder(config)
            .map(|builder| builder.products(Arc::new(InMemoryProducts::new(seed_products()))))
            .map(AppStateBuilder::build)
    }

    /// Builder starting from empty in-memory repositories and the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the ping HTTP client cannot be built.
    pub fn builder(config: &Config) -> Result<AppStateBuilder, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ping.timeout_secs))
            .build()?;

        Ok(AppStateBuilder {
            state: Self {
                products: Arc::new(InMemoryProducts::default()),
                users: Arc::new(InMemoryUsers::new()),
                orders: Arc::new(InMemoryOrders::new()),
                tokens: Arc::new(TokenService::new(
                    &config.auth.jwt_secret,
                    config.auth.jwt_expires_secs,
                )),
                clock: Arc::new(SystemClock),
                http,
                server_url: config.ping.server_url.as_str().into(),
            },
        })
    }
}

/// Swaps individual dependencies of an [`AppState`].
#[derive(Debug)]
pub struct AppStateBuilder {
    state: AppState,
}

impl AppStateBuilder {
    /// Use `products` as the catalogue.
    #[must_use]
    pub fn products(mut self, products: Arc<dyn ProductRepository>) -> Self {
        self.state.products = products;
        self
    }

    /// Use `users` for accounts.
    #[must_use]
    pub fn users(mut self, users: Arc<dyn UserRepository>) -> Self {
        self.state.users = users;
        self
    }

    /// Use `orders` for orders.
    #[must_use]
    pub fn orders(mut self, orders: Arc<dyn OrderRepository>) -> Self {
        self.state.orders = orders;
        self
    }

    /// Use `clock` as the time source.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.state.clock = clock;
        self
    }

    /// Ping `server_url` instead of the configured one.
    #[must_use]
    pub fn server_url(mut self, server_url: &str) -> Self {
        self.state.server_url = server_url.into();
        self
    }

    /// Finished state.
    #[must_use]
    pub fn build(self) -> AppState {
        self.state
    }
}
