//! The storefront REST API as seen by the client.
//!
//! Reducers never talk HTTP themselves: they return effects that call a
//! [`StorefrontApi`] taken from the environment. [`HttpStorefrontApi`] is the
//! production implementation; tests inject their own.

use crate::config::ClientConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use storefront_core::model::{
    Credentials, NewOrder, NewUser, Order, Product, ProductsPage, User,
};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors returned by [`StorefrontApi`] calls.
///
/// The `Display` form is what slices store as their `error`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with its normalized error body.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the `{success:false, message}` body.
        message: String,
    },

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// HTTP status of an API error, `None` for transport failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// Operations the storefront slices need from the server.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// One page of products, optionally filtered by keyword.
    async fn products(&self, keyword: Option<String>, page: u32) -> Result<ProductsPage, ClientError>;

    /// One product.
    async fn product(&self, id: Uuid) -> Result<Product, ClientError>;

    /// Log in, keeping the session token for later calls.
    async fn login(&self, credentials: Credentials) -> Result<User, ClientError>;

    /// Register and log in.
    async fn register(&self, user: NewUser) -> Result<User, ClientError>;

    /// The user owning the current session.
    async fn load_user(&self) -> Result<User, ClientError>;

    /// End the session.
    async fn logout(&self) -> Result<(), ClientError>;

    /// Place an order for the current user.
    async fn create_order(&self, order: NewOrder) -> Result<Order, ClientError>;

    /// Orders of the current user.
    async fn my_orders(&self) -> Result<Vec<Order>, ClientError>;

    /// One order of the current user.
    async fn order_details(&self, id: Uuid) -> Result<Order, ClientError>;
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    message: String,
}

#[derive(Deserialize)]
struct ProductEnvelope {
    product: Product,
}

#[derive(Deserialize)]
struct AuthEnvelope {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct OrderEnvelope {
    order: Order,
}

#[derive(Deserialize)]
struct OrdersEnvelope {
    orders: Vec<Order>,
}

/// [`StorefrontApi`] over HTTP with `reqwest`.
///
/// The bearer token returned by login or registration is held in memory and
/// sent with every later request until logout.
#[derive(Debug)]
pub struct HttpStorefrontApi {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpStorefrontApi {
    /// Client for the API rooted at `base_url`, e.g. `http://localhost:4000/api/v1`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Same as [`HttpStorefrontApi::new`] with a preconfigured `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Client built from [`ClientConfig`], with its request timeout applied.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session token is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ClientError> {
        let response = self.authorized(request).await.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorEnvelope>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string(),
        };
        tracing::debug!(status = status.as_u16(), %message, "API call rejected");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn start_session(&self, envelope: AuthEnvelope) -> User {
        *self.token.write().await = Some(envelope.token);
        envelope.user
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn products(&self, keyword: Option<String>, page: u32) -> Result<ProductsPage, ClientError> {
        let mut query = vec![("page", page.to_string())];
        if let Some(keyword) = keyword.filter(|k| !k.is_empty()) {
            query.push(("keyword", keyword));
        }
        self.send(self.client.get(self.url("/products")).query(&query))
            .await
    }

    async fn product(&self, id: Uuid) -> Result<Product, ClientError> {
        let envelope: ProductEnvelope = self
            .send(self.client.get(self.url(&format!("/product/{id}"))))
            .await?;
        Ok(envelope.product)
    }

    async fn login(&self, credentials: Credentials) -> Result<User, ClientError> {
        let envelope: AuthEnvelope = self
            .send(self.client.post(self.url("/login")).json(&credentials))
            .await?;
        Ok(self.start_session(envelope).await)
    }

    async fn register(&self, user: NewUser) -> Result<User, ClientError> {
        let envelope: AuthEnvelope = self
            .send(self.client.post(self.url("/register")).json(&user))
            .await?;
        Ok(self.start_session(envelope).await)
    }

    async fn load_user(&self) -> Result<User, ClientError> {
        let envelope: UserEnvelope = self.send(self.client.get(self.url("/me"))).await?;
        Ok(envelope.user)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let _: serde_json::Value = self.send(self.client.get(self.url("/logout"))).await?;
        *self.token.write().await = None;
        Ok(())
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order, ClientError> {
        let envelope: OrderEnvelope = self
            .send(self.client.post(self.url("/order/new")).json(&order))
            .await?;
        Ok(envelope.order)
    }

    async fn my_orders(&self) -> Result<Vec<Order>, ClientError> {
        let envelope: OrdersEnvelope = self.send(self.client.get(self.url("/orders/me"))).await?;
        Ok(envelope.orders)
    }

    async fn order_details(&self, id: Uuid) -> Result<Order, ClientError> {
        let envelope: OrderEnvelope = self
            .send(self.client.get(self.url(&format!("/order/{id}"))))
            .await?;
        Ok(envelope.order)
    }
}
