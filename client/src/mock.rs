//! In-memory [`StorefrontApi`] for tests and demos.
//!
//! Mirrors the server's rules closely enough for reducer and store tests:
//! keyword filtering with four products per page, the same not-found and
//! authentication messages, and orders owned by the logged-in user.

use crate::api::{ClientError, StorefrontApi};
use async_trait::async_trait;
use storefront_core::model::{
    Credentials, NewOrder, NewUser, Order, Product, ProductsPage, User,
};
use storefront_core::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Products per listing page.
pub const RES_PER_PAGE: usize = 4;

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    users: Vec<(User, String)>,
    session: Option<Uuid>,
    orders: Vec<Order>,
    failure: Option<(u16, String)>,
    calls: Vec<&'static str>,
}

/// Scriptable in-memory API.
#[derive(Debug, Default)]
pub struct MockStorefrontApi {
    inner: Mutex<Inner>,
}

impl MockStorefrontApi {
    /// Empty catalogue, no users.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the catalogue.
    #[must_use]
    pub fn with_products(self, products: Vec<Product>) -> Self {
        let mut inner = self.inner.into_inner();
        inner.products = products;
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Seed a registered user with a password.
    #[must_use]
    pub fn with_user(self, user: User, password: impl Into<String>) -> Self {
        let mut inner = self.inner.into_inner();
        inner.users.push((user, password.into()));
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Make every following call fail with the given status and message.
    pub async fn fail_with(&self, status: u16, message: impl Into<String>) {
        self.inner.lock().await.failure = Some((status, message.into()));
    }

    /// Names of the operations called so far, in order.
    pub async fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().await.calls.clone()
    }

    async fn begin(&self, call: &'static str) -> Result<tokio::sync::MutexGuard<'_, Inner>, ClientError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push(call);
        match inner.failure.clone() {
            Some((status, message)) => Err(ClientError::Api { status, message }),
            None => Ok(inner),
        }
    }
}

fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: message.to_string(),
    }
}

fn current_user(inner: &Inner) -> Result<Uuid, ClientError> {
    inner
        .session
        .ok_or_else(|| api_error(401, "Login first to access this resource."))
}

#[async_trait]
impl StorefrontApi for MockStorefrontApi {
    async fn products(&self, keyword: Option<String>, page: u32) -> Result<ProductsPage, ClientError> {
        let inner = self.begin("products").await?;
        let keyword = keyword.unwrap_or_default().to_lowercase();
        let matching: Vec<&Product> = inner
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&keyword))
            .collect();

        let skip = (page.max(1) as usize - 1) * RES_PER_PAGE;
        Ok(ProductsPage {
            products_count: matching.len(),
            products: matching.into_iter().skip(skip).take(RES_PER_PAGE).cloned().collect(),
            res_per_page: RES_PER_PAGE,
        })
    }

    async fn product(&self, id: Uuid) -> Result<Product, ClientError> {
        let inner = self.begin("product").await?;
        inner
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| api_error(404, "Product not found"))
    }

    async fn login(&self, credentials: Credentials) -> Result<User, ClientError> {
        let mut inner = self.begin("login").await?;
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(api_error(400, "Please enter email & password"));
        }
        let user = inner
            .users
            .iter()
            .find(|(u, password)| u.email == credentials.email && *password == credentials.password)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| api_error(401, "Invalid Email or Password"))?;
        inner.session = Some(user.id);
        Ok(user)
    }

    async fn register(&self, user: NewUser) -> Result<User, ClientError> {
        let mut inner = self.begin("register").await?;
        if inner.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(api_error(400, "Duplicate email entered"));
        }
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            role: "user".to_string(),
            created_at: Utc::now(),
        };
        inner.session = Some(created.id);
        inner.users.push((created.clone(), user.password));
        Ok(created)
    }

    async fn load_user(&self) -> Result<User, ClientError> {
        let inner = self.begin("load_user").await?;
        let id = current_user(&inner)?;
        inner
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| api_error(404, "User not found"))
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let mut inner = self.begin("logout").await?;
        inner.session = None;
        Ok(())
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order, ClientError> {
        let mut inner = self.begin("create_order").await?;
        let user = current_user(&inner)?;
        if order.order_items.is_empty() {
            return Err(api_error(400, "Please add at least one order item"));
        }
        let created = Order {
            id: Uuid::new_v4(),
            user,
            shipping_info: order.shipping_info,
            order_items: order.order_items,
            payment_info: order.payment_info,
            items_price: order.items_price,
            tax_price: order.tax_price,
            shipping_price: order.shipping_price,
            total_price: order.total_price,
            order_status: "Processing".to_string(),
            created_at: Utc::now(),
        };
        inner.orders.push(created.clone());
        Ok(created)
    }

    async fn my_orders(&self) -> Result<Vec<Order>, ClientError> {
        let inner = self.begin("my_orders").await?;
        let user = current_user(&inner)?;
        Ok(inner.orders.iter().filter(|o| o.user == user).cloned().collect())
    }

    async fn order_details(&self, id: Uuid) -> Result<Order, ClientError> {
        let inner = self.begin("order_details").await?;
        let user = current_user(&inner)?;
        inner
            .orders
            .iter()
            .find(|o| o.id == id && o.user == user)
            .cloned()
            .ok_or_else(|| api_error(404, "No Order found with this ID"))
    }
}
