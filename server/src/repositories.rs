//! Storage behind the handlers.
//!
//! Handlers only see the repository traits. The in-memory implementations
//! keep everything behind `tokio::sync::RwLock`s and are what the binary and
//! the tests run against.

use crate::auth::PasswordHash;
use async_trait::async_trait;
use std::collections::HashMap;
use storefront_core::model::{Image, Order, OrderItem, Product, User};
use storefront_web::ApiError;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Repository failures that carry meaning for the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A unique field already exists.
    #[error("duplicate {field}")]
    Duplicate {
        /// Name of the unique field.
        field: &'static str,
    },

    /// An order references a product that does not exist.
    #[error("product {0} not found")]
    ProductNotFound(Uuid),

    /// An order asks for more units than are in stock.
    #[error("not enough stock for {name}")]
    OutOfStock {
        /// Product name.
        name: String,
    },
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Duplicate { field } => Self::Duplicate {
                field: field.to_string(),
            },
            RepositoryError::ProductNotFound(_) => Self::not_found("Product not found"),
            RepositoryError::OutOfStock { name } => {
                Self::bad_request(format!("Not enough stock for {name}"))
            },
        }
    }
}

/// One page of a product search.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSearch {
    /// Products on the requested page.
    pub products: Vec<Product>,
    /// Matches across all pages.
    pub total: usize,
}

/// Product catalogue.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products whose name contains `keyword` (case-insensitive), paged.
    ///
    /// `page` is 1-based; page 0 is treated as page 1.
    async fn search(&self, keyword: Option<&str>, page: usize, per_page: usize) -> ProductSearch;

    /// Product by id.
    async fn find(&self, id: Uuid) -> Option<Product>;

    /// Take every line's quantity out of stock, or nothing if any line
    /// cannot be served.
    ///
    /// Returns the lines with name, price and image taken from the catalogue.
    async fn reserve_stock(&self, items: &[OrderItem]) -> Result<Vec<OrderItem>, RepositoryError>;
}

/// A user account with its credentials.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Public profile.
    pub user: User,
    /// Stored password digest.
    pub password: PasswordHash,
}

/// User accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account.
    async fn insert(&self, record: UserRecord) -> Result<(), RepositoryError>;

    /// Account by email.
    async fn find_by_email(&self, email: &str) -> Option<UserRecord>;

    /// Profile by id.
    async fn find(&self, id: Uuid) -> Option<User>;
}

/// Placed orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store a new order.
    async fn insert(&self, order: Order);

    /// Order by id.
    async fn find(&self, id: Uuid) -> Option<Order>;

    /// Orders placed by `user`, oldest first.
    async fn for_user(&self, user: Uuid) -> Vec<Order>;
}

/// In-memory [`ProductRepository`].
#[derive(Debug, Default)]
pub struct InMemoryProducts {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProducts {
    /// Catalogue holding `products` in listing order.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn search(&self, keyword: Option<&str>, page: usize, per_page: usize) -> ProductSearch {
        let keyword = keyword.unwrap_or_default().to_lowercase();
        let products = self.products.read().await;
        let matching: Vec<&Product> = products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&keyword))
            .collect();

        let skip = page.saturating_sub(1).saturating_mul(per_page);
        ProductSearch {
            total: matching.len(),
            products: matching.into_iter().skip(skip).take(per_page).cloned().collect(),
        }
    }

    async fn find(&self, id: Uuid) -> Option<Product> {
        self.products.read().await.iter().find(|p| p.id == id).cloned()
    }

    async fn reserve_stock(&self, items: &[OrderItem]) -> Result<Vec<OrderItem>, RepositoryError> {
        let mut products = self.products.write().await;

        let mut wanted: HashMap<Uuid, u32> = HashMap::new();
        let mut priced = Vec::with_capacity(items.len());
        for item in items {
            let product = products
                .iter()
                .find(|p| p.id == item.product)
                .ok_or(RepositoryError::ProductNotFound(item.product))?;
            let out_of_stock = || RepositoryError::OutOfStock {
                name: product.name.clone(),
            };

            let total = wanted
                .get(&product.id)
                .copied()
                .unwrap_or_default()
                .checked_add(item.quantity)
                .ok_or_else(out_of_stock)?;
            if product.stock < total {
                return Err(out_of_stock());
            }
            wanted.insert(product.id, total);

            priced.push(OrderItem {
                product: product.id,
                name: product.name.clone(),
                price: product.price,
                image: product
                    .images
                    .first()
                    .map_or_else(|| item.image.clone(), |image| image.url.clone()),
                quantity: item.quantity,
            });
        }

        for product in products.iter_mut() {
            if let Some(quantity) = wanted.get(&product.id) {
                product.stock -= quantity;
            }
        }
        Ok(priced)
    }
}

/// In-memory [`UserRepository`].
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUsers {
    /// No accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(&self, record: UserRecord) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|r| r.user.email.eq_ignore_ascii_case(&record.user.email))
        {
            return Err(RepositoryError::Duplicate { field: "email" });
        }
        users.push(record);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users
            .read()
            .await
            .iter()
            .find(|r| r.user.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    async fn find(&self, id: Uuid) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone())
    }
}

/// In-memory [`OrderRepository`].
#[derive(Debug, Default)]
pub struct InMemoryOrders {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrders {
    /// No orders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn insert(&self, order: Order) {
        self.orders.write().await.push(order);
    }

    async fn find(&self, id: Uuid) -> Option<Order> {
        self.orders.read().await.iter().find(|o| o.id == id).cloned()
    }

    async fn for_user(&self, user: Uuid) -> Vec<Order> {
        self.orders
            .read()
            .await
            .iter()
            .filter(|o| o.user == user)
            .cloned()
            .collect()
    }
}

/// Starter catalogue for a fresh server.
#[must_use]
pub fn seed_products() -> Vec<Product> {
    let product = |n: u128, name: &str, price: f64, category: &str, stock: u32| Product {
        id: Uuid::from_u128(n),
        name: name.to_string(),
        price,
        description: format!("{name} from the storefront catalogue"),
        category: category.to_string(),
        stock,
        images: vec![Image {
            public_id: format!("products/{n}"),
            url: format!("/images/products/{n}.jpg"),
        }],
        ratings: 0.0,
        num_of_reviews: 0,
    };

    vec![
        product(1, "Wireless Headphones", 89.99, "Headphones", 25),
        product(2, "Mirrorless Camera", 649.0, "Cameras", 8),
        product(3, "Mechanical Keyboard", 119.5, "Accessories", 40),
        product(4, "4K Monitor", 329.0, "Electronics", 12),
        product(5, "Camera Tripod", 45.0, "Cameras", 30),
        product(6, "Trail Running Shoes", 95.0, "Sports", 18),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(product: u128, quantity: u32) -> OrderItem {
        OrderItem {
            product: Uuid::from_u128(product),
            name: String::new(),
            price: 0.0,
            image: String::new(),
            quantity,
        }
    }

    #[tokio::test]
    async fn search_filters_and_pages() {
        let repo = InMemoryProducts::new(seed_products());

        let cameras = repo.search(Some("CAMERA"), 1, 4).await;
        assert_eq!(cameras.total, 2);
        assert_eq!(cameras.products.len(), 2);

        let second = repo.search(None, 2, 4).await;
        assert_eq!(second.total, 6);
        assert_eq!(second.products.len(), 2);
        assert_eq!(second.products[0].name, "Camera Tripod");

        assert_eq!(repo.search(None, 0, 4).await, repo.search(None, 1, 4).await);
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let repo = InMemoryProducts::new(seed_products());

        let page = repo.search(None, usize::MAX, 4).await;
        assert_eq!(page.total, 6);
        assert!(page.products.is_empty());
    }

    #[tokio::test]
    async fn reserve_stock_is_all_or_nothing() {
        let repo = InMemoryProducts::new(seed_products());

        let err = repo
            .reserve_stock(&[line(1, 5), line(2, 9)])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RepositoryError::OutOfStock {
                name: "Mirrorless Camera".to_string()
            }
        );
        assert_eq!(repo.find(Uuid::from_u128(1)).await.unwrap().stock, 25);

        repo.reserve_stock(&[line(1, 5), line(1, 5)]).await.unwrap();
        assert_eq!(repo.find(Uuid::from_u128(1)).await.unwrap().stock, 15);

        assert_eq!(
            repo.reserve_stock(&[line(99, 1)]).await,
            Err(RepositoryError::ProductNotFound(Uuid::from_u128(99)))
        );
    }

    #[tokio::test]
    async fn reserved_lines_carry_catalogue_prices() {
        let repo = InMemoryProducts::new(seed_products());
        let mut tampered = line(3, 2);
        tampered.name = "Free Keyboard".to_string();
        tampered.price = 0.01;

        let lines = repo.reserve_stock(&[tampered]).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Mechanical Keyboard");
        assert!((lines[0].price - 119.5).abs() < f64::EPSILON);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].image, "/images/products/3.jpg");
    }

    #[tokio::test]
    async fn overflowing_quantities_are_out_of_stock() {
        let repo = InMemoryProducts::new(seed_products());

        assert_eq!(
            repo.reserve_stock(&[line(1, 1), line(1, u32::MAX)]).await,
            Err(RepositoryError::OutOfStock {
                name: "Wireless Headphones".to_string()
            })
        );
        assert_eq!(repo.find(Uuid::from_u128(1)).await.unwrap().stock, 25);
    }

    #[test]
    fn repository_errors_map_to_api_faults() {
        let duplicate: ApiError = RepositoryError::Duplicate { field: "email" }.into();
        assert_eq!(duplicate.normalize().message, "Duplicate email entered");

        let missing: ApiError = RepositoryError::ProductNotFound(Uuid::nil()).into();
        assert_eq!(missing.normalize().status_code, 404);
    }
}
