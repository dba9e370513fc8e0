//! Domain records exchanged between the storefront client and server.
//!
//! Field names follow the JSON wire format (`camelCase`, `_id` for
//! identifiers) so both sides serialize the same shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Orders whose items total more than this ship for free.
pub const FREE_SHIPPING_THRESHOLD: f64 = 200.0;

/// Flat shipping charge below [`FREE_SHIPPING_THRESHOLD`].
pub const SHIPPING_CHARGE: f64 = 25.0;

/// Tax rate applied to the items total.
pub const TAX_RATE: f64 = 0.05;

/// Product image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Identifier at the image host.
    pub public_id: String,
    /// Public URL.
    pub url: String,
}

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Long description.
    pub description: String,
    /// Catalogue category.
    pub category: String,
    /// Units in stock.
    pub stock: u32,
    /// Product images.
    #[serde(default)]
    pub images: Vec<Image>,
    /// Average rating.
    #[serde(default)]
    pub ratings: f64,
    /// Number of reviews.
    #[serde(default)]
    pub num_of_reviews: u32,
}

/// One page of the product listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsPage {
    /// Products on this page.
    pub products: Vec<Product>,
    /// Total products matching the query, across all pages.
    pub products_count: usize,
    /// Page size.
    pub res_per_page: usize,
}

/// A line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier; at most one line per product.
    pub product: Uuid,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Stock at the time it was added.
    pub stock: u32,
    /// Units requested.
    pub quantity: u32,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product: item.product,
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            quantity: item.quantity,
        }
    }
}

/// Delivery address for an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Contact phone number.
    pub phone_no: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

/// A purchased line on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product identifier.
    pub product: Uuid,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Units ordered.
    pub quantity: u32,
}

/// Payment reference returned by the payment processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Processor transaction id.
    pub id: String,
    /// Processor status, e.g. `succeeded`.
    pub status: String,
}

/// Order submitted by the client at checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewOrder {
    /// Delivery address.
    pub shipping_info: ShippingInfo,
    /// Purchased lines.
    pub order_items: Vec<OrderItem>,
    /// Payment reference.
    pub payment_info: PaymentInfo,
    /// Sum of line totals.
    pub items_price: f64,
    /// Tax on the items total.
    pub tax_price: f64,
    /// Shipping charge.
    pub shipping_price: f64,
    /// Grand total.
    pub total_price: f64,
}

impl NewOrder {
    /// Build an order from cart lines, pricing it with the storefront rules.
    #[must_use]
    pub fn from_cart(cart: &[CartItem], shipping_info: ShippingInfo, payment_info: PaymentInfo) -> Self {
        let order_items: Vec<OrderItem> = cart.iter().map(OrderItem::from).collect();
        let totals = OrderTotals::for_lines(&order_items);

        Self {
            shipping_info,
            order_items,
            payment_info,
            items_price: totals.items_price,
            tax_price: totals.tax_price,
            shipping_price: totals.shipping_price,
            total_price: totals.total_price,
        }
    }
}

/// Money totals of an order, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub items_price: f64,
    /// Tax on the items total.
    pub tax_price: f64,
    /// Shipping charge.
    pub shipping_price: f64,
    /// Grand total.
    pub total_price: f64,
}

impl OrderTotals {
    /// Price `lines`: tax at [`TAX_RATE`], free shipping above
    /// [`FREE_SHIPPING_THRESHOLD`], [`SHIPPING_CHARGE`] otherwise.
    #[must_use]
    pub fn for_lines(lines: &[OrderItem]) -> Self {
        let items_price = round_cents(
            lines
                .iter()
                .map(|line| line.price * f64::from(line.quantity))
                .sum(),
        );
        let shipping_price = if items_price > FREE_SHIPPING_THRESHOLD {
            0.0
        } else {
            SHIPPING_CHARGE
        };
        let tax_price = round_cents(items_price * TAX_RATE);

        Self {
            items_price,
            tax_price,
            shipping_price,
            total_price: round_cents(items_price + tax_price + shipping_price),
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Owner of the order.
    pub user: Uuid,
    /// Delivery address.
    pub shipping_info: ShippingInfo,
    /// Purchased lines.
    pub order_items: Vec<OrderItem>,
    /// Payment reference.
    pub payment_info: PaymentInfo,
    /// Sum of line totals.
    pub items_price: f64,
    /// Tax on the items total.
    pub tax_price: f64,
    /// Shipping charge.
    pub shipping_price: f64,
    /// Grand total.
    pub total_price: f64,
    /// Fulfilment status, `Processing` on creation.
    pub order_status: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A registered user as seen by clients. Credentials are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email, unique.
    pub email: String,
    /// Role, `user` unless promoted.
    pub role: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Login form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Registration form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

// Passwords stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
