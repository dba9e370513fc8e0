//! Catalogue endpoints.
//!
//! - GET /api/v1/products?keyword=&page= - Paged listing, four per page
//! - GET /api/v1/product/:id - One product

use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use storefront_core::model::{Product, ProductsPage};
use storefront_web::{ApiError, ResourceId};

/// Products per listing page.
pub const RES_PER_PAGE: usize = 4;

/// Query parameters for the listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Case-insensitive substring of the product name.
    pub keyword: Option<String>,
    /// 1-based page number (default: 1).
    pub page: Option<usize>,
}

/// Listing response.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    /// Always `true`.
    pub success: bool,
    /// The page.
    #[serde(flatten)]
    pub page: ProductsPage,
}

/// Single product response.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    /// Always `true`.
    pub success: bool,
    /// The product.
    pub product: Product,
}

/// List products.
///
/// # Errors
///
/// Returns a validation fault if the query string does not parse.
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductsQuery>, QueryRejection>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    let page = query.page.unwrap_or(1);

    let search = state
        .products
        .search(query.keyword.as_deref(), page, RES_PER_PAGE)
        .await;

    tracing::debug!(
        keyword = ?query.keyword,
        page,
        total = search.total,
        "Listed products"
    );

    Ok(Json(ProductsResponse {
        success: true,
        page: ProductsPage {
            products: search.products,
            products_count: search.total,
            res_per_page: RES_PER_PAGE,
        },
    }))
}

/// Get one product.
///
/// # Errors
///
/// - Cast fault when the id is malformed.
/// - 404 `Product not found` when no product has that id.
pub async fn get_product(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .products
        .find(id)
        .await
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}
