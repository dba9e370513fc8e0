//! Catalogue slices: the product listing and a single product's details.

use crate::actions::Action;
use crate::environment::ClientEnvironment;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storefront_core::model::Product;
use storefront_core::{Effect, Reducer, SmallVec, async_effect, smallvec};

/// The current page of the product listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsState {
    /// A listing request is in flight.
    pub loading: bool,
    /// Products on the current page.
    pub products: Vec<Product>,
    /// Products matching the query across all pages.
    pub products_count: usize,
    /// Page size reported by the server.
    pub res_per_page: usize,
    /// Last failure message.
    pub error: Option<String>,
}

impl ProductsState {
    /// Number of pages for the current query.
    #[must_use]
    pub fn page_count(&self) -> usize {
        if self.res_per_page == 0 {
            return 0;
        }
        self.products_count.div_ceil(self.res_per_page)
    }
}

/// Next listing state for an action.
#[must_use]
pub fn reduce_products(state: &ProductsState, action: &Action) -> ProductsState {
    match action {
        Action::AllProductsRequest { .. } => ProductsState {
            loading: true,
            ..ProductsState::default()
        },
        Action::AllProductsSuccess(page) => ProductsState {
            loading: false,
            products: page.products.clone(),
            products_count: page.products_count,
            res_per_page: page.res_per_page,
            error: None,
        },
        Action::AllProductsFail(message) => ProductsState {
            loading: false,
            error: Some(message.clone()),
            ..ProductsState::default()
        },
        Action::ClearErrors => ProductsState {
            error: None,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// Reducer for [`ProductsState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductsReducer;

impl Reducer for ProductsReducer {
    type State = ProductsState;
    type Action = Action;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut ProductsState,
        action: Action,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<Action>; 4]> {
        *state = reduce_products(state, &action);

        match action {
            Action::AllProductsRequest { keyword, page } => {
                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    call: api.products(keyword, page),
                    on_success: |page| Some(Action::AllProductsSuccess(page)),
                    on_error: |error| Some(Action::AllProductsFail(error.to_string()))
                }]
            },
            _ => smallvec![Effect::None],
        }
    }
}

/// The product being viewed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDetailsState {
    /// A details request is in flight.
    pub loading: bool,
    /// The loaded product.
    pub product: Option<Product>,
    /// Last failure message.
    pub error: Option<String>,
}

/// Next details state for an action.
#[must_use]
pub fn reduce_product_details(state: &ProductDetailsState, action: &Action) -> ProductDetailsState {
    match action {
        Action::ProductDetailsRequest { .. } => ProductDetailsState {
            loading: true,
            ..state.clone()
        },
        Action::ProductDetailsSuccess(product) => ProductDetailsState {
            loading: false,
            product: Some(product.clone()),
            error: None,
        },
        Action::ProductDetailsFail(message) => ProductDetailsState {
            loading: false,
            error: Some(message.clone()),
            ..state.clone()
        },
        Action::ClearErrors => ProductDetailsState {
            error: None,
            ..state.clone()
        },
        _ => state.clone(),
    }
}

/// Reducer for [`ProductDetailsState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductDetailsReducer;

impl Reducer for ProductDetailsReducer {
    type State = ProductDetailsState;
    type Action = Action;
    type Environment = ClientEnvironment;

    fn reduce(
        &self,
        state: &mut ProductDetailsState,
        action: Action,
        env: &ClientEnvironment,
    ) -> SmallVec<[Effect<Action>; 4]> {
        *state = reduce_product_details(state, &action);

        match action {
            Action::ProductDetailsRequest { id } => {
                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    call: api.product(id),
                    on_success: |product| Some(Action::ProductDetailsSuccess(product)),
                    on_error: |error| Some(Action::ProductDetailsFail(error.to_string()))
                }]
            },
            _ => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::mock::MockStorefrontApi;
    use storefront_core::model::ProductsPage;
    use storefront_testing::run_effects;
    use uuid::Uuid;

    fn product(n: u128, name: &str) -> Product {
        Product {
            id: Uuid::from_u128(n),
            name: name.to_string(),
            price: 10.0,
            description: String::new(),
            category: "Electronics".to_string(),
            stock: 5,
            images: vec![],
            ratings: 0.0,
            num_of_reviews: 0,
        }
    }

    fn env() -> ClientEnvironment {
        let catalogue = (1..=6).map(|n| product(n, &format!("Camera {n}"))).collect();
        ClientEnvironment::new(Arc::new(
            MockStorefrontApi::new().with_products(catalogue),
        ))
    }

    #[test]
    fn listing_request_clears_previous_page() {
        let state = ProductsState {
            products: vec![product(1, "Old")],
            products_count: 1,
            res_per_page: 4,
            ..ProductsState::default()
        };

        let next = reduce_products(
            &state,
            &Action::AllProductsRequest {
                keyword: None,
                page: 2,
            },
        );
        assert!(next.loading);
        assert!(next.products.is_empty());
    }

    #[test]
    fn listing_success_and_page_count() {
        let next = reduce_products(
            &ProductsState::default(),
            &Action::AllProductsSuccess(ProductsPage {
                products: vec![product(1, "A")],
                products_count: 9,
                res_per_page: 4,
            }),
        );
        assert!(!next.loading);
        assert_eq!(next.products.len(), 1);
        assert_eq!(next.page_count(), 3);
        assert_eq!(ProductsState::default().page_count(), 0);
    }

    #[test]
    fn details_fail_keeps_loaded_product() {
        let state = ProductDetailsState {
            product: Some(product(1, "A")),
            ..ProductDetailsState::default()
        };
        let next = reduce_product_details(&state, &Action::ProductDetailsFail("gone".to_string()));
        assert!(!next.loading);
        assert_eq!(next.error.as_deref(), Some("gone"));
        assert_eq!(next.product, state.product);
    }

    #[tokio::test]
    async fn listing_effect_pages_results() {
        let mut state = ProductsState::default();
        let effects = ProductsReducer.reduce(
            &mut state,
            Action::AllProductsRequest {
                keyword: Some("camera".to_string()),
                page: 2,
            },
            &env(),
        );

        let actions = run_effects(effects).await;
        let [Action::AllProductsSuccess(page)] = actions.as_slice() else {
            panic!("unexpected actions: {actions:?}");
        };
        assert_eq!(page.products_count, 6);
        assert_eq!(page.products.len(), 2);
        assert_eq!(page.res_per_page, 4);
    }

    #[tokio::test]
    async fn details_effect_reports_not_found() {
        let mut state = ProductDetailsState::default();
        let effects = ProductDetailsReducer.reduce(
            &mut state,
            Action::ProductDetailsRequest {
                id: Uuid::from_u128(99),
            },
            &env(),
        );

        assert!(state.loading);
        let actions = run_effects(effects).await;
        assert_eq!(
            actions,
            vec![Action::ProductDetailsFail("Product not found".to_string())]
        );
    }
}
